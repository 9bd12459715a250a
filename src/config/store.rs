//! Storage behaviour shared by both adapters: call deadlines and page sizes.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::PageLimits;

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Deadline for a single storage call, in seconds
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_secs: u64,

    /// Page size used when a listing does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page a listing may return
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl StoreConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_size: self.default_page_size,
            max_size: self.max_page_size,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.operation_timeout_secs == 0 || self.operation_timeout_secs > 300 {
            return Err(ValidationError::InvalidOperationTimeout);
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: default_operation_timeout(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_operation_timeout() -> u64 {
    10
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_limit_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.page_limits(), PageLimits::default());
        assert_eq!(config.operation_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn timeout_bounds() {
        for secs in [0, 301] {
            let config = StoreConfig {
                operation_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidOperationTimeout)
            );
        }
    }

    #[test]
    fn default_page_cannot_exceed_max() {
        let config = StoreConfig {
            default_page_size: 50,
            max_page_size: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPageSize));
    }
}

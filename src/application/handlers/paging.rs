//! Page-size resolution for listing queries.

use crate::domain::decision::DecisionError;

/// Default and maximum page sizes, usually taken from the store config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 100,
        }
    }
}

impl PageLimits {
    /// Absent means the default; zero is rejected; anything above the
    /// maximum is clamped to it.
    pub fn resolve(&self, requested: Option<u32>) -> Result<u32, DecisionError> {
        match requested {
            None => Ok(self.default_size),
            Some(0) => Err(DecisionError::validation("limit", "Limit must be at least 1")),
            Some(limit) => Ok(limit.min(self.max_size)),
        }
    }
}

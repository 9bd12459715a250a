//! Satisfaction value object for outcome check-ins (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Self-reported satisfaction with how a decision turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Satisfaction(u8);

impl Satisfaction {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Creates a Satisfaction from an integer, returning error if out of range.
    pub fn try_from_i32(value: i32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                "satisfaction",
                Self::MIN,
                Self::MAX,
                value,
            ))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i32 {
        self.0 as i32
    }
}

impl TryFrom<i32> for Satisfaction {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from_i32(value)
    }
}

impl From<Satisfaction> for i32 {
    fn from(s: Satisfaction) -> Self {
        s.value()
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

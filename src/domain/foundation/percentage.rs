//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number percentage between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// `part / whole` rounded to the nearest percent; zero when `whole` is zero.
    pub fn of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = part.min(whole);
        let rounded = (part * 100 + whole / 2) / whole;
        Self(rounded as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn of_rounds_to_nearest() {
        assert_eq!(Percentage::of(1, 3).value(), 33);
        assert_eq!(Percentage::of(2, 3).value(), 67);
        assert_eq!(Percentage::of(1, 2).value(), 50);
        assert_eq!(Percentage::of(3, 3), Percentage::HUNDRED);
    }

    #[test]
    fn of_empty_whole_is_zero() {
        assert_eq!(Percentage::of(0, 0), Percentage::ZERO);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::new(75).to_string(), "75%");
    }

    proptest! {
        #[test]
        fn of_never_exceeds_hundred(part in 0u64..10_000, whole in 0u64..10_000) {
            prop_assert!(Percentage::of(part, whole).value() <= 100);
        }
    }
}

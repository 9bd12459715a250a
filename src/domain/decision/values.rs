//! Enumerated tags stored on decisions and their children.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Declares a string-tagged enum with a fixed storage spelling per variant.
///
/// Generates `ALL`, `as_str`, `Display` and a `FromStr` that reports the
/// given field name on unknown input.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $tag)] $variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Storage representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    other => Err(ValidationError::invalid_format(
                        $field,
                        format!("unknown value '{}'", other),
                    )),
                }
            }
        }
    };
}

tag_enum!(
    /// Emotional state detected or reported when the decision was recorded.
    EmotionalState, field = "emotional_state" {
        Calm => "calm",
        Confident => "confident",
        Anxious => "anxious",
        Excited => "excited",
        Uncertain => "uncertain",
        Stressed => "stressed",
        Neutral => "neutral",
        Hopeful => "hopeful",
        Frustrated => "frustrated",
    }
);

tag_enum!(
    /// Why a decision was abandoned.
    AbandonReason, field = "abandon_reason" {
        NoLongerRelevant => "no_longer_relevant",
        ResolvedItself => "resolved_itself",
        CannotDecide => "cannot_decide",
        Other => "other",
    }
);

tag_enum!(
    /// Whether an entry argues for or against its option.
    ProConKind, field = "type" {
        Pro => "pro",
        Con => "con",
    }
);

//! Mouse button types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Button/key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Mouse button identifier.
///
/// Every backend maps these onto its own native button token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Parse a user-supplied button name.
    ///
    /// Matching is case-insensitive and `center` is accepted for the middle
    /// button. Anything unrecognized falls back to [`MouseButton::Left`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "right" => Self::Right,
            "middle" | "center" => Self::Middle,
            _ => Self::Left,
        }
    }

    /// Lowercase name, as accepted by [`MouseButton::from_name`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

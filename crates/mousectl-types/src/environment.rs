//! Host environment classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of desktop environment the process is running under.
///
/// Determined once when a controller is built and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentKind {
    /// Linux Wayland session: only relative virtual-device injection works.
    Wayland,
    /// Linux X11 session.
    X11,
    Windows,
    MacOs,
    /// Nothing recognisable; no backend can be chosen.
    Unknown,
}

/// How a backend for a given environment moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjectionMode {
    /// Deltas only; the cursor position cannot be read or set.
    Relative,
    /// The cursor position can be read and set directly.
    Absolute,
}

impl EnvironmentKind {
    /// Injection mode for this environment, `None` for [`EnvironmentKind::Unknown`].
    pub fn injection_mode(self) -> Option<InjectionMode> {
        match self {
            Self::Wayland => Some(InjectionMode::Relative),
            Self::X11 | Self::Windows | Self::MacOs => Some(InjectionMode::Absolute),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wayland => "wayland",
            Self::X11 => "x11",
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_modes() {
        assert_eq!(
            EnvironmentKind::Wayland.injection_mode(),
            Some(InjectionMode::Relative)
        );
        for kind in [
            EnvironmentKind::X11,
            EnvironmentKind::Windows,
            EnvironmentKind::MacOs,
        ] {
            assert_eq!(kind.injection_mode(), Some(InjectionMode::Absolute));
        }
        assert_eq!(EnvironmentKind::Unknown.injection_mode(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(EnvironmentKind::MacOs.to_string(), "macos");
        assert_eq!(EnvironmentKind::Wayland.to_string(), "wayland");
    }
}

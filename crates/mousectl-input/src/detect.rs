//! Desktop environment detection.
//!
//! The host is classified from a snapshot of a few environment signals.
//! Explicit session-type signals win over presence-only display variables,
//! since a session can inherit a stale `DISPLAY` or `WAYLAND_DISPLAY` from
//! the shell that started it.

use mousectl_types::EnvironmentKind;
use tracing::debug;

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    Windows,
    MacOs,
    Other,
}

impl HostOs {
    /// The OS this binary was compiled for.
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Other,
        }
    }
}

/// The signals the detector looks at, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSignals {
    pub os: HostOs,
    /// `XDG_SESSION_TYPE`
    pub session_type: Option<String>,
    /// `WAYLAND_DISPLAY`
    pub wayland_display: Option<String>,
    /// `DISPLAY`
    pub display: Option<String>,
}

impl EnvSignals {
    /// Read the signals from the current process environment.
    pub fn from_process() -> Self {
        Self {
            os: HostOs::current(),
            session_type: read_var("XDG_SESSION_TYPE"),
            wayland_display: read_var("WAYLAND_DISPLAY"),
            display: read_var("DISPLAY"),
        }
    }

    /// Signals for `os` with nothing else set.
    pub fn bare(os: HostOs) -> Self {
        Self {
            os,
            session_type: None,
            wayland_display: None,
            display: None,
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
}

fn is_set(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Classify the host from a signal snapshot. First match wins.
pub fn classify(signals: &EnvSignals) -> EnvironmentKind {
    match signals.os {
        HostOs::Windows => return EnvironmentKind::Windows,
        HostOs::MacOs => return EnvironmentKind::MacOs,
        HostOs::Other => return EnvironmentKind::Unknown,
        HostOs::Linux => {}
    }

    let session = signals
        .session_type
        .as_deref()
        .map(|s| s.trim().to_ascii_lowercase());
    match session.as_deref() {
        Some("wayland") => return EnvironmentKind::Wayland,
        Some("x11") => return EnvironmentKind::X11,
        _ => {}
    }

    if is_set(signals.wayland_display.as_ref()) {
        EnvironmentKind::Wayland
    } else if is_set(signals.display.as_ref()) {
        EnvironmentKind::X11
    } else {
        EnvironmentKind::Unknown
    }
}

/// Detect the environment of the running process.
pub fn detect() -> EnvironmentKind {
    let signals = EnvSignals::from_process();
    let kind = classify(&signals);
    debug!(?signals, %kind, "detected environment");
    kind
}

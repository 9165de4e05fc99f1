//! Controller errors.

use mousectl_types::EnvironmentKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(
        "unsupported environment: {0}\n\
         Run inside a Wayland or X11 session (XDG_SESSION_TYPE, WAYLAND_DISPLAY \
         or DISPLAY must be set), or on Windows or macOS."
    )]
    UnsupportedEnvironment(EnvironmentKind),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Input(#[from] mousectl_input::InputError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

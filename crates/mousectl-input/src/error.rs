//! Input subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// The native injection mechanism is missing or inaccessible.
    ///
    /// `hint` is shown to the user verbatim and says how to fix it.
    #[error("{backend} backend unavailable: {reason}\n{hint}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
        hint: String,
    },

    #[error("failed to emit event: {0}")]
    Emit(String),

    #[error("failed to read cursor position: {0}")]
    Position(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

//! Environment-aware mouse control for mousectl.
//!
//! [`MouseController`] detects the desktop environment once, opens the one
//! injection backend that fits it, and exposes a uniform set of pointer
//! operations on top. Drags are synthesised from relative steps so they
//! behave the same on every backend.

pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod setup;

pub use config::{Config, ControllerSettings};
pub use controller::MouseController;
pub use drag::DragOptions;
pub use error::ControllerError;

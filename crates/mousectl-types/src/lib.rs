//! Shared types for mousectl.
//!
//! This crate contains the types shared across the mousectl workspace:
//! mouse buttons, screen positions, relative displacements, and the
//! host environment classification used to pick an injection backend.

pub mod environment;
pub mod event;
pub mod screen;

pub use environment::{EnvironmentKind, InjectionMode};
pub use event::{ButtonState, MouseButton};
pub use screen::{Displacement, Position};

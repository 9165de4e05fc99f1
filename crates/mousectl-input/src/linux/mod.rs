//! Linux uinput backend.

mod emulation;
mod keymap;

pub use emulation::UinputBackend;

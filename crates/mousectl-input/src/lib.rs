//! Platform-abstracted mouse injection for mousectl.
//!
//! This crate defines the [`InjectionBackend`] trait that every native
//! injection mechanism implements, the environment detector that decides
//! which one applies, and the backends themselves:
//!
//! - `UinputBackend` (feature `linux`): a uinput virtual mouse. Relative
//!   motion only; works under Wayland compositors.
//! - `SimulatedBackend` (feature `simulate`): enigo-driven absolute control
//!   for X11, Windows and macOS.
//! - `MockBackend` (feature `mock`): records calls for tests.

use std::thread;
use std::time::Duration;

use mousectl_types::{Displacement, MouseButton, Position};

pub mod detect;
pub mod error;
#[cfg(all(feature = "linux", target_os = "linux"))]
pub mod linux;
#[cfg(feature = "mock")]
pub mod mock;
#[cfg(feature = "simulate")]
pub mod simulate;

pub use detect::{classify, detect, EnvSignals, HostOs};
pub use error::InputError;

/// Shortest hold between the down and up halves of a click.
pub const MIN_CLICK_HOLD: Duration = Duration::from_millis(10);

/// Injects pointer events into the host through one native mechanism.
///
/// Implementations own their native handle exclusively and close it on drop.
/// All calls block until the event has been handed to the OS.
pub trait InjectionBackend: 'static {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether [`InjectionBackend::move_to`] and [`InjectionBackend::position`]
    /// actually do anything.
    fn supports_absolute(&self) -> bool;

    /// Move the cursor by `delta` from wherever it currently is.
    fn move_relative(&mut self, delta: Displacement) -> Result<(), InputError>;

    /// Move the cursor to an absolute screen position.
    ///
    /// Relative-only backends log a warning and do nothing; this must never
    /// fail just because the backend cannot position absolutely.
    fn move_to(&mut self, target: Position) -> Result<(), InputError>;

    /// Press and hold a button.
    fn press(&mut self, button: MouseButton) -> Result<(), InputError>;

    /// Release a held button.
    fn release(&mut self, button: MouseButton) -> Result<(), InputError>;

    /// Press, hold for `hold` (at least [`MIN_CLICK_HOLD`]), release.
    fn click(&mut self, button: MouseButton, hold: Duration) -> Result<(), InputError> {
        self.press(button)?;
        thread::sleep(hold.max(MIN_CLICK_HOLD));
        self.release(button)
    }

    /// Current cursor position, or `None` when the backend cannot read it.
    fn position(&mut self) -> Result<Option<Position>, InputError>;

    /// Scroll by wheel notches. Positive `dy` scrolls down, positive `dx`
    /// scrolls right.
    fn scroll(&mut self, delta: Displacement) -> Result<(), InputError>;
}

/// Settings for virtual devices created by relative backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    /// Name the virtual device is registered under.
    pub name: String,
    /// Pause after creation so the compositor can pick up the new device
    /// before the first event arrives.
    pub settle: Duration,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            name: "mousectl virtual mouse".to_string(),
            settle: Duration::from_millis(200),
        }
    }
}

/// Open the relative (uinput) backend.
#[cfg(all(feature = "linux", target_os = "linux"))]
pub fn open_relative(settings: &DeviceSettings) -> Result<Box<dyn InjectionBackend>, InputError> {
    Ok(Box::new(linux::UinputBackend::open(settings)?))
}

/// Open the relative (uinput) backend.
#[cfg(not(all(feature = "linux", target_os = "linux")))]
pub fn open_relative(_settings: &DeviceSettings) -> Result<Box<dyn InjectionBackend>, InputError> {
    Err(InputError::BackendUnavailable {
        backend: "uinput",
        reason: "uinput support was not compiled into this build".to_string(),
        hint: "Rebuild mousectl on Linux with the `linux` feature enabled.".to_string(),
    })
}

/// Open the absolute (enigo) backend.
#[cfg(feature = "simulate")]
pub fn open_absolute() -> Result<Box<dyn InjectionBackend>, InputError> {
    Ok(Box::new(simulate::SimulatedBackend::open()?))
}

/// Open the absolute (enigo) backend.
#[cfg(not(feature = "simulate"))]
pub fn open_absolute() -> Result<Box<dyn InjectionBackend>, InputError> {
    Err(InputError::BackendUnavailable {
        backend: "enigo",
        reason: "input simulation support was not compiled into this build".to_string(),
        hint: "Rebuild mousectl with the `simulate` feature enabled.".to_string(),
    })
}

//! uinput-based mouse injection for Linux.

use std::collections::HashSet;
use std::io;
use std::thread;

use evdev::uinput::VirtualDevice;
use evdev::{AttributeSet, KeyCode as EvdevKey, RelativeAxisCode};
use mousectl_types::{ButtonState, Displacement, MouseButton, Position};
use tracing::{debug, info, warn};

use super::keymap;
use crate::error::InputError;
use crate::{DeviceSettings, InjectionBackend};

const BACKEND: &str = "uinput";

const PERMISSION_HINT: &str = "Make sure you have permissions. Run:\n  \
    sudo modprobe uinput\n  \
    sudo usermod -aG input $USER\n\
    Then log out and back in.";

const MODULE_HINT: &str = "The uinput device node is missing. Run:\n  \
    sudo modprobe uinput";

/// Relative mouse injection through a uinput virtual device.
///
/// The cursor position is owned by the compositor and cannot be read or
/// set; only deltas and button transitions are emitted.
pub struct UinputBackend {
    device: VirtualDevice,
    held: HashSet<MouseButton>,
}

impl UinputBackend {
    /// Create the virtual mouse.
    pub fn open(settings: &DeviceSettings) -> Result<Self, InputError> {
        let device = build_virtual_device(&settings.name).map_err(|e| unavailable(&e))?;
        info!(name = %settings.name, "created virtual mouse");
        if !settings.settle.is_zero() {
            thread::sleep(settings.settle);
        }
        Ok(Self {
            device,
            held: HashSet::new(),
        })
    }

    fn emit(&mut self, events: &[evdev::InputEvent]) -> Result<(), InputError> {
        if events.is_empty() {
            return Ok(());
        }
        // `emit` appends the SYN_REPORT.
        self.device
            .emit(events)
            .map_err(|e| InputError::Emit(e.to_string()))
    }

    fn button(&mut self, button: MouseButton, state: ButtonState) -> Result<(), InputError> {
        self.emit(&[keymap::button_event(button, state)])?;
        match state {
            ButtonState::Pressed => self.held.insert(button),
            ButtonState::Released => self.held.remove(&button),
        };
        debug!(%button, ?state, "injected button");
        Ok(())
    }
}

fn build_virtual_device(name: &str) -> io::Result<VirtualDevice> {
    let mut keys = AttributeSet::<EvdevKey>::new();
    keys.insert(EvdevKey::BTN_LEFT);
    keys.insert(EvdevKey::BTN_RIGHT);
    keys.insert(EvdevKey::BTN_MIDDLE);

    let mut rel = AttributeSet::<RelativeAxisCode>::new();
    rel.insert(RelativeAxisCode::REL_X);
    rel.insert(RelativeAxisCode::REL_Y);
    rel.insert(RelativeAxisCode::REL_WHEEL);
    rel.insert(RelativeAxisCode::REL_HWHEEL);

    VirtualDevice::builder()?
        .name(name)
        .with_keys(&keys)?
        .with_relative_axes(&rel)?
        .build()
}

fn unavailable(err: &io::Error) -> InputError {
    let hint = match err.kind() {
        io::ErrorKind::NotFound => MODULE_HINT,
        _ => PERMISSION_HINT,
    };
    InputError::BackendUnavailable {
        backend: BACKEND,
        reason: format!("failed to create uinput device: {err}"),
        hint: hint.to_string(),
    }
}

impl InjectionBackend for UinputBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn supports_absolute(&self) -> bool {
        false
    }

    fn move_relative(&mut self, delta: Displacement) -> Result<(), InputError> {
        self.emit(&keymap::motion_events(delta))?;
        debug!(dx = delta.dx, dy = delta.dy, "injected motion");
        Ok(())
    }

    fn move_to(&mut self, target: Position) -> Result<(), InputError> {
        warn!(
            x = target.x,
            y = target.y,
            "absolute positioning is not supported by the uinput backend; ignoring"
        );
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.button(button, ButtonState::Pressed)
    }

    fn release(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.button(button, ButtonState::Released)
    }

    fn position(&mut self) -> Result<Option<Position>, InputError> {
        Ok(None)
    }

    fn scroll(&mut self, delta: Displacement) -> Result<(), InputError> {
        self.emit(&keymap::scroll_events(delta))?;
        debug!(dx = delta.dx, dy = delta.dy, "injected scroll");
        Ok(())
    }
}

impl Drop for UinputBackend {
    fn drop(&mut self) {
        let held: Vec<MouseButton> = self.held.drain().collect();
        for button in held {
            if let Err(e) = self.emit(&[keymap::button_event(button, ButtonState::Released)]) {
                warn!(%button, error = %e, "failed to release button before closing device");
            }
        }
        info!("destroyed virtual mouse");
    }
}

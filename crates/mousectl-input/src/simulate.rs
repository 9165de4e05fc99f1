//! enigo-based absolute mouse control for X11, Windows and macOS.

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};
use mousectl_types::{Displacement, MouseButton, Position};
use tracing::{debug, info};

use crate::error::InputError;
use crate::InjectionBackend;

const BACKEND: &str = "enigo";

/// Position-aware mouse control through the platform's input simulation API.
pub struct SimulatedBackend {
    enigo: Enigo,
}

impl SimulatedBackend {
    /// Connect to the platform input API.
    pub fn open() -> Result<Self, InputError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InputError::BackendUnavailable {
                backend: BACKEND,
                reason: e.to_string(),
                hint: platform_hint().to_string(),
            })?;
        info!("connected to input simulation");
        Ok(Self { enigo })
    }

    fn location(&self) -> Result<Position, InputError> {
        let (x, y) = self
            .enigo
            .location()
            .map_err(|e| InputError::Position(e.to_string()))?;
        Ok(Position::new(x, y))
    }

    fn button(&mut self, button: MouseButton, direction: Direction) -> Result<(), InputError> {
        self.enigo
            .button(convert_button(button), direction)
            .map_err(|e| InputError::Emit(e.to_string()))?;
        debug!(%button, ?direction, "injected button");
        Ok(())
    }
}

fn convert_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn platform_hint() -> &'static str {
    if cfg!(target_os = "macos") {
        "Grant this terminal Accessibility access in System Settings > \
         Privacy & Security > Accessibility, then restart it."
    } else if cfg!(target_os = "windows") {
        "Run mousectl from an interactive desktop session."
    } else {
        "Make sure an X server is reachable through $DISPLAY and that this \
         user is allowed to connect to it (see `xhost`)."
    }
}

impl InjectionBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn supports_absolute(&self) -> bool {
        true
    }

    fn move_relative(&mut self, delta: Displacement) -> Result<(), InputError> {
        let target = self.location()?.offset(delta);
        self.enigo
            .move_mouse(target.x, target.y, Coordinate::Abs)
            .map_err(|e| InputError::Emit(e.to_string()))?;
        debug!(dx = delta.dx, dy = delta.dy, %target, "injected motion");
        Ok(())
    }

    fn move_to(&mut self, target: Position) -> Result<(), InputError> {
        self.enigo
            .move_mouse(target.x, target.y, Coordinate::Abs)
            .map_err(|e| InputError::Emit(e.to_string()))?;
        debug!(%target, "moved cursor");
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.button(button, Direction::Press)
    }

    fn release(&mut self, button: MouseButton) -> Result<(), InputError> {
        self.button(button, Direction::Release)
    }

    fn position(&mut self) -> Result<Option<Position>, InputError> {
        self.location().map(Some)
    }

    fn scroll(&mut self, delta: Displacement) -> Result<(), InputError> {
        if delta.dy != 0 {
            self.enigo
                .scroll(delta.dy, Axis::Vertical)
                .map_err(|e| InputError::Emit(e.to_string()))?;
        }
        if delta.dx != 0 {
            self.enigo
                .scroll(delta.dx, Axis::Horizontal)
                .map_err(|e| InputError::Emit(e.to_string()))?;
        }
        debug!(dx = delta.dx, dy = delta.dy, "injected scroll");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_one_to_one() {
        assert_eq!(convert_button(MouseButton::Left), Button::Left);
        assert_eq!(convert_button(MouseButton::Right), Button::Right);
        assert_eq!(convert_button(MouseButton::Middle), Button::Middle);
    }
}

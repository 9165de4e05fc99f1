//! The environment-aware mouse controller.

use std::time::Duration;

use mousectl_input::{DeviceSettings, InjectionBackend};
use mousectl_types::{Displacement, EnvironmentKind, InjectionMode, MouseButton, Position};
use tracing::info;

use crate::config::{Config, ControllerSettings};
use crate::drag::{self, DragOptions};
use crate::error::ControllerError;

/// Single entry point for mouse control.
///
/// Owns the detected environment and exactly one injection backend for its
/// whole lifetime. Dropping the controller closes the backend's native
/// handle.
pub struct MouseController {
    environment: EnvironmentKind,
    backend: Box<dyn InjectionBackend>,
    settings: ControllerSettings,
}

impl MouseController {
    /// Detect the environment and open the matching backend with default
    /// settings.
    pub fn new() -> Result<Self, ControllerError> {
        Self::from_config(&Config::default())
    }

    /// Detect the environment and open the matching backend.
    pub fn from_config(config: &Config) -> Result<Self, ControllerError> {
        let environment = mousectl_input::detect();
        info!(%environment, "detected environment");
        Self::for_environment(
            environment,
            &config.device_settings(),
            config.controller_settings(),
        )
    }

    /// Open the backend for an already classified environment.
    pub fn for_environment(
        environment: EnvironmentKind,
        device: &DeviceSettings,
        settings: ControllerSettings,
    ) -> Result<Self, ControllerError> {
        let backend = match environment.injection_mode() {
            Some(InjectionMode::Relative) => mousectl_input::open_relative(device)?,
            Some(InjectionMode::Absolute) => mousectl_input::open_absolute()?,
            None => return Err(ControllerError::UnsupportedEnvironment(environment)),
        };
        info!(%environment, backend = backend.name(), "using injection backend");
        Ok(Self::with_backend(environment, backend, settings))
    }

    /// Wrap an existing backend.
    pub fn with_backend(
        environment: EnvironmentKind,
        backend: Box<dyn InjectionBackend>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            environment,
            backend,
            settings,
        }
    }

    pub fn environment(&self) -> EnvironmentKind {
        self.environment
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn supports_absolute(&self) -> bool {
        self.backend.supports_absolute()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Move by a whole-pixel delta.
    pub fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), ControllerError> {
        self.backend.move_relative(Displacement::new(dx, dy))?;
        Ok(())
    }

    /// Move by a fractional delta, rounded half away from zero.
    pub fn move_relative_precise(&mut self, dx: f64, dy: f64) -> Result<(), ControllerError> {
        self.backend.move_relative(Displacement::rounded(dx, dy))?;
        Ok(())
    }

    /// Move to an absolute position. A no-op with a warning on relative-only
    /// backends.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<(), ControllerError> {
        self.backend.move_to(Position::new(x, y))?;
        Ok(())
    }

    pub fn click(&mut self, button: MouseButton) -> Result<(), ControllerError> {
        self.backend.click(button, self.settings.click_hold)?;
        Ok(())
    }

    pub fn press(&mut self, button: MouseButton) -> Result<(), ControllerError> {
        self.backend.press(button)?;
        Ok(())
    }

    pub fn release(&mut self, button: MouseButton) -> Result<(), ControllerError> {
        self.backend.release(button)?;
        Ok(())
    }

    /// Current cursor position; `None` when the backend cannot report one.
    pub fn get_position(&mut self) -> Result<Option<Position>, ControllerError> {
        Ok(self.backend.position()?)
    }

    pub fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), ControllerError> {
        self.backend.scroll(Displacement::new(dx, dy))?;
        Ok(())
    }

    /// Drag with the left button over `duration`, using the configured step
    /// count and settle time.
    pub fn drag(&mut self, dx: i32, dy: i32, duration: Duration) -> Result<(), ControllerError> {
        let options = self.settings.drag.with_duration(duration);
        self.drag_with(dx, dy, &options)
    }

    /// Drag with the left button using the configured pacing.
    pub fn drag_default(&mut self, dx: i32, dy: i32) -> Result<(), ControllerError> {
        let options = self.settings.drag;
        self.drag_with(dx, dy, &options)
    }

    pub fn drag_with(
        &mut self,
        dx: i32,
        dy: i32,
        options: &DragOptions,
    ) -> Result<(), ControllerError> {
        drag::run(self.backend.as_mut(), Displacement::new(dx, dy), options)?;
        Ok(())
    }
}

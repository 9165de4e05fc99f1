//! Controller configuration loaded from TOML.

use std::time::Duration;

use mousectl_input::{DeviceSettings, MIN_CLICK_HOLD};
use serde::{Deserialize, Serialize};

use crate::drag::{DragOptions, MIN_DRAG_SETTLE};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub click: ClickConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Drag gesture pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_drag_steps")]
    pub steps: u32,
    #[serde(default = "default_drag_duration_ms")]
    pub duration_ms: u64,
    /// Pause between pressing the button and the first step.
    #[serde(default = "default_drag_settle_ms")]
    pub settle_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            steps: default_drag_steps(),
            duration_ms: default_drag_duration_ms(),
            settle_ms: default_drag_settle_ms(),
        }
    }
}

/// Click timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickConfig {
    #[serde(default = "default_click_hold_ms")]
    pub hold_ms: u64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_click_hold_ms(),
        }
    }
}

/// Virtual device settings for the uinput backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_device_name")]
    pub name: String,
    #[serde(default = "default_device_settle_ms")]
    pub settle_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: default_device_name(),
            settle_ms: default_device_settle_ms(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Timing the controller applies to its composite operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub click_hold: Duration,
    pub drag: DragOptions,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Config::default().controller_settings()
    }
}

impl Config {
    /// Controller timing, with the minimum hold and settle times enforced.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            click_hold: Duration::from_millis(self.click.hold_ms).max(MIN_CLICK_HOLD),
            drag: DragOptions {
                steps: self.drag.steps.max(1),
                duration: Duration::from_millis(self.drag.duration_ms),
                settle: Duration::from_millis(self.drag.settle_ms).max(MIN_DRAG_SETTLE),
            },
        }
    }

    pub fn device_settings(&self) -> DeviceSettings {
        DeviceSettings {
            name: self.device.name.clone(),
            settle: Duration::from_millis(self.device.settle_ms),
        }
    }
}

fn default_drag_steps() -> u32 {
    20
}

fn default_drag_duration_ms() -> u64 {
    500
}

fn default_drag_settle_ms() -> u64 {
    100
}

fn default_click_hold_ms() -> u64 {
    10
}

fn default_device_name() -> String {
    "mousectl virtual mouse".to_string()
}

fn default_device_settle_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

use serde::{Deserialize, Serialize};

pub const MARKER_CLASS: &str = "touch-ripple";
pub const MOUSE_MARKER_PX: f64 = 20.0;
pub const TOUCH_MARKER_PX: f64 = 30.0;
pub const MARKER_LIFETIME_MS: u32 = 1000;

pub const BUTTON_CLASS: &str = "glow-button";
pub const BUTTON_ACTIVE_CLASS: &str = "animate-click";
pub const BUTTON_PULSE_MS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub mouse_size_px: f64,
    pub touch_size_px: f64,
    pub lifetime_ms: u32,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            mouse_size_px: MOUSE_MARKER_PX,
            touch_size_px: TOUCH_MARKER_PX,
            lifetime_ms: MARKER_LIFETIME_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerSpec {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
}

pub fn marker_at(source: PointerSource, x: f64, y: f64, settings: &MarkerSettings) -> MarkerSpec {
    let size_px = match source {
        PointerSource::Mouse => settings.mouse_size_px,
        PointerSource::Touch => settings.touch_size_px,
    };
    MarkerSpec { x, y, size_px }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonPulseSettings {
    pub selector_class: String,
    pub active_class: String,
    pub duration_ms: u32,
}

impl Default for ButtonPulseSettings {
    fn default() -> Self {
        Self {
            selector_class: BUTTON_CLASS.to_string(),
            active_class: BUTTON_ACTIVE_CLASS.to_string(),
            duration_ms: BUTTON_PULSE_MS,
        }
    }
}

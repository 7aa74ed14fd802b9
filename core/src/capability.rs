use std::fmt::Write;

use serde::{Deserialize, Serialize};

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const LOW_END_CORES: u32 = 4;

pub const REDUCED_MOTION_MARKER: &str = "reduced-motion";

/// Compositing hint applied to `body` while reduced motion is active.
pub const BODY_HINTS: &[(&str, &str)] = &[("will-change", "transform"), ("transform", "translateZ(0)")];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapabilityProbe {
    pub viewport_width: f64,
    pub hardware_concurrency: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionProfile {
    Full,
    Reduced,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
    #[default]
    Auto,
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "full" => Some(Self::Full),
            "reduced" => Some(Self::Reduced),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DurationOverride {
    pub class: String,
    pub duration_s: f64,
}

impl DurationOverride {
    fn new(class: &str, duration_s: f64) -> Self {
        Self {
            class: class.to_string(),
            duration_s,
        }
    }
}

pub fn default_overrides() -> Vec<DurationOverride> {
    vec![
        DurationOverride::new("animated-bg", 40.0),
        DurationOverride::new("floating-orb", 25.0),
        DurationOverride::new("quantum-particle", 30.0),
        DurationOverride::new("network-node", 15.0),
        DurationOverride::new("matrix-char", 15.0),
        DurationOverride::new("star", 8.0),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySettings {
    pub breakpoint_px: f64,
    pub low_end_cores: u32,
    pub overrides: Vec<DurationOverride>,
}

impl Default for CapabilitySettings {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            low_end_cores: LOW_END_CORES,
            overrides: default_overrides(),
        }
    }
}

pub fn is_low_end(probe: &CapabilityProbe, settings: &CapabilitySettings) -> bool {
    // A zero or missing count means the browser gave no hint.
    matches!(probe.hardware_concurrency, Some(cores) if cores > 0 && cores <= settings.low_end_cores)
}

pub fn is_narrow(probe: &CapabilityProbe, settings: &CapabilitySettings) -> bool {
    probe.viewport_width <= settings.breakpoint_px
}

pub fn motion_profile(
    probe: &CapabilityProbe,
    settings: &CapabilitySettings,
    preference: MotionPreference,
) -> MotionProfile {
    match preference {
        MotionPreference::Full => MotionProfile::Full,
        MotionPreference::Reduced => MotionProfile::Reduced,
        MotionPreference::Auto => {
            if is_narrow(probe, settings) || is_low_end(probe, settings) {
                MotionProfile::Reduced
            } else {
                MotionProfile::Full
            }
        }
    }
}

pub fn reduced_motion_css(overrides: &[DurationOverride]) -> String {
    let mut css = String::new();
    for rule in overrides {
        let class = rule.class.trim();
        if class.is_empty() {
            continue;
        }
        let _ = writeln!(
            css,
            ".{class} {{ animation-duration: {}s !important; }}",
            rule.duration_s
        );
    }
    css
}

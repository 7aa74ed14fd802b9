use serde::{Deserialize, Serialize};

use crate::ambient::{ConstellationSettings, MatrixSettings, MATRIX_COLUMN_PX_MIN, STAR_COUNT_MAX};
use crate::capability::{CapabilitySettings, MotionPreference};
use crate::clock::ClockSettings;
use crate::loading::LoadingSettings;
use crate::marker::{ButtonPulseSettings, MarkerSettings};
use crate::network::{NetworkSettings, NODE_COUNT_MAX};

pub const QUERY_PREFIX: &str = "fx.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("effects config is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("unknown override `{0}`")]
    UnknownKey(String),
    #[error("bad value `{value}` for `{key}`")]
    BadValue { key: String, value: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub seed: Option<u64>,
    pub motion: MotionPreference,
    pub network: NetworkSettings,
    pub matrix: MatrixSettings,
    pub constellation: ConstellationSettings,
    pub loading: LoadingSettings,
    pub capability: CapabilitySettings,
    pub markers: MarkerSettings,
    pub buttons: ButtonPulseSettings,
    pub clock: ClockSettings,
}

fn positive(value: f64) -> bool {
    value > 0.0
}

fn at_least(value: f64, min: f64) -> bool {
    value.is_finite() && value >= min
}

fn non_negative(value: f64) -> bool {
    value >= 0.0
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

impl EffectsConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.node_count > NODE_COUNT_MAX {
            return Err(invalid("network.node_count", "must be at most 200"));
        }
        if self.network.refresh_ms == 0 {
            return Err(invalid("network.refresh_ms", "must be positive"));
        }
        if !non_negative(self.network.link_threshold) {
            return Err(invalid("network.link_threshold", "must not be negative"));
        }
        if self.matrix.refresh_ms == 0 {
            return Err(invalid("matrix.refresh_ms", "must be positive"));
        }
        if !at_least(self.matrix.column_px, MATRIX_COLUMN_PX_MIN) {
            return Err(invalid("matrix.column_px", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.matrix.density) {
            return Err(invalid("matrix.density", "must be within 0..=1"));
        }
        if self.constellation.star_count > STAR_COUNT_MAX {
            return Err(invalid("constellation.star_count", "must be at most 500"));
        }
        if self.loading.tick_ms == 0 {
            return Err(invalid("loading.tick_ms", "must be positive"));
        }
        if !positive(self.loading.increment_min) {
            return Err(invalid("loading.increment_min", "must be positive"));
        }
        if self.loading.increment_max < self.loading.increment_min {
            return Err(invalid("loading.increment_max", "must not be below increment_min"));
        }
        if !non_negative(self.capability.breakpoint_px) {
            return Err(invalid("capability.breakpoint_px", "must not be negative"));
        }
        if self.capability.overrides.iter().any(|rule| !positive(rule.duration_s)) {
            return Err(invalid("capability.overrides", "durations must be positive"));
        }
        if self.markers.lifetime_ms == 0 {
            return Err(invalid("markers.lifetime_ms", "must be positive"));
        }
        if self.buttons.selector_class.trim().is_empty() || self.buttons.active_class.trim().is_empty() {
            return Err(invalid("buttons", "class names must not be empty"));
        }
        if self.clock.refresh_ms == 0 {
            return Err(invalid("clock.refresh_ms", "must be positive"));
        }
        Ok(())
    }

    /// Defaults, then the embedded JSON blob, then `fx.*` query pairs in order.
    /// A layer that fails to parse or validate is skipped and its error
    /// returned; the config keeps the last valid state.
    pub fn layered(
        embedded: Option<&str>,
        overrides: &[(String, String)],
    ) -> (Self, Vec<ConfigError>) {
        let mut errors = Vec::new();
        let mut config = match embedded.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
                errors.push(err);
                Self::default()
            }),
            None => Self::default(),
        };
        for (key, value) in overrides {
            let mut next = config.clone();
            match next.apply_override(key, value).and_then(|_| next.validate()) {
                Ok(()) => config = next,
                Err(err) => errors.push(err),
            }
        }
        (config, errors)
    }

    /// Applies one `fx.*` override. Keys without the prefix are ignored.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let Some(name) = key.strip_prefix(QUERY_PREFIX) else {
            return Ok(false);
        };
        let bad_value = || ConfigError::BadValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match name {
            "seed" => {
                let seed = value.trim().parse::<u64>().map_err(|_| bad_value())?;
                self.seed = Some(seed);
            }
            "motion" => {
                self.motion = MotionPreference::parse(value).ok_or_else(bad_value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(true)
    }
}

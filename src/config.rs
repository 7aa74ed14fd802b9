use std::cell::RefCell;

use glowfolio_core::random::splitmix64;
use glowfolio_core::{shared, EffectsConfig, SharedRandom, SplitMix64};
use js_sys::Date;
use web_sys::UrlSearchParams;

use crate::dom;

pub(crate) const CONFIG_ELEMENT_ID: &str = "fx-config";

thread_local! {
    static EFFECTS_CONFIG: RefCell<Option<EffectsConfig>> = RefCell::new(None);
}

pub(crate) fn set_effects_config(config: EffectsConfig) {
    EFFECTS_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config);
    });
}

pub(crate) fn effects_config() -> EffectsConfig {
    if let Some(config) = EFFECTS_CONFIG.with(|slot| slot.borrow().clone()) {
        return config;
    }
    let config = load_effects_config();
    set_effects_config(config.clone());
    config
}

/// Defaults, then the embedded JSON blob, then `fx.*` query overrides.
pub(crate) fn load_effects_config() -> EffectsConfig {
    let embedded = embedded_config();
    let (config, errors) = EffectsConfig::layered(embedded.as_deref(), &query_pairs());
    for err in errors {
        gloo::console::warn!("effects config layer ignored", err.to_string());
    }
    gloo::console::log!(
        "effects config loaded",
        format!("{:?}", config.motion),
        config.seed.map(|seed| seed.to_string()).unwrap_or_default()
    );
    config
}

fn embedded_config() -> Option<String> {
    let document = dom::document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content()
}

fn query_pairs() -> Vec<(String, String)> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    let Ok(params) = UrlSearchParams::new_with_str(&search) else {
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for name in ["fx.seed", "fx.motion"] {
        if let Some(value) = params.get(name) {
            pairs.push((name.to_string(), value));
        }
    }
    pairs
}

pub(crate) fn effects_rng(config: &EffectsConfig) -> SharedRandom {
    let seed = config.seed.unwrap_or_else(entropy_seed);
    shared(SplitMix64::new(seed))
}

fn entropy_seed() -> u64 {
    let now = Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    splitmix64(now ^ noise.rotate_left(32))
}

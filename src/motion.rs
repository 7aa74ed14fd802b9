use glowfolio_core::capability::{reduced_motion_css, BODY_HINTS, REDUCED_MOTION_MARKER};
use glowfolio_core::{motion_profile, CapabilityProbe, Effect, EffectsConfig, MotionProfile};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{self, js_err};

const STYLE_MARKER_ATTR: &str = "data-fx";

pub(crate) fn probe_browser() -> CapabilityProbe {
    CapabilityProbe {
        viewport_width: dom::viewport_width().unwrap_or(f64::INFINITY),
        hardware_concurrency: dom::hardware_concurrency(),
    }
}

/// A `<style>` element appended to `head`, removed on teardown.
struct StyleInjection {
    element: Element,
}

impl StyleInjection {
    fn inject(document: &Document, css: &str) -> Result<Self, JsValue> {
        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))?;
        let element = document.create_element("style")?;
        element.set_attribute(STYLE_MARKER_ATTR, REDUCED_MOTION_MARKER)?;
        element.set_text_content(Some(css));
        head.append_child(&element)?;
        Ok(Self { element })
    }

    fn remove(&self) {
        self.element.remove();
    }
}

/// One inline style property on `body`. Restoring puts back the value seen
/// before mount, unless something else has overwritten ours in the meantime.
struct BodyStyleOverride {
    body: HtmlElement,
    property: &'static str,
    applied: String,
    previous: String,
    previous_priority: String,
}

impl BodyStyleOverride {
    fn apply(body: &HtmlElement, property: &'static str, value: &'static str) -> Self {
        let style = body.style();
        let previous = style.get_property_value(property).unwrap_or_default();
        let previous_priority = style.get_property_priority(property);
        let _ = style.set_property(property, value);
        // Read back the serialized form; browsers normalize values like `translateZ(0)`.
        let applied = style.get_property_value(property).unwrap_or_default();
        Self {
            body: body.clone(),
            property,
            applied,
            previous,
            previous_priority,
        }
    }

    fn restore(&self) {
        let style = self.body.style();
        let current = style.get_property_value(self.property).unwrap_or_default();
        if current != self.applied {
            return;
        }
        if self.previous.is_empty() {
            let _ = style.remove_property(self.property);
        } else {
            let _ = style.set_property_with_priority(
                self.property,
                &self.previous,
                &self.previous_priority,
            );
        }
    }
}

/// Applies the reduced-motion profile for the lifetime of the app.
pub(crate) struct MotionAdapter {
    profile: MotionProfile,
    style: Option<StyleInjection>,
    body: Vec<BodyStyleOverride>,
}

impl MotionAdapter {
    pub(crate) fn mount(document: &Document, probe: &CapabilityProbe, config: &EffectsConfig) -> Self {
        let profile = motion_profile(probe, &config.capability, config.motion);
        gloo::console::log!(
            "motion profile",
            format!("{profile:?}"),
            probe.viewport_width,
            probe
                .hardware_concurrency
                .map(|cores| cores.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        if profile == MotionProfile::Full {
            return Self {
                profile,
                style: None,
                body: Vec::new(),
            };
        }

        let css = reduced_motion_css(&config.capability.overrides);
        let style = match StyleInjection::inject(document, &css) {
            Ok(style) => Some(style),
            Err(err) => {
                gloo::console::warn!("reduced motion styles not injected", js_err(err));
                None
            }
        };
        let body = match document.body() {
            Some(body) => BODY_HINTS
                .iter()
                .map(|&(property, value)| BodyStyleOverride::apply(&body, property, value))
                .collect(),
            None => Vec::new(),
        };
        Self {
            profile,
            style,
            body,
        }
    }

    #[cfg(test)]
    pub(crate) fn profile(&self) -> MotionProfile {
        self.profile
    }
}

impl Effect for MotionAdapter {
    fn teardown(&mut self) {
        if let Some(style) = self.style.take() {
            style.remove();
        }
        for entry in self.body.drain(..).rev() {
            entry.restore();
        }
    }
}

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

pub(crate) fn hardware_concurrency() -> Option<u32> {
    let cores = web_sys::window()?.navigator().hardware_concurrency();
    if cores.is_finite() && cores > 0.0 {
        Some(cores as u32)
    } else {
        None
    }
}

/// Finds `.class` under `container`. A missing layer is `None`, never an error.
pub(crate) fn layer(container: &Element, class: &str) -> Option<Element> {
    container.query_selector(&format!(".{class}")).ok().flatten()
}

pub(crate) fn create_div(document: &Document, class: &str) -> Option<HtmlElement> {
    let element = document.create_element("div").ok()?;
    element.set_class_name(class);
    element.dyn_into::<HtmlElement>().ok()
}

pub(crate) fn set_styles(element: &HtmlElement, props: &[(&str, String)]) {
    let style = element.style();
    for (name, value) in props {
        let _ = style.set_property(name, value);
    }
}

pub(crate) fn clear_children(element: &Element) {
    element.set_inner_html("");
}

pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

pub(crate) fn pct(value: f64) -> String {
    format!("{value:.3}%")
}

pub(crate) fn secs(value: f64) -> String {
    format!("{value:.3}s")
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

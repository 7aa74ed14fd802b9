use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use glowfolio_core::marker::{marker_at, MarkerSettings, PointerSource, MARKER_CLASS};
use glowfolio_core::{Effect, Scheduler};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent, TouchEvent};

use crate::dom::{create_div, px, set_styles};

struct LiveMarker<S: Scheduler> {
    id: u64,
    node: Element,
    _removal: S::Handle,
}

struct RippleInner<S: Scheduler> {
    document: Document,
    scheduler: S,
    settings: MarkerSettings,
    markers: RefCell<Vec<LiveMarker<S>>>,
    next_id: RefCell<u64>,
}

/// Click and touch ripples appended to `body`, each removed after a fixed
/// lifetime. Markers never interact with each other.
pub(crate) struct TouchRipples<S: Scheduler> {
    inner: Rc<RippleInner<S>>,
    listeners: Vec<EventListener>,
}

impl<S: Scheduler> TouchRipples<S> {
    pub(crate) fn mount(document: &Document, scheduler: &S, settings: &MarkerSettings) -> Self {
        let inner = Rc::new(RippleInner {
            document: document.clone(),
            scheduler: scheduler.clone(),
            settings: settings.clone(),
            markers: RefCell::new(Vec::new()),
            next_id: RefCell::new(0),
        });
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };

        let mut listeners = Vec::new();
        let on_click = Rc::downgrade(&inner);
        listeners.push(EventListener::new_with_options(
            document,
            "click",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if event.button() != 0 {
                    return;
                }
                emit_weak(
                    &on_click,
                    PointerSource::Mouse,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
            },
        ));
        let on_touch = Rc::downgrade(&inner);
        listeners.push(EventListener::new_with_options(
            document,
            "touchstart",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                emit_weak(
                    &on_touch,
                    PointerSource::Touch,
                    f64::from(touch.client_x()),
                    f64::from(touch.client_y()),
                );
            },
        ));

        Self { inner, listeners }
    }

    #[cfg(test)]
    pub(crate) fn emit(&self, source: PointerSource, x: f64, y: f64) {
        emit(&self.inner, source, x, y);
    }

    #[cfg(test)]
    pub(crate) fn live_markers(&self) -> usize {
        self.inner.markers.borrow().len()
    }
}

impl<S: Scheduler> Effect for TouchRipples<S> {
    fn teardown(&mut self) {
        self.listeners.clear();
        let markers = std::mem::take(&mut *self.inner.markers.borrow_mut());
        for marker in markers {
            marker.node.remove();
        }
    }
}

fn emit_weak<S: Scheduler>(inner: &Weak<RippleInner<S>>, source: PointerSource, x: f64, y: f64) {
    if let Some(inner) = inner.upgrade() {
        emit(&inner, source, x, y);
    }
}

fn emit<S: Scheduler>(inner: &Rc<RippleInner<S>>, source: PointerSource, x: f64, y: f64) {
    let Some(body) = inner.document.body() else {
        return;
    };
    let Some(node) = create_div(&inner.document, MARKER_CLASS) else {
        return;
    };
    let marker = marker_at(source, x, y, &inner.settings);
    set_styles(
        &node,
        &[
            ("left", px(marker.x)),
            ("top", px(marker.y)),
            ("width", px(marker.size_px)),
            ("height", px(marker.size_px)),
        ],
    );
    if body.append_child(&node).is_err() {
        return;
    }

    let id = {
        let mut next = inner.next_id.borrow_mut();
        let id = *next;
        *next = next.wrapping_add(1);
        id
    };
    let weak = Rc::downgrade(inner);
    let removal = inner
        .scheduler
        .after(inner.settings.lifetime_ms, move || expire(&weak, id));
    inner.markers.borrow_mut().push(LiveMarker {
        id,
        node: node.into(),
        _removal: removal,
    });
}

fn expire<S: Scheduler>(inner: &Weak<RippleInner<S>>, id: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let marker = {
        let mut markers = inner.markers.borrow_mut();
        let index = markers.iter().position(|marker| marker.id == id);
        index.map(|index| markers.remove(index))
    };
    if let Some(marker) = marker {
        marker.node.remove();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use glowfolio_core::ManualScheduler;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, MouseEventInit};

    use crate::dom;

    wasm_bindgen_test_configure!(run_in_browser);

    fn markers(document: &Document) -> Vec<HtmlElement> {
        let Ok(list) = document.query_selector_all(&format!(".{MARKER_CLASS}")) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn click_at(document: &Document, x: i32, y: i32) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        init.set_client_y(y);
        init.set_button(0);
        let event = MouseEvent::new_with_mouse_event_init_dict("click", &init)
            .expect("create click event");
        document.dispatch_event(&event).expect("dispatch click");
    }

    fn style(element: &HtmlElement, name: &str) -> String {
        element.style().get_property_value(name).unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn click_spawns_one_marker_that_expires() {
        let document = dom::document().expect("document available");
        let scheduler = ManualScheduler::new();
        let mut ripples = TouchRipples::mount(&document, &scheduler, &MarkerSettings::default());

        click_at(&document, 100, 200);
        let found = markers(&document);
        assert_eq!(found.len(), 1);
        assert_eq!(style(&found[0], "left"), "100px");
        assert_eq!(style(&found[0], "top"), "200px");
        assert_eq!(style(&found[0], "width"), "20px");

        scheduler.advance(999);
        assert_eq!(markers(&document).len(), 1);
        scheduler.advance(1);
        assert!(markers(&document).is_empty());
        assert_eq!(ripples.live_markers(), 0);
        ripples.teardown();
    }

    #[wasm_bindgen_test]
    fn touch_markers_are_larger_and_independent() {
        let document = dom::document().expect("document available");
        let scheduler = ManualScheduler::new();
        let mut ripples = TouchRipples::mount(&document, &scheduler, &MarkerSettings::default());

        ripples.emit(PointerSource::Touch, 10.0, 20.0);
        scheduler.advance(500);
        ripples.emit(PointerSource::Mouse, 30.0, 40.0);
        let found = markers(&document);
        assert_eq!(found.len(), 2);
        assert_eq!(style(&found[0], "width"), "30px");

        scheduler.advance(500);
        let found = markers(&document);
        assert_eq!(found.len(), 1);
        assert_eq!(style(&found[0], "left"), "30px");
        scheduler.advance(500);
        assert!(markers(&document).is_empty());
        ripples.teardown();
    }

    #[wasm_bindgen_test]
    fn teardown_removes_pending_markers_and_listeners() {
        let document = dom::document().expect("document available");
        let scheduler = ManualScheduler::new();
        let mut ripples = TouchRipples::mount(&document, &scheduler, &MarkerSettings::default());

        click_at(&document, 5, 5);
        click_at(&document, 6, 6);
        assert_eq!(markers(&document).len(), 2);

        ripples.teardown();
        assert!(markers(&document).is_empty());
        assert_eq!(scheduler.pending(), 0);

        click_at(&document, 7, 7);
        scheduler.advance(5_000);
        assert!(markers(&document).is_empty());
        ripples.teardown();
    }
}

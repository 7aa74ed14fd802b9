use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use glowfolio_core::marker::ButtonPulseSettings;
use glowfolio_core::{Effect, Scheduler};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

struct PulseSlot<S: Scheduler> {
    element: HtmlElement,
    timer: Option<S::Handle>,
}

struct PulseInner<S: Scheduler> {
    scheduler: S,
    settings: ButtonPulseSettings,
    slots: RefCell<Vec<PulseSlot<S>>>,
}

/// Click pulse for every button matching the configured class at mount time.
/// Buttons added later are picked up by the next mount.
pub(crate) struct ButtonPulse<S: Scheduler> {
    inner: Rc<PulseInner<S>>,
    listeners: Vec<EventListener>,
}

impl<S: Scheduler> ButtonPulse<S> {
    pub(crate) fn mount(root: &Element, scheduler: &S, settings: &ButtonPulseSettings) -> Self {
        let inner = Rc::new(PulseInner {
            scheduler: scheduler.clone(),
            settings: settings.clone(),
            slots: RefCell::new(Vec::new()),
        });
        let mut listeners = Vec::new();
        for element in buttons(root, &settings.selector_class) {
            let index = {
                let mut slots = inner.slots.borrow_mut();
                slots.push(PulseSlot {
                    element: element.clone(),
                    timer: None,
                });
                slots.len() - 1
            };
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(&element, "click", move |_| {
                pulse(&weak, index);
            }));
        }
        Self { inner, listeners }
    }

    #[cfg(test)]
    pub(crate) fn button_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }
}

impl<S: Scheduler> Effect for ButtonPulse<S> {
    fn teardown(&mut self) {
        self.listeners.clear();
        let slots = std::mem::take(&mut *self.inner.slots.borrow_mut());
        let active = &self.inner.settings.active_class;
        for slot in slots {
            drop(slot.timer);
            let _ = slot.element.class_list().remove_1(active);
        }
    }
}

fn buttons(root: &Element, class: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(&format!(".{class}")) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn pulse<S: Scheduler>(weak: &Weak<PulseInner<S>>, index: usize) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Some(element) = inner
        .slots
        .borrow()
        .get(index)
        .map(|slot| slot.element.clone())
    else {
        return;
    };
    let active = inner.settings.active_class.clone();
    let classes = element.class_list();
    let _ = classes.remove_1(&active);
    // Reading layout restarts the CSS animation when the class comes back.
    let _ = element.offset_height();
    let _ = classes.add_1(&active);

    let timer = {
        let element = element.clone();
        inner.scheduler.after(inner.settings.duration_ms, move || {
            let _ = element.class_list().remove_1(&active);
        })
    };
    let previous = {
        let mut slots = inner.slots.borrow_mut();
        slots
            .get_mut(index)
            .and_then(|slot| slot.timer.replace(timer))
    };
    drop(previous);
}

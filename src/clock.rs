use glowfolio_core::clock::{format_date, format_time, ClockReading, ClockSettings};
use glowfolio_core::{Effect, Scheduler};
use js_sys::Date;
use yew::prelude::*;

use crate::config::effects_config;
use crate::lifecycle::use_mounted_effect;
use crate::scheduler::BrowserScheduler;

fn read_clock() -> ClockReading {
    let now = Date::new_0();
    ClockReading {
        weekday: now.get_day(),
        month: now.get_month(),
        day: now.get_date(),
        hours: now.get_hours(),
        minutes: now.get_minutes(),
        seconds: now.get_seconds(),
    }
}

/// Pushes a fresh reading on every refresh period until torn down.
pub(crate) struct ClockTicker<S: Scheduler> {
    timer: Option<S::Handle>,
}

impl<S: Scheduler> ClockTicker<S> {
    pub(crate) fn mount<F>(scheduler: &S, settings: &ClockSettings, mut on_reading: F) -> Self
    where
        F: FnMut(ClockReading) + 'static,
    {
        let timer = scheduler.every(settings.refresh_ms, move || on_reading(read_clock()));
        Self { timer: Some(timer) }
    }
}

impl<S: Scheduler> Effect for ClockTicker<S> {
    fn teardown(&mut self) {
        self.timer.take();
    }
}

#[function_component(LiveClock)]
pub(crate) fn live_clock() -> Html {
    let reading = use_state(read_clock);
    {
        let reading = reading.clone();
        use_mounted_effect((), move |_| {
            let settings = effects_config().clock;
            Some(ClockTicker::mount(&BrowserScheduler, &settings, move |next| {
                reading.set(next)
            }))
        });
    }
    html! {
        <div class="live-clock">
            <span class="clock-time">{ format_time(&reading) }</span>
            <span class="clock-date">{ format_date(&reading) }</span>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use glowfolio_core::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn ticker_refreshes_each_second_until_teardown() {
        let scheduler = ManualScheduler::new();
        let readings = Rc::new(RefCell::new(Vec::new()));
        let mut ticker = {
            let readings = readings.clone();
            ClockTicker::mount(&scheduler, &ClockSettings::default(), move |reading| {
                readings.borrow_mut().push(reading)
            })
        };

        scheduler.advance(999);
        assert!(readings.borrow().is_empty());
        scheduler.advance(2_001);
        assert_eq!(readings.borrow().len(), 3);
        assert!(readings.borrow().iter().all(|reading| reading.minutes < 60));

        ticker.teardown();
        let fired = scheduler.fired();
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(10_000);
        assert_eq!(scheduler.fired(), fired);
        assert_eq!(readings.borrow().len(), 3);
    }

    #[wasm_bindgen_test]
    fn ticker_honours_configured_period() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(RefCell::new(0u32));
        let ticker = {
            let count = count.clone();
            ClockTicker::mount(&scheduler, &ClockSettings { refresh_ms: 250 }, move |_| {
                *count.borrow_mut() += 1
            })
        };
        scheduler.advance(1_000);
        assert_eq!(*count.borrow(), 4);

        drop(ticker);
        scheduler.advance(1_000);
        assert_eq!(*count.borrow(), 4);
    }
}

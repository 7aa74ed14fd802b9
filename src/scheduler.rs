use gloo::timers::callback::{Interval, Timeout};
use glowfolio_core::Scheduler;

/// Real browser timers. Dropping a handle clears the underlying timer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserScheduler;

pub(crate) enum BrowserTimer {
    Interval(#[allow(dead_code)] Interval),
    Timeout(#[allow(dead_code)] Timeout),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn every<F>(&self, period_ms: u32, callback: F) -> BrowserTimer
    where
        F: FnMut() + 'static,
    {
        BrowserTimer::Interval(Interval::new(period_ms, callback))
    }

    fn after<F>(&self, delay_ms: u32, callback: F) -> BrowserTimer
    where
        F: FnOnce() + 'static,
    {
        BrowserTimer::Timeout(Timeout::new(delay_ms, callback))
    }
}

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::lifecycle::Effect;
use crate::progress::{phase_label, ProgressSimulator, Tick};
use crate::random::SharedRandom;
use crate::schedule::Scheduler;

pub const TICK_MS_DEFAULT: u32 = 120;
pub const INCREMENT_MIN_DEFAULT: f64 = 3.0;
pub const INCREMENT_MAX_DEFAULT: f64 = 15.0;
pub const HIDE_DELAY_MS_DEFAULT: u32 = 800;
pub const COMPLETE_DELAY_MS_DEFAULT: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingSettings {
    pub tick_ms: u32,
    pub increment_min: f64,
    pub increment_max: f64,
    pub hide_delay_ms: u32,
    pub complete_delay_ms: u32,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS_DEFAULT,
            increment_min: INCREMENT_MIN_DEFAULT,
            increment_max: INCREMENT_MAX_DEFAULT,
            hide_delay_ms: HIDE_DELAY_MS_DEFAULT,
            complete_delay_ms: COMPLETE_DELAY_MS_DEFAULT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingView {
    pub progress: f64,
    pub phase: usize,
    pub label: &'static str,
    pub visible: bool,
}

impl LoadingView {
    pub fn initial() -> Self {
        Self {
            progress: 0.0,
            phase: 0,
            label: phase_label(0),
            visible: true,
        }
    }

    pub fn percent(&self) -> u32 {
        self.progress.round() as u32
    }
}

impl Default for LoadingView {
    fn default() -> Self {
        Self::initial()
    }
}

pub struct LoadingHooks {
    pub on_update: Rc<dyn Fn(LoadingView)>,
    pub on_complete: Box<dyn FnOnce()>,
}

struct SequenceState<S: Scheduler> {
    scheduler: S,
    settings: LoadingSettings,
    simulator: ProgressSimulator,
    rng: SharedRandom,
    visible: bool,
    tick: Option<S::Handle>,
    hide: Option<S::Handle>,
    complete: Option<S::Handle>,
    on_update: Rc<dyn Fn(LoadingView)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl<S: Scheduler> SequenceState<S> {
    fn view(&self) -> LoadingView {
        LoadingView {
            progress: self.simulator.progress(),
            phase: self.simulator.phase(),
            label: self.simulator.label(),
            visible: self.visible,
        }
    }
}

/// Fake loading run: ticks progress to 100, hides, then reports completion.
///
/// Completion fires at most once. Dropping the sequence (or tearing it down)
/// cancels whatever timer is pending, so a torn-down sequence never calls back.
pub struct LoadingSequence<S: Scheduler> {
    state: Rc<RefCell<SequenceState<S>>>,
}

impl<S: Scheduler> LoadingSequence<S> {
    pub fn start(
        scheduler: &S,
        rng: SharedRandom,
        settings: &LoadingSettings,
        hooks: LoadingHooks,
    ) -> Self {
        let state = Rc::new(RefCell::new(SequenceState {
            scheduler: scheduler.clone(),
            settings: settings.clone(),
            simulator: ProgressSimulator::new(settings.increment_min, settings.increment_max),
            rng,
            visible: true,
            tick: None,
            hide: None,
            complete: None,
            on_update: hooks.on_update,
            on_complete: Some(hooks.on_complete),
        }));
        let weak = Rc::downgrade(&state);
        let tick = scheduler.every(settings.tick_ms, move || on_tick(&weak));
        state.borrow_mut().tick = Some(tick);
        Self { state }
    }

    pub fn view(&self) -> LoadingView {
        self.state.borrow().view()
    }

    pub fn is_ticking(&self) -> bool {
        self.state.borrow().tick.is_some()
    }

    pub fn cancel(&mut self) {
        let (tick, hide, complete, on_complete) = {
            let mut state = self.state.borrow_mut();
            (
                state.tick.take(),
                state.hide.take(),
                state.complete.take(),
                state.on_complete.take(),
            )
        };
        drop((tick, hide, complete, on_complete));
    }
}

impl<S: Scheduler> Effect for LoadingSequence<S> {
    fn teardown(&mut self) {
        self.cancel();
    }
}

impl<S: Scheduler> Drop for LoadingSequence<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn on_tick<S: Scheduler>(weak: &Weak<RefCell<SequenceState<S>>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let (view, on_update, finished_tick) = {
        let mut guard = state.borrow_mut();
        let state_ref = &mut *guard;
        let outcome = {
            let mut rng = state_ref.rng.borrow_mut();
            state_ref.simulator.tick(&mut *rng)
        };
        let finished_tick = match outcome {
            Tick::Idle => return,
            Tick::Advanced { .. } => None,
            Tick::Completed => {
                let hide_weak = Rc::downgrade(&state);
                let hide = state_ref
                    .scheduler
                    .after(state_ref.settings.hide_delay_ms, move || on_hide(&hide_weak));
                state_ref.hide = Some(hide);
                state_ref.tick.take()
            }
        };
        (state_ref.view(), state_ref.on_update.clone(), finished_tick)
    };
    drop(finished_tick);
    on_update(view);
}

fn on_hide<S: Scheduler>(weak: &Weak<RefCell<SequenceState<S>>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let (view, on_update) = {
        let mut guard = state.borrow_mut();
        guard.visible = false;
        guard.hide = None;
        let complete_weak = Rc::downgrade(&state);
        let complete = guard
            .scheduler
            .after(guard.settings.complete_delay_ms, move || on_finish(&complete_weak));
        guard.complete = Some(complete);
        (guard.view(), guard.on_update.clone())
    };
    on_update(view);
}

fn on_finish<S: Scheduler>(weak: &Weak<RefCell<SequenceState<S>>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let callback = {
        let mut guard = state.borrow_mut();
        guard.complete = None;
        guard.on_complete.take()
    };
    if let Some(callback) = callback {
        callback();
    }
}

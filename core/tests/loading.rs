use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glowfolio_core::lifecycle::{Effect, EffectGuard};
use glowfolio_core::loading::{LoadingHooks, LoadingSequence, LoadingSettings, LoadingView};
use glowfolio_core::progress::{phase_for, ProgressSimulator, Tick, FINAL_PHASE, LOADING_STEPS};
use glowfolio_core::random::{shared, SequenceSource, SplitMix64};
use glowfolio_core::schedule::ManualScheduler;

struct Recorder {
    updates: Rc<RefCell<Vec<LoadingView>>>,
    completions: Rc<Cell<u32>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            updates: Rc::new(RefCell::new(Vec::new())),
            completions: Rc::new(Cell::new(0)),
        }
    }

    fn hooks(&self) -> LoadingHooks {
        let updates = self.updates.clone();
        let completions = self.completions.clone();
        LoadingHooks {
            on_update: Rc::new(move |view| updates.borrow_mut().push(view)),
            on_complete: Box::new(move || completions.set(completions.get() + 1)),
        }
    }

    fn last(&self) -> Option<LoadingView> {
        self.updates.borrow().last().copied()
    }
}

// 0.5 maps to an increment of 9: twelve ticks reach 100.
fn start_fixed(scheduler: &ManualScheduler, recorder: &Recorder) -> LoadingSequence<ManualScheduler> {
    LoadingSequence::start(
        scheduler,
        shared(SequenceSource::constant(0.5)),
        &LoadingSettings::default(),
        recorder.hooks(),
    )
}

#[test]
fn phase_thresholds() {
    assert_eq!(phase_for(0.0), 0);
    assert_eq!(phase_for(19.99), 0);
    assert_eq!(phase_for(20.0), 1);
    assert_eq!(phase_for(59.0), 2);
    assert_eq!(phase_for(94.9), 4);
    assert_eq!(phase_for(95.0), 5);
    assert_eq!(phase_for(100.0), FINAL_PHASE);
}

#[test]
fn simulator_is_monotonic_and_completes_once() {
    for seed in 0..10u64 {
        let mut rng = SplitMix64::new(seed);
        let mut simulator = ProgressSimulator::new(3.0, 15.0);
        let mut last = 0.0;
        let mut last_phase = 0;
        let mut completed = 0;
        for _ in 0..100 {
            match simulator.tick(&mut rng) {
                Tick::Completed => completed += 1,
                Tick::Advanced { progress, phase } => {
                    assert!(progress < 100.0);
                    assert!(phase >= last_phase);
                    last_phase = phase;
                }
                Tick::Idle => {}
            }
            assert!(simulator.progress() >= last);
            assert!(simulator.progress() <= 100.0);
            last = simulator.progress();
        }
        assert_eq!(completed, 1);
        assert!(simulator.is_complete());
        assert_eq!(simulator.phase(), FINAL_PHASE);
        assert_eq!(simulator.label(), LOADING_STEPS[FINAL_PHASE]);
        assert_eq!(simulator.tick(&mut rng), Tick::Idle);
    }
}

#[test]
fn sequence_reaches_final_phase_then_completes_once() {
    let scheduler = ManualScheduler::new();
    let recorder = Recorder::new();
    let sequence = start_fixed(&scheduler, &recorder);

    scheduler.advance(120 * 11);
    let view = recorder.last().expect("ticks published");
    assert_eq!(view.progress, 99.0);
    assert_eq!(view.phase, FINAL_PHASE);
    assert!(sequence.is_ticking());

    scheduler.advance(120);
    let view = recorder.last().expect("final tick published");
    assert_eq!(view.progress, 100.0);
    assert_eq!(view.percent(), 100);
    assert!(view.visible);
    assert!(!sequence.is_ticking());
    assert_eq!(scheduler.pending(), 1);
    assert_eq!(recorder.completions.get(), 0);

    scheduler.advance(799);
    assert!(recorder.last().map(|view| view.visible).unwrap_or(false));
    scheduler.advance(1);
    assert!(!recorder.last().map(|view| view.visible).unwrap_or(true));
    assert_eq!(recorder.completions.get(), 0);

    scheduler.advance(999);
    assert_eq!(recorder.completions.get(), 0);
    scheduler.advance(1);
    assert_eq!(recorder.completions.get(), 1);

    let updates = recorder.updates.borrow().len();
    scheduler.advance(60_000);
    assert_eq!(recorder.completions.get(), 1);
    assert_eq!(recorder.updates.borrow().len(), updates);
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(sequence.view().progress, 100.0);
}

#[test]
fn progress_published_is_non_decreasing() {
    let scheduler = ManualScheduler::new();
    let recorder = Recorder::new();
    let _sequence = LoadingSequence::start(
        &scheduler,
        shared(SplitMix64::new(99)),
        &LoadingSettings::default(),
        recorder.hooks(),
    );
    scheduler.advance(30_000);

    let updates = recorder.updates.borrow();
    assert!(!updates.is_empty());
    for pair in updates.windows(2) {
        assert!(pair[1].progress >= pair[0].progress);
        assert!(pair[1].phase >= pair[0].phase);
        assert!(pair[1].progress <= 100.0);
    }
    assert_eq!(recorder.completions.get(), 1);
}

#[test]
fn teardown_while_ticking_cancels_everything() {
    let scheduler = ManualScheduler::new();
    let recorder = Recorder::new();
    let mut sequence = start_fixed(&scheduler, &recorder);

    scheduler.advance(360);
    assert_eq!(recorder.updates.borrow().len(), 3);
    sequence.teardown();
    assert_eq!(scheduler.pending(), 0);

    let fired = scheduler.fired();
    scheduler.advance(60_000);
    assert_eq!(scheduler.fired(), fired);
    assert_eq!(recorder.updates.borrow().len(), 3);
    assert_eq!(recorder.completions.get(), 0);
}

#[test]
fn teardown_during_hide_delay_suppresses_completion() {
    let scheduler = ManualScheduler::new();
    let recorder = Recorder::new();
    let sequence = start_fixed(&scheduler, &recorder);
    let mut guard = EffectGuard::new(sequence);

    scheduler.advance(120 * 12 + 800);
    assert!(!recorder.last().map(|view| view.visible).unwrap_or(true));
    guard.teardown();
    assert!(!guard.is_mounted());

    scheduler.advance(60_000);
    assert_eq!(recorder.completions.get(), 0);
}

#[test]
fn dropping_the_sequence_cancels_the_interval() {
    let scheduler = ManualScheduler::new();
    let recorder = Recorder::new();
    let sequence = start_fixed(&scheduler, &recorder);
    scheduler.advance(120);
    drop(sequence);

    scheduler.advance(10_000);
    assert_eq!(recorder.updates.borrow().len(), 1);
    assert_eq!(scheduler.pending(), 0);
}

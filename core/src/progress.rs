use crate::random::{range, RandomSource};

pub const LOADING_STEPS: [&str; 6] = [
    "Initializing Systems",
    "Connecting Neural Networks",
    "Loading Quantum Matrix",
    "Rendering Digital Universe",
    "Synchronizing Reality",
    "Welcome to the Future",
];

/// Progress at which each phase after the first begins.
pub const PHASE_THRESHOLDS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 95.0];

pub const PROGRESS_MAX: f64 = 100.0;
pub const FINAL_PHASE: usize = LOADING_STEPS.len() - 1;

pub fn phase_for(progress: f64) -> usize {
    PHASE_THRESHOLDS
        .iter()
        .take_while(|threshold| progress >= **threshold)
        .count()
}

pub fn phase_label(phase: usize) -> &'static str {
    LOADING_STEPS[phase.min(FINAL_PHASE)]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Advanced { progress: f64, phase: usize },
    Completed,
    Idle,
}

#[derive(Clone, Debug)]
pub struct ProgressSimulator {
    progress: f64,
    phase: usize,
    increment_min: f64,
    increment_max: f64,
    completed: bool,
}

impl ProgressSimulator {
    pub fn new(increment_min: f64, increment_max: f64) -> Self {
        Self {
            progress: 0.0,
            phase: 0,
            increment_min,
            increment_max,
            completed: false,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn label(&self) -> &'static str {
        phase_label(self.phase)
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Tick {
        if self.completed {
            return Tick::Idle;
        }
        let step = range(rng, self.increment_min, self.increment_max).max(0.0);
        self.progress = (self.progress + step).min(PROGRESS_MAX);
        self.phase = self.phase.max(phase_for(self.progress));
        if self.progress >= PROGRESS_MAX {
            self.completed = true;
            return Tick::Completed;
        }
        Tick::Advanced {
            progress: self.progress,
            phase: self.phase,
        }
    }
}

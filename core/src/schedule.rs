//! Timer seam shared by every periodic effect.
//!
//! Effects never talk to `setInterval`/`setTimeout` directly: they ask a
//! [`Scheduler`] for a handle and keep it. Dropping the handle cancels the
//! timer, so tearing an effect down is the same as dropping its handles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn every<F>(&self, period_ms: u32, callback: F) -> Self::Handle
    where
        F: FnMut() + 'static;

    fn after<F>(&self, delay_ms: u32, callback: F) -> Self::Handle
    where
        F: FnOnce() + 'static;
}

enum TaskCallback {
    Repeat(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Task {
    id: u64,
    due_ms: u64,
    period_ms: u64,
    callback: TaskCallback,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task>,
    running: Option<u64>,
    running_cancelled: bool,
    fired: u64,
}

/// Virtual clock. Nothing runs until [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

pub struct ManualTimer {
    id: u64,
    state: Weak<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Timers that are armed and not yet cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Total callbacks run so far.
    pub fn fired(&self) -> u64 {
        self.state.borrow().fired
    }

    pub fn advance(&self, ms: u64) {
        let target = self.now_ms().saturating_add(ms);
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= target)
                    .min_by_key(|(_, task)| (task.due_ms, task.id))
                    .map(|(index, _)| index);
                let Some(index) = next else {
                    state.now_ms = target;
                    break;
                };
                let task = state.tasks.remove(index);
                state.now_ms = task.due_ms;
                state.running = Some(task.id);
                state.running_cancelled = false;
                state.fired += 1;
                task
            };
            let Task {
                id,
                due_ms,
                period_ms,
                callback,
            } = task;
            match callback {
                TaskCallback::Once(callback) => {
                    callback();
                    self.state.borrow_mut().running = None;
                }
                TaskCallback::Repeat(mut callback) => {
                    callback();
                    let mut state = self.state.borrow_mut();
                    state.running = None;
                    if state.running_cancelled {
                        drop(state);
                        drop(callback);
                        continue;
                    }
                    state.tasks.push(Task {
                        id,
                        due_ms: due_ms + period_ms,
                        period_ms,
                        callback: TaskCallback::Repeat(callback),
                    });
                }
            }
        }
    }

    fn register(&self, delay_ms: u32, callback: TaskCallback) -> ManualTimer {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let delay = u64::from(delay_ms);
        let due_ms = state.now_ms + delay;
        state.tasks.push(Task {
            id,
            due_ms,
            period_ms: delay.max(1),
            callback,
        });
        ManualTimer {
            id,
            state: Rc::downgrade(&self.state),
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn every<F>(&self, period_ms: u32, callback: F) -> ManualTimer
    where
        F: FnMut() + 'static,
    {
        self.register(period_ms.max(1), TaskCallback::Repeat(Box::new(callback)))
    }

    fn after<F>(&self, delay_ms: u32, callback: F) -> ManualTimer
    where
        F: FnOnce() + 'static,
    {
        self.register(delay_ms, TaskCallback::Once(Box::new(callback)))
    }
}

impl ManualTimer {
    pub fn is_pending(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let state = state.borrow();
        state.tasks.iter().any(|task| task.id == self.id)
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // The removed callback may own other timers; drop it after the borrow ends.
        let removed = {
            let mut state = state.borrow_mut();
            if state.running == Some(self.id) {
                state.running_cancelled = true;
                None
            } else {
                state
                    .tasks
                    .iter()
                    .position(|task| task.id == self.id)
                    .map(|index| state.tasks.remove(index))
            }
        };
        drop(removed);
    }
}

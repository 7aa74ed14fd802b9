use std::cell::Cell;
use std::rc::Rc;

use glowfolio_core::lifecycle::{Effect, EffectGuard};

struct Counting {
    teardowns: Rc<Cell<u32>>,
}

impl Effect for Counting {
    fn teardown(&mut self) {
        self.teardowns.set(self.teardowns.get() + 1);
    }
}

#[test]
fn guard_tears_down_on_drop() {
    let teardowns = Rc::new(Cell::new(0));
    let guard = EffectGuard::new(Counting {
        teardowns: teardowns.clone(),
    });
    assert!(guard.is_mounted());
    drop(guard);
    assert_eq!(teardowns.get(), 1);
}

#[test]
fn explicit_teardown_is_not_repeated() {
    let teardowns = Rc::new(Cell::new(0));
    let mut guard = EffectGuard::new(Counting {
        teardowns: teardowns.clone(),
    });
    guard.teardown();
    guard.teardown();
    assert!(guard.get().is_none());
    drop(guard);
    assert_eq!(teardowns.get(), 1);
}

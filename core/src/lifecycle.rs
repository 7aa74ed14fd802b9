/// A mounted decorative effect.
///
/// `teardown` must cancel every timer the effect started, detach every
/// listener and remove every node it created outside its own container.
/// Calling it twice is a no-op the second time.
pub trait Effect {
    fn teardown(&mut self);
}

/// Owns a mounted effect and tears it down exactly once.
pub struct EffectGuard<E: Effect> {
    effect: Option<E>,
}

impl<E: Effect> EffectGuard<E> {
    pub fn new(effect: E) -> Self {
        Self {
            effect: Some(effect),
        }
    }

    pub fn get(&self) -> Option<&E> {
        self.effect.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.effect.is_some()
    }

    pub fn teardown(&mut self) {
        if let Some(mut effect) = self.effect.take() {
            effect.teardown();
        }
    }
}

impl<E: Effect> Drop for EffectGuard<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

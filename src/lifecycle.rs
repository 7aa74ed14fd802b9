use glowfolio_core::{Effect, EffectGuard};
use yew::prelude::*;

/// Mounts an effect after render and tears it down on unmount or when
/// `deps` change. A factory returning `None` (target not in the DOM) mounts
/// nothing.
#[hook]
pub(crate) fn use_mounted_effect<D, E, F>(deps: D, factory: F)
where
    D: PartialEq + 'static,
    E: Effect + 'static,
    F: FnOnce(&D) -> Option<E> + 'static,
{
    use_effect_with(deps, move |deps| {
        let guard = factory(deps).map(EffectGuard::new);
        move || drop(guard)
    });
}

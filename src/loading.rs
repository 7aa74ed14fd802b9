use std::rc::Rc;

use glowfolio_core::ambient::{loader_decor, LoaderDecor};
use glowfolio_core::progress::LOADING_STEPS;
use glowfolio_core::{LoadingHooks, LoadingSequence, LoadingView};
use yew::prelude::*;

use crate::config::{effects_config, effects_rng};
use crate::dom::{pct, px, secs};
use crate::scheduler::BrowserScheduler;

#[derive(Properties, PartialEq)]
pub(crate) struct LoadingScreenProps {
    pub on_complete: Callback<()>,
}

fn render_decor(decor: &LoaderDecor) -> Html {
    let particles = decor.particles.iter().map(|particle| {
        let color = format!("hsl({:.0}, 80%, 60%)", particle.hue);
        let style = format!(
            "left: {}; top: {}; width: {}; height: {}; background: {color}; box-shadow: 0 0 {} {color}; animation-duration: {}; animation-delay: {};",
            pct(particle.x),
            pct(particle.y),
            px(particle.size_px),
            px(particle.size_px),
            px(particle.glow_px),
            secs(particle.duration_s),
            secs(particle.delay_s),
        );
        html! { <div class="quantum-particle" {style}></div> }
    });
    let shooting = decor.shooting_stars.iter().map(|star| {
        let style = format!(
            "left: {}; animation-duration: {}; animation-delay: {};",
            pct(star.x),
            secs(star.duration_s),
            secs(star.delay_s),
        );
        html! { <div class="shooting-star" {style}></div> }
    });
    let rain = decor.rain.iter().map(|rain_drop| {
        let style = format!(
            "left: {}; animation-duration: {}; animation-delay: {};",
            pct(rain_drop.left_pct),
            secs(rain_drop.duration_s),
            secs(rain_drop.delay_s),
        );
        html! { <div class="code-rain" {style}>{ rain_drop.glyph.to_string() }</div> }
    });
    html! {
        <div class="loader-decor">
            { for particles }
            { for shooting }
            { for rain }
        </div>
    }
}

fn render_phases(view: &LoadingView) -> Html {
    let dots = (0..LOADING_STEPS.len()).map(|index| {
        let class = classes!("phase-dot", (index <= view.phase).then_some("active"));
        html! { <span {class}></span> }
    });
    html! { <div class="phase-dots">{ for dots }</div> }
}

#[function_component(LoadingScreen)]
pub(crate) fn loading_screen(props: &LoadingScreenProps) -> Html {
    let view = use_state(LoadingView::initial);
    let rng = use_memo((), |_| effects_rng(&effects_config()));
    let decor = {
        let rng = rng.clone();
        use_memo((), move |_| loader_decor(&mut *rng.borrow_mut()))
    };
    {
        let view = view.clone();
        let rng = (*rng).clone();
        let on_complete = props.on_complete.clone();
        use_effect_with((), move |_| {
            let settings = effects_config().loading;
            let hooks = LoadingHooks {
                on_update: Rc::new(move |next: LoadingView| view.set(next)),
                on_complete: Box::new(move || {
                    gloo::console::log!("loading complete");
                    on_complete.emit(());
                }),
            };
            let sequence = LoadingSequence::start(&BrowserScheduler, rng, &settings, hooks);
            move || drop(sequence)
        });
    }

    let class = classes!("loading-screen", (!view.visible).then_some("fade-out"));
    let bar_style = format!("width: {};", pct(view.progress));
    html! {
        <div {class}>
            { render_decor(&decor) }
            <div class="loader-core">
                <h1 class="loader-title glitch-text">{ "Initializing" }</h1>
                <div class="progress-track">
                    <div class="progress-bar" style={bar_style}></div>
                </div>
                <div class="progress-percent">{ format!("{}%", view.percent()) }</div>
                <div class="progress-label">{ view.label }</div>
                { render_phases(&view) }
            </div>
        </div>
    }
}

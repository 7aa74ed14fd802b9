use web_sys::Element;
use yew::prelude::*;

use crate::background::AdvancedBackground;
use crate::button_fx::ButtonPulse;
use crate::clock::LiveClock;
use crate::config::effects_config;
use crate::dom;
use crate::lifecycle::use_mounted_effect;
use crate::loading::LoadingScreen;
use crate::motion::{probe_browser, MotionAdapter};
use crate::ripple::TouchRipples;
use crate::scheduler::BrowserScheduler;

fn render_sections(button_class: &str) -> Html {
    html! {
        <>
            <section id="hero" class="section hero">
                <h1 class="glitch-text">{ "Hello, world" }</h1>
                <div class="hero-actions">
                    <a href="#projects" class={button_class.to_string()}>{ "View work" }</a>
                    <a href="#contact" class={button_class.to_string()}>{ "Get in touch" }</a>
                </div>
            </section>
            <section id="about" class="section"></section>
            <section id="skills" class="section"></section>
            <section id="projects" class="section"></section>
            <section id="certificates" class="section"></section>
            <section id="contact" class="section">
                <a href="#hero" class={button_class.to_string()}>{ "Back to top" }</a>
            </section>
        </>
    }
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let loaded = use_state(|| false);
    let page_ref = use_node_ref();

    use_mounted_effect((), |_| {
        let document = dom::document()?;
        Some(MotionAdapter::mount(
            &document,
            &probe_browser(),
            &effects_config(),
        ))
    });
    use_mounted_effect((), |_| {
        let document = dom::document()?;
        Some(TouchRipples::mount(
            &document,
            &BrowserScheduler,
            &effects_config().markers,
        ))
    });
    {
        let page_ref = page_ref.clone();
        use_mounted_effect(*loaded, move |loaded| {
            if !*loaded {
                return None;
            }
            let root = page_ref.cast::<Element>()?;
            Some(ButtonPulse::mount(
                &root,
                &BrowserScheduler,
                &effects_config().buttons,
            ))
        });
    }

    if !*loaded {
        let on_complete = {
            let loaded = loaded.clone();
            Callback::from(move |()| loaded.set(true))
        };
        return html! { <LoadingScreen {on_complete} /> };
    }

    let button_class = effects_config().buttons.selector_class;
    html! {
        <main ref={page_ref} class="portfolio">
            <AdvancedBackground />
            <LiveClock />
            { render_sections(&button_class) }
        </main>
    }
}

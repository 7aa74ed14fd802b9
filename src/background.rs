use glowfolio_core::ambient::{constellation, matrix_rain, MatrixGlyph, MatrixSettings, Star};
use glowfolio_core::network::{network_layout, NetworkLayout, NetworkSettings};
use glowfolio_core::{Effect, EffectsConfig, Scheduler, SharedRandom};
use web_sys::Element;
use yew::prelude::*;

use crate::config::{effects_config, effects_rng};
use crate::dom::{self, clear_children, create_div, pct, px, secs, set_styles};
use crate::lifecycle::use_mounted_effect;
use crate::scheduler::BrowserScheduler;

pub(crate) const NETWORK_LAYER: &str = "geometric-network";
pub(crate) const MATRIX_LAYER: &str = "digital-matrix";
pub(crate) const CONSTELLATION_LAYER: &str = "constellation-bg";
const MATRIX_FALLBACK_WIDTH: f64 = 1024.0;

pub(crate) fn spawn_network(layer: Option<&Element>, layout: &NetworkLayout) {
    let Some(layer) = layer else {
        return;
    };
    let Some(document) = layer.owner_document() else {
        return;
    };
    clear_children(layer);
    for node in &layout.nodes {
        let Some(element) = create_div(&document, "network-node") else {
            continue;
        };
        set_styles(
            &element,
            &[
                ("left", pct(node.x)),
                ("top", pct(node.y)),
                ("animation-delay", secs(node.delay_s)),
                ("background", node.color.to_string()),
                ("box-shadow", format!("0 0 20px {}", node.glow)),
            ],
        );
        let _ = layer.append_child(&element);
    }
    for link in &layout.links {
        let Some(element) = create_div(&document, "network-line") else {
            continue;
        };
        set_styles(
            &element,
            &[
                ("left", pct(link.x)),
                ("top", pct(link.y)),
                ("width", pct(link.length)),
                ("transform", format!("rotate({:.4}rad)", link.angle_rad)),
                ("animation-delay", secs(link.delay_s)),
            ],
        );
        let _ = layer.append_child(&element);
    }
}

pub(crate) fn spawn_matrix(layer: Option<&Element>, glyphs: &[MatrixGlyph]) {
    let Some(layer) = layer else {
        return;
    };
    let Some(document) = layer.owner_document() else {
        return;
    };
    clear_children(layer);
    for glyph in glyphs {
        let Some(element) = create_div(&document, "matrix-char") else {
            continue;
        };
        element.set_text_content(Some(&glyph.glyph.to_string()));
        set_styles(
            &element,
            &[
                ("left", px(glyph.left_px)),
                ("animation-delay", secs(glyph.delay_s)),
                ("animation-duration", secs(glyph.duration_s)),
                ("color", glyph.color.clone()),
            ],
        );
        let _ = layer.append_child(&element);
    }
}

pub(crate) fn spawn_constellation(layer: Option<&Element>, stars: &[Star]) {
    let Some(layer) = layer else {
        return;
    };
    let Some(document) = layer.owner_document() else {
        return;
    };
    clear_children(layer);
    for star in stars {
        let Some(element) = create_div(&document, "star") else {
            continue;
        };
        set_styles(
            &element,
            &[
                ("left", pct(star.x)),
                ("top", pct(star.y)),
                ("animation-delay", secs(star.delay_s)),
                ("animation-duration", secs(star.duration_s)),
                ("width", px(star.size_px)),
                ("height", px(star.size_px)),
            ],
        );
        let _ = layer.append_child(&element);
    }
}

fn refresh_network(container: &Element, rng: &SharedRandom, settings: &NetworkSettings) {
    let Some(layer) = dom::layer(container, NETWORK_LAYER) else {
        return;
    };
    let layout = network_layout(&mut *rng.borrow_mut(), settings);
    spawn_network(Some(&layer), &layout);
}

fn refresh_matrix(container: &Element, rng: &SharedRandom, settings: &MatrixSettings) {
    let Some(layer) = dom::layer(container, MATRIX_LAYER) else {
        return;
    };
    let width = dom::viewport_width().unwrap_or(MATRIX_FALLBACK_WIDTH);
    let glyphs = matrix_rain(&mut *rng.borrow_mut(), width, settings);
    spawn_matrix(Some(&layer), &glyphs);
}

/// Network, matrix and constellation layers inside one container.
///
/// The network and matrix layers are rebuilt from scratch on their own
/// intervals; the constellation is drawn once per mount.
pub(crate) struct AmbientBackground<S: Scheduler> {
    network_timer: Option<S::Handle>,
    matrix_timer: Option<S::Handle>,
}

impl<S: Scheduler> AmbientBackground<S> {
    pub(crate) fn mount(
        container: &Element,
        scheduler: &S,
        rng: SharedRandom,
        config: &EffectsConfig,
    ) -> Self {
        let network = config.network.clone();
        let matrix = config.matrix.clone();
        refresh_network(container, &rng, &network);
        refresh_matrix(container, &rng, &matrix);
        if let Some(layer) = dom::layer(container, CONSTELLATION_LAYER) {
            let stars = constellation(&mut *rng.borrow_mut(), &config.constellation);
            spawn_constellation(Some(&layer), &stars);
        }

        let network_timer = {
            let container = container.clone();
            let rng = rng.clone();
            let period = network.refresh_ms;
            scheduler.every(period, move || refresh_network(&container, &rng, &network))
        };
        let matrix_timer = {
            let container = container.clone();
            let period = matrix.refresh_ms;
            scheduler.every(period, move || refresh_matrix(&container, &rng, &matrix))
        };
        Self {
            network_timer: Some(network_timer),
            matrix_timer: Some(matrix_timer),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.network_timer.is_some() || self.matrix_timer.is_some()
    }
}

impl<S: Scheduler> Effect for AmbientBackground<S> {
    fn teardown(&mut self) {
        self.network_timer.take();
        self.matrix_timer.take();
    }
}

#[function_component(AdvancedBackground)]
pub(crate) fn advanced_background() -> Html {
    let container_ref = use_node_ref();
    {
        let container_ref = container_ref.clone();
        use_mounted_effect((), move |_| {
            let container = container_ref.cast::<Element>()?;
            let config = effects_config();
            let rng = effects_rng(&config);
            Some(AmbientBackground::mount(
                &container,
                &BrowserScheduler,
                rng,
                &config,
            ))
        });
    }
    html! {
        <div ref={container_ref} class="ambient-background">
            <div class="tech-grid"></div>
            <div class={NETWORK_LAYER}></div>
            <div class="morphing-blob blob-1"></div>
            <div class="morphing-blob blob-2"></div>
            <div class="morphing-blob blob-3"></div>
            <div class={MATRIX_LAYER}></div>
            <div class={CONSTELLATION_LAYER}></div>
        </div>
    }
}

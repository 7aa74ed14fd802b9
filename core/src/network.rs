//! Node-and-line background layout.
//!
//! Positions are percentages of the owning container. A link is drawn from
//! the lower-indexed node towards the other one, so the DOM layer only needs
//! the anchor, a width (`length`) and a rotation (`angle_rad`).

use serde::{Deserialize, Serialize};

use crate::palette::NETWORK_COLORS;
use crate::random::{pick, range, RandomSource};

pub const NODE_COUNT_DEFAULT: usize = 15;
pub const NODE_COUNT_MAX: usize = 200;
pub const LINK_THRESHOLD_DEFAULT: f64 = 25.0;
pub const NETWORK_REFRESH_MS_DEFAULT: u32 = 15_000;
const NODE_DELAY_MAX_S: f64 = 8.0;
const LINK_DELAY_MAX_S: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub node_count: usize,
    pub link_threshold: f64,
    pub refresh_ms: u32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT_DEFAULT,
            link_threshold: LINK_THRESHOLD_DEFAULT,
            refresh_ms: NETWORK_REFRESH_MS_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
    pub x: f64,
    pub y: f64,
    pub delay_s: f64,
    pub color: &'static str,
    pub glow: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLink {
    pub from: usize,
    pub to: usize,
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub angle_rad: f64,
    pub delay_s: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkLayout {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

pub fn scatter_nodes<R: RandomSource + ?Sized>(rng: &mut R, count: usize) -> Vec<NetworkNode> {
    let fallback = NETWORK_COLORS[0];
    (0..count)
        .map(|_| {
            let x = range(rng, 0.0, 100.0);
            let y = range(rng, 0.0, 100.0);
            let delay_s = range(rng, 0.0, NODE_DELAY_MAX_S);
            let color = pick(rng, NETWORK_COLORS).copied().unwrap_or(fallback);
            let glow = pick(rng, NETWORK_COLORS).copied().unwrap_or(fallback);
            NetworkNode {
                x,
                y,
                delay_s,
                color,
                glow,
            }
        })
        .collect()
}

pub fn distance(a: &NetworkNode, b: &NetworkNode) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub fn connect_nodes<R: RandomSource + ?Sized>(
    nodes: &[NetworkNode],
    threshold: f64,
    rng: &mut R,
) -> Vec<NetworkLink> {
    let mut links = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (a, b) = (&nodes[i], &nodes[j]);
            let length = distance(a, b);
            if length >= threshold {
                continue;
            }
            links.push(NetworkLink {
                from: i,
                to: j,
                x: a.x,
                y: a.y,
                length,
                angle_rad: (b.y - a.y).atan2(b.x - a.x),
                delay_s: range(rng, 0.0, LINK_DELAY_MAX_S),
            });
        }
    }
    links
}

pub fn network_layout<R: RandomSource + ?Sized>(
    rng: &mut R,
    settings: &NetworkSettings,
) -> NetworkLayout {
    let nodes = scatter_nodes(rng, settings.node_count);
    let links = connect_nodes(&nodes, settings.link_threshold, rng);
    NetworkLayout { nodes, links }
}

use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

use glowfolio_core::network::{
    connect_nodes, distance, network_layout, NetworkNode, NetworkSettings,
};
use glowfolio_core::random::{SequenceSource, SplitMix64};

fn node(x: f64, y: f64) -> NetworkNode {
    NetworkNode {
        x,
        y,
        delay_s: 0.0,
        color: "blue",
        glow: "blue",
    }
}

fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(delta <= 1e-9, "expected {expected:.9} got {actual:.9}");
}

#[test]
fn links_only_pairs_under_threshold() {
    let nodes = vec![node(0.0, 0.0), node(10.0, 0.0), node(0.0, 30.0), node(50.0, 50.0), node(10.0, 10.0)];
    let mut rng = SequenceSource::constant(0.5);
    let links = connect_nodes(&nodes, 25.0, &mut rng);

    let pairs: Vec<(usize, usize)> = links.iter().map(|link| (link.from, link.to)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 4), (1, 4), (2, 4)]);

    assert_close(links[0].length, 10.0);
    assert_close(links[0].angle_rad, 0.0);
    assert_close(links[1].angle_rad, FRAC_PI_4);
    assert_close(links[2].angle_rad, FRAC_PI_2);
    assert_close(links[3].angle_rad, (-20.0f64).atan2(10.0));
    assert_close(links[3].length, 500.0f64.sqrt());
    assert_eq!((links[3].x, links[3].y), (0.0, 30.0));
    assert!(links.iter().all(|link| (0.0..4.0).contains(&link.delay_s)));
}

#[test]
fn distance_equal_to_threshold_is_not_linked() {
    let nodes = vec![node(0.0, 0.0), node(25.0, 0.0)];
    let mut rng = SequenceSource::constant(0.0);
    assert!(connect_nodes(&nodes, 25.0, &mut rng).is_empty());
}

#[test]
fn random_layouts_link_exactly_the_close_pairs() {
    let settings = NetworkSettings::default();
    for seed in 0..20u64 {
        let mut rng = SplitMix64::new(seed);
        let layout = network_layout(&mut rng, &settings);
        assert_eq!(layout.nodes.len(), settings.node_count);

        for i in 0..layout.nodes.len() {
            for j in (i + 1)..layout.nodes.len() {
                let d = distance(&layout.nodes[i], &layout.nodes[j]);
                let matches = layout
                    .links
                    .iter()
                    .filter(|link| link.from == i && link.to == j)
                    .collect::<Vec<_>>();
                if d < settings.link_threshold {
                    assert_eq!(matches.len(), 1, "seed {seed} pair {i}-{j}");
                    let (a, b) = (&layout.nodes[i], &layout.nodes[j]);
                    assert_close(matches[0].length, d);
                    assert_close(matches[0].angle_rad, (b.y - a.y).atan2(b.x - a.x));
                } else {
                    assert!(matches.is_empty(), "seed {seed} pair {i}-{j}");
                }
            }
        }
    }
}

#[test]
fn nodes_stay_inside_the_container() {
    let mut rng = SplitMix64::new(7);
    let layout = network_layout(&mut rng, &NetworkSettings::default());
    for node in &layout.nodes {
        assert!((0.0..100.0).contains(&node.x));
        assert!((0.0..100.0).contains(&node.y));
        assert!((0.0..8.0).contains(&node.delay_s));
        assert!(node.color.starts_with("rgba("));
    }
}

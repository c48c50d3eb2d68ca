//! Force-directed network renderer
//!
//! A self-contained spring-embedder: charge repulsion between all node
//! pairs, springs along links, a pull toward the viewport center and a
//! pairwise collision constraint. Energy (`alpha`) decays every tick until
//! the simulation settles. Seeding is a deterministic phyllotaxis spiral so
//! a given graph always lays out the same way.

use crate::render::{Emphasis, LabelSpec, LinkSpec, PointSpec, RenderTarget};
use ledgerlens_types::config::{ForceConfig, Viewport};
use ledgerlens_types::engine_state::Selection;
use ledgerlens_types::network::NetworkGraph;
use ledgerlens_types::AccountId;
use std::collections::HashMap;
use tracing::{debug, trace};

const COLOR_NODE_SUSPICIOUS: &str = "#ef4444";
const COLOR_NODE_NORMAL: &str = "#00d4ff";

const NODE_RADIUS: f64 = 14.0;
const NODE_RADIUS_SUSPICIOUS: f64 = 18.0;
const HOVER_RADIUS_BOOST: f64 = 4.0;
const LABEL_OFFSET: f64 = 10.0;

const SEED_RADIUS: f64 = 10.0;
// golden angle, matches the conventional phyllotaxis spread
const SEED_ANGLE: f64 = std::f64::consts::PI * (3.0 - 2.236_067_977_499_79);

/// One positioned node inside the simulation.
#[derive(Debug, Clone)]
pub struct SimNode {
    pub id: AccountId,
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
}

/// The physics loop behind the network view.
///
/// Advance it with [`step`] until [`settled`]; [`stop`] freezes it and is
/// safe to call any number of times, including after settling.
///
/// [`step`]: ForceSimulation::step
/// [`settled`]: ForceSimulation::settled
/// [`stop`]: ForceSimulation::stop
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    config: ForceConfig,
    center: (f64, f64),
    nodes: Vec<SimNode>,
    links: Vec<(usize, usize)>,
    alpha: f64,
    ticks: u32,
    stopped: bool,
}

impl ForceSimulation {
    pub fn new(graph: &NetworkGraph, config: ForceConfig, viewport: &Viewport) -> Self {
        let center = viewport.center();
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let nodes = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let radius = SEED_RADIUS * (0.5 + i as f64).sqrt();
                let angle = i as f64 * SEED_ANGLE;
                SimNode {
                    id: n.id.clone(),
                    x: center.0 + radius * angle.cos(),
                    y: center.1 + radius * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    radius: if n.suspicious {
                        NODE_RADIUS_SUSPICIOUS
                    } else {
                        NODE_RADIUS
                    },
                }
            })
            .collect();

        let links = graph
            .links
            .iter()
            .filter_map(|l| {
                let s = *index.get(l.source.as_str())?;
                let t = *index.get(l.target.as_str())?;
                Some((s, t))
            })
            .collect();

        Self {
            config,
            center,
            nodes,
            links,
            alpha: config.alpha,
            ticks: 0,
            stopped: false,
        }
    }

    /// Advance the simulation one tick. Returns whether it is still live.
    pub fn step(&mut self) -> bool {
        if self.settled() {
            return false;
        }

        self.apply_charge();
        self.apply_links();
        self.apply_center();

        let decay = 1.0 - self.config.velocity_decay;
        for node in &mut self.nodes {
            node.vx *= decay;
            node.vy *= decay;
            node.x += node.vx;
            node.y += node.vy;
        }

        self.resolve_collisions();

        self.alpha *= 1.0 - self.config.alpha_decay;
        self.ticks += 1;
        if self.settled() {
            debug!(ticks = self.ticks, "network layout settled");
        }
        !self.settled()
    }

    /// Whether the simulation has run out of energy, hit the tick cap, or
    /// was stopped.
    pub fn settled(&self) -> bool {
        self.stopped || self.alpha < self.config.alpha_min || self.ticks >= self.config.max_ticks
    }

    /// Freeze the simulation. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    fn apply_charge(&mut self) {
        let strength = self.config.charge_strength;
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let (dx, dy) = self.separation(i, j);
                let d2 = (dx * dx + dy * dy).max(1.0);
                // negative strength pushes the pair apart
                let f = strength * self.alpha / d2;
                let (fx, fy) = (dx * f, dy * f);
                self.nodes[i].vx += fx;
                self.nodes[i].vy += fy;
                self.nodes[j].vx -= fx;
                self.nodes[j].vy -= fy;
            }
        }
    }

    fn apply_links(&mut self) {
        let rest = self.config.link_distance;
        for &(s, t) in &self.links {
            if s == t {
                continue;
            }
            let dx = self.nodes[t].x - self.nodes[s].x;
            let dy = self.nodes[t].y - self.nodes[s].y;
            let d = (dx * dx + dy * dy).sqrt().max(1e-6);
            let pull = (d - rest) / d * 0.5 * self.alpha;
            let (fx, fy) = (dx * pull, dy * pull);
            self.nodes[s].vx += fx;
            self.nodes[s].vy += fy;
            self.nodes[t].vx -= fx;
            self.nodes[t].vy -= fy;
        }
    }

    fn apply_center(&mut self) {
        let (cx, cy) = self.center;
        let strength = self.config.center_strength;
        for node in &mut self.nodes {
            node.vx += (cx - node.x) * strength * self.alpha;
            node.vy += (cy - node.y) * strength * self.alpha;
        }
    }

    fn resolve_collisions(&mut self) {
        let min_gap = self.config.collision_radius;
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let (dx, dy) = self.separation(i, j);
                let d = (dx * dx + dy * dy).sqrt();
                if d < min_gap {
                    let push = (min_gap - d) / d / 2.0;
                    let (px, py) = (dx * push, dy * push);
                    self.nodes[i].x -= px;
                    self.nodes[i].y -= py;
                    self.nodes[j].x += px;
                    self.nodes[j].y += py;
                }
            }
        }
    }

    // Vector from node i to node j, nudged apart deterministically when the
    // pair is coincident so forces never divide by zero.
    fn separation(&self, i: usize, j: usize) -> (f64, f64) {
        let dx = self.nodes[j].x - self.nodes[i].x;
        let dy = self.nodes[j].y - self.nodes[i].y;
        if dx.abs() < 1e-9 && dy.abs() < 1e-9 {
            ((j - i) as f64 * 1e-6, 1e-6)
        } else {
            (dx, dy)
        }
    }
}

/// Renders the network view onto a [`RenderTarget`], driving its own
/// [`ForceSimulation`].
#[derive(Debug, Clone)]
pub struct ForceRenderer {
    graph: NetworkGraph,
    sim: ForceSimulation,
}

impl ForceRenderer {
    pub fn new(graph: NetworkGraph, config: ForceConfig, viewport: &Viewport) -> Self {
        let sim = ForceSimulation::new(&graph, config, viewport);
        Self { graph, sim }
    }

    /// Advance the physics one tick. Returns whether the layout is still
    /// moving.
    pub fn tick(&mut self) -> bool {
        self.sim.step()
    }

    pub fn is_settled(&self) -> bool {
        self.sim.settled()
    }

    /// Draw the graph at the simulation's current positions.
    pub fn render(
        &self,
        selection: Option<&Selection>,
        hovered: Option<&AccountId>,
        target: &mut dyn RenderTarget,
    ) {
        let selected = match selection {
            Some(Selection::Node(id)) => Some(id),
            _ => None,
        };

        let pos: HashMap<&str, (f64, f64)> = self
            .sim
            .nodes()
            .iter()
            .map(|n| (n.id.as_str(), (n.x, n.y)))
            .collect();

        let links: Vec<LinkSpec> = self
            .graph
            .links
            .iter()
            .filter_map(|l| {
                let &(x1, y1) = pos.get(l.source.as_str())?;
                let &(x2, y2) = pos.get(l.target.as_str())?;
                let emphasis = match selected {
                    None => Emphasis::Normal,
                    Some(id) if l.touches(id) => Emphasis::Focus,
                    Some(_) => Emphasis::Dimmed,
                };
                Some(LinkSpec {
                    source: l.source.as_str().to_owned(),
                    target: l.target.as_str().to_owned(),
                    x1,
                    y1,
                    x2,
                    y2,
                    suspicious: l.suspicious,
                    emphasis,
                })
            })
            .collect();

        let mut points = Vec::with_capacity(self.graph.node_count());
        let mut labels = Vec::with_capacity(self.graph.node_count());
        for (node, sim) in self.graph.nodes.iter().zip(self.sim.nodes()) {
            let emphasis = match selected {
                None => Emphasis::Normal,
                Some(id) if &node.id == id => Emphasis::Focus,
                Some(id) if self.graph.is_connected(id, &node.id) => Emphasis::Related,
                Some(_) => Emphasis::Dimmed,
            };
            let boosted = hovered == Some(&node.id) || emphasis == Emphasis::Focus;
            let radius = sim.radius + if boosted { HOVER_RADIUS_BOOST } else { 0.0 };
            points.push(PointSpec {
                id: node.id.as_str().to_owned(),
                x: sim.x,
                y: sim.y,
                radius,
                color: if node.suspicious {
                    COLOR_NODE_SUSPICIOUS
                } else {
                    COLOR_NODE_NORMAL
                }
                .to_owned(),
                emphasis,
            });
            labels.push(LabelSpec {
                text: node.label.clone(),
                x: sim.x,
                y: sim.y + radius + LABEL_OFFSET,
                emphasis,
            });
        }

        trace!(
            nodes = points.len(),
            links = links.len(),
            settled = self.is_settled(),
            "network frame"
        );
        target.draw_links(&links);
        target.draw_points(&points);
        target.draw_labels(&labels);
    }

    /// Stop the simulation and wipe this renderer's output.
    pub fn destroy(&mut self, target: &mut dyn RenderTarget) {
        self.sim.stop();
        target.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::test_support::{tx_between, RecordingTarget};

    fn sample_graph() -> NetworkGraph {
        let txs = vec![
            tx_between("TX1", "A", "B", 0.9),
            tx_between("TX2", "B", "C", 0.2),
            tx_between("TX3", "C", "D", 0.2),
        ];
        build_graph(&txs, 0.7)
    }

    fn renderer() -> ForceRenderer {
        ForceRenderer::new(sample_graph(), ForceConfig::default(), &Viewport::default())
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut a = renderer();
        let mut b = renderer();
        for _ in 0..50 {
            a.tick();
            b.tick();
        }
        for (na, nb) in a.sim.nodes().iter().zip(b.sim.nodes()) {
            assert_eq!(na.x, nb.x);
            assert_eq!(na.y, nb.y);
        }
    }

    #[test]
    fn test_simulation_settles_and_stays_settled() {
        let mut r = renderer();
        let mut ticks = 0u32;
        while r.tick() {
            ticks += 1;
            assert!(ticks <= ForceConfig::default().max_ticks);
        }
        assert!(r.is_settled());
        assert!(!r.tick());
    }

    #[test]
    fn test_stop_is_idempotent_even_after_settling() {
        let mut r = renderer();
        let mut target = RecordingTarget::default();
        while r.tick() {}
        r.destroy(&mut target);
        r.destroy(&mut target);
        assert!(r.is_settled());
        assert_eq!(target.clears, 2);
    }

    #[test]
    fn test_connected_nodes_pull_toward_link_distance() {
        let txs = vec![tx_between("TX1", "A", "B", 0.2)];
        let graph = build_graph(&txs, 0.7);
        let mut r = ForceRenderer::new(graph, ForceConfig::default(), &Viewport::default());
        while r.tick() {}
        let nodes = r.sim.nodes();
        let d = ((nodes[0].x - nodes[1].x).powi(2) + (nodes[0].y - nodes[1].y).powi(2)).sqrt();
        // charge pushes past the rest length a little; same order of magnitude
        assert!(d > 30.0, "nodes collapsed: {d}");
        assert!(d < 400.0, "nodes flew apart: {d}");
    }

    #[test]
    fn test_render_draws_nodes_links_and_labels() {
        let mut r = renderer();
        r.tick();
        let mut target = RecordingTarget::default();
        r.render(None, None, &mut target);
        assert_eq!(target.points.len(), 4);
        assert_eq!(target.links.len(), 3);
        assert_eq!(target.labels.len(), 4);
        // flagged endpoints of the one suspicious transaction
        assert!(target.points[0].color == COLOR_NODE_SUSPICIOUS);
        assert!(target.points[1].color == COLOR_NODE_SUSPICIOUS);
        assert!(target.points[2].color == COLOR_NODE_NORMAL);
    }

    #[test]
    fn test_node_selection_emphasis() {
        let mut r = renderer();
        r.tick();
        let selection = Selection::Node(AccountId::new("B"));
        let mut target = RecordingTarget::default();
        r.render(Some(&selection), None, &mut target);

        let by_id = |id: &str| {
            target
                .points
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.emphasis)
        };
        assert_eq!(by_id("B"), Some(Emphasis::Focus));
        assert_eq!(by_id("A"), Some(Emphasis::Related));
        assert_eq!(by_id("C"), Some(Emphasis::Related));
        assert_eq!(by_id("D"), Some(Emphasis::Dimmed));

        // links incident to the selection stand out, the rest recede
        let incident = target
            .links
            .iter()
            .filter(|l| l.emphasis == Emphasis::Focus)
            .count();
        assert_eq!(incident, 2);
        let dimmed = target
            .links
            .iter()
            .filter(|l| l.emphasis == Emphasis::Dimmed)
            .count();
        assert_eq!(dimmed, 1);
    }

    #[test]
    fn test_suspicious_nodes_draw_larger() {
        let mut r = renderer();
        r.tick();
        let mut target = RecordingTarget::default();
        r.render(None, None, &mut target);
        let radius = |id: &str| {
            target
                .points
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.radius)
        };
        assert_eq!(radius("A"), Some(NODE_RADIUS_SUSPICIOUS));
        assert_eq!(radius("D"), Some(NODE_RADIUS));
    }
}

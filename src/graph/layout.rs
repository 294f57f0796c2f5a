use std::collections::BTreeMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::graph::Graph;
use crate::model::NodeId;

const SPRING_STEPS: usize = 600;
const SPRING_DT: f32 = 0.02;
const SEED_RADIUS: f64 = 100.0;

/// Fixed node positions in layout space (y grows upwards).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<NodeId, [f64; 2]>", into = "BTreeMap<NodeId, [f64; 2]>")]
pub struct Layout {
    positions: BTreeMap<NodeId, Point>,
}

impl From<BTreeMap<NodeId, [f64; 2]>> for Layout {
    fn from(m: BTreeMap<NodeId, [f64; 2]>) -> Self {
        Self {
            positions: m
                .into_iter()
                .map(|(k, [x, y])| (k, Point::new(x, y)))
                .collect(),
        }
    }
}

impl From<Layout> for BTreeMap<NodeId, [f64; 2]> {
    fn from(l: Layout) -> Self {
        l.positions
            .into_iter()
            .map(|(k, p)| (k, [p.x, p.y]))
            .collect()
    }
}

impl Layout {
    /// Empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position of one node.
    pub fn insert(&mut self, node: impl Into<NodeId>, pos: Point) {
        self.positions.insert(node.into(), pos);
    }

    /// Position of one node.
    pub fn get(&self, node: &str) -> Option<Point> {
        self.positions.get(node).copied()
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Return `true` when no node is positioned.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spring/charge layout computed from the graph alone.
    ///
    /// Nodes start evenly spaced on a circle in graph order and the simulation runs a fixed
    /// number of fixed-size steps, so the same graph always yields the same layout.
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn force_directed(graph: &Graph) -> Self {
        let n = graph.node_count();
        if n == 0 {
            return Self::new();
        }

        let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: 0.9,
        });

        let mut handles = Vec::with_capacity(n);
        for i in 0..n {
            let angle = (i as f64) * 2.0 * PI / n as f64;
            handles.push(sim.add_node(NodeData {
                x: (SEED_RADIUS * angle.cos()) as f32,
                y: (SEED_RADIUS * angle.sin()) as f32,
                mass: 10.0,
                is_anchor: false,
                user_data: i,
            }));
        }
        for &(a, b) in graph.edge_indices() {
            if a != b {
                sim.add_edge(handles[a], handles[b], EdgeData::default());
            }
        }

        for _ in 0..SPRING_STEPS {
            sim.update(SPRING_DT);
        }

        let mut coords = vec![Point::ZERO; n];
        sim.visit_nodes(|node| {
            // Screen-style y from the simulation; flip into layout space.
            coords[node.data.user_data] = Point::new(node.x() as f64, -(node.y() as f64));
        });

        let mut out = Self::new();
        for (id, p) in graph.nodes().iter().zip(coords) {
            out.insert(id.clone(), p);
        }
        out
    }

    /// Fail if any graph node has no position.
    pub fn check_covers(&self, graph: &Graph) -> Diff2GifResult<()> {
        for id in graph.nodes() {
            let Some(p) = self.positions.get(id) else {
                return Err(Diff2GifError::config(format!(
                    "layout has no position for node \"{id}\""
                )));
            };
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(Diff2GifError::config(format!(
                    "layout position for node \"{id}\" is not finite"
                )));
            }
        }
        Ok(())
    }

    /// Map every graph node (in graph order) into `target` pixel space.
    ///
    /// Each axis is scaled independently to fill the target; a degenerate axis (all nodes at
    /// the same coordinate) is centred. Layout y is flipped so larger y is drawn higher.
    pub fn project(&self, graph: &Graph, target: Rect) -> Diff2GifResult<Vec<Point>> {
        self.check_covers(graph)?;
        let pts: Vec<Point> = graph
            .nodes()
            .iter()
            .filter_map(|id| self.positions.get(id).copied())
            .collect();
        let Some(first) = pts.first().copied() else {
            return Ok(Vec::new());
        };

        let mut bounds = Rect::from_points(first, first);
        for &p in &pts[1..] {
            bounds = bounds.union_pt(p);
        }

        fn axis(v: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> f64 {
            if hi - lo <= f64::EPSILON {
                (out_lo + out_hi) / 2.0
            } else {
                out_lo + (v - lo) / (hi - lo) * (out_hi - out_lo)
            }
        }

        Ok(pts
            .into_iter()
            .map(|p| {
                Point::new(
                    axis(p.x, bounds.x0, bounds.x1, target.x0, target.x1),
                    axis(p.y, bounds.y0, bounds.y1, target.y1, target.y0),
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/layout.rs"]
mod tests;

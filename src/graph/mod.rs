//! Undirected network rendered by the pipeline.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::model::NodeId;

pub(crate) mod layout;

/// Undirected graph with a stable node iteration order (insertion order).
///
/// Parallel edges collapse into one; self-loops are kept but never drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    edges: Vec<(usize, usize)>,
    edge_set: BTreeSet<(usize, usize)>,
}

impl Graph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle `0 - 1 - ... - (n-1) - 0` with decimal node ids.
    pub fn ring(n: usize) -> Self {
        let mut g = Self::new();
        for i in 0..n {
            g.add_node(i.to_string());
        }
        for i in 0..n {
            let j = (i + 1) % n;
            if n > 1 {
                g.link(i, j);
            }
        }
        g
    }

    /// Add a node; returns `false` if it already existed.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(id);
        true
    }

    /// Add an undirected edge between two existing nodes.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Diff2GifResult<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        self.link(ia, ib);
        Ok(())
    }

    fn link(&mut self, a: usize, b: usize) {
        let key = (a.min(b), a.max(b));
        if self.edge_set.insert(key) {
            self.edges.push((a, b));
        }
    }

    fn require(&self, id: &str) -> Diff2GifResult<usize> {
        self.index.get(id).copied().ok_or_else(|| {
            Diff2GifError::config(format!("edge references unknown node \"{id}\""))
        })
    }

    /// Nodes in iteration order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges as pairs of node indices into [`Graph::nodes`].
    pub fn edge_indices(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Edges as pairs of node ids.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    /// Index of a node in iteration order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Return `true` when `a` and `b` are adjacent.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.edge_set.contains(&(a.min(b), a.max(b))),
            _ => false,
        }
    }
}

/// Node reference in JSON: integers are accepted and converted to their decimal form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum NodeRef {
    Int(i64),
    Name(String),
}

impl From<NodeRef> for NodeId {
    fn from(r: NodeRef) -> Self {
        match r {
            NodeRef::Int(n) => n.to_string(),
            NodeRef::Name(s) => s,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct GraphDef {
    nodes: Vec<NodeRef>,
    #[serde(default)]
    edges: Vec<(NodeRef, NodeRef)>,
}

impl Serialize for Graph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        GraphDef {
            nodes: self.nodes.iter().cloned().map(NodeRef::Name).collect(),
            edges: self
                .edges()
                .map(|(a, b)| (NodeRef::Name(a.clone()), NodeRef::Name(b.clone())))
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let def = GraphDef::deserialize(deserializer)?;
        let mut g = Graph::new();
        for n in def.nodes {
            g.add_node(NodeId::from(n));
        }
        for (a, b) in def.edges {
            let (a, b) = (NodeId::from(a), NodeId::from(b));
            g.add_edge(&a, &b).map_err(serde::de::Error::custom)?;
        }
        Ok(g)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/graph.rs"]
mod tests;

//! Node identity and node-voltage tables.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::Error;

/// Identifies an electrical node (an equivalence class of fused pins).
///
/// Ground is the label `"0"` and is pinned at 0 V. Every other net is
/// labelled `N1`, `N2`, ... in the order the netlist builder first
/// encounters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The ground node, fixed at 0 V.
    Ground,
    /// A non-ground net, 1-indexed.
    Net(u32),
}

impl NodeId {
    /// The ground node.
    pub const GROUND: NodeId = NodeId::Ground;

    /// Create a non-ground net id.
    pub fn net(n: u32) -> Self {
        NodeId::Net(n)
    }

    /// Check if this is the ground node.
    pub fn is_ground(self) -> bool {
        matches!(self, NodeId::Ground)
    }

    /// The external label: `"0"` for ground, `"N<k>"` otherwise.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Ground => write!(f, "0"),
            NodeId::Net(n) => write!(f, "N{n}"),
        }
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "0" {
            return Ok(NodeId::Ground);
        }
        s.strip_prefix('N')
            .and_then(|rest| rest.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .map(NodeId::Net)
            .ok_or_else(|| Error::InvalidNodeLabel(s.to_string()))
    }
}

/// Solved per-node voltages. Always answers 0 V for ground.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeVoltages {
    map: IndexMap<NodeId, f64>,
}

impl NodeVoltages {
    /// An empty table (still answers ground).
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every given node at 0 V, ground included.
    pub fn zeroed(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut v = Self::new();
        v.map.insert(NodeId::Ground, 0.0);
        for node in nodes {
            v.map.entry(node).or_insert(0.0);
        }
        v
    }

    /// Record a node's voltage. Writes to ground are ignored.
    pub fn set(&mut self, node: NodeId, volts: f64) {
        if node.is_ground() {
            return;
        }
        self.map.insert(node, volts);
    }

    /// The voltage at `node`, or `None` if the node was never solved.
    /// Ground is always `Some(0.0)`.
    pub fn get(&self, node: NodeId) -> Option<f64> {
        if node.is_ground() {
            return Some(0.0);
        }
        self.map.get(&node).copied()
    }

    /// The voltage at `node`, defaulting unknown nodes to 0 V.
    pub fn voltage(&self, node: NodeId) -> f64 {
        self.get(node).unwrap_or(0.0)
    }

    /// Iterate `(node, volts)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.map.iter().map(|(&n, &v)| (n, v))
    }

    /// Number of recorded nodes, ground included once recorded.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Largest per-node absolute difference against `other`.
    ///
    /// Nodes absent from either table are read as 0 V.
    pub fn max_delta(&self, other: &NodeVoltages) -> f64 {
        let mut max = 0.0f64;
        for (&node, &v) in &self.map {
            max = max.max((v - other.voltage(node)).abs());
        }
        for (&node, &v) in &other.map {
            max = max.max((v - self.voltage(node)).abs());
        }
        max
    }
}

//! Modified Nodal Analysis matrix assembly.
//!
//! The system `A x = z` holds one row per non-ground node plus one row
//! per voltage-source stamp. Node rows carry conductances and current
//! injections; voltage-source rows carry the equality constraints and
//! expose the branch currents as extra unknowns.

use indexmap::IndexSet;
use nalgebra::{DMatrix, DVector};

use crate::device::BoxedDevice;
use crate::node::NodeId;
use crate::stamp::Stamp;

/// Shunt applied to a fully decoupled node row, in siemens. Small enough
/// to read as an open circuit, large enough to keep `A` invertible.
pub const FLOATING_NODE_SHUNT: f64 = 1e-12;

/// Stable ordering of the non-ground nodes of one solve.
#[derive(Debug, Clone, Default)]
pub struct NodeOrder {
    nodes: IndexSet<NodeId>,
}

impl NodeOrder {
    /// Collect every non-ground node referenced by a bound pin, in
    /// device/pin declaration order.
    pub fn from_devices(devices: &[BoxedDevice]) -> Self {
        let mut nodes = IndexSet::new();
        for device in devices {
            for pin in device.pins() {
                if let Some(node) = pin.node() {
                    if !node.is_ground() {
                        nodes.insert(node);
                    }
                }
            }
        }
        Self { nodes }
    }

    /// Matrix row of `node`; `None` for ground or unknown nodes.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        if node.is_ground() {
            return None;
        }
        self.nodes.get_index_of(&node)
    }

    /// The node at matrix row `index`.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.get_index(index).copied()
    }

    /// Iterate the ordered non-ground nodes.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Number of non-ground nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The assembled system `A x = z`.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// Coefficient matrix, `(N + M) x (N + M)`.
    pub matrix: DMatrix<f64>,
    /// Right-hand side.
    pub rhs: DVector<f64>,
    /// Non-ground node count `N`.
    pub num_nodes: usize,
    /// Voltage-source unknown count `M`.
    pub num_vsources: usize,
}

impl MnaSystem {
    pub fn new(num_nodes: usize, num_vsources: usize) -> Self {
        let size = num_nodes + num_vsources;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_vsources,
        }
    }

    /// Total unknown count `N + M`.
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_vsources
    }

    /// Stamp a conductance between two node rows (`None` = ground).
    pub fn stamp_conductance(&mut self, a: Option<usize>, b: Option<usize>, g: f64) {
        if let Some(i) = a {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = b {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (a, b) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a current injection of `i` amperes into a node row.
    pub fn stamp_current(&mut self, node: Option<usize>, i: f64) {
        if let Some(n) = node {
            self.rhs[n] -= i;
        }
    }

    /// Stamp a voltage-source constraint at extension rank `k`.
    pub fn stamp_voltage_source(
        &mut self,
        plus: Option<usize>,
        minus: Option<usize>,
        k: usize,
        v: f64,
    ) {
        let row = self.num_nodes + k;
        if let Some(i) = plus {
            self.matrix[(i, row)] += 1.0;
            self.matrix[(row, i)] += 1.0;
        }
        if let Some(j) = minus {
            self.matrix[(j, row)] -= 1.0;
            self.matrix[(row, j)] -= 1.0;
        }
        self.rhs[row] = v;
    }

    /// Add `eps` to every node diagonal, and to each voltage-source
    /// extension row whose diagonal is zero. Fallback regularization for
    /// systems still singular after floating-node shunts.
    pub fn add_regularization(&mut self, eps: f64) {
        for i in 0..self.num_nodes {
            self.matrix[(i, i)] += eps;
        }
        for k in self.num_nodes..self.size() {
            if self.matrix[(k, k)] == 0.0 {
                self.matrix[(k, k)] += eps;
            }
        }
    }
}

/// One assembled iteration: the system, the voltage-source tags in
/// extension-rank order, and the node rows that needed a floating shunt.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub mna: MnaSystem,
    pub vs_tags: Vec<String>,
    pub floating: Vec<usize>,
}

impl Assembly {
    /// Translate a stamp list into the linear system.
    ///
    /// Voltage-source stamps take extension ranks in encounter order.
    /// After stamping, any node row with no coupling anywhere across the
    /// full system width gets [`FLOATING_NODE_SHUNT`] on its diagonal.
    pub fn build(stamps: &[Stamp], order: &NodeOrder) -> Self {
        let num_vsources = stamps.iter().filter(|s| s.is_voltage_source()).count();
        let mut mna = MnaSystem::new(order.len(), num_vsources);
        let mut vs_tags = Vec::with_capacity(num_vsources);

        for stamp in stamps {
            match stamp {
                Stamp::Conductance { a, b, g } => {
                    mna.stamp_conductance(order.index_of(*a), order.index_of(*b), *g);
                }
                Stamp::CurrentInjection { node, i } => {
                    mna.stamp_current(order.index_of(*node), *i);
                }
                Stamp::VoltageSource {
                    plus,
                    minus,
                    v,
                    tag,
                } => {
                    let k = vs_tags.len();
                    mna.stamp_voltage_source(order.index_of(*plus), order.index_of(*minus), k, *v);
                    vs_tags.push(tag.clone());
                }
            }
        }

        let floating = Self::shunt_floating_rows(&mut mna);
        Self {
            mna,
            vs_tags,
            floating,
        }
    }

    fn shunt_floating_rows(mna: &mut MnaSystem) -> Vec<usize> {
        let size = mna.size();
        let mut floating = Vec::new();
        for row in 0..mna.num_nodes {
            let decoupled = (0..size)
                .all(|j| mna.matrix[(row, j)] == 0.0 && mna.matrix[(j, row)] == 0.0);
            if decoupled {
                floating.push(row);
            }
        }
        for &row in &floating {
            mna.matrix[(row, row)] += FLOATING_NODE_SHUNT;
        }
        floating
    }
}

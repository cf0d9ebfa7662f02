//! Error types for voltaic-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Pivot search found no usable pivot.
    #[error("singular matrix")]
    SingularMatrix,

    /// Non-square system or mismatched right-hand side.
    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Both the nominal solve and the regularized retry failed.
    #[error(
        "unsolvable circuit: matrix still singular after regularization \
         ({} nodes, {} floating, {num_vsources} voltage sources)",
        .nodes.len(),
        .floating.len()
    )]
    Unsolvable {
        /// Every non-ground node of the solve, by label.
        nodes: Vec<String>,
        /// Nodes that needed a floating-node shunt, by label.
        floating: Vec<String>,
        /// Voltage-source unknowns in the failing assembly.
        num_vsources: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

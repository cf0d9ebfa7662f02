//! DC steady-state analysis.
//!
//! The outer loop is a fixed point over discrete device states: each
//! device is linear within its current behavioral region, so every
//! assembled system solves exactly, and state updates move devices
//! between regions until the voltage vector stops moving. Hysteresis and
//! dead-bands in the device models keep boundary inputs from producing
//! two-cycle limit oscillations.

use indexmap::IndexMap;
use nalgebra::DVector;

use voltaic_core::mna::{Assembly, NodeOrder};
use voltaic_core::{BehavioralState, Netlist, NodeVoltages, Stamp};

use crate::error::{Error, Result};
use crate::linear::solve_dense;

/// Default outer-iteration budget.
pub const DEFAULT_MAX_ITER: usize = 50;
/// Default convergence tolerance on the max per-node voltage delta, in
/// volts.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Diagonal lift for the regularized retry after a singular solve.
const TIKHONOV_EPS: f64 = 1e-9;

/// Outer-loop controls.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Iteration budget; exceeding it yields `converged = false`.
    pub max_iter: usize,
    /// Convergence tolerance in volts.
    pub tol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
        }
    }
}

/// Result of a DC solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Every node's voltage, ground (`"0"`) included at 0 V.
    pub node_voltages: NodeVoltages,
    /// Branch current per voltage-source stamp, keyed by stamp tag.
    /// Empty when the solve did not converge.
    pub vs_currents: IndexMap<String, f64>,
    /// Outer iterations actually run, 1-based.
    pub iterations: usize,
    /// Whether the voltage vector settled within tolerance.
    pub converged: bool,
}

impl SolveResult {
    /// Branch current for a voltage-source tag.
    pub fn current(&self, tag: &str) -> Option<f64> {
        self.vs_currents.get(tag).copied()
    }
}

/// A DC solve session.
///
/// The session owns the behavioral state, which persists across calls:
/// re-solving after a parameter or switch edit starts warm, so
/// hysteretic devices keep their history. Use [`DcSolver::reset`] for a
/// cold start, or [`solve_dc`] for a one-shot solve.
///
/// A session must not be shared across concurrent solves.
#[derive(Debug, Default)]
pub struct DcSolver {
    options: SolverOptions,
    state: BehavioralState,
}

impl DcSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self {
            options,
            state: BehavioralState::new(),
        }
    }

    /// The behavioral state after the last solve.
    pub fn state(&self) -> &BehavioralState {
        &self.state
    }

    /// Drop all behavioral history.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Compute the DC steady state of a built netlist.
    pub fn solve(&mut self, netlist: &Netlist) -> Result<SolveResult> {
        let devices = netlist.devices();
        let order = NodeOrder::from_devices(devices);
        let mut last = NodeVoltages::zeroed(order.nodes());

        // Seed pass: let every device commit an initial behavioral
        // decision from the zero vector before the first assembly.
        for device in devices {
            device.update_state(&last, &mut self.state);
        }

        for iteration in 1..=self.options.max_iter {
            let stamps: Vec<Stamp> = devices
                .iter()
                .flat_map(|device| device.stamps(&self.state))
                .collect();
            let assembly = Assembly::build(&stamps, &order);
            let x = self.solve_assembly(&assembly, &order)?;

            let mut voltages = NodeVoltages::zeroed(order.nodes());
            for (i, node) in order.nodes().enumerate() {
                voltages.set(node, x[i]);
            }
            for device in devices {
                device.update_state(&voltages, &mut self.state);
            }

            let max_delta = voltages.max_delta(&last);
            log::debug!("dc iteration {iteration}: max voltage delta {max_delta:.3e} V");
            last = voltages;

            if max_delta < self.options.tol {
                let vs_currents = assembly
                    .vs_tags
                    .iter()
                    .enumerate()
                    .map(|(k, tag)| (tag.clone(), x[order.len() + k]))
                    .collect();
                return Ok(SolveResult {
                    node_voltages: last,
                    vs_currents,
                    iterations: iteration,
                    converged: true,
                });
            }
        }

        log::warn!(
            "dc solve did not converge within {} iterations",
            self.options.max_iter
        );
        Ok(SolveResult {
            node_voltages: last,
            vs_currents: IndexMap::new(),
            iterations: self.options.max_iter,
            converged: false,
        })
    }

    /// Linear solve with the regularized retry.
    fn solve_assembly(&self, assembly: &Assembly, order: &NodeOrder) -> Result<DVector<f64>> {
        match solve_dense(&assembly.mna.matrix, &assembly.mna.rhs) {
            Ok(x) => Ok(x),
            Err(Error::SingularMatrix) => {
                log::warn!("singular system, retrying with Tikhonov regularization");
                let mut mna = assembly.mna.clone();
                mna.add_regularization(TIKHONOV_EPS);
                match solve_dense(&mna.matrix, &mna.rhs) {
                    Ok(x) => Ok(x),
                    Err(Error::SingularMatrix) => Err(Error::Unsolvable {
                        nodes: order.nodes().map(|n| n.label()).collect(),
                        floating: assembly
                            .floating
                            .iter()
                            .filter_map(|&row| order.node_at(row))
                            .map(|n| n.label())
                            .collect(),
                        num_vsources: assembly.vs_tags.len(),
                    }),
                    Err(other) => Err(other),
                }
            }
            Err(other) => Err(other),
        }
    }
}

/// One-shot DC solve with default options and a cold behavioral state.
pub fn solve_dc(netlist: &Netlist) -> Result<SolveResult> {
    DcSolver::default().solve(netlist)
}

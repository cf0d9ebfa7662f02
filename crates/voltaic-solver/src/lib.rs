//! DC solver for Voltaic.
//!
//! Two layers:
//!
//! - [`linear`]: dense Gauss-Jordan elimination with partial pivoting,
//!   used as a black box by the DC loop
//! - [`dc`]: the fixed-point outer loop over behavioral device states,
//!   with floating-node and Tikhonov singularity defenses
//!
//! ```rust
//! use voltaic_core::{Netlist, Wire};
//! use voltaic_devices::{Ground, Resistor, VoltageSource};
//! use voltaic_solver::solve_dc;
//!
//! let mut netlist = Netlist::new();
//! netlist.add_device(VoltageSource::new("V1", 10.0));
//! netlist.add_device(Resistor::new("R1", 3000.0));
//! netlist.add_device(Resistor::new("R2", 2000.0));
//! netlist.add_device(Ground::new("G1"));
//! netlist
//!     .build(&[
//!         Wire::between("V1", "PLUS", "R1", "A"),
//!         Wire::between("R1", "B", "R2", "A"),
//!         Wire::between("R2", "B", "V1", "MINUS"),
//!         Wire::between("V1", "MINUS", "G1", "GND"),
//!     ])
//!     .unwrap();
//!
//! let result = solve_dc(&netlist).unwrap();
//! assert!(result.converged);
//! ```

pub mod dc;
pub mod error;
pub mod linear;

pub use dc::{
    solve_dc, DcSolver, SolveResult, SolverOptions, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE,
};
pub use error::{Error, Result};
pub use linear::{solve_dense, PIVOT_THRESHOLD};

//! # Voltaic
//!
//! DC steady-state simulation for small analog/mixed-signal circuits:
//! resistors, voltage sources, switches, LEDs, open-collector
//! comparators and logic gates, wired pin-to-pin the way a schematic
//! editor draws them.
//!
//! The pipeline: the netlist builder fuses wired pins into electrical
//! nodes, each device stamps its piecewise-linear region into a Modified
//! Nodal Analysis system, and the DC solver iterates linear solves with
//! behavioral state updates until the node voltages settle.
//!
//! ## Quick start
//!
//! ```rust
//! use voltaic::prelude::*;
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
//! let vout = netlist.devices()[2].pin_node("A").unwrap();
//! assert!((result.node_voltages.voltage(vout) - 4.0).abs() < 1e-3);
//! ```

// Re-export the member crates under stable names.
pub use voltaic_core as core;
pub use voltaic_devices as devices;
pub use voltaic_io as io;
pub use voltaic_solver as solver;

// ============================================================================
// Convenient re-exports from voltaic_core
// ============================================================================

pub use voltaic_core::{
    BehavioralState,
    BoxedDevice,
    Device,
    DeviceKind,
    DeviceState,
    // Errors
    Error as CoreError,
    // Netlist
    Netlist,
    NodeId,
    NodeVoltages,
    Pin,
    PinPath,
    // Stamps
    Stamp,
    Wire,
};

// MNA structures (exported from the submodule)
pub use voltaic_core::mna::{Assembly, MnaSystem, NodeOrder};

// ============================================================================
// Convenient re-exports from voltaic_devices
// ============================================================================

pub use voltaic_devices::{Ground, Hc04, Hc08, Led, Lm339, Resistor, Switch, VoltageSource};

// ============================================================================
// Convenient re-exports from voltaic_solver
// ============================================================================

pub use voltaic_solver::{
    solve_dc,
    solve_dense,
    DcSolver,
    Error as SolverError,
    SolveResult,
    SolverOptions,
};

// ============================================================================
// Convenient re-exports from voltaic_io
// ============================================================================

pub use voltaic_io::{CircuitFile, ComponentEntry, Error as IoError, Position};

// ============================================================================
// Re-export commonly used external types
// ============================================================================

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Re-export of nalgebra's dynamic vector type.
pub use nalgebra::DVector;

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use voltaic::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::{Device, Netlist, NodeId, NodeVoltages, PinPath, Stamp, Wire};

    // Devices
    pub use crate::{Ground, Hc04, Hc08, Led, Lm339, Resistor, Switch, VoltageSource};

    // Solver
    pub use crate::{solve_dc, DcSolver, SolveResult, SolverOptions};

    // Persistence
    pub use crate::{CircuitFile, ComponentEntry};

    // Common external types
    pub use crate::{DMatrix, DVector};
}

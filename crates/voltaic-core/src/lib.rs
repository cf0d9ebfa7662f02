//! Core circuit representation and MNA structures for Voltaic.
//!
//! The core abstractions are:
//!
//! - [`NodeId`] - an electrical node; ground is the label `"0"`
//! - [`Pin`] - a component terminal bound to a node by netlisting
//! - [`Netlist`] - devices plus the pin-fusing builder
//! - [`Stamp`] - a single MNA contribution emitted by a device
//! - [`MnaSystem`](mna::MnaSystem) - the assembled system `A x = z`
//! - [`BehavioralState`] - discrete per-device state driving the
//!   piecewise-linear stamp selection
//!
//! # Modified Nodal Analysis
//!
//! The system `A x = z` solves for node voltages and one branch current
//! per voltage-source stamp. Ground does not appear in the matrix.
//!
//! ```rust
//! use voltaic_core::mna::MnaSystem;
//!
//! // Voltage divider: V1 = 10 V at node 0, two 1 kOhm resistors.
//! let mut mna = MnaSystem::new(2, 1);
//! mna.stamp_voltage_source(Some(0), None, 0, 10.0);
//! mna.stamp_conductance(Some(0), Some(1), 1.0 / 1000.0);
//! mna.stamp_conductance(Some(1), None, 1.0 / 1000.0);
//! assert_eq!(mna.size(), 3);
//! ```

pub mod device;
pub mod error;
pub mod mna;
pub mod netlist;
pub mod node;
pub mod pin;
pub mod stamp;
pub mod state;
pub mod union_find;
pub mod units;

pub use device::{BoxedDevice, Device, DeviceKind};
pub use error::{Error, Result};
pub use netlist::{Netlist, PinPath, Wire};
pub use node::{NodeId, NodeVoltages};
pub use pin::Pin;
pub use stamp::Stamp;
pub use state::{BehavioralState, DeviceState};

//! Persisted circuit format for Voltaic.
//!
//! Reads and writes the editor's JSON circuit files (version `1.0`) and
//! turns them into built netlists:
//!
//! ```rust
//! use voltaic_io::{CircuitFile, ComponentEntry};
//!
//! let mut file = CircuitFile::new();
//! file.add_component(ComponentEntry::voltage_source("V1", 5.0));
//! file.add_component(ComponentEntry::resistor("R1", 1000.0));
//! file.add_component(ComponentEntry::ground("G1"));
//! file.add_wire("V1:PLUS", "R1:A");
//! file.add_wire("R1:B", "V1:MINUS");
//! file.add_wire("V1:MINUS", "G1:GND");
//!
//! let netlist = file.build().unwrap();
//! assert!(netlist.has_ground());
//! ```

pub mod error;
pub mod format;

pub use error::{Error, Result};
pub use format::{CircuitFile, ComponentEntry, Position, FORMAT_VERSION};

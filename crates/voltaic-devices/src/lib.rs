//! Device models for Voltaic.
//!
//! The closed device family of the simulator:
//! - Reference: [`Ground`]
//! - Passive: [`Resistor`]
//! - Sources: [`VoltageSource`], optionally current-limited
//! - Topology: [`Switch`]
//! - Piecewise diodes: [`Led`]
//! - Open-collector comparator: [`Lm339`]
//! - Logic gates: [`Hc04`] (inverter), [`Hc08`] (2-input AND)
//!
//! Every model implements [`voltaic_core::Device`]: it emits
//! [`voltaic_core::Stamp`]s for its current behavioral state and refines
//! that state from each solved voltage vector.

pub mod comparator;
pub mod ground;
pub mod led;
pub mod logic;
pub mod passive;
pub mod sources;
pub mod switch;

pub use comparator::Lm339;
pub use ground::Ground;
pub use led::Led;
pub use logic::{Hc04, Hc08};
pub use passive::Resistor;
pub use sources::VoltageSource;
pub use switch::Switch;

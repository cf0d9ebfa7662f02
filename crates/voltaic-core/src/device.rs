//! The device contract.

use std::fmt;

use crate::node::NodeVoltages;
use crate::pin::Pin;
use crate::stamp::Stamp;
use crate::state::BehavioralState;

/// A boxed device.
pub type BoxedDevice = Box<dyn Device>;

/// Closed set of device kinds understood by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Ground,
    Resistor,
    VoltageSource,
    Switch,
    Led,
    Lm339,
    Hc04,
    Hc08,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DeviceKind::Ground => "GROUND",
            DeviceKind::Resistor => "RESISTOR",
            DeviceKind::VoltageSource => "GENERATEUR",
            DeviceKind::Switch => "SWITCH",
            DeviceKind::Led => "LED",
            DeviceKind::Lm339 => "LM339",
            DeviceKind::Hc04 => "HC04",
            DeviceKind::Hc08 => "HC08",
        };
        f.write_str(tag)
    }
}

/// A circuit device: owns its pins and exposes the two solver contracts.
///
/// `stamps` is a pure function of the device and the current behavioral
/// state; `update_state` refines the state from a freshly solved voltage
/// vector. Linear devices leave `update_state` as the default no-op.
pub trait Device: fmt::Debug + Send + Sync {
    /// Stable component id (`"R1"`, `"U3"`, ...).
    fn id(&self) -> &str;

    /// The device's kind tag.
    fn kind(&self) -> DeviceKind;

    /// All pins, in declaration order.
    fn pins(&self) -> Vec<&Pin>;

    /// All pins mutably, same order. Used by the netlist builder to
    /// write node bindings back.
    fn pins_mut(&mut self) -> Vec<&mut Pin>;

    /// MNA contributions for the current behavioral state.
    fn stamps(&self, state: &BehavioralState) -> Vec<Stamp>;

    /// Refine behavioral state from a solved voltage vector.
    fn update_state(&self, _voltages: &NodeVoltages, _state: &mut BehavioralState) {}

    /// Look up a pin by name.
    fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins().into_iter().find(|p| p.name() == name)
    }

    /// The bound node of a named pin, if bound.
    fn pin_node(&self, name: &str) -> Option<crate::node::NodeId> {
        self.pin(name).and_then(Pin::node)
    }
}

//! Passive device models.

use voltaic_core::{BehavioralState, Device, DeviceKind, Pin, Stamp};

/// A resistor between pins `A` and `B`.
#[derive(Debug, Clone)]
pub struct Resistor {
    id: String,
    resistance: f64,
    pins: [Pin; 2],
}

impl Resistor {
    /// Create a resistor. `resistance` is in ohms and must be positive.
    pub fn new(id: impl Into<String>, resistance: f64) -> Self {
        Self {
            id: id.into(),
            resistance,
            pins: [Pin::new("A"), Pin::new("B")],
        }
    }

    /// Resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Conductance `1/R` in siemens.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

impl Device for Resistor {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Resistor
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, _state: &BehavioralState) -> Vec<Stamp> {
        Stamp::conductance(
            self.pins[0].node(),
            self.pins[1].node(),
            self.conductance(),
        )
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::NodeId;

    #[test]
    fn test_resistor_stamp() {
        let mut r = Resistor::new("R1", 1000.0);
        r.pins_mut()[0].bind(NodeId::net(1));
        r.pins_mut()[1].bind(NodeId::Ground);

        let stamps = r.stamps(&BehavioralState::new());
        assert_eq!(
            stamps,
            vec![Stamp::Conductance {
                a: NodeId::net(1),
                b: NodeId::Ground,
                g: 0.001,
            }]
        );
    }

    #[test]
    fn test_unbound_resistor_stamps_nothing() {
        let r = Resistor::new("R1", 1000.0);
        assert!(r.stamps(&BehavioralState::new()).is_empty());
    }

    #[test]
    fn test_self_loop_dropped() {
        let mut r = Resistor::new("R1", 470.0);
        r.pins_mut()[0].bind(NodeId::net(2));
        r.pins_mut()[1].bind(NodeId::net(2));
        assert!(r.stamps(&BehavioralState::new()).is_empty());
    }
}

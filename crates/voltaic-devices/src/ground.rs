//! Ground reference symbol.

use voltaic_core::{BehavioralState, Device, DeviceKind, Pin, Stamp};

/// A ground symbol: a single pin named `GND` and no electrical behavior.
///
/// Netlisting folds every `GND`-named pin into the global ground net, so
/// dropping one of these anywhere in a subcircuit pins that subcircuit's
/// reference at 0 V.
#[derive(Debug, Clone)]
pub struct Ground {
    id: String,
    pins: [Pin; 1],
}

impl Ground {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pins: [Pin::new("GND")],
        }
    }
}

impl Device for Ground {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Ground
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, _state: &BehavioralState) -> Vec<Stamp> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::NodeId;

    #[test]
    fn test_no_stamps() {
        let mut g = Ground::new("G1");
        g.pins_mut()[0].bind(NodeId::Ground);
        assert!(g.stamps(&BehavioralState::new()).is_empty());
    }

    #[test]
    fn test_pin_is_ground_named() {
        let g = Ground::new("G1");
        assert!(g.pins()[0].is_ground_named());
    }
}

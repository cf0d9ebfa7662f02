//! Ideal switch.

use voltaic_core::{BehavioralState, Device, DeviceKind, Pin, Stamp};

/// An ideal switch between pins `A` and `B`.
///
/// Closed, it stamps a 0 V source, an exact short through the MNA
/// extension rather than a near-zero resistance that would ruin the
/// matrix conditioning. Open, it contributes nothing at all. The
/// position is a user input, never a solved quantity.
#[derive(Debug, Clone)]
pub struct Switch {
    id: String,
    closed: bool,
    pins: [Pin; 2],
}

impl Switch {
    pub fn new(id: impl Into<String>, closed: bool) -> Self {
        Self {
            id: id.into(),
            closed,
            pins: [Pin::new("A"), Pin::new("B")],
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Set the switch position.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }
}

impl Device for Switch {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Switch
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, _state: &BehavioralState) -> Vec<Stamp> {
        if !self.closed {
            return Vec::new();
        }
        Stamp::voltage_source(self.pins[0].node(), self.pins[1].node(), 0.0, self.id.clone())
            .into_iter()
            .collect()
    }
}

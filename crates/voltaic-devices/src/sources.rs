//! Independent voltage source, optionally current-limited.

use voltaic_core::{BehavioralState, Device, DeviceKind, Pin, Stamp};

/// An ideal voltage source between `PLUS` and `MINUS`.
///
/// With a current limit set, the source additionally carries an internal
/// conductance `imax / v` in parallel, a linearized stand-in for a real
/// supply's sag under load. The model is only meaningful while the load
/// current stays well below `imax`; it does not clamp.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    id: String,
    voltage: f64,
    max_current: Option<f64>,
    pins: [Pin; 2],
}

impl VoltageSource {
    /// An ideal source of `voltage` volts.
    pub fn new(id: impl Into<String>, voltage: f64) -> Self {
        Self {
            id: id.into(),
            voltage,
            max_current: None,
            pins: [Pin::new("PLUS"), Pin::new("MINUS")],
        }
    }

    /// A source with a current limit `imax` (amperes, positive).
    pub fn with_max_current(id: impl Into<String>, voltage: f64, imax: f64) -> Self {
        Self {
            max_current: Some(imax),
            ..Self::new(id, voltage)
        }
    }

    /// Source voltage in volts.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Current limit, if any.
    pub fn max_current(&self) -> Option<f64> {
        self.max_current
    }
}

impl Device for VoltageSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::VoltageSource
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, _state: &BehavioralState) -> Vec<Stamp> {
        let plus = self.pins[0].node();
        let minus = self.pins[1].node();

        let mut stamps: Vec<Stamp> =
            Stamp::voltage_source(plus, minus, self.voltage, self.id.clone())
                .into_iter()
                .collect();

        if let Some(imax) = self.max_current {
            // Internal resistance v/imax; undefined for a 0 V source,
            // which degenerates to the ideal stamp alone.
            if self.voltage != 0.0 {
                stamps.extend(Stamp::conductance(plus, minus, imax / self.voltage));
            }
        }
        stamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::NodeId;

    fn bound(mut vs: VoltageSource) -> VoltageSource {
        vs.pins_mut()[0].bind(NodeId::net(1));
        vs.pins_mut()[1].bind(NodeId::Ground);
        vs
    }

    #[test]
    fn test_ideal_source_stamp() {
        let vs = bound(VoltageSource::new("V1", 10.0));
        let stamps = vs.stamps(&BehavioralState::new());
        assert_eq!(
            stamps,
            vec![Stamp::VoltageSource {
                plus: NodeId::net(1),
                minus: NodeId::Ground,
                v: 10.0,
                tag: "V1".to_string(),
            }]
        );
    }

    #[test]
    fn test_limited_source_adds_parallel_conductance() {
        let vs = bound(VoltageSource::with_max_current("V1", 5.0, 0.1));
        let stamps = vs.stamps(&BehavioralState::new());
        assert_eq!(stamps.len(), 2);
        match &stamps[1] {
            Stamp::Conductance { g, .. } => assert!((g - 0.02).abs() < 1e-12),
            other => panic!("expected conductance, got {other:?}"),
        }
    }

    #[test]
    fn test_limited_zero_volt_source_stays_ideal() {
        let vs = bound(VoltageSource::with_max_current("V1", 0.0, 0.1));
        let stamps = vs.stamps(&BehavioralState::new());
        assert_eq!(stamps.len(), 1);
        assert!(stamps[0].is_voltage_source());
    }
}

//! Open-collector comparator (LM339).

use voltaic_core::{
    BehavioralState, Device, DeviceKind, DeviceState, NodeVoltages, Pin, Stamp,
};

/// Comparison dead-band in volts.
const MARGIN: f64 = 1e-3;

/// An LM339-style open-collector comparator.
///
/// Active, the output sinks hard to the component's `GND` pin node
/// (stamped as a 0 V source). Inactive, the output is high-impedance and
/// an external pull-up supplies the high level.
///
/// Activation follows the convention of the modeled part: the output
/// pulls low while `V(IN+) > V(IN-) + 1 mV`.
#[derive(Debug, Clone)]
pub struct Lm339 {
    id: String,
    pins: [Pin; 5],
}

impl Lm339 {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pins: [
                Pin::new("VCC"),
                Pin::new("GND"),
                Pin::new("IN+"),
                Pin::new("IN-"),
                Pin::new("OUT"),
            ],
        }
    }
}

impl Device for Lm339 {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Lm339
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, state: &BehavioralState) -> Vec<Stamp> {
        if !state.comparator_active(&self.id) {
            return Vec::new();
        }
        Stamp::voltage_source(
            self.pin_node("OUT"),
            self.pin_node("GND"),
            0.0,
            format!("{}_vs", self.id),
        )
        .into_iter()
        .collect()
    }

    fn update_state(&self, voltages: &NodeVoltages, state: &mut BehavioralState) {
        let plus = self.pin_node("IN+").and_then(|n| voltages.get(n));
        let minus = self.pin_node("IN-").and_then(|n| voltages.get(n));
        let active = match (plus, minus) {
            (Some(vp), Some(vn)) => vp > vn + MARGIN,
            _ => false,
        };
        state.set(&self.id, DeviceState::Comparator { active });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::NodeId;

    fn comparator() -> Lm339 {
        let mut cmp = Lm339::new("U1");
        for (pin, node) in cmp.pins_mut().into_iter().zip([
            NodeId::net(1), // VCC
            NodeId::Ground,
            NodeId::net(2), // IN+
            NodeId::net(3), // IN-
            NodeId::net(4), // OUT
        ]) {
            pin.bind(node);
        }
        cmp
    }

    fn voltages(vp: f64, vn: f64) -> NodeVoltages {
        let mut v = NodeVoltages::zeroed([NodeId::net(1), NodeId::net(2), NodeId::net(3)]);
        v.set(NodeId::net(1), 5.0);
        v.set(NodeId::net(2), vp);
        v.set(NodeId::net(3), vn);
        v
    }

    #[test]
    fn test_active_when_plus_above_minus() {
        let cmp = comparator();
        let mut state = BehavioralState::new();
        cmp.update_state(&voltages(3.0, 2.0), &mut state);
        assert!(state.comparator_active("U1"));
    }

    #[test]
    fn test_inactive_when_plus_below_minus() {
        let cmp = comparator();
        let mut state = BehavioralState::new();
        cmp.update_state(&voltages(2.0, 3.0), &mut state);
        assert!(!state.comparator_active("U1"));
    }

    #[test]
    fn test_margin_suppresses_hair_triggers() {
        let cmp = comparator();
        let mut state = BehavioralState::new();
        cmp.update_state(&voltages(2.0005, 2.0), &mut state);
        assert!(!state.comparator_active("U1"));
    }

    #[test]
    fn test_inactive_output_is_high_z() {
        let cmp = comparator();
        assert!(cmp.stamps(&BehavioralState::new()).is_empty());
    }

    #[test]
    fn test_active_output_pulls_to_gnd_pin() {
        let cmp = comparator();
        let mut state = BehavioralState::new();
        state.set("U1", DeviceState::Comparator { active: true });

        let stamps = cmp.stamps(&state);
        assert_eq!(
            stamps,
            vec![Stamp::VoltageSource {
                plus: NodeId::net(4),
                minus: NodeId::Ground,
                v: 0.0,
                tag: "U1_vs".to_string(),
            }]
        );
    }
}

//! LED modeled as a piecewise-linear diode with hysteresis.

use voltaic_core::{
    BehavioralState, Device, DeviceKind, DeviceState, NodeVoltages, Pin, Stamp,
};

/// Dead-band around the forward voltage, in volts. Keeps the on/off
/// decision from oscillating between outer iterations when the anode
/// voltage sits near the threshold.
const HYSTERESIS: f64 = 0.1;

/// An LED between anode `AN` and cathode `K`.
///
/// Off it conducts nothing; on it is a `Vf` drop with a parallel
/// conductance `1/Rs`. The on/off decision is hysteretic around `Vf`.
#[derive(Debug, Clone)]
pub struct Led {
    id: String,
    forward_voltage: f64,
    series_resistance: f64,
    pins: [Pin; 2],
}

impl Led {
    /// `forward_voltage` and `series_resistance` must be positive.
    pub fn new(id: impl Into<String>, forward_voltage: f64, series_resistance: f64) -> Self {
        Self {
            id: id.into(),
            forward_voltage,
            series_resistance,
            pins: [Pin::new("AN"), Pin::new("K")],
        }
    }

    pub fn forward_voltage(&self) -> f64 {
        self.forward_voltage
    }

    pub fn series_resistance(&self) -> f64 {
        self.series_resistance
    }

    /// Anode-to-cathode voltage, if both terminals are solved.
    fn drop_voltage(&self, voltages: &NodeVoltages) -> Option<f64> {
        let va = voltages.get(self.pins[0].node()?)?;
        let vk = voltages.get(self.pins[1].node()?)?;
        Some(va - vk)
    }
}

impl Device for Led {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Led
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, state: &BehavioralState) -> Vec<Stamp> {
        if !state.led_on(&self.id) {
            return Vec::new();
        }
        let an = self.pins[0].node();
        let k = self.pins[1].node();
        let mut stamps: Vec<Stamp> = Vec::with_capacity(2);
        stamps.extend(Stamp::voltage_source(
            an,
            k,
            self.forward_voltage,
            format!("{}_Vf", self.id),
        ));
        stamps.extend(Stamp::conductance(an, k, 1.0 / self.series_resistance));
        stamps
    }

    fn update_state(&self, voltages: &NodeVoltages, state: &mut BehavioralState) {
        let was_on = state.led_on(&self.id);
        let on = match self.drop_voltage(voltages) {
            // Unbound terminal or unsolved node: force off.
            None => false,
            Some(vd) => {
                if was_on {
                    vd >= self.forward_voltage - HYSTERESIS
                } else {
                    vd >= self.forward_voltage + HYSTERESIS
                }
            }
        };
        state.set(&self.id, DeviceState::Led { on });
    }
}

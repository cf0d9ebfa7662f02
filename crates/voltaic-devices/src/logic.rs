//! CMOS logic gates: HC04 inverter and HC08 2-input AND.
//!
//! Input thresholds are relative to the gate's own solved supply:
//! LOW at or below `0.3 * Vcc`, HIGH at or above `0.7 * Vcc`, otherwise
//! indeterminate. An indeterminate input retains the previous output, so
//! a gate never flaps between outer iterations on a boundary input. Once
//! any evaluation commits a definite output the gate is `driven` and
//! clamps its `OUT` pin to a rail through a 0 V source.

use voltaic_core::{
    BehavioralState, Device, DeviceKind, DeviceState, NodeVoltages, Pin, Stamp,
};

const VIL_RATIO: f64 = 0.3;
const VIH_RATIO: f64 = 0.7;

/// Nominal supply used for thresholds while the VCC node is unsolved.
const DEFAULT_VCC: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    High,
    Low,
    Indeterminate,
}

/// Read one input against the supply. With a collapsed supply (`vcc` at
/// 0 V) both thresholds meet at zero and the HIGH test wins; this is
/// what lets the zero-vector seed pass commit a definite output.
fn read_level(v: f64, vcc: f64) -> Level {
    if v >= VIH_RATIO * vcc {
        Level::High
    } else if v <= VIL_RATIO * vcc {
        Level::Low
    } else {
        Level::Indeterminate
    }
}

fn rail_clamp(device: &dyn Device, state: &BehavioralState) -> Vec<Stamp> {
    let Some((true, out_high)) = state.gate(device.id()) else {
        return Vec::new();
    };
    let rail = if out_high {
        device.pin_node("VCC")
    } else {
        device.pin_node("GND")
    };
    Stamp::voltage_source(
        device.pin_node("OUT"),
        rail,
        0.0,
        format!("{}_vs", device.id()),
    )
    .into_iter()
    .collect()
}

fn commit(id: &str, state: &mut BehavioralState, out: Option<bool>) {
    if let Some(out_high) = out {
        state.set(
            id,
            DeviceState::Gate {
                driven: true,
                out_high,
            },
        );
    }
    // No definite level yet: stay undriven, first contact pending.
}

fn previous_output(id: &str, state: &BehavioralState) -> Option<bool> {
    state
        .gate(id)
        .filter(|(driven, _)| *driven)
        .map(|(_, out_high)| out_high)
}

fn supply_voltage(device: &dyn Device, voltages: &NodeVoltages, nominal: f64) -> f64 {
    device
        .pin_node("VCC")
        .and_then(|n| voltages.get(n))
        .unwrap_or(nominal)
}

/// Hex-inverter stage: `OUT = NOT(IN)`.
#[derive(Debug, Clone)]
pub struct Hc04 {
    id: String,
    vcc_nominal: f64,
    pins: [Pin; 4],
}

impl Hc04 {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_nominal_vcc(id, DEFAULT_VCC)
    }

    /// An inverter with a non-default nominal supply.
    pub fn with_nominal_vcc(id: impl Into<String>, vcc_nominal: f64) -> Self {
        Self {
            id: id.into(),
            vcc_nominal,
            pins: [
                Pin::new("VCC"),
                Pin::new("GND"),
                Pin::new("IN"),
                Pin::new("OUT"),
            ],
        }
    }
}

impl Device for Hc04 {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Hc04
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, state: &BehavioralState) -> Vec<Stamp> {
        rail_clamp(self, state)
    }

    fn update_state(&self, voltages: &NodeVoltages, state: &mut BehavioralState) {
        let Some(vin) = self.pin_node("IN").and_then(|n| voltages.get(n)) else {
            return;
        };
        let vcc = supply_voltage(self, voltages, self.vcc_nominal);
        let out = match read_level(vin, vcc) {
            Level::High => Some(false),
            Level::Low => Some(true),
            Level::Indeterminate => previous_output(&self.id, state),
        };
        commit(&self.id, state, out);
    }
}

/// 2-input AND stage: `OUT = A AND B`, LOW dominant.
#[derive(Debug, Clone)]
pub struct Hc08 {
    id: String,
    vcc_nominal: f64,
    pins: [Pin; 5],
}

impl Hc08 {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_nominal_vcc(id, DEFAULT_VCC)
    }

    /// An AND gate with a non-default nominal supply.
    pub fn with_nominal_vcc(id: impl Into<String>, vcc_nominal: f64) -> Self {
        Self {
            id: id.into(),
            vcc_nominal,
            pins: [
                Pin::new("VCC"),
                Pin::new("GND"),
                Pin::new("A"),
                Pin::new("B"),
                Pin::new("OUT"),
            ],
        }
    }
}

impl Device for Hc08 {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Hc08
    }

    fn pins(&self) -> Vec<&Pin> {
        self.pins.iter().collect()
    }

    fn pins_mut(&mut self) -> Vec<&mut Pin> {
        self.pins.iter_mut().collect()
    }

    fn stamps(&self, state: &BehavioralState) -> Vec<Stamp> {
        rail_clamp(self, state)
    }

    fn update_state(&self, voltages: &NodeVoltages, state: &mut BehavioralState) {
        let a = self.pin_node("A").and_then(|n| voltages.get(n));
        let b = self.pin_node("B").and_then(|n| voltages.get(n));
        let (Some(va), Some(vb)) = (a, b) else {
            return;
        };
        let vcc = supply_voltage(self, voltages, self.vcc_nominal);
        let la = read_level(va, vcc);
        let lb = read_level(vb, vcc);

        // A definite LOW forces the output regardless of the other input.
        let out = if la == Level::Low || lb == Level::Low {
            Some(false)
        } else if la == Level::High && lb == Level::High {
            Some(true)
        } else {
            previous_output(&self.id, state)
        };
        commit(&self.id, state, out);
    }
}

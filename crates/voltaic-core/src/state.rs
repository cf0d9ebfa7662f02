//! Per-component behavioral state.
//!
//! Discrete device state (LED on/off, comparator active, logic levels)
//! selects which piecewise-linear stamp variant a device emits. The state
//! table is owned by one solver session and refined after every linear
//! solve.

use indexmap::IndexMap;

/// Kind-specific behavioral record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// LED conduction state (hysteretic).
    Led { on: bool },
    /// Open-collector comparator: `active` sinks the output to its GND pin.
    Comparator { active: bool },
    /// Logic gate output. `driven` is sticky once any evaluation produced
    /// a definite level.
    Gate { driven: bool, out_high: bool },
}

/// Behavioral state table, keyed by component id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehavioralState {
    map: IndexMap<String, DeviceState>,
}

impl BehavioralState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `id`, if any evaluation has committed one.
    pub fn get(&self, id: &str) -> Option<DeviceState> {
        self.map.get(id).copied()
    }

    /// Commit a record for `id`.
    pub fn set(&mut self, id: &str, state: DeviceState) {
        if let Some(slot) = self.map.get_mut(id) {
            *slot = state;
        } else {
            self.map.insert(id.to_string(), state);
        }
    }

    /// LED conduction state, defaulting to off.
    pub fn led_on(&self, id: &str) -> bool {
        matches!(self.get(id), Some(DeviceState::Led { on: true }))
    }

    /// Comparator activation, defaulting to inactive.
    pub fn comparator_active(&self, id: &str) -> bool {
        matches!(self.get(id), Some(DeviceState::Comparator { active: true }))
    }

    /// Gate output as `(driven, out_high)`, if committed.
    pub fn gate(&self, id: &str) -> Option<(bool, bool)> {
        match self.get(id) {
            Some(DeviceState::Gate { driven, out_high }) => Some((driven, out_high)),
            _ => None,
        }
    }

    /// Drop every record. Used when a solver session is reused for a
    /// fresh circuit.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(component_id, state)` in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DeviceState)> + '_ {
        self.map.iter().map(|(id, &s)| (id.as_str(), s))
    }
}

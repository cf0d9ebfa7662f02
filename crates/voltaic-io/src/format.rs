//! Circuit file format types.
//!
//! The on-disk shape is owned by the editor; this module reads and
//! writes it and converts it into a built [`Netlist`]. Older files use
//! `V_SOURCE` where current ones say `GENERATEUR`; both are accepted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use voltaic_core::{BoxedDevice, Netlist, PinPath, Wire};
use voltaic_devices::{Ground, Hc04, Hc08, Led, Lm339, Resistor, Switch, VoltageSource};

use crate::error::{Error, Result};

/// The file version this reader speaks.
pub const FORMAT_VERSION: &str = "1.0";

/// A persisted circuit: components, wires, and editor positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitFile {
    pub version: String,
    pub components: Vec<ComponentEntry>,
    /// Wires as `["<id>:<pin>", "<id>:<pin>"]` pairs.
    pub wires: Vec<(String, String)>,
}

/// One component instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Kind tag (`RESISTOR`, `GENERATEUR`, `LED`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    /// Kind-specific parameters. Unknown keys are preserved.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    /// Editor placement; carried opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl ComponentEntry {
    fn new(kind: &str, id: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.into(),
            properties: Map::new(),
            position: None,
        }
    }

    fn with_prop(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn ground(id: impl Into<String>) -> Self {
        Self::new("GROUND", id)
    }

    pub fn resistor(id: impl Into<String>, resistance: f64) -> Self {
        Self::new("RESISTOR", id).with_prop("resistance", resistance.into())
    }

    pub fn voltage_source(id: impl Into<String>, voltage: f64) -> Self {
        Self::new("GENERATEUR", id).with_prop("voltage", voltage.into())
    }

    pub fn switch(id: impl Into<String>, closed: bool) -> Self {
        Self::new("SWITCH", id).with_prop("closed", closed.into())
    }

    pub fn led(id: impl Into<String>, forward_voltage: f64, series_resistance: f64) -> Self {
        Self::new("LED", id)
            .with_prop("forward_voltage", forward_voltage.into())
            .with_prop("series_resistance", series_resistance.into())
    }

    pub fn lm339(id: impl Into<String>) -> Self {
        Self::new("LM339", id)
    }

    pub fn hc04(id: impl Into<String>) -> Self {
        Self::new("HC04", id)
    }

    pub fn hc08(id: impl Into<String>) -> Self {
        Self::new("HC08", id)
    }

    /// Place the component in the editor plane.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    fn f64_prop(&self, key: &str) -> Result<f64> {
        self.properties
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::BadProperty {
                id: self.id.clone(),
                property: key.to_string(),
            })
    }

    fn opt_f64_prop(&self, key: &str) -> Result<Option<f64>> {
        match self.properties.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| Error::BadProperty {
                id: self.id.clone(),
                property: key.to_string(),
            }),
        }
    }

    fn bool_prop(&self, key: &str) -> Result<bool> {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::BadProperty {
                id: self.id.clone(),
                property: key.to_string(),
            })
    }

    /// Instantiate the device this entry describes.
    pub fn to_device(&self) -> Result<BoxedDevice> {
        let device: BoxedDevice = match self.kind.as_str() {
            "GROUND" => Box::new(Ground::new(&self.id)),
            "RESISTOR" => Box::new(Resistor::new(&self.id, self.f64_prop("resistance")?)),
            // V_SOURCE is the pre-1.0 editor's tag for the same part.
            "GENERATEUR" | "V_SOURCE" => {
                let voltage = self.f64_prop("voltage")?;
                match self.opt_f64_prop("max_current")? {
                    Some(imax) => Box::new(VoltageSource::with_max_current(
                        &self.id, voltage, imax,
                    )),
                    None => Box::new(VoltageSource::new(&self.id, voltage)),
                }
            }
            "SWITCH" => Box::new(Switch::new(&self.id, self.bool_prop("closed")?)),
            "LED" => Box::new(Led::new(
                &self.id,
                self.f64_prop("forward_voltage")?,
                self.f64_prop("series_resistance")?,
            )),
            "LM339" => Box::new(Lm339::new(&self.id)),
            "HC04" => match self.opt_f64_prop("vcc")? {
                Some(vcc) => Box::new(Hc04::with_nominal_vcc(&self.id, vcc)),
                None => Box::new(Hc04::new(&self.id)),
            },
            "HC08" => match self.opt_f64_prop("vcc")? {
                Some(vcc) => Box::new(Hc08::with_nominal_vcc(&self.id, vcc)),
                None => Box::new(Hc08::new(&self.id)),
            },
            other => return Err(Error::UnknownComponentKind(other.to_string())),
        };
        Ok(device)
    }
}

impl CircuitFile {
    /// An empty file at the current version.
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            components: Vec::new(),
            wires: Vec::new(),
        }
    }

    pub fn add_component(&mut self, entry: ComponentEntry) {
        self.components.push(entry);
    }

    /// Record a wire between `"<id>:<pin>"` endpoints.
    pub fn add_wire(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.wires.push((a.into(), b.into()));
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Instantiate every component and fuse the wires into a built
    /// [`Netlist`], ready to solve.
    pub fn build(&self) -> Result<Netlist> {
        if self.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(self.version.clone()));
        }
        let devices = self
            .components
            .iter()
            .map(ComponentEntry::to_device)
            .collect::<Result<Vec<_>>>()?;
        let wires = self
            .wires
            .iter()
            .map(|(a, b)| Ok(Wire::new(parse_pin_id(a)?, parse_pin_id(b)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Netlist::from_devices(devices, &wires)?)
    }
}

impl Default for CircuitFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `"<component_id>:<pin_name>"` endpoint. The first `:`
/// separates the fields.
fn parse_pin_id(s: &str) -> Result<PinPath> {
    match s.split_once(':') {
        Some((component, pin)) if !component.is_empty() && !pin.is_empty() => {
            Ok(PinPath::new(component, pin))
        }
        _ => Err(Error::MalformedPinId(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_id() {
        let pin = parse_pin_id("R1:A").unwrap();
        assert_eq!(pin.component, "R1");
        assert_eq!(pin.pin, "A");

        assert!(parse_pin_id("R1").is_err());
        assert!(parse_pin_id(":A").is_err());
        assert!(parse_pin_id("R1:").is_err());
    }

    #[test]
    fn test_build_simple_file() {
        let mut file = CircuitFile::new();
        file.add_component(ComponentEntry::voltage_source("V1", 10.0).at(10.0, 20.0));
        file.add_component(ComponentEntry::resistor("R1", 1000.0));
        file.add_component(ComponentEntry::ground("G1"));
        file.add_wire("V1:PLUS", "R1:A");
        file.add_wire("R1:B", "V1:MINUS");
        file.add_wire("V1:MINUS", "G1:GND");

        let netlist = file.build().unwrap();
        assert_eq!(netlist.devices().len(), 3);
        assert!(netlist.has_ground());
        assert_eq!(netlist.num_nodes(), 1);
    }

    #[test]
    fn test_v_source_synonym_accepted() {
        let json = r#"{
            "version": "1.0",
            "components": [
                { "type": "V_SOURCE", "id": "V1", "properties": { "voltage": 5.0 } },
                { "type": "GROUND", "id": "G1" }
            ],
            "wires": [["V1:MINUS", "G1:GND"]]
        }"#;
        let netlist = CircuitFile::from_json(json).unwrap().build().unwrap();
        assert_eq!(netlist.devices()[0].kind().to_string(), "GENERATEUR");
    }

    #[test]
    fn test_unknown_kind_rejected_with_tag() {
        let mut file = CircuitFile::new();
        file.add_component(ComponentEntry::new("THYRISTOR", "Q1"));
        let err = file.build().unwrap_err();
        assert!(matches!(err, Error::UnknownComponentKind(ref tag) if tag == "THYRISTOR"));
    }

    #[test]
    fn test_bad_version_rejected() {
        let mut file = CircuitFile::new();
        file.version = "2.0".to_string();
        assert!(matches!(
            file.build(),
            Err(Error::UnsupportedVersion(ref v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_missing_property_rejected() {
        let mut file = CircuitFile::new();
        file.add_component(ComponentEntry::new("RESISTOR", "R1"));
        assert!(matches!(
            file.build(),
            Err(Error::BadProperty { ref property, .. }) if property == "resistance"
        ));
    }

    #[test]
    fn test_undeclared_wire_pin_is_malformed_netlist() {
        let mut file = CircuitFile::new();
        file.add_component(ComponentEntry::resistor("R1", 1000.0));
        file.add_wire("R1:A", "R9:B");
        assert!(matches!(file.build(), Err(Error::Core(_))));
    }

    #[test]
    fn test_position_round_trips() {
        let mut file = CircuitFile::new();
        file.add_component(ComponentEntry::resistor("R1", 1000.0).at(42.0, 7.5));
        let json = file.to_json().unwrap();
        let back = CircuitFile::from_json(&json).unwrap();
        assert_eq!(back.components[0].position, Some(Position { x: 42.0, y: 7.5 }));
    }

    #[test]
    fn test_max_current_optional() {
        let json = r#"{
            "version": "1.0",
            "components": [
                { "type": "GENERATEUR", "id": "V1",
                  "properties": { "voltage": 5.0, "max_current": 0.1 } }
            ],
            "wires": []
        }"#;
        let netlist = CircuitFile::from_json(json).unwrap().build().unwrap();
        assert_eq!(netlist.devices().len(), 1);
    }
}

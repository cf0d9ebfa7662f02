//! Netlist: device collection and the pin-fusing builder.
//!
//! Wires are undirected pin pairs. `build` unions wired pins into
//! electrical nodes with a disjoint-set, folds every `GND`-named pin into
//! one global ground net, assigns stable node ids and writes them back
//! onto the pins.

use indexmap::IndexMap;

use crate::device::{BoxedDevice, Device};
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::union_find::UnionFind;

/// Identifies one pin of one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinPath {
    pub component: String,
    pub pin: String,
}

impl PinPath {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }
}

impl std::fmt::Display for PinPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.component, self.pin)
    }
}

/// An undirected wire between two pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub a: PinPath,
    pub b: PinPath,
}

impl Wire {
    pub fn new(a: PinPath, b: PinPath) -> Self {
        Self { a, b }
    }

    /// Convenience constructor from `(component, pin)` string pairs.
    pub fn between(
        comp_a: impl Into<String>,
        pin_a: impl Into<String>,
        comp_b: impl Into<String>,
        pin_b: impl Into<String>,
    ) -> Self {
        Self::new(PinPath::new(comp_a, pin_a), PinPath::new(comp_b, pin_b))
    }
}

/// A complete circuit: devices plus, after [`Netlist::build`], their
/// pin-to-node bindings.
#[derive(Debug, Default)]
pub struct Netlist {
    devices: Vec<BoxedDevice>,
    num_nodes: usize,
    has_ground: bool,
}

impl Netlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a netlist in one step: collect devices, then fuse pins.
    pub fn from_devices(
        devices: impl IntoIterator<Item = BoxedDevice>,
        wires: &[Wire],
    ) -> Result<Self> {
        let mut netlist = Self::new();
        for device in devices {
            netlist.add_boxed(device);
        }
        netlist.build(wires)?;
        Ok(netlist)
    }

    /// Add a device.
    pub fn add_device(&mut self, device: impl Device + 'static) {
        self.devices.push(Box::new(device));
    }

    /// Add an already-boxed device.
    pub fn add_boxed(&mut self, device: BoxedDevice) {
        self.devices.push(device);
    }

    /// The devices, in insertion order.
    pub fn devices(&self) -> &[BoxedDevice] {
        &self.devices
    }

    /// Number of non-ground nodes assigned by the last `build`.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Whether the last `build` found a ground net (any `GND`-named pin).
    pub fn has_ground(&self) -> bool {
        self.has_ground
    }

    /// Fuse wired pins into electrical nodes and bind every pin.
    ///
    /// Every `GND`-named pin is unioned into one global ground net, which
    /// receives the id `"0"`. Remaining equivalence classes get `N1`,
    /// `N2`, ... in first-encounter order over devices and their pins, so
    /// rebuilding with the same input order reproduces the same ids.
    ///
    /// Fails with [`Error::MalformedNetlist`] when a wire names a pin no
    /// device declares. A pin left out of every wire is valid and gets a
    /// singleton node.
    pub fn build(&mut self, wires: &[Wire]) -> Result<()> {
        // Dense pin registry in device/pin declaration order. Wire
        // lookups resolve to the first occurrence of a pin path.
        let mut registry: IndexMap<PinPath, usize> = IndexMap::new();
        let mut ground_named: Vec<usize> = Vec::new();
        let mut total_pins = 0usize;
        for device in &self.devices {
            for pin in device.pins() {
                registry
                    .entry(PinPath::new(device.id(), pin.name()))
                    .or_insert(total_pins);
                if pin.is_ground_named() {
                    ground_named.push(total_pins);
                }
                total_pins += 1;
            }
        }

        let mut sets = UnionFind::new(total_pins);
        for wire in wires {
            let a = *registry
                .get(&wire.a)
                .ok_or_else(|| Error::MalformedNetlist(wire.a.to_string()))?;
            let b = *registry
                .get(&wire.b)
                .ok_or_else(|| Error::MalformedNetlist(wire.b.to_string()))?;
            sets.union(a, b);
        }
        for pair in ground_named.windows(2) {
            sets.union(pair[0], pair[1]);
        }
        let ground_root = ground_named.first().map(|&idx| sets.find(idx));

        // Assign ids per equivalence class, first-encounter order.
        let mut class_ids: IndexMap<usize, NodeId> = IndexMap::new();
        let mut next_net = 0u32;
        let mut bindings: Vec<NodeId> = Vec::with_capacity(total_pins);
        for idx in 0..total_pins {
            let root = sets.find(idx);
            let id = *class_ids.entry(root).or_insert_with(|| {
                if Some(root) == ground_root {
                    NodeId::Ground
                } else {
                    next_net += 1;
                    NodeId::Net(next_net)
                }
            });
            bindings.push(id);
        }

        let mut cursor = 0;
        for device in &mut self.devices {
            for pin in device.pins_mut() {
                pin.bind(bindings[cursor]);
                cursor += 1;
            }
        }

        self.num_nodes = next_net as usize;
        self.has_ground = ground_root.is_some();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;
    use crate::node::NodeVoltages;
    use crate::pin::Pin;
    use crate::stamp::Stamp;
    use crate::state::BehavioralState;

    // Minimal two-pin test device; real devices live in the devices crate.
    #[derive(Debug)]
    struct Probe {
        id: String,
        pins: [Pin; 2],
    }

    impl Probe {
        fn new(id: &str, a: &'static str, b: &'static str) -> Self {
            Self {
                id: id.to_string(),
                pins: [Pin::new(a), Pin::new(b)],
            }
        }
    }

    impl Device for Probe {
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
            Vec::new()
        }
        fn update_state(&self, _voltages: &NodeVoltages, _state: &mut BehavioralState) {}
    }

    #[test]
    fn test_wire_fuses_pins() {
        let mut netlist = Netlist::new();
        netlist.add_device(Probe::new("P1", "A", "B"));
        netlist.add_device(Probe::new("P2", "A", "B"));

        let wires = [Wire::between("P1", "B", "P2", "A")];
        netlist.build(&wires).unwrap();

        let p1 = &netlist.devices()[0];
        let p2 = &netlist.devices()[1];
        assert_eq!(p1.pin_node("B"), p2.pin_node("A"));
        assert_ne!(p1.pin_node("A"), p1.pin_node("B"));
        // P1:A, (P1:B ~ P2:A), P2:B
        assert_eq!(netlist.num_nodes(), 3);
        assert!(!netlist.has_ground());
    }

    #[test]
    fn test_gnd_pins_auto_unioned() {
        let mut netlist = Netlist::new();
        netlist.add_device(Probe::new("P1", "A", "GND"));
        netlist.add_device(Probe::new("P2", "gnd", "B"));

        netlist.build(&[]).unwrap();

        assert!(netlist.has_ground());
        assert_eq!(netlist.devices()[0].pin_node("GND"), Some(NodeId::Ground));
        assert_eq!(netlist.devices()[1].pin_node("gnd"), Some(NodeId::Ground));
        assert_eq!(netlist.num_nodes(), 2);
    }

    #[test]
    fn test_every_pin_bound() {
        let mut netlist = Netlist::new();
        netlist.add_device(Probe::new("P1", "A", "B"));
        netlist.build(&[]).unwrap();
        for device in netlist.devices() {
            for pin in device.pins() {
                assert!(pin.is_bound(), "{}:{} unbound", device.id(), pin.name());
            }
        }
    }

    #[test]
    fn test_unknown_pin_rejected() {
        let mut netlist = Netlist::new();
        netlist.add_device(Probe::new("P1", "A", "B"));
        let wires = [Wire::between("P1", "A", "P9", "B")];
        let err = netlist.build(&wires).unwrap_err();
        assert!(matches!(err, Error::MalformedNetlist(ref pin) if pin == "P9:B"));
    }

    #[test]
    fn test_rebuild_is_stable() {
        let mut netlist = Netlist::new();
        netlist.add_device(Probe::new("P1", "A", "B"));
        netlist.add_device(Probe::new("P2", "A", "GND"));
        let wires = [Wire::between("P1", "B", "P2", "A")];

        netlist.build(&wires).unwrap();
        let first: Vec<_> = netlist
            .devices()
            .iter()
            .flat_map(|d| d.pins().into_iter().map(|p| p.node()).collect::<Vec<_>>())
            .collect();

        netlist.build(&wires).unwrap();
        let second: Vec<_> = netlist
            .devices()
            .iter()
            .flat_map(|d| d.pins().into_iter().map(|p| p.node()).collect::<Vec<_>>())
            .collect();

        assert_eq!(first, second);
    }
}

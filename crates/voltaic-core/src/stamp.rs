//! Stamp values emitted by devices for one MNA assembly.

use crate::node::NodeId;

/// A single matrix contribution.
///
/// Devices emit a list of these per assembly; the assembler in
/// [`crate::mna`] translates them into the `A` matrix and `z` vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Stamp {
    /// Conductance `g` (siemens) between `a` and `b`. Either end may be
    /// ground.
    Conductance { a: NodeId, b: NodeId, g: f64 },
    /// Imposes `V(plus) - V(minus) = v`, adding one current unknown.
    /// `tag` keys the solved branch current in the result.
    VoltageSource {
        plus: NodeId,
        minus: NodeId,
        v: f64,
        tag: String,
    },
    /// Injects current `i` (amperes) into `node`.
    CurrentInjection { node: NodeId, i: f64 },
}

impl Stamp {
    /// Conductance stamp from pin bindings. `None` when a pin is unbound
    /// or both ends land on the same node (nothing to couple).
    pub fn conductance(a: Option<NodeId>, b: Option<NodeId>, g: f64) -> Option<Stamp> {
        let (a, b) = (a?, b?);
        if a == b {
            return None;
        }
        Some(Stamp::Conductance { a, b, g })
    }

    /// Voltage-source stamp from pin bindings, with the same drop rules
    /// as [`Stamp::conductance`].
    pub fn voltage_source(
        plus: Option<NodeId>,
        minus: Option<NodeId>,
        v: f64,
        tag: impl Into<String>,
    ) -> Option<Stamp> {
        let (plus, minus) = (plus?, minus?);
        if plus == minus {
            return None;
        }
        Some(Stamp::VoltageSource {
            plus,
            minus,
            v,
            tag: tag.into(),
        })
    }

    /// Current-injection stamp. `None` when the pin is unbound.
    pub fn current_injection(node: Option<NodeId>, i: f64) -> Option<Stamp> {
        Some(Stamp::CurrentInjection { node: node?, i })
    }

    /// Whether this stamp introduces a branch-current unknown.
    pub fn is_voltage_source(&self) -> bool {
        matches!(self, Stamp::VoltageSource { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductance_drops_unbound_and_shorted() {
        assert!(Stamp::conductance(None, Some(NodeId::net(1)), 1.0).is_none());
        assert!(Stamp::conductance(Some(NodeId::net(1)), Some(NodeId::net(1)), 1.0).is_none());
        assert!(Stamp::conductance(Some(NodeId::net(1)), Some(NodeId::Ground), 1.0).is_some());
    }

    #[test]
    fn test_voltage_source_keeps_tag() {
        let s = Stamp::voltage_source(Some(NodeId::net(1)), Some(NodeId::Ground), 5.0, "V1")
            .unwrap();
        assert!(s.is_voltage_source());
        match s {
            Stamp::VoltageSource { tag, v, .. } => {
                assert_eq!(tag, "V1");
                assert_eq!(v, 5.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_voltage_source_same_node_dropped() {
        assert!(Stamp::voltage_source(
            Some(NodeId::net(2)),
            Some(NodeId::net(2)),
            0.0,
            "SW1"
        )
        .is_none());
    }
}

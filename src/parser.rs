use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Point;
use crate::model::{Circuit, Component, ComponentKind, Pin, PinKind, PinSide, Wire};

/// Default glyph footprint (width, height) per component kind, used when a
/// netlist entry omits its size.
static DEFAULT_SIZES: Lazy<BTreeMap<&'static str, (f32, f32)>> = Lazy::new(|| {
    BTreeMap::from([
        ("resistor", (60.0, 24.0)),
        ("source", (48.0, 48.0)),
        ("ground", (36.0, 24.0)),
        ("chip", (90.0, 60.0)),
        ("junction", (8.0, 8.0)),
    ])
});

#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("invalid netlist syntax: {0}")]
    Syntax(String),
    #[error("duplicate id `{0}`")]
    DuplicateId(String),
    #[error("component `{component}` has unknown kind `{kind}`")]
    UnknownComponentKind { component: String, kind: String },
    #[error("pin `{pin}` has unknown kind `{kind}`")]
    UnknownPinKind { pin: String, kind: String },
    #[error("pin `{pin}` has unknown side `{side}`")]
    UnknownPinSide { pin: String, side: String },
    #[error("wire `{wire}` references unknown pin `{pin}`")]
    UnknownPin { wire: String, pin: String },
    #[error("non-finite coordinate on `{0}`")]
    NonFiniteCoordinate(String),
}

#[derive(Debug, Deserialize)]
struct NetlistFile {
    #[serde(default)]
    components: Vec<ComponentEntry>,
    #[serde(default)]
    wires: Vec<WireEntry>,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    id: String,
    label: Option<String>,
    #[serde(default = "default_kind")]
    kind: String,
    resistance: Option<f32>,
    x: f32,
    y: f32,
    width: Option<f32>,
    height: Option<f32>,
    #[serde(default)]
    pins: Vec<PinEntry>,
}

fn default_kind() -> String {
    "chip".to_string()
}

#[derive(Debug, Deserialize)]
struct PinEntry {
    name: String,
    kind: Option<String>,
    side: String,
    #[serde(default = "default_offset")]
    offset: f32,
}

fn default_offset() -> f32 {
    0.5
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    id: String,
    from: String,
    to: String,
    label: Option<String>,
    #[serde(default)]
    bends: Vec<Point>,
}

/// Parse a netlist description into a validated [`Circuit`]. Strict JSON is
/// tried first, then JSON5 for hand-written files. Validation enforces the
/// caller contract the routing engine relies on: unique ids, wire endpoints
/// that name existing pins, and finite coordinates everywhere.
pub fn parse_netlist(input: &str) -> Result<Circuit, NetlistError> {
    let file: NetlistFile = match serde_json::from_str(input) {
        Ok(file) => file,
        Err(_) => json5::from_str(input).map_err(|err| NetlistError::Syntax(err.to_string()))?,
    };

    let mut circuit = Circuit::new();

    for entry in file.components {
        if circuit.components.contains_key(&entry.id) {
            return Err(NetlistError::DuplicateId(entry.id));
        }
        let kind = component_kind(&entry)?;
        let (default_width, default_height) = DEFAULT_SIZES
            .get(entry.kind.as_str())
            .copied()
            .unwrap_or((60.0, 40.0));
        let component = Component {
            id: entry.id.clone(),
            label: entry.label.unwrap_or_else(|| entry.id.clone()),
            kind,
            x: entry.x,
            y: entry.y,
            width: entry.width.unwrap_or(default_width),
            height: entry.height.unwrap_or(default_height),
        };
        if !component.x.is_finite()
            || !component.y.is_finite()
            || !component.width.is_finite()
            || !component.height.is_finite()
        {
            return Err(NetlistError::NonFiniteCoordinate(entry.id));
        }
        circuit.add_component(component);

        for pin in entry.pins {
            let pin_id = format!("{}.{}", entry.id, pin.name);
            if circuit.has_pin(&pin_id) {
                return Err(NetlistError::DuplicateId(pin_id));
            }
            if !pin.offset.is_finite() {
                return Err(NetlistError::NonFiniteCoordinate(pin_id));
            }
            let kind = match pin.kind.as_deref() {
                None => PinKind::Unassigned,
                Some(token) => {
                    PinKind::from_token(token).ok_or_else(|| NetlistError::UnknownPinKind {
                        pin: pin_id.clone(),
                        kind: token.to_string(),
                    })?
                }
            };
            let side = pin_side(&pin.side).ok_or_else(|| NetlistError::UnknownPinSide {
                pin: pin_id.clone(),
                side: pin.side.clone(),
            })?;
            circuit.add_pin(Pin {
                id: pin_id,
                name: pin.name,
                kind,
                component: entry.id.clone(),
                side,
                offset: pin.offset,
            });
        }
    }

    let mut wire_ids = BTreeMap::new();
    for entry in file.wires {
        if wire_ids.insert(entry.id.clone(), ()).is_some() {
            return Err(NetlistError::DuplicateId(entry.id));
        }
        for pin in [&entry.from, &entry.to] {
            if !circuit.has_pin(pin) {
                return Err(NetlistError::UnknownPin {
                    wire: entry.id.clone(),
                    pin: pin.clone(),
                });
            }
        }
        for bend in &entry.bends {
            if !bend.is_finite() {
                return Err(NetlistError::NonFiniteCoordinate(entry.id.clone()));
            }
        }
        circuit.wires.push(Wire {
            id: entry.id,
            from: entry.from,
            to: entry.to,
            label: entry.label,
            bend_points: entry.bends,
            path: Vec::new(),
        });
    }

    Ok(circuit)
}

fn component_kind(entry: &ComponentEntry) -> Result<ComponentKind, NetlistError> {
    match entry.kind.as_str() {
        "resistor" => Ok(ComponentKind::Resistor {
            resistance: entry.resistance.unwrap_or(0.0),
        }),
        "source" => Ok(ComponentKind::Source),
        "ground" => Ok(ComponentKind::Ground),
        "chip" => Ok(ComponentKind::Chip),
        "junction" | "node" => Ok(ComponentKind::Junction),
        other => Err(NetlistError::UnknownComponentKind {
            component: entry.id.clone(),
            kind: other.to_string(),
        }),
    }
}

fn pin_side(token: &str) -> Option<PinSide> {
    match token {
        "left" => Some(PinSide::Left),
        "right" => Some(PinSide::Right),
        "top" => Some(PinSide::Top),
        "bottom" => Some(PinSide::Bottom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"{
        "components": [
            {"id": "u1", "kind": "chip", "x": 0, "y": 0,
             "pins": [{"name": "out", "kind": "output", "side": "right"}]},
            {"id": "r1", "kind": "resistor", "resistance": 220, "x": 200, "y": 20,
             "pins": [{"name": "a", "kind": "input", "side": "left"}]}
        ],
        "wires": [{"id": "w1", "from": "u1.out", "to": "r1.a"}]
    }"#;

    #[test]
    fn parses_a_basic_netlist() {
        let circuit = parse_netlist(BASIC).unwrap();
        assert_eq!(circuit.components.len(), 2);
        assert_eq!(circuit.wires.len(), 1);
        assert!(circuit.has_pin("u1.out"));
        assert_eq!(
            circuit.components["r1"].kind,
            ComponentKind::Resistor { resistance: 220.0 }
        );
        // Omitted size comes from the per-kind defaults.
        assert_eq!(circuit.components["u1"].width, 90.0);
    }

    #[test]
    fn accepts_json5_with_comments() {
        let input = r#"{
            // one lonely junction
            components: [{id: "j1", kind: "junction", x: 10, y: 10}],
        }"#;
        let circuit = parse_netlist(input).unwrap();
        assert_eq!(circuit.components["j1"].width, 8.0);
    }

    #[test]
    fn rejects_wire_to_missing_pin() {
        let input = r#"{
            "components": [{"id": "u1", "x": 0, "y": 0,
                "pins": [{"name": "out", "side": "right"}]}],
            "wires": [{"id": "w1", "from": "u1.out", "to": "u2.in"}]
        }"#;
        let err = parse_netlist(input).unwrap_err();
        assert!(matches!(err, NetlistError::UnknownPin { .. }));
    }

    #[test]
    fn rejects_duplicate_component_ids() {
        let input = r#"{
            "components": [
                {"id": "u1", "x": 0, "y": 0},
                {"id": "u1", "x": 10, "y": 10}
            ]
        }"#;
        let err = parse_netlist(input).unwrap_err();
        assert!(matches!(err, NetlistError::DuplicateId(id) if id == "u1"));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let input = r#"{
            components: [{id: "u1", x: Infinity, y: 0}],
        }"#;
        let err = parse_netlist(input).unwrap_err();
        assert!(matches!(err, NetlistError::NonFiniteCoordinate(_)));
    }

    #[test]
    fn rejects_unknown_component_kind() {
        let input = r#"{"components": [{"id": "x1", "kind": "capacitor", "x": 0, "y": 0}]}"#;
        let err = parse_netlist(input).unwrap_err();
        assert!(matches!(err, NetlistError::UnknownComponentKind { .. }));
    }
}

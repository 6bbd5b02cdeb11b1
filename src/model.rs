use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    Input,
    Output,
    Power,
    Ground,
    Unassigned,
}

impl PinKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "in" | "input" => Some(Self::Input),
            "out" | "output" => Some(Self::Output),
            "power" | "vcc" => Some(Self::Power),
            "ground" | "gnd" => Some(Self::Ground),
            _ => None,
        }
    }
}

/// Which component edge a pin sits on; its exact position is derived from
/// the owning component's bounds at render/route time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A named connection point on a component. Carries the owning component's
/// id as a weak back-reference; the ownership table on [`Circuit`] is the
/// authoritative component -> pins mapping.
#[derive(Debug, Clone)]
pub struct Pin {
    pub id: String,
    pub name: String,
    pub kind: PinKind,
    pub component: String,
    pub side: PinSide,
    /// Fractional offset along the side, 0.0 = top/left corner.
    pub offset: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Resistor { resistance: f32 },
    Source,
    Ground,
    Chip,
    Junction,
}

#[derive(Debug, Clone)]
pub struct Component {
    pub id: String,
    pub label: String,
    pub kind: ComponentKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Component {
    /// Obstacle footprint used by the wire router.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A point-to-point connection between two pins. The wire exclusively owns
/// its current routed path; `route_circuit` rewrites it on every pass.
/// Once any manual bend point exists, automatic routing never overrides the
/// bend list.
#[derive(Debug, Clone)]
pub struct Wire {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub bend_points: Vec<Point>,
    pub path: Vec<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub components: BTreeMap<String, Component>,
    pub pins: BTreeMap<String, Pin>,
    /// Ownership table: component id -> pin ids, in declaration order.
    pub pin_owners: BTreeMap<String, Vec<String>>,
    /// Wires in routing order; order is semantically significant because
    /// each wire's rasterization treats earlier paths as soft obstacles.
    pub wires: Vec<Wire>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component(&mut self, component: Component) {
        self.pin_owners.entry(component.id.clone()).or_default();
        self.components.insert(component.id.clone(), component);
    }

    pub fn add_pin(&mut self, pin: Pin) {
        self.pin_owners
            .entry(pin.component.clone())
            .or_default()
            .push(pin.id.clone());
        self.pins.insert(pin.id.clone(), pin);
    }

    /// Set-membership check for wire endpoints.
    pub fn has_pin(&self, pin_id: &str) -> bool {
        self.pins.contains_key(pin_id)
    }

    /// Canvas position of a pin, derived from the owning component's
    /// current bounds. Returns `None` when the pin or its owner is missing.
    pub fn pin_position(&self, pin_id: &str) -> Option<Point> {
        let pin = self.pins.get(pin_id)?;
        let component = self.components.get(&pin.component)?;
        let bounds = component.bounds();
        let t = pin.offset.clamp(0.0, 1.0);
        let point = match pin.side {
            PinSide::Left => Point::new(bounds.x, bounds.y + bounds.height * t),
            PinSide::Right => Point::new(bounds.x + bounds.width, bounds.y + bounds.height * t),
            PinSide::Top => Point::new(bounds.x + bounds.width * t, bounds.y),
            PinSide::Bottom => Point::new(bounds.x + bounds.width * t, bounds.y + bounds.height),
        };
        Some(point)
    }

    /// Obstacle rectangles for routing `wire_id`: every component footprint
    /// except the two that own the wire's endpoints, so a wire can leave
    /// its own pins even when they sit flush with the box edge.
    pub fn obstacles_for_wire(&self, wire: &Wire) -> Vec<Rect> {
        let endpoint_owner = |pin_id: &str| self.pins.get(pin_id).map(|p| p.component.as_str());
        let from_owner = endpoint_owner(&wire.from);
        let to_owner = endpoint_owner(&wire.to);
        self.components
            .values()
            .filter(|component| {
                Some(component.id.as_str()) != from_owner && Some(component.id.as_str()) != to_owner
            })
            .map(|component| component.bounds())
            .collect()
    }
}

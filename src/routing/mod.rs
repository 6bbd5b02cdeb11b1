pub mod astar;
pub mod fallback;
pub mod grid;
pub mod simplify;

pub use astar::find_path;
pub use fallback::fallback_route;
pub use grid::PassabilityGrid;
pub use simplify::simplify;

use crate::config::RoutingConfig;
use crate::geometry::{Point, Rect};
use crate::model::{Circuit, Wire};

// ── Routing grid ────────────────────────────────────────────────────
/// Grid granularity in canvas units.
pub const DEFAULT_CELL_SIZE: f32 = 10.0;
/// Fixed padding added around the search window on every side, so routes
/// can clear obstacles that sit flush with the endpoints.
pub const WINDOW_MARGIN: f32 = 50.0;

// ── Wire avoidance ──────────────────────────────────────────────────
/// Radius (in cells) blocked around already-routed wire paths.
pub const WIRE_CLEARANCE_CELLS: i32 = 2;

// ── Simplification ──────────────────────────────────────────────────
/// Cross-product magnitude below which three points count as collinear.
pub const COLLINEAR_EPSILON: f32 = 1e-5;

/// Route a single wire between two pin positions. Pure except for its
/// inputs: manual bend points short-circuit everything, otherwise the
/// window is rasterized, searched, and simplified, with the geometric
/// fallback guaranteeing a drawable result. Always returns >= 2 points
/// with exact source/target endpoints.
pub fn compute_route(
    source: Point,
    target: Point,
    manual_bends: &[Point],
    obstacles: &[Rect],
    other_paths: &[Vec<Point>],
    config: &RoutingConfig,
) -> Vec<Point> {
    if !manual_bends.is_empty() {
        let mut path = Vec::with_capacity(manual_bends.len() + 2);
        path.push(source);
        path.extend_from_slice(manual_bends);
        path.push(target);
        return path;
    }

    let grid = PassabilityGrid::rasterize(obstacles, other_paths, source, target, config);
    let mut raw = find_path(&grid, source, target);
    if raw.len() >= 2 {
        // Pin the grid-aligned ends back to the exact pin positions before
        // collapsing collinear runs.
        raw[0] = source;
        let last = raw.len() - 1;
        raw[last] = target;
        let simplified = simplify(&raw, config.collinear_epsilon);
        if simplified.len() >= 2 {
            return simplified;
        }
    }
    fallback_route(source, target, obstacles)
}

/// Facade for one wire: computes the route and stores it as the wire's
/// current path (the only observable side effect). Idempotent for
/// unchanged inputs.
pub fn route_wire(
    wire: &mut Wire,
    source: Point,
    target: Point,
    obstacles: &[Rect],
    other_paths: &[Vec<Point>],
    config: &RoutingConfig,
) -> Vec<Point> {
    wire.path = compute_route(
        source,
        target,
        &wire.bend_points,
        obstacles,
        other_paths,
        config,
    );
    wire.path.clone()
}

/// Route every wire of a circuit in its stored order. Each wire sees the
/// paths of wires routed earlier in this pass as soft obstacles, so the
/// order is an explicit input and changing it changes results. A wire with
/// a dangling pin reference keeps an empty path and never aborts the pass.
pub fn route_circuit(circuit: &mut Circuit, config: &RoutingConfig) {
    let mut routed: Vec<Vec<Point>> = Vec::with_capacity(circuit.wires.len());
    for i in 0..circuit.wires.len() {
        let computed = {
            let wire = &circuit.wires[i];
            match (
                circuit.pin_position(&wire.from),
                circuit.pin_position(&wire.to),
            ) {
                (Some(source), Some(target)) => {
                    let obstacles = circuit.obstacles_for_wire(wire);
                    Some(compute_route(
                        source,
                        target,
                        &wire.bend_points,
                        &obstacles,
                        &routed,
                        config,
                    ))
                }
                _ => None,
            }
        };
        match computed {
            Some(path) => {
                routed.push(path.clone());
                circuit.wires[i].path = path;
            }
            None => circuit.wires[i].path.clear(),
        }
    }
}

use crate::geometry::{Point, Rect};

/// Single-bend or direct route used when grid search finds no path (and as
/// the terminal guarantee that routing always produces something drawable).
/// Tries the horizontal-first L, then the vertical-first L, then returns
/// the direct line unconditionally; the direct line may cross an obstacle,
/// which is the accepted degenerate outcome.
pub fn fallback_route(source: Point, target: Point, obstacles: &[Rect]) -> Vec<Point> {
    let h_corner = Point::new(target.x, source.y);
    if segment_clear(source, h_corner, obstacles) && segment_clear(h_corner, target, obstacles) {
        return l_shape(source, h_corner, target);
    }
    let v_corner = Point::new(source.x, target.y);
    if segment_clear(source, v_corner, obstacles) && segment_clear(v_corner, target, obstacles) {
        return l_shape(source, v_corner, target);
    }
    vec![source, target]
}

/// An L degenerates to the direct line when the corner coincides with an
/// endpoint (axis-aligned or zero-length spans); drop the duplicate vertex
/// so the result is still a clean 2-point path.
fn l_shape(source: Point, corner: Point, target: Point) -> Vec<Point> {
    if corner == source || corner == target {
        vec![source, target]
    } else {
        vec![source, corner, target]
    }
}

/// Sample the segment at one point per unit of the longer axis delta and
/// reject it if any sample lands inside an obstacle (inclusive bounds).
fn segment_clear(a: Point, b: Point, obstacles: &[Rect]) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let steps = dx.abs().max(dy.abs()).ceil() as usize;
    for i in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            i as f32 / steps as f32
        };
        let sample = Point::new(a.x + dx * t, a.y + dy * t);
        if obstacles.iter().any(|rect| rect.contains(sample)) {
            return false;
        }
    }
    true
}

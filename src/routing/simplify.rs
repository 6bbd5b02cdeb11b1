use crate::geometry::Point;

/// Collapse collinear runs of a raw grid path into the minimal polyline of
/// bend points. The result is a strict subsequence of the input keeping the
/// endpoints plus every vertex where direction changes, so running it twice
/// is a no-op.
pub fn simplify(path: &[Point], epsilon: f32) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    let mut anchor = 0usize;
    let mut look = 1usize;
    while look + 1 < path.len() {
        if collinear(path[anchor], path[look], path[look + 1], epsilon) {
            look += 1;
        } else {
            out.push(path[look]);
            anchor = look;
            look += 1;
        }
    }
    out.push(path[path.len() - 1]);
    out
}

/// Cross-product collinearity test with a numerical tolerance.
fn collinear(a: Point, b: Point, c: Point, epsilon: f32) -> bool {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    cross.abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::COLLINEAR_EPSILON;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn short_paths_pass_through() {
        let path = vec![p(0.0, 0.0), p(10.0, 0.0)];
        assert_eq!(simplify(&path, COLLINEAR_EPSILON), path);
        let single = vec![p(1.0, 1.0)];
        assert_eq!(simplify(&single, COLLINEAR_EPSILON), single);
    }

    #[test]
    fn collapses_straight_runs_to_endpoints() {
        let path = vec![p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0), p(30.0, 0.0)];
        assert_eq!(
            simplify(&path, COLLINEAR_EPSILON),
            vec![p(0.0, 0.0), p(30.0, 0.0)]
        );
    }

    #[test]
    fn keeps_direction_changes_only() {
        let path = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(20.0, 0.0),
            p(20.0, 10.0),
            p(20.0, 20.0),
            p(30.0, 20.0),
        ];
        assert_eq!(
            simplify(&path, COLLINEAR_EPSILON),
            vec![p(0.0, 0.0), p(20.0, 0.0), p(20.0, 20.0), p(30.0, 20.0)]
        );
    }

    #[test]
    fn is_idempotent() {
        let path = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(10.0, 20.0),
            p(0.0, 20.0),
        ];
        let once = simplify(&path, COLLINEAR_EPSILON);
        let twice = simplify(&once, COLLINEAR_EPSILON);
        assert_eq!(once, twice);
    }

    #[test]
    fn tolerance_boundary_both_sides() {
        // Cross product is 2e-6, under the 1e-5 tolerance: collapsed.
        let nearly = vec![p(0.0, 0.0), p(1.0, 1e-6), p(2.0, 0.0)];
        assert_eq!(
            simplify(&nearly, COLLINEAR_EPSILON),
            vec![p(0.0, 0.0), p(2.0, 0.0)]
        );
        // Cross product is 2e-3, above the tolerance: kept as a bend.
        let bent = vec![p(0.0, 0.0), p(1.0, 1e-3), p(2.0, 0.0)];
        assert_eq!(simplify(&bent, COLLINEAR_EPSILON).len(), 3);
    }
}

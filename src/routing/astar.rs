use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geometry::Point;

use super::grid::PassabilityGrid;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct SearchEntry {
    est: u32,
    cost: u32,
    x: i32,
    y: i32,
}

// Min-heap on estimated total cost. Ties break on accumulated cost and then
// on cell coordinates so repeated searches over identical inputs pick the
// same path.
impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .est
            .cmp(&self.est)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| self.y.cmp(&other.y))
            .then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(ax: i32, ay: i32, bx: i32, by: i32) -> u32 {
    (ax - bx).unsigned_abs() + (ay - by).unsigned_abs()
}

/// Minimal-step 4-connected path across the passability grid, returned in
/// canvas coordinates. Unit-cost moves with a Manhattan heuristic keep the
/// search admissible and consistent, so the step count is optimal. Returns
/// an empty path when the goal is unreachable; the facade falls back.
pub fn find_path(grid: &PassabilityGrid, start: Point, end: Point) -> Vec<Point> {
    let (start_x, start_y) = grid.cell_for_point(start);
    let (end_x, end_y) = grid.cell_for_point(end);

    let cols = grid.cols();
    let rows = grid.rows();
    let cells = (cols as usize) * (rows as usize);
    let index = |x: i32, y: i32| (y * cols + x) as usize;

    let mut best_cost = vec![u32::MAX; cells];
    let mut prev: Vec<Option<(i32, i32)>> = vec![None; cells];
    let mut closed = vec![false; cells];
    let mut heap = BinaryHeap::new();

    best_cost[index(start_x, start_y)] = 0;
    heap.push(SearchEntry {
        est: manhattan(start_x, start_y, end_x, end_y),
        cost: 0,
        x: start_x,
        y: start_y,
    });

    let dirs: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    let mut reached = false;

    while let Some(SearchEntry { cost, x, y, .. }) = heap.pop() {
        let idx = index(x, y);
        if closed[idx] {
            continue;
        }
        closed[idx] = true;
        if x == end_x && y == end_y {
            reached = true;
            break;
        }
        for (dx, dy) in dirs {
            let nx = x + dx;
            let ny = y + dy;
            if !grid.in_bounds(nx, ny) || !grid.is_passable(nx, ny) {
                continue;
            }
            let next_idx = index(nx, ny);
            if closed[next_idx] {
                continue;
            }
            let next_cost = cost + 1;
            if next_cost >= best_cost[next_idx] {
                continue;
            }
            best_cost[next_idx] = next_cost;
            prev[next_idx] = Some((x, y));
            heap.push(SearchEntry {
                est: next_cost + manhattan(nx, ny, end_x, end_y),
                cost: next_cost,
                x: nx,
                y: ny,
            });
        }
    }

    if !reached {
        return Vec::new();
    }

    let mut cells: Vec<(i32, i32)> = Vec::new();
    let mut cursor = (end_x, end_y);
    loop {
        cells.push(cursor);
        match prev[index(cursor.0, cursor.1)] {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    cells.reverse();
    cells
        .into_iter()
        .map(|(ix, iy)| grid.point_for_cell(ix, iy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::geometry::Rect;

    fn open_grid(source: Point, target: Point) -> PassabilityGrid {
        PassabilityGrid::rasterize(&[], &[], source, target, &RoutingConfig::default())
    }

    #[test]
    fn open_grid_path_length_matches_manhattan_distance() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 40.0);
        let grid = open_grid(source, target);
        let path = find_path(&grid, source, target);
        assert!(!path.is_empty());
        let (sx, sy) = grid.cell_for_point(source);
        let (ex, ey) = grid.cell_for_point(target);
        let expected_steps = manhattan(sx, sy, ex, ey) as usize;
        assert_eq!(path.len() - 1, expected_steps);
    }

    #[test]
    fn path_endpoints_land_on_endpoint_cells() {
        let source = Point::new(5.0, 5.0);
        let target = Point::new(95.0, 5.0);
        let grid = open_grid(source, target);
        let path = find_path(&grid, source, target);
        assert_eq!(grid.cell_for_point(path[0]), grid.cell_for_point(source));
        assert_eq!(
            grid.cell_for_point(*path.last().unwrap()),
            grid.cell_for_point(target)
        );
    }

    #[test]
    fn routes_around_a_blocking_obstacle() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 0.0);
        let obstacle = Rect::new(40.0, -20.0, 20.0, 40.0);
        let grid = PassabilityGrid::rasterize(
            &[obstacle],
            &[],
            source,
            target,
            &RoutingConfig::default(),
        );
        let path = find_path(&grid, source, target);
        assert!(!path.is_empty());
        for point in &path {
            let (ix, iy) = grid.cell_for_point(*point);
            assert!(grid.is_passable(ix, iy), "path crosses obstacle at {point:?}");
        }
    }

    #[test]
    fn unreachable_goal_returns_empty() {
        // Box the target in completely.
        let walls = [
            Rect::new(80.0, -30.0, 60.0, 10.0),
            Rect::new(80.0, 20.0, 60.0, 10.0),
            Rect::new(80.0, -30.0, 10.0, 60.0),
            Rect::new(130.0, -30.0, 10.0, 60.0),
        ];
        let source = Point::new(0.0, 0.0);
        let target = Point::new(110.0, 0.0);
        let grid =
            PassabilityGrid::rasterize(&walls, &[], source, target, &RoutingConfig::default());
        let path = find_path(&grid, source, target);
        assert!(path.is_empty());
    }

    #[test]
    fn degenerate_start_equals_end_yields_single_cell() {
        let point = Point::new(10.0, 10.0);
        let grid = open_grid(point, point);
        let path = find_path(&grid, point, point);
        assert_eq!(path.len(), 1);
    }
}

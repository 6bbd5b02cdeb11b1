use crate::config::RoutingConfig;
use crate::geometry::{Point, Rect};

/// Boolean traversability map over a bounded window, rebuilt from scratch
/// for every routing call. `true` = passable.
#[derive(Debug, Clone)]
pub struct PassabilityGrid {
    cell: f32,
    min_x: f32,
    min_y: f32,
    cols: i32,
    rows: i32,
    passable: Vec<bool>,
}

impl PassabilityGrid {
    /// Discretize the routing window. The window covers `source`, `target`
    /// and every obstacle corner, expanded by the configured margin so the
    /// search has room to route around obstacles flush with the endpoints.
    /// Already-routed wire paths are stamped as impassable bands of
    /// `wire_clearance_cells` radius, which discourages but does not forbid
    /// overlap (the fallback router ignores them).
    pub fn rasterize(
        obstacles: &[Rect],
        routed_paths: &[Vec<Point>],
        source: Point,
        target: Point,
        config: &RoutingConfig,
    ) -> Self {
        let cell = config.cell_size.max(f32::MIN_POSITIVE);
        let mut min_x = source.x.min(target.x);
        let mut min_y = source.y.min(target.y);
        let mut max_x = source.x.max(target.x);
        let mut max_y = source.y.max(target.y);
        for rect in obstacles {
            for corner in rect.corners() {
                min_x = min_x.min(corner.x);
                min_y = min_y.min(corner.y);
                max_x = max_x.max(corner.x);
                max_y = max_y.max(corner.y);
            }
        }
        min_x -= config.window_margin;
        min_y -= config.window_margin;
        max_x += config.window_margin;
        max_y += config.window_margin;

        let cols = (((max_x - min_x) / cell).ceil() as i32).max(1);
        let rows = (((max_y - min_y) / cell).ceil() as i32).max(1);
        let mut grid = Self {
            cell,
            min_x,
            min_y,
            cols,
            rows,
            passable: vec![true; (cols as usize) * (rows as usize)],
        };

        for rect in obstacles {
            grid.stamp_obstacle(rect);
        }
        for path in routed_paths {
            grid.stamp_path(path, config.wire_clearance_cells);
        }
        grid
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell
    }

    pub fn in_bounds(&self, ix: i32, iy: i32) -> bool {
        ix >= 0 && iy >= 0 && ix < self.cols && iy < self.rows
    }

    pub fn is_passable(&self, ix: i32, iy: i32) -> bool {
        self.in_bounds(ix, iy) && self.passable[self.index(ix, iy)]
    }

    /// Grid cell containing a canvas point, by floor division. Points
    /// outside the window clamp to the nearest border cell; the window is
    /// built to cover every input, so clamping only absorbs float edge
    /// cases on the boundary itself.
    pub fn cell_for_point(&self, point: Point) -> (i32, i32) {
        let ix = ((point.x - self.min_x) / self.cell).floor() as i32;
        let iy = ((point.y - self.min_y) / self.cell).floor() as i32;
        (ix.clamp(0, self.cols - 1), iy.clamp(0, self.rows - 1))
    }

    /// Canvas coordinates of a cell, scaling the cell index back by the
    /// cell size relative to the window origin.
    pub fn point_for_cell(&self, ix: i32, iy: i32) -> Point {
        Point::new(
            self.min_x + ix as f32 * self.cell,
            self.min_y + iy as f32 * self.cell,
        )
    }

    fn index(&self, ix: i32, iy: i32) -> usize {
        (iy * self.cols + ix) as usize
    }

    fn block(&mut self, ix: i32, iy: i32) {
        if self.in_bounds(ix, iy) {
            let idx = self.index(ix, iy);
            self.passable[idx] = false;
        }
    }

    /// Mark every cell whose center falls inside the rectangle (inclusive
    /// bounds) as impassable, clipping indices to the grid.
    fn stamp_obstacle(&mut self, rect: &Rect) {
        let width = rect.width.max(0.0);
        let height = rect.height.max(0.0);
        let start_x = (((rect.x - self.min_x) / self.cell).floor() as i32 - 1).max(0);
        let end_x = (((rect.x + width - self.min_x) / self.cell).ceil() as i32 + 1)
            .min(self.cols - 1);
        let start_y = (((rect.y - self.min_y) / self.cell).floor() as i32 - 1).max(0);
        let end_y = (((rect.y + height - self.min_y) / self.cell).ceil() as i32 + 1)
            .min(self.rows - 1);
        for iy in start_y..=end_y {
            for ix in start_x..=end_x {
                let center = Point::new(
                    self.min_x + (ix as f32 + 0.5) * self.cell,
                    self.min_y + (iy as f32 + 0.5) * self.cell,
                );
                if center.x >= rect.x
                    && center.x <= rect.x + width
                    && center.y >= rect.y
                    && center.y <= rect.y + height
                {
                    self.block(ix, iy);
                }
            }
        }
    }

    /// Walk each segment at one sample per grid cell and block every cell
    /// within `clearance` Chebyshev radius of each sample. Samples use raw
    /// (unclamped) cell indices: a sample more than `clearance` cells
    /// outside the window is farther than the clearance radius from every
    /// grid cell and blocks nothing.
    fn stamp_path(&mut self, path: &[Point], clearance: i32) {
        for segment in path.windows(2) {
            let a = segment[0];
            let b = segment[1];
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let steps = (dx.abs().max(dy.abs()) / self.cell).ceil() as usize;
            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f32 / steps as f32
                };
                let sample = Point::new(a.x + dx * t, a.y + dy * t);
                let ix = ((sample.x - self.min_x) / self.cell).floor() as i32;
                let iy = ((sample.y - self.min_y) / self.cell).floor() as i32;
                if ix < -clearance
                    || iy < -clearance
                    || ix >= self.cols + clearance
                    || iy >= self.rows + clearance
                {
                    continue;
                }
                for oy in -clearance..=clearance {
                    for ox in -clearance..=clearance {
                        self.block(ix + ox, iy + oy);
                    }
                }
            }
        }
    }
}

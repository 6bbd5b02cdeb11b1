use serde::{Deserialize, Serialize};

/// A canvas-space position. Copied by value everywhere; paths never alias
/// their points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle, top-left anchored. Negative extents are treated
/// as zero-area rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Inclusive containment test, matching how obstacle stamping and the
    /// fallback segment sampler treat rectangle boundaries.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width.max(0.0)
            && point.y >= self.y
            && point.y <= self.y + self.height.max(0.0)
    }

    pub fn corners(&self) -> [Point; 4] {
        let w = self.width.max(0.0);
        let h = self.height.max(0.0);
        [
            Point::new(self.x, self.y),
            Point::new(self.x + w, self.y),
            Point::new(self.x, self.y + h),
            Point::new(self.x + w, self.y + h),
        ]
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + self.width.max(0.0) / 2.0,
            self.y + self.height.max(0.0) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 30.0)));
        assert!(!rect.contains(Point::new(30.1, 30.0)));
    }

    #[test]
    fn negative_extent_clamps_to_zero_area() {
        let rect = Rect::new(5.0, 5.0, -10.0, -10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(4.0, 5.0)));
        assert!(!rect.contains(Point::new(6.0, 5.0)));
    }
}

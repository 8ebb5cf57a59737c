//! Rectangle shape.

use super::{ShapeId, ShapeTrait, box_center_inside, box_hit, new_shape_id};
use crate::geometry::rect_from_origin;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Corner radius used when a rectangle is drawn.
pub const RECT_CORNER_RADIUS: f64 = 8.0;

/// An axis-aligned rectangle, drawn with rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Rectangle {
    /// Create a new rectangle with a fresh id.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: new_shape_id(),
            x,
            y,
            w,
            h,
            stroke: None,
            stroke_width: None,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        Self::new(min_x, min_y, (p2.x - p1.x).abs(), (p2.y - p1.y).abs())
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        rect_from_origin(self.x, self.y, self.w, self.h)
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        box_hit(self.x, self.y, self.w, self.h, point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn resize_to(&mut self, target: Rect, min_size: f64) {
        self.x = target.x0;
        self.y = target.y0;
        self.w = target.width().max(min_size);
        self.h = target.height().max(min_size);
    }

    fn is_inside(&self, frame: Rect) -> bool {
        box_center_inside(self.x, self.y, self.w, self.h, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let rect = Rectangle::from_corners(Point::new(100.0, 80.0), Point::new(10.0, 20.0));
        assert!((rect.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.w - 90.0).abs() < f64::EPSILON);
        assert!((rect.h - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_inclusive_edges() {
        let rect = Rectangle::new(0.0, 0.0, 100.0, 50.0);
        assert!(rect.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(rect.hit_test(Point::new(100.0, 50.0), 0.0));
        assert!(!rect.hit_test(Point::new(101.0, 25.0), 0.0));
    }

    #[test]
    fn test_center_containment() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Sticks out but its center is inside.
        assert!(Rectangle::new(80.0, 80.0, 30.0, 30.0).is_inside(frame));
        assert!(!Rectangle::new(90.0, 90.0, 30.0, 30.0).is_inside(frame));
    }
}

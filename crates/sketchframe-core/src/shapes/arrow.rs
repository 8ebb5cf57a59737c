//! Arrow shape: a line with a triangular head at its end point.

use super::line::{resize_segment, segment_bounds, segment_hit, segment_inside};
use super::{ShapeId, ShapeTrait, new_shape_id};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Length of each arrowhead side.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;

/// Half-angle of the arrowhead.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id: ShapeId,
    pub start: Point,
    pub end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Arrow {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: new_shape_id(),
            start,
            end,
            stroke: None,
            stroke_width: None,
        }
    }

    /// The two back corners of the head; the tip is `end`.
    pub fn head_points(&self) -> [Point; 2] {
        let angle = (self.end.y - self.start.y).atan2(self.end.x - self.start.x);
        let corner = |a: f64| {
            Point::new(
                self.end.x - ARROW_HEAD_LENGTH * a.cos(),
                self.end.y - ARROW_HEAD_LENGTH * a.sin(),
            )
        };
        [corner(angle - ARROW_HEAD_ANGLE), corner(angle + ARROW_HEAD_ANGLE)]
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        segment_bounds(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        segment_hit(self.start, self.end, point, tolerance)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn resize_to(&mut self, target: Rect, min_size: f64) {
        (self.start, self.end) = resize_segment(self.start, self.end, target, min_size);
    }

    fn is_inside(&self, frame: Rect) -> bool {
        segment_inside(self.start, self.end, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_points_horizontal() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let [a, b] = arrow.head_points();
        let dx = ARROW_HEAD_LENGTH * ARROW_HEAD_ANGLE.cos();
        let dy = ARROW_HEAD_LENGTH * ARROW_HEAD_ANGLE.sin();
        assert!((a.x - (100.0 - dx)).abs() < 1e-9);
        assert!((a.y - dy).abs() < 1e-9);
        assert!((b.x - (100.0 - dx)).abs() < 1e-9);
        assert!((b.y + dy).abs() < 1e-9);
    }

    #[test]
    fn test_translate_moves_both_ends() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        arrow.translate(Vec2::new(1.0, 2.0));
        assert_eq!(arrow.start, Point::new(1.0, 2.0));
        assert_eq!(arrow.end, Point::new(11.0, 12.0));
    }
}

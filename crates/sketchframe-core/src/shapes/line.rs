//! Straight line shape.

use super::{RESIZE_INSET, ShapeId, ShapeTrait, new_shape_id};
use crate::geometry::{distance_to_segment, rect_contains, rect_from_corners};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: ShapeId,
    pub start: Point,
    pub end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: new_shape_id(),
            start,
            end,
            stroke: None,
            stroke_width: None,
        }
    }
}

/// Padded bounds of a segment.
pub(crate) fn segment_bounds(start: Point, end: Point) -> Rect {
    rect_from_corners(start, end).inflate(RESIZE_INSET, RESIZE_INSET)
}

pub(crate) fn segment_hit(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    distance_to_segment(point, start, end) <= tolerance
}

pub(crate) fn segment_inside(start: Point, end: Point, frame: Rect) -> bool {
    rect_contains(frame, start) || rect_contains(frame, end)
}

/// Fit a segment into `target` shrunk by the resize inset.
///
/// A perfectly vertical or horizontal segment is centered on its flat axis
/// and stretched along the other, keeping its direction.
pub(crate) fn resize_segment(start: Point, end: Point, target: Rect, min_size: f64) -> (Point, Point) {
    let actual = rect_from_corners(start, end);
    let x = target.x0 + RESIZE_INSET;
    let y = target.y0 + RESIZE_INSET;
    let w = (target.width() - RESIZE_INSET * 2.0).max(min_size);
    let h = (target.height() - RESIZE_INSET * 2.0).max(min_size);

    if actual.width() < f64::EPSILON {
        let mid_x = x + w / 2.0;
        let (sy, ey) = if start.y < end.y { (y, y + h) } else { (y + h, y) };
        (Point::new(mid_x, sy), Point::new(mid_x, ey))
    } else if actual.height() < f64::EPSILON {
        let mid_y = y + h / 2.0;
        let (sx, ex) = if start.x < end.x { (x, x + w) } else { (x + w, x) };
        (Point::new(sx, mid_y), Point::new(ex, mid_y))
    } else {
        let scale_x = w / actual.width();
        let scale_y = h / actual.height();
        let map = |p: Point| {
            Point::new(
                x + (p.x - actual.x0) * scale_x,
                y + (p.y - actual.y0) * scale_y,
            )
        };
        (map(start), map(end))
    }
}

impl ShapeTrait for Line {
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
    fn test_hit_threshold() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 5.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 5.5), 5.0));
        assert!(!line.hit_test(Point::new(106.0, 0.0), 5.0));
    }

    #[test]
    fn test_resize_diagonal() {
        let mut line = Line::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0));
        line.resize_to(Rect::new(0.0, 0.0, 60.0, 60.0), 10.0);
        assert_eq!(line.start, Point::new(5.0, 55.0));
        assert_eq!(line.end, Point::new(55.0, 5.0));
    }

    #[test]
    fn test_resize_vertical_keeps_direction() {
        let mut line = Line::new(Point::new(10.0, 80.0), Point::new(10.0, 0.0));
        line.resize_to(Rect::new(0.0, 0.0, 40.0, 110.0), 10.0);
        assert_eq!(line.start, Point::new(20.0, 105.0));
        assert_eq!(line.end, Point::new(20.0, 5.0));
    }

    #[test]
    fn test_resize_horizontal() {
        let mut line = Line::new(Point::new(0.0, 3.0), Point::new(30.0, 3.0));
        line.resize_to(Rect::new(100.0, 100.0, 160.0, 130.0), 10.0);
        assert_eq!(line.start, Point::new(105.0, 115.0));
        assert_eq!(line.end, Point::new(155.0, 115.0));
    }

    #[test]
    fn test_endpoint_containment() {
        let line = Line::new(Point::new(-50.0, 50.0), Point::new(50.0, 50.0));
        assert!(line.is_inside(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(!line.is_inside(Rect::new(-10.0, 0.0, 10.0, 100.0)));
    }
}

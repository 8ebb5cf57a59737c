//! Freehand (pencil) shape.

use super::{RESIZE_INSET, ShapeId, ShapeTrait, new_shape_id};
use crate::geometry::{distance_to_polyline, rect_contains, tight_bounds};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke. Points are kept in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freehand {
    pub id: ShapeId,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Freehand {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: new_shape_id(),
            points,
            stroke: None,
            stroke_width: None,
        }
    }

    /// Tight bounds of the recorded points.
    pub fn tight_bounds(&self) -> Option<Rect> {
        tight_bounds(&self.points)
    }
}

/// Map `points` from their tight box into `target` shrunk by the resize inset.
///
/// An axis with no extent keeps scale 1 and is only repositioned.
pub(crate) fn rescale_points(points: &[Point], target: Rect, min_size: f64) -> Vec<Point> {
    let Some(actual) = tight_bounds(points) else {
        return Vec::new();
    };
    let origin = Point::new(target.x0 + RESIZE_INSET, target.y0 + RESIZE_INSET);
    let new_w = (target.width() - RESIZE_INSET * 2.0).max(min_size);
    let new_h = (target.height() - RESIZE_INSET * 2.0).max(min_size);
    let scale_x = if actual.width() > 0.0 { new_w / actual.width() } else { 1.0 };
    let scale_y = if actual.height() > 0.0 { new_h / actual.height() } else { 1.0 };

    points
        .iter()
        .map(|p| {
            Point::new(
                origin.x + (p.x - actual.x0) * scale_x,
                origin.y + (p.y - actual.y0) * scale_y,
            )
        })
        .collect()
}

impl ShapeTrait for Freehand {
    fn id(&self) -> &str {
        &self.id
    }

    /// Tight bounds padded by the resize inset, matching the selection box.
    fn bounds(&self) -> Rect {
        self.tight_bounds()
            .map(|r| r.inflate(RESIZE_INSET, RESIZE_INSET))
            .unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        distance_to_polyline(point, &self.points) <= tolerance
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    fn resize_to(&mut self, target: Rect, min_size: f64) {
        if self.points.is_empty() {
            return;
        }
        self.points = rescale_points(&self.points, target, min_size);
    }

    fn is_inside(&self, frame: Rect) -> bool {
        self.points.iter().any(|p| rect_contains(frame, *p))
    }
}

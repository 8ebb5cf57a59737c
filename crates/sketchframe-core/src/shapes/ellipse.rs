//! Ellipse shape.

use super::{ShapeId, ShapeTrait, box_center_inside, box_hit, new_shape_id};
use crate::geometry::rect_from_origin;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
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

impl Ellipse {
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

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        rect_from_origin(self.x, self.y, self.w, self.h)
    }

    // Whole bounding box counts, corners included.
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

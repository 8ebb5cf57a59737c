//! Generated UI shape: a box holding markup produced from a frame.

use super::{ShapeId, ShapeTrait, box_hit, new_shape_id};
use crate::geometry::rect_from_origin;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUi {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Markup streamed in by the generation service. `None` until the first chunk.
    pub ui_spec_data: Option<String>,
    /// Frame the content was generated from.
    pub source_frame_id: ShapeId,
    #[serde(default)]
    pub is_workflow_page: bool,
}

impl GeneratedUi {
    pub fn new(x: f64, y: f64, w: f64, h: f64, source_frame_id: ShapeId) -> Self {
        Self {
            id: new_shape_id(),
            x,
            y,
            w,
            h,
            ui_spec_data: None,
            source_frame_id,
            is_workflow_page: false,
        }
    }

    /// Append a streamed chunk of markup.
    pub fn append_markup(&mut self, chunk: &str) {
        self.ui_spec_data.get_or_insert_with(String::new).push_str(chunk);
    }
}

impl ShapeTrait for GeneratedUi {
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

    // Generated output is never part of a frame's export.
    fn is_inside(&self, _frame: Rect) -> bool {
        false
    }
}

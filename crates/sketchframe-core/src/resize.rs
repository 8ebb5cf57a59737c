//! Corner-handle resizing.

use crate::shapes::ShapeId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The corner handle being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeCorner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeCorner {
    /// Position of this handle on `rect`.
    pub fn position(self, rect: Rect) -> Point {
        match self {
            ResizeCorner::Nw => Point::new(rect.x0, rect.y0),
            ResizeCorner::Ne => Point::new(rect.x1, rect.y0),
            ResizeCorner::Sw => Point::new(rect.x0, rect.y1),
            ResizeCorner::Se => Point::new(rect.x1, rect.y1),
        }
    }

    /// The corner that stays put while this one is dragged.
    pub fn opposite(self) -> ResizeCorner {
        match self {
            ResizeCorner::Nw => ResizeCorner::Se,
            ResizeCorner::Ne => ResizeCorner::Sw,
            ResizeCorner::Sw => ResizeCorner::Ne,
            ResizeCorner::Se => ResizeCorner::Nw,
        }
    }
}

/// New bounds when `corner` of `initial` is dragged to `world`.
///
/// Width and height never drop below `min_size`; the opposite corner stays fixed.
pub fn resize_bounds(initial: Rect, corner: ResizeCorner, world: Point, min_size: f64) -> Rect {
    let initial = initial.abs();
    let (x0, y0, x1, y1) = (initial.x0, initial.y0, initial.x1, initial.y1);
    match corner {
        ResizeCorner::Nw => {
            let w = (x1 - world.x).max(min_size);
            let h = (y1 - world.y).max(min_size);
            Rect::new(x1 - w, y1 - h, x1, y1)
        }
        ResizeCorner::Ne => {
            let w = (world.x - x0).max(min_size);
            let h = (y1 - world.y).max(min_size);
            Rect::new(x0, y1 - h, x0 + w, y1)
        }
        ResizeCorner::Sw => {
            let w = (x1 - world.x).max(min_size);
            let h = (world.y - y0).max(min_size);
            Rect::new(x1 - w, y0, x1, y0 + h)
        }
        ResizeCorner::Se => {
            let w = (world.x - x0).max(min_size);
            let h = (world.y - y0).max(min_size);
            Rect::new(x0, y0, x0 + w, y0 + h)
        }
    }
}

/// Resize messages sent by a selection overlay.
///
/// Positions are screen coordinates; the session converts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResizeCommand {
    #[serde(rename_all = "camelCase")]
    Begin {
        shape_id: ShapeId,
        corner: ResizeCorner,
        /// Bounds shown by the overlay; the shape's own bounds when absent.
        #[serde(default)]
        bounds: Option<Rect>,
    },
    Update {
        position: Point,
    },
    End,
}

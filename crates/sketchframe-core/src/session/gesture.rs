//! In-progress gesture state.

use crate::resize::ResizeCorner;
use crate::shapes::{Arrow, Ellipse, Frame, Line, Rectangle, Shape, ShapeId};
use crate::tools::DraftKind;
use crate::viewport::PanMode;
use kurbo::{Point, Rect};
use std::collections::HashSet;

/// A shape being dragged out between two world points. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftShape {
    pub kind: DraftKind,
    pub start: Point,
    pub current: Point,
}

impl DraftShape {
    pub fn new(kind: DraftKind, start: Point) -> Self {
        Self {
            kind,
            start,
            current: start,
        }
    }

    /// Normalized box spanned by the drag.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }

    /// Build the committed shape if the drag exceeds `min_size` in both
    /// dimensions. `frame_number` is only used by frames.
    pub fn commit(&self, min_size: f64, frame_number: u32) -> Option<Shape> {
        let r = self.rect();
        if r.width() <= min_size || r.height() <= min_size {
            return None;
        }
        let shape = match self.kind {
            DraftKind::Frame => Shape::Frame(Frame::new(r.x0, r.y0, r.width(), r.height(), frame_number)),
            DraftKind::Rect => Shape::Rectangle(Rectangle::new(r.x0, r.y0, r.width(), r.height())),
            DraftKind::Ellipse => Shape::Ellipse(Ellipse::new(r.x0, r.y0, r.width(), r.height())),
            DraftKind::Line => Shape::Line(Line::new(self.start, self.current)),
            DraftKind::Arrow => Shape::Arrow(Arrow::new(self.start, self.current)),
        };
        Some(shape)
    }
}

/// What the active drawing gesture is producing.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Shape(DraftShape),
    /// Raw freehand points in world space, in drawing order.
    Freehand(Vec<Point>),
}

/// Snapshot of the selection taken when a move starts.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveGesture {
    /// World point the drag started from.
    pub start: Point,
    /// Geometry of every moved shape before the drag.
    pub originals: Vec<Shape>,
}

/// Shapes already erased during this drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EraseGesture {
    pub erased: HashSet<ShapeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub shape_id: ShapeId,
    pub corner: ResizeCorner,
    /// Bounds at gesture start; every update is computed from these.
    pub initial: Rect,
}

/// The single in-progress tool gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    None,
    Drawing(Draft),
    Moving(MoveGesture),
    Erasing(EraseGesture),
    Resizing(ResizeGesture),
}

impl Gesture {
    pub fn is_none(&self) -> bool {
        matches!(self, Gesture::None)
    }
}

/// Externally visible interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Panning,
    ShiftPanning,
    Drawing,
    Moving,
    Erasing,
    Resizing,
}

impl InteractionState {
    pub(crate) fn from_parts(pan: PanMode, gesture: &Gesture) -> Self {
        match pan {
            PanMode::Panning => return InteractionState::Panning,
            PanMode::ShiftPanning => return InteractionState::ShiftPanning,
            PanMode::Idle => {}
        }
        match gesture {
            Gesture::None => InteractionState::Idle,
            Gesture::Drawing(_) => InteractionState::Drawing,
            Gesture::Moving(_) => InteractionState::Moving,
            Gesture::Erasing(_) => InteractionState::Erasing,
            Gesture::Resizing(_) => InteractionState::Resizing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_draft_below_threshold_is_discarded() {
        let mut draft = DraftShape::new(DraftKind::Rect, Point::ZERO);
        draft.current = Point::new(0.5, 0.5);
        assert!(draft.commit(1.0, 0).is_none());
        // Exactly the threshold is still too small.
        draft.current = Point::new(1.0, 40.0);
        assert!(draft.commit(1.0, 0).is_none());
    }

    #[test]
    fn test_draft_normalizes_reverse_drag() {
        let mut draft = DraftShape::new(DraftKind::Ellipse, Point::new(50.0, 40.0));
        draft.current = Point::new(10.0, 10.0);
        match draft.commit(1.0, 0) {
            Some(Shape::Ellipse(e)) => {
                assert_eq!((e.x, e.y, e.w, e.h), (10.0, 10.0, 40.0, 30.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_line_keeps_direction() {
        let mut draft = DraftShape::new(DraftKind::Arrow, Point::new(50.0, 50.0));
        draft.current = Point::new(0.0, 10.0);
        let shape = draft.commit(1.0, 0).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Arrow);
        match shape {
            Shape::Arrow(a) => {
                assert_eq!(a.start, Point::new(50.0, 50.0));
                assert_eq!(a.end, Point::new(0.0, 10.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_state_prefers_pan_mode() {
        let g = Gesture::Erasing(EraseGesture::default());
        assert_eq!(InteractionState::from_parts(PanMode::Idle, &g), InteractionState::Erasing);
        assert_eq!(
            InteractionState::from_parts(PanMode::ShiftPanning, &Gesture::None),
            InteractionState::ShiftPanning
        );
    }
}

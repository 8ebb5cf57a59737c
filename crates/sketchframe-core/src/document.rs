//! Shape collection with stable drawing order.

use crate::shapes::{Frame, Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All shapes on the canvas, keyed by id, plus their insertion order.
///
/// Serialized as `{ "ids": [...], "entities": { id: shape } }` with entities
/// keyed in id order, so equal documents serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Drawing order (back to front).
    ids: Vec<ShapeId>,
    entities: BTreeMap<ShapeId, Shape>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a shape on top. Re-adding an existing id replaces it in place.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id().to_string();
        if self.entities.insert(id.clone(), shape).is_none() {
            self.ids.push(id.clone());
        }
        id
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        let removed = self.entities.remove(id)?;
        self.ids.retain(|shape_id| shape_id != id);
        Some(removed)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: &str) -> Option<&Shape> {
        self.entities.get(id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.entities.get_mut(id)
    }

    /// Ids in drawing order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    /// Get shapes in drawing order (back to front).
    pub fn shapes_ordered(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Topmost shape under `point`: the last drawn one wins.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<&Shape> {
        self.shapes_ordered()
            .rev()
            .find(|shape| shape.hit_test(point, tolerance))
    }

    /// All shapes under `point`, topmost first.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<&Shape> {
        self.shapes_ordered()
            .rev()
            .filter(|shape| shape.hit_test(point, tolerance))
            .collect()
    }

    /// Frames in drawing order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.shapes_ordered().filter_map(|shape| match shape {
            Shape::Frame(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn frame(&self, id: &str) -> Option<&Frame> {
        match self.entities.get(id)? {
            Shape::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Shapes a frame scopes for export, in drawing order. The frame itself is excluded.
    pub fn shapes_inside_frame(&self, frame: &Frame) -> Vec<&Shape> {
        let rect = frame.rect();
        self.shapes_ordered()
            .filter(|shape| shape.id() != frame.id && shape.is_inside(rect))
            .collect()
    }

    /// Bounding box of every shape, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes_ordered()
            .map(Shape::bounds)
            .reduce(|acc, r| acc.union(r))
    }

    /// Repair order/entity mismatches from an external snapshot.
    ///
    /// Ids without an entity are dropped; entities missing from the order are
    /// appended (sorted by id so the result is deterministic).
    pub(crate) fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let entities = &self.entities;
        self.ids
            .retain(|id| entities.contains_key(id) && seen.insert(id.clone()));

        let mut orphans: Vec<ShapeId> = self
            .entities
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        orphans.sort();
        self.ids.extend(orphans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle, Text};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(x, y, w, h))
    }

    #[test]
    fn test_add_and_remove() {
        let mut doc = CanvasDocument::new();
        let id = doc.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(doc.len(), 1);
        assert!(doc.contains(&id));
        assert!(doc.remove_shape(&id).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove_shape(&id).is_none());
    }

    #[test]
    fn test_readd_keeps_position() {
        let mut doc = CanvasDocument::new();
        let a = doc.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_shape(rect(5.0, 5.0, 10.0, 10.0));
        let mut replacement = doc.get_shape(&a).unwrap().clone();
        replacement.translate(kurbo::Vec2::new(1.0, 1.0));
        doc.add_shape(replacement);
        assert_eq!(doc.ids(), &[a, b]);
    }

    #[test]
    fn test_last_drawn_wins() {
        let mut doc = CanvasDocument::new();
        let bottom = doc.add_shape(rect(0.0, 0.0, 100.0, 100.0));
        let top = doc.add_shape(rect(50.0, 50.0, 100.0, 100.0));

        let hit = doc.shape_at(Point::new(75.0, 75.0), 5.0).unwrap();
        assert_eq!(hit.id(), top);
        let hit = doc.shape_at(Point::new(10.0, 10.0), 5.0).unwrap();
        assert_eq!(hit.id(), bottom);
        assert!(doc.shape_at(Point::new(500.0, 500.0), 5.0).is_none());

        let all: Vec<_> = doc
            .shapes_at_point(Point::new(75.0, 75.0), 5.0)
            .into_iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(all, vec![top, bottom]);
    }

    #[test]
    fn test_empty_document_has_no_hit() {
        let doc = CanvasDocument::new();
        assert!(doc.shape_at(Point::ZERO, 5.0).is_none());
        assert!(doc.bounds().is_none());
    }

    #[test]
    fn test_shapes_inside_frame() {
        let mut doc = CanvasDocument::new();
        let frame = Frame::new(0.0, 0.0, 100.0, 100.0, 1);
        let frame_id = doc.add_shape(Shape::Frame(frame));
        let inside = doc.add_shape(rect(10.0, 10.0, 20.0, 20.0));
        let _outside = doc.add_shape(rect(200.0, 200.0, 20.0, 20.0));
        let line = doc.add_shape(Shape::Line(Line::new(
            Point::new(-50.0, 0.0),
            Point::new(50.0, 50.0),
        )));
        let text = doc.add_shape(Shape::Text(Text::new(Point::new(99.0, 1.0))));

        let frame = doc.frame(&frame_id).unwrap();
        let ids: Vec<_> = doc
            .shapes_inside_frame(frame)
            .into_iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec![inside, line, text]);
    }

    #[test]
    fn test_normalize_repairs_order() {
        let mut doc = CanvasDocument::new();
        let a = doc.add_shape(rect(0.0, 0.0, 1.0, 1.0));
        doc.ids.push("ghost".into());
        doc.ids.push(a.clone());
        let b = rect(1.0, 1.0, 1.0, 1.0);
        let b_id = b.id().to_string();
        doc.entities.insert(b_id.clone(), b);

        doc.normalize();
        assert_eq!(doc.ids(), &[a, b_id]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut doc = CanvasDocument::new();
        let id = doc.add_shape(rect(0.0, 0.0, 1.0, 1.0));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["ids"][0], id.as_str());
        assert_eq!(json["entities"][&id]["type"], "rect");
    }
}

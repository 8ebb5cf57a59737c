//! Plain-data project snapshot exchanged with persistence.

use crate::document::CanvasDocument;
use crate::shapes::ShapeId;
use crate::tools::Tool;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shape-side state of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapesData {
    pub shapes: CanvasDocument,
    pub tool: Tool,
    /// Selected ids, stored as `id -> true`.
    pub selected: BTreeMap<ShapeId, bool>,
    pub frame_counter: u32,
}

/// Viewport-side state of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportData {
    pub scale: f64,
    pub translate: Vec2,
}

impl Default for ViewportData {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

/// Everything needed to restore an editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub shapes_data: ShapesData,
    pub viewport_data: ViewportData,
}

impl ProjectSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let snapshot = ProjectSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, ProjectSnapshot::default());
        assert!((snapshot.viewport_data.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_field_names() {
        let mut snapshot = ProjectSnapshot::default();
        snapshot.shapes_data.frame_counter = 3;
        snapshot.shapes_data.selected.insert("a".into(), true);
        snapshot.viewport_data.translate = Vec2::new(5.0, -2.0);

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["shapesData"]["frameCounter"], 3);
        assert_eq!(json["shapesData"]["selected"]["a"], true);
        assert_eq!(json["shapesData"]["tool"], "select");
        assert_eq!(json["viewportData"]["translate"]["x"], 5.0);
        assert!(json["shapesData"]["shapes"]["ids"].is_array());
    }
}

//! Project files on disk.

use crate::AppError;
use kurbo::Rect;
use serde::Serialize;
use sketchframe_core::{CanvasDocument, EditorConfig, EditorSession, ProjectSnapshot};
use std::path::Path;

pub fn read_project(path: &Path) -> Result<ProjectSnapshot, AppError> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })?;
    ProjectSnapshot::from_json(&json).map_err(|source| AppError::Project {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_project(path: &Path, snapshot: &ProjectSnapshot) -> Result<(), AppError> {
    let json = snapshot.to_json_pretty().map_err(|source| AppError::Project {
        path: path.display().to_string(),
        source,
    })?;
    write_file(path, json.as_bytes())
}

pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, bytes).map_err(|source| AppError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Read a project and rebuild its document the way a session would see it.
pub fn load_document(path: &Path) -> Result<CanvasDocument, AppError> {
    let snapshot = read_project(path)?;
    let session = EditorSession::from_snapshot(EditorConfig::default(), snapshot);
    Ok(session.document().clone())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSummary {
    pub id: String,
    pub frame_number: u32,
    pub label: String,
    pub bounds: Rect,
    /// Shapes that an export of this frame would draw.
    pub contained: usize,
}

/// One entry per frame, in drawing order.
pub fn frame_summaries(document: &CanvasDocument) -> Vec<FrameSummary> {
    document
        .frames()
        .map(|frame| FrameSummary {
            id: frame.id.clone(),
            frame_number: frame.frame_number,
            label: frame.label(),
            bounds: frame.rect(),
            contained: document.shapes_inside_frame(frame).len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchframe_core::shapes::{Frame, Rectangle, Shape};

    #[test]
    fn test_frame_summaries() {
        let mut doc = CanvasDocument::new();
        let a = doc.add_shape(Shape::Frame(Frame::new(0.0, 0.0, 100.0, 100.0, 1)));
        let b = doc.add_shape(Shape::Frame(Frame::new(500.0, 0.0, 100.0, 100.0, 2)));
        doc.add_shape(Shape::Rectangle(Rectangle::new(10.0, 10.0, 20.0, 20.0)));

        let summaries = frame_summaries(&doc);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, a);
        assert_eq!(summaries[0].label, "Frame 1");
        assert_eq!(summaries[0].contained, 1);
        assert_eq!(summaries[1].id, b);
        assert_eq!(summaries[1].contained, 0);
    }

    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(read_project(&missing), Err(AppError::Read { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        assert!(matches!(read_project(&broken), Err(AppError::Project { .. })));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let mut snapshot = ProjectSnapshot::default();
        snapshot.shapes_data.frame_counter = 3;
        write_project(&path, &snapshot).unwrap();
        assert_eq!(read_project(&path).unwrap(), snapshot);
    }
}

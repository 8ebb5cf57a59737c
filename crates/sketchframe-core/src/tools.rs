//! Drawing tools.

use serde::{Deserialize, Serialize};

/// The active canvas tool. Exactly one is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Frame,
    Rect,
    Ellipse,
    Freedraw,
    Arrow,
    Line,
    Text,
    Eraser,
}

/// Tools that draft a shape by dragging between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    Frame,
    Rect,
    Ellipse,
    Arrow,
    Line,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Select,
        Tool::Frame,
        Tool::Rect,
        Tool::Ellipse,
        Tool::Freedraw,
        Tool::Arrow,
        Tool::Line,
        Tool::Text,
        Tool::Eraser,
    ];

    /// The draft kind for drag-to-draw tools.
    pub fn draft_kind(self) -> Option<DraftKind> {
        match self {
            Tool::Frame => Some(DraftKind::Frame),
            Tool::Rect => Some(DraftKind::Rect),
            Tool::Ellipse => Some(DraftKind::Ellipse),
            Tool::Arrow => Some(DraftKind::Arrow),
            Tool::Line => Some(DraftKind::Line),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Frame => "Frame",
            Tool::Rect => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Freedraw => "Pencil",
            Tool::Arrow => "Arrow",
            Tool::Line => "Line",
            Tool::Text => "Text",
            Tool::Eraser => "Eraser",
        }
    }

    /// Keyboard shortcut.
    pub fn shortcut(self) -> char {
        match self {
            Tool::Select => 'v',
            Tool::Frame => 'f',
            Tool::Rect => 'r',
            Tool::Ellipse => 'o',
            Tool::Freedraw => 'p',
            Tool::Arrow => 'a',
            Tool::Line => 'l',
            Tool::Text => 't',
            Tool::Eraser => 'e',
        }
    }

    pub fn from_shortcut(key: &str) -> Option<Tool> {
        let mut chars = key.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        Tool::ALL.into_iter().find(|t| t.shortcut() == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_kinds() {
        assert_eq!(Tool::Rect.draft_kind(), Some(DraftKind::Rect));
        assert_eq!(Tool::Line.draft_kind(), Some(DraftKind::Line));
        assert_eq!(Tool::Freedraw.draft_kind(), None);
        assert_eq!(Tool::Text.draft_kind(), None);
    }

    #[test]
    fn test_shortcuts_are_unique() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_shortcut(&tool.shortcut().to_string()), Some(tool));
        }
        assert_eq!(Tool::from_shortcut("Shift"), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Tool::Freedraw).unwrap(), "\"freedraw\"");
        let tool: Tool = serde_json::from_str("\"eraser\"").unwrap();
        assert_eq!(tool, Tool::Eraser);
    }
}

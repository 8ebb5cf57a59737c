//! Text shape.

use super::{ShapeId, ShapePatch, ShapeTrait, new_shape_id};
use crate::geometry::{rect_contains, rect_from_origin};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Font family assigned to new text.
pub const DEFAULT_FONT_FAMILY: &str = "Inter, sans-serif";

/// Families offered by the property panel.
pub const FONT_FAMILIES: &[&str] = &[
    DEFAULT_FONT_FAMILY,
    "Arial, sans-serif",
    "Helvetica, sans-serif",
    "Georgia, serif",
    "Times New Roman, serif",
    "Courier New, monospace",
    "Monaco, monospace",
    "system-ui, sans-serif",
];

/// Estimated glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Minimum estimated width of a text box.
const MIN_TEXT_WIDTH: f64 = 100.0;
/// Estimated line box as a fraction of the font size.
const LINE_BOX_FACTOR: f64 = 1.2;
/// Inner padding of the editable text box.
const TEXT_PADDING: f64 = 8.0;
/// Extra slack around the padded box when hit-testing.
const TEXT_HIT_SLACK: f64 = 2.0;

/// CSS-style numeric font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_line_height() -> f64 {
    1.2
}

fn default_fill() -> String {
    "#ffffff".to_string()
}

/// A single text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

impl Text {
    /// Create an empty text box at `position` with default typography.
    pub fn new(position: Point) -> Self {
        Self {
            id: new_shape_id(),
            x: position.x,
            y: position.y,
            text: String::new(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            line_height: default_line_height(),
            letter_spacing: 0.0,
            fill: default_fill(),
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Estimated (width, height) of the text content.
    pub fn estimated_size(&self) -> (f64, f64) {
        let chars = self.text.chars().count() as f64;
        let width = (chars * self.font_size * CHAR_WIDTH_FACTOR).max(MIN_TEXT_WIDTH);
        (width, self.font_size * LINE_BOX_FACTOR)
    }

    pub(crate) fn apply_patch(&mut self, patch: &ShapePatch) {
        if let Some(v) = patch.x {
            self.x = v;
        }
        if let Some(v) = patch.y {
            self.y = v;
        }
        if let Some(v) = &patch.text {
            self.text = v.clone();
        }
        if let Some(v) = &patch.font_family {
            self.font_family = v.clone();
        }
        if let Some(v) = patch.font_size {
            self.font_size = v.max(1.0);
        }
        if let Some(v) = patch.font_weight {
            self.font_weight = v;
        }
        if let Some(v) = patch.font_style {
            self.font_style = v;
        }
        if let Some(v) = patch.text_decoration {
            self.text_decoration = v;
        }
        if let Some(v) = patch.line_height {
            self.line_height = v;
        }
        if let Some(v) = patch.letter_spacing {
            self.letter_spacing = v;
        }
        if let Some(v) = &patch.fill {
            self.fill = v.clone();
        }
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let (w, h) = self.estimated_size();
        rect_from_origin(self.x, self.y, w + TEXT_PADDING, h + TEXT_PADDING)
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        rect_contains(self.bounds().inflate(TEXT_HIT_SLACK, TEXT_HIT_SLACK), point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    // Text is sized by its typography, not by handles.
    fn resize_to(&mut self, _target: Rect, _min_size: f64) {}

    fn is_inside(&self, frame: Rect) -> bool {
        rect_contains(frame, self.anchor())
    }
}

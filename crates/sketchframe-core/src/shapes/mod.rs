//! Shape definitions for the canvas.

mod arrow;
mod ellipse;
mod frame;
mod freehand;
mod generated;
mod line;
mod rectangle;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, Arrow};
pub use ellipse::Ellipse;
pub use frame::Frame;
pub use freehand::Freehand;
pub use generated::GeneratedUi;
pub use line::Line;
pub use rectangle::{RECT_CORNER_RADIUS, Rectangle};
pub use text::{FontStyle, FontWeight, Text, TextDecoration, DEFAULT_FONT_FAMILY, FONT_FAMILIES};

use crate::geometry::{rect_contains, rect_from_origin};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = String;

/// Generate a fresh shape id.
pub fn new_shape_id() -> ShapeId {
    Uuid::new_v4().to_string()
}

/// Stroke width used when a shape does not carry one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Padding between a point-based shape's tight bounds and its resize box.
pub const RESIZE_INSET: f64 = 5.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `transparent`,
    /// or one of a handful of named colors.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("transparent") {
            return Some(Self::transparent());
        }
        if let Some(hex) = value.strip_prefix('#') {
            let channel = |s: &str| u8::from_str_radix(s, 16).ok();
            return match hex.len() {
                3 => {
                    let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                    Some(Self::new(it.next()??, it.next()??, it.next()??, 255))
                }
                6 => Some(Self::new(
                    channel(hex.get(0..2)?)?,
                    channel(hex.get(2..4)?)?,
                    channel(hex.get(4..6)?)?,
                    255,
                )),
                8 => Some(Self::new(
                    channel(hex.get(0..2)?)?,
                    channel(hex.get(2..4)?)?,
                    channel(hex.get(4..6)?)?,
                    channel(hex.get(6..8)?)?,
                )),
                _ => None,
            };
        }
        match value.to_ascii_lowercase().as_str() {
            "white" => Some(Self::white()),
            "black" => Some(Self::new(0, 0, 0, 255)),
            "red" => Some(Self::new(255, 0, 0, 255)),
            "green" => Some(Self::new(0, 128, 0, 255)),
            "blue" => Some(Self::new(0, 0, 255, 255)),
            "gray" | "grey" => Some(Self::new(128, 128, 128, 255)),
            _ => None,
        }
    }

    /// Resolve a stroke attribute, falling back to white when it is absent,
    /// unparseable or fully transparent.
    pub fn stroke_or_white(stroke: Option<&str>) -> Self {
        match stroke.and_then(Self::parse) {
            Some(color) if color.a > 0 => color,
            _ => Self::white(),
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Discriminant of a [`Shape`], matching its serialized `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Frame,
    Rect,
    Ellipse,
    Freedraw,
    Line,
    Arrow,
    Text,
    #[serde(rename = "generatedui")]
    GeneratedUi,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Frame => "frame",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Freedraw => "freedraw",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
            ShapeKind::GeneratedUi => "generatedui",
        }
    }
}

/// Common behavior for all shapes.
pub trait ShapeTrait {
    /// Unique identifier.
    fn id(&self) -> &str;

    /// Axis-aligned bounds in world coordinates.
    fn bounds(&self) -> Rect;

    /// Whether `point` (world) hits this shape.
    ///
    /// `tolerance` is the stroke distance used by point-based shapes.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Offset all geometry by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Fit the shape into `target`, a resize box already clamped to `min_size`.
    fn resize_to(&mut self, target: Rect, min_size: f64);

    /// Coarse containment used when collecting a frame's contents.
    fn is_inside(&self, frame: Rect) -> bool;
}

/// Hit test shared by the box-shaped variants.
pub(crate) fn box_hit(x: f64, y: f64, w: f64, h: f64, point: Point) -> bool {
    rect_contains(rect_from_origin(x, y, w, h), point)
}

/// Containment shared by the box-shaped variants: the center must be inside.
pub(crate) fn box_center_inside(x: f64, y: f64, w: f64, h: f64, frame: Rect) -> bool {
    rect_contains(frame, Point::new(x + w / 2.0, y + h / 2.0))
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "frame")]
    Frame(Frame),
    #[serde(rename = "rect")]
    Rectangle(Rectangle),
    #[serde(rename = "ellipse")]
    Ellipse(Ellipse),
    #[serde(rename = "freedraw")]
    Freehand(Freehand),
    #[serde(rename = "line")]
    Line(Line),
    #[serde(rename = "arrow")]
    Arrow(Arrow),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "generatedui")]
    GeneratedUi(GeneratedUi),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Frame(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) => s,
            Shape::Line(s) => s,
            Shape::Arrow(s) => s,
            Shape::Text(s) => s,
            Shape::GeneratedUi(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Frame(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) => s,
            Shape::Line(s) => s,
            Shape::Arrow(s) => s,
            Shape::Text(s) => s,
            Shape::GeneratedUi(s) => s,
        }
    }

    pub fn id(&self) -> &str {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Frame(_) => ShapeKind::Frame,
            Shape::Rectangle(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Freehand(_) => ShapeKind::Freedraw,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Text(_) => ShapeKind::Text,
            Shape::GeneratedUi(_) => ShapeKind::GeneratedUi,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    /// A copy of this shape offset by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        let mut moved = self.clone();
        moved.translate(delta);
        moved
    }

    pub fn resize_to(&mut self, target: Rect, min_size: f64) {
        self.as_trait_mut().resize_to(target, min_size);
    }

    pub fn is_inside(&self, frame: Rect) -> bool {
        self.as_trait().is_inside(frame)
    }

    /// Stroke color attribute, if the variant has one.
    pub fn stroke(&self) -> Option<&str> {
        match self {
            Shape::Frame(s) => s.stroke.as_deref(),
            Shape::Rectangle(s) => s.stroke.as_deref(),
            Shape::Ellipse(s) => s.stroke.as_deref(),
            Shape::Freehand(s) => s.stroke.as_deref(),
            Shape::Line(s) => s.stroke.as_deref(),
            Shape::Arrow(s) => s.stroke.as_deref(),
            Shape::Text(_) | Shape::GeneratedUi(_) => None,
        }
    }

    /// Stroke width, defaulting to [`DEFAULT_STROKE_WIDTH`].
    pub fn stroke_width(&self) -> f64 {
        let width = match self {
            Shape::Frame(s) => s.stroke_width,
            Shape::Rectangle(s) => s.stroke_width,
            Shape::Ellipse(s) => s.stroke_width,
            Shape::Freehand(s) => s.stroke_width,
            Shape::Line(s) => s.stroke_width,
            Shape::Arrow(s) => s.stroke_width,
            Shape::Text(_) | Shape::GeneratedUi(_) => None,
        };
        width.filter(|w| *w > 0.0).unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Apply a partial update. Fields that make no sense for this variant are ignored.
    pub fn apply_patch(&mut self, patch: &ShapePatch) {
        match self {
            Shape::Frame(s) => {
                patch_box(&mut s.x, &mut s.y, &mut s.w, &mut s.h, patch);
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::Rectangle(s) => {
                patch_box(&mut s.x, &mut s.y, &mut s.w, &mut s.h, patch);
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::Ellipse(s) => {
                patch_box(&mut s.x, &mut s.y, &mut s.w, &mut s.h, patch);
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::GeneratedUi(s) => {
                patch_box(&mut s.x, &mut s.y, &mut s.w, &mut s.h, patch);
                if let Some(markup) = &patch.ui_spec_data {
                    s.ui_spec_data = markup.clone();
                }
            }
            Shape::Freehand(s) => {
                if let Some(points) = &patch.points {
                    s.points = points.clone();
                }
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::Line(s) => {
                patch_segment(&mut s.start, &mut s.end, patch);
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::Arrow(s) => {
                patch_segment(&mut s.start, &mut s.end, patch);
                patch_stroke(&mut s.stroke, &mut s.stroke_width, patch);
            }
            Shape::Text(s) => s.apply_patch(patch),
        }
    }
}

fn patch_box(x: &mut f64, y: &mut f64, w: &mut f64, h: &mut f64, patch: &ShapePatch) {
    if let Some(v) = patch.x {
        *x = v;
    }
    if let Some(v) = patch.y {
        *y = v;
    }
    if let Some(v) = patch.w {
        *w = v.max(0.0);
    }
    if let Some(v) = patch.h {
        *h = v.max(0.0);
    }
}

fn patch_stroke(stroke: &mut Option<String>, width: &mut Option<f64>, patch: &ShapePatch) {
    if let Some(s) = &patch.stroke {
        *stroke = Some(s.clone());
    }
    if let Some(w) = patch.stroke_width {
        *width = Some(w);
    }
}

fn patch_segment(start: &mut Point, end: &mut Point, patch: &ShapePatch) {
    if let Some(p) = patch.start {
        *start = p;
    }
    if let Some(p) = patch.end {
        *end = p;
    }
}

/// Partial update for a shape, as produced by drag handles and property panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub points: Option<Vec<Point>>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub fill: Option<String>,
    /// `Some(None)` clears the markup.
    pub ui_spec_data: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(SerializableColor::parse("#fff"), Some(SerializableColor::white()));
        assert_eq!(
            SerializableColor::parse("#ff8000"),
            Some(SerializableColor::new(255, 128, 0, 255))
        );
        assert_eq!(
            SerializableColor::parse("#00000080"),
            Some(SerializableColor::new(0, 0, 0, 128))
        );
        assert_eq!(SerializableColor::parse("transparent"), Some(SerializableColor::transparent()));
        assert_eq!(SerializableColor::parse("#12"), None);
        assert_eq!(SerializableColor::parse("chartreuse"), None);
    }

    #[test]
    fn test_stroke_fallback_is_white() {
        assert_eq!(SerializableColor::stroke_or_white(None), SerializableColor::white());
        assert_eq!(
            SerializableColor::stroke_or_white(Some("transparent")),
            SerializableColor::white()
        );
        assert_eq!(
            SerializableColor::stroke_or_white(Some("#ff0000")),
            SerializableColor::new(255, 0, 0, 255)
        );
    }

    #[test]
    fn test_serialized_type_tags() {
        let shape = Shape::Rectangle(Rectangle::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["w"], 3.0);

        let ui = Shape::GeneratedUi(GeneratedUi::new(0.0, 0.0, 400.0, 300.0, "f1".into()));
        let json = serde_json::to_value(&ui).unwrap();
        assert_eq!(json["type"], "generatedui");
        assert_eq!(json["sourceFrameId"], "f1");
        assert!(json["uiSpecData"].is_null());
    }

    #[test]
    fn test_deserialize_shape() {
        let json = r#"{"type":"line","id":"l1","start":{"x":0.0,"y":0.0},"end":{"x":10.0,"y":5.0}}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Line);
        assert_eq!(shape.id(), "l1");
        assert!((shape.stroke_width() - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_patch_ignores_foreign_fields() {
        let mut shape = Shape::Freehand(Freehand::new(vec![Point::ZERO, Point::new(1.0, 1.0)]));
        shape.apply_patch(&ShapePatch {
            x: Some(50.0),
            stroke: Some("#00ff00".into()),
            ..Default::default()
        });
        match &shape {
            Shape::Freehand(f) => {
                assert_eq!(f.points[0], Point::ZERO);
                assert_eq!(f.stroke.as_deref(), Some("#00ff00"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_translated_leaves_original() {
        let shape = Shape::Ellipse(Ellipse::new(0.0, 0.0, 10.0, 10.0));
        let moved = shape.translated(Vec2::new(5.0, -5.0));
        assert!((shape.bounds().x0).abs() < f64::EPSILON);
        assert!((moved.bounds().x0 - 5.0).abs() < f64::EPSILON);
        assert!((moved.bounds().y0 + 5.0).abs() < f64::EPSILON);
    }
}

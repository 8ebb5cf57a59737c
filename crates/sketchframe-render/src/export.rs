//! Frame export.

use crate::raster::{fill, fill_polygon, stroke_polyline, stroke_shape};
use crate::text::draw_text;
use crate::{RenderError, RenderResult};
use image::RgbaImage;
use kurbo::{Ellipse, Point, Rect, RoundedRect, Vec2};
use peniko::Color;
use sketchframe_core::document::CanvasDocument;
use sketchframe_core::shapes::{Frame, RECT_CORNER_RADIUS, SerializableColor, Shape};

/// Exports are drawn on opaque black.
pub const BACKGROUND: Color = Color::BLACK;

/// Largest width or height accepted for an export, in pixels.
pub const MAX_EXPORT_DIMENSION: u32 = 16_384;

/// Rasterize `shapes` into an image the size of `frame`.
///
/// Shapes are drawn in the given order, offset so the frame's top-left is the
/// image origin. Anything outside the frame is clipped.
pub fn render_frame(frame: &Frame, shapes: &[&Shape]) -> RenderResult<RgbaImage> {
    if !(frame.w >= 1.0 && frame.h >= 1.0) {
        return Err(RenderError::EmptyFrame {
            width: frame.w,
            height: frame.h,
        });
    }
    let max = MAX_EXPORT_DIMENSION as f64;
    if frame.w > max || frame.h > max {
        return Err(RenderError::TooLarge {
            width: frame.w,
            height: frame.h,
        });
    }

    let mut image = RgbaImage::new(frame.w.floor() as u32, frame.h.floor() as u32);
    fill(&mut image, BACKGROUND);
    let offset = Vec2::new(-frame.x, -frame.y);
    for shape in shapes {
        draw_shape(&mut image, shape, offset);
    }
    Ok(image)
}

fn stroke_color(shape: &Shape) -> Color {
    SerializableColor::stroke_or_white(shape.stroke()).into()
}

fn draw_shape(image: &mut RgbaImage, shape: &Shape, offset: Vec2) {
    let width = shape.stroke_width();
    match shape {
        Shape::Rectangle(r) => {
            let rect = RoundedRect::new(r.x, r.y, r.x + r.w, r.y + r.h, RECT_CORNER_RADIUS) + offset;
            stroke_shape(image, &rect, width, stroke_color(shape));
        }
        Shape::Frame(f) => {
            stroke_shape(image, &(f.rect() + offset), width, stroke_color(shape));
        }
        Shape::Ellipse(e) => {
            let ellipse = Ellipse::new(e.center() + offset, e.radii(), 0.0);
            stroke_shape(image, &ellipse, width, stroke_color(shape));
        }
        Shape::Freehand(f) => {
            if f.points.len() > 1 {
                let points: Vec<Point> = f.points.iter().map(|p| *p + offset).collect();
                stroke_polyline(image, &points, width, stroke_color(shape));
            }
        }
        Shape::Line(l) => {
            stroke_polyline(image, &[l.start + offset, l.end + offset], width, stroke_color(shape));
        }
        Shape::Arrow(a) => {
            let color = stroke_color(shape);
            stroke_polyline(image, &[a.start + offset, a.end + offset], width, color);
            let [left, right] = a.head_points();
            fill_polygon(image, &[a.end + offset, left + offset, right + offset], color);
        }
        Shape::Text(t) => {
            let fill = SerializableColor::parse(&t.fill).unwrap_or_else(SerializableColor::white);
            draw_text(image, t, t.anchor() + offset, fill.into());
        }
        Shape::GeneratedUi(_) => {}
    }
}

/// Encode an image as an 8-bit RGBA PNG.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Render the frame `frame_id` and everything inside it to PNG bytes.
pub fn export_frame_png(document: &CanvasDocument, frame_id: &str) -> RenderResult<Vec<u8>> {
    let frame = match document.get_shape(frame_id) {
        Some(Shape::Frame(frame)) => frame,
        Some(_) => return Err(RenderError::NotAFrame(frame_id.to_string())),
        None => return Err(RenderError::MissingFrame(frame_id.to_string())),
    };
    let shapes = document.shapes_inside_frame(frame);
    let image = render_frame(frame, &shapes)?;
    let png_data = encode_png(&image)?;
    log::info!(
        "exported {} ({}x{}, {} shapes, {} bytes)",
        frame.label(),
        image.width(),
        image.height(),
        shapes.len(),
        png_data.len()
    );
    Ok(png_data)
}

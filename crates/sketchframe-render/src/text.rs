//! Bitmap text for frame exports.
//!
//! Glyphs come from an 8x8 font scaled to the requested size, laid out from
//! the top-left anchor. Font families are not distinguished.

use crate::raster::fill_rect;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::RgbaImage;
use kurbo::{Point, Rect};
use peniko::Color;
use sketchframe_core::shapes::{FontStyle, Text, TextDecoration};

const GLYPH_SIZE: f64 = 8.0;

/// Horizontal shear applied per glyph row for italics, as a fraction of the cell.
const ITALIC_SLANT: f64 = 0.2;

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}

/// Draw `text` with its anchor at `origin` in image coordinates.
pub(crate) fn draw_text(image: &mut RgbaImage, text: &Text, origin: Point, color: Color) {
    if text.font_size <= 0.0 || text.text.is_empty() {
        return;
    }
    let cell = text.font_size / GLYPH_SIZE;
    let advance = text.font_size + text.letter_spacing;
    let line_advance = text.font_size * text.line_height.max(0.0);
    let bold = text.font_weight.is_bold();
    let italic = text.font_style == FontStyle::Italic;

    for (line_index, line) in text.text.lines().enumerate() {
        let top = origin.y + line_index as f64 * line_advance;
        let mut x = origin.x;
        let mut chars = 0usize;
        for c in line.chars() {
            if let Some(rows) = glyph(c) {
                draw_glyph(image, rows, Point::new(x, top), cell, bold, italic, color);
            }
            x += advance;
            chars += 1;
        }
        if chars > 0 {
            let width = chars as f64 * advance - text.letter_spacing;
            draw_decoration(image, text, origin.x, top, width, color);
        }
    }
}

fn draw_glyph(
    image: &mut RgbaImage,
    rows: [u8; 8],
    top_left: Point,
    cell: f64,
    bold: bool,
    italic: bool,
    color: Color,
) {
    let extra = if bold { 1.0 } else { 0.0 };
    for (row, bits) in rows.iter().enumerate() {
        let slant = if italic {
            (GLYPH_SIZE - 1.0 - row as f64) * cell * ITALIC_SLANT
        } else {
            0.0
        };
        for col in 0..8 {
            if bits & (1 << col) == 0 {
                continue;
            }
            let x0 = top_left.x + col as f64 * cell + slant;
            let y0 = top_left.y + row as f64 * cell;
            fill_rect(image, Rect::new(x0, y0, x0 + cell + extra, y0 + cell), color);
        }
    }
}

fn draw_decoration(image: &mut RgbaImage, text: &Text, x: f64, top: f64, width: f64, color: Color) {
    let thickness = (text.font_size / 16.0).max(1.0);
    let y = match text.text_decoration {
        TextDecoration::None => return,
        TextDecoration::Underline => top + text.font_size + thickness,
        TextDecoration::LineThrough => top + text.font_size / 2.0 - thickness / 2.0,
    };
    fill_rect(image, Rect::new(x, y, x + width, y + thickness), color);
}

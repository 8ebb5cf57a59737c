//! Anti-aliased CPU drawing into an `image::RgbaImage`.
//!
//! Strokes are rendered from the distance between each pixel center and the
//! flattened path, which gives round caps and joins for free. Anything outside
//! the buffer is clipped.

use image::{Pixel, Rgba, RgbaImage};
use kurbo::{PathEl, Point, Rect};
use peniko::Color;
use sketchframe_core::geometry::distance_to_segment;

/// Curve flattening tolerance in pixels.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Supersampling grid for polygon fills (per axis).
const FILL_SAMPLES: u32 = 4;

/// Opaque fill of every pixel.
pub(crate) fn fill(image: &mut RgbaImage, color: Color) {
    let rgba = to_rgba(color);
    for px in image.pixels_mut() {
        *px = rgba;
    }
}

/// Source-over blend of `rgba` scaled by `coverage` (0..=1). Clipped.
fn blend(image: &mut RgbaImage, x: i64, y: i64, rgba: Rgba<u8>, coverage: f64) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = (rgba[3] as f64 * coverage.clamp(0.0, 1.0)).round() as u8;
    if alpha == 0 {
        return;
    }
    let src = Rgba([rgba[0], rgba[1], rgba[2], alpha]);
    image.get_pixel_mut(x as u32, y as u32).blend(&src);
}

/// Pixel index range covering `rect`, clipped to the image.
fn pixel_span(image: &RgbaImage, rect: Rect) -> Option<(i64, i64, i64, i64)> {
    let x0 = (rect.x0.floor() as i64).max(0);
    let y0 = (rect.y0.floor() as i64).max(0);
    let x1 = (rect.x1.ceil() as i64).min(image.width() as i64);
    let y1 = (rect.y1.ceil() as i64).min(image.height() as i64);
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Fill an axis-aligned rectangle with area coverage on fractional edges.
pub(crate) fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Color) {
    let rect = rect.abs();
    let Some((x0, y0, x1, y1)) = pixel_span(image, rect) else {
        return;
    };
    let rgba = to_rgba(color);
    for py in y0..y1 {
        let cov_y = (rect.y1.min(py as f64 + 1.0) - rect.y0.max(py as f64)).max(0.0);
        for px in x0..x1 {
            let cov_x = (rect.x1.min(px as f64 + 1.0) - rect.x0.max(px as f64)).max(0.0);
            blend(image, px, py, rgba, cov_x * cov_y);
        }
    }
}

/// Stroke the outline of any kurbo shape.
pub(crate) fn stroke_shape(image: &mut RgbaImage, shape: &impl kurbo::Shape, width: f64, color: Color) {
    let subpaths = flatten_subpaths(shape);
    stroke_subpaths(image, &subpaths, width, color);
}

/// Stroke an open polyline with round caps and joins.
pub(crate) fn stroke_polyline(image: &mut RgbaImage, points: &[Point], width: f64, color: Color) {
    stroke_subpaths(image, &[points.to_vec()], width, color);
}

fn stroke_subpaths(image: &mut RgbaImage, subpaths: &[Vec<Point>], width: f64, color: Color) {
    let half = (width / 2.0).max(0.5);
    let reach = half + 1.0;
    let Some(bounds) = subpaths
        .iter()
        .flatten()
        .map(|p| Rect::from_points(*p, *p))
        .reduce(|a, b| a.union(b))
    else {
        return;
    };
    let Some((x0, y0, x1, y1)) = pixel_span(image, bounds.inflate(reach, reach)) else {
        return;
    };

    // Max coverage per pixel so overlapping segments do not double-blend.
    let span_w = (x1 - x0) as usize;
    let mut coverage = vec![0.0f64; span_w * (y1 - y0) as usize];
    for path in subpaths {
        let segments: Vec<(Point, Point)> = match path.as_slice() {
            [] => continue,
            [single] => vec![(*single, *single)],
            _ => path.windows(2).map(|w| (w[0], w[1])).collect(),
        };
        for (a, b) in segments {
            let seg = Rect::from_points(a, b).inflate(reach, reach);
            let Some((sx0, sy0, sx1, sy1)) = pixel_span(image, seg) else {
                continue;
            };
            for py in sy0..sy1 {
                for px in sx0..sx1 {
                    let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                    let d = distance_to_segment(center, a, b);
                    let c = (half + 0.5 - d).clamp(0.0, 1.0);
                    let slot = &mut coverage[(py - y0) as usize * span_w + (px - x0) as usize];
                    if c > *slot {
                        *slot = c;
                    }
                }
            }
        }
    }

    let rgba = to_rgba(color);
    for (i, c) in coverage.into_iter().enumerate() {
        if c > 0.0 {
            let px = x0 + (i % span_w) as i64;
            let py = y0 + (i / span_w) as i64;
            blend(image, px, py, rgba, c);
        }
    }
}

/// Fill a closed polygon (even-odd rule) with supersampled edges.
pub(crate) fn fill_polygon(image: &mut RgbaImage, points: &[Point], color: Color) {
    if points.len() < 3 {
        return;
    }
    let Some(bounds) = points
        .iter()
        .map(|p| Rect::from_points(*p, *p))
        .reduce(|a, b| a.union(b))
    else {
        return;
    };
    let Some((x0, y0, x1, y1)) = pixel_span(image, bounds) else {
        return;
    };
    let rgba = to_rgba(color);
    let step = 1.0 / FILL_SAMPLES as f64;
    let total = (FILL_SAMPLES * FILL_SAMPLES) as f64;
    for py in y0..y1 {
        for px in x0..x1 {
            let mut inside = 0u32;
            for sy in 0..FILL_SAMPLES {
                for sx in 0..FILL_SAMPLES {
                    let sample = Point::new(
                        px as f64 + (sx as f64 + 0.5) * step,
                        py as f64 + (sy as f64 + 0.5) * step,
                    );
                    if polygon_contains(points, sample) {
                        inside += 1;
                    }
                }
            }
            if inside > 0 {
                blend(image, px, py, rgba, inside as f64 / total);
            }
        }
    }
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let c = color.to_rgba8();
    Rgba([c.r, c.g, c.b, c.a])
}

fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Flatten a shape outline into polylines, one per subpath.
fn flatten_subpaths(shape: &impl kurbo::Shape) -> Vec<Vec<Point>> {
    let mut subpaths: Vec<Vec<Point>> = Vec::new();
    kurbo::flatten(shape.path_elements(FLATTEN_TOLERANCE), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => subpaths.push(vec![p]),
        PathEl::LineTo(p) => {
            if let Some(path) = subpaths.last_mut() {
                path.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(path) = subpaths.last_mut() {
                if let Some(&first) = path.first() {
                    path.push(first);
                }
            }
        }
        _ => {}
    });
    subpaths
}

//! Geometry helpers shared by hit-testing, resizing and frame containment.

use kurbo::{Point, Rect, Vec2};

/// Distance from `point` to the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment so points beyond an
/// endpoint measure against that endpoint. A zero-length segment degrades to
/// the distance to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab: Vec2 = b - a;
    let ap: Vec2 = point - a;
    let len_sq = ab.hypot2();

    if len_sq < f64::EPSILON {
        return ap.hypot();
    }

    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    let projection = a + ab * t;
    (point - projection).hypot()
}

/// Minimum distance from `point` to a polyline through `points`.
///
/// Returns `f64::INFINITY` for an empty polyline.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Inclusive point-in-rectangle test (edges count as inside).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Rectangle from a top-left origin and a size.
pub fn rect_from_origin(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

/// Normalized rectangle spanned by two arbitrary corners.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Tight axis-aligned bounds of a point set.
pub fn tight_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut rect = Rect::from_points(*first, *first);
    for p in rest {
        rect = rect.union_pt(*p);
    }
    Some(rect)
}

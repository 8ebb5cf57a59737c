//! Viewport module for pan/zoom transforms.

use crate::scheduler::FrameCoalescer;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Scale floor applied if a caller manages to push the scale to zero.
const MIN_SAFE_SCALE: f64 = 1e-6;

/// Default scale bounds.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Map a screen point to world space: `(screen - translate) / scale`.
pub fn screen_to_world(screen: Point, translate: Vec2, scale: f64) -> Point {
    debug_assert!(scale > 0.0, "viewport scale must be positive, got {scale}");
    let scale = scale.max(MIN_SAFE_SCALE);
    Point::new(
        (screen.x - translate.x) / scale,
        (screen.y - translate.y) / scale,
    )
}

/// Map a world point to screen space: `world * scale + translate`.
pub fn world_to_screen(world: Point, translate: Vec2, scale: f64) -> Point {
    Point::new(world.x * scale + translate.x, world.y * scale + translate.y)
}

/// Which kind of pan, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanMode {
    #[default]
    Idle,
    /// Middle/right button drag.
    Panning,
    /// Left drag while the hand-tool modifier is held.
    ShiftPanning,
}

/// Pan/zoom state of the canvas.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// World-to-screen scale.
    pub scale: f64,
    /// Screen-space offset of the world origin.
    pub translate: Vec2,
    pub min_scale: f64,
    pub max_scale: f64,
    mode: PanMode,
    /// Screen point the last applied pan delta was measured from.
    last_pan_point: Option<Point>,
    pending_pan: FrameCoalescer<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_bounds(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport at scale 1 with the given bounds.
    pub fn with_bounds(min_scale: f64, max_scale: f64) -> Self {
        let min_scale = min_scale.max(MIN_SAFE_SCALE);
        let max_scale = max_scale.max(min_scale);
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            translate: Vec2::ZERO,
            min_scale,
            max_scale,
            mode: PanMode::Idle,
            last_pan_point: None,
            pending_pan: FrameCoalescer::new(),
        }
    }

    /// World-to-screen affine.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.translate, self.scale)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.translate, self.scale)
    }

    pub fn mode(&self) -> PanMode {
        self.mode
    }

    pub fn is_panning(&self) -> bool {
        self.mode != PanMode::Idle
    }

    /// Begin a pan. Only legal from idle; returns false otherwise.
    pub fn pan_start(&mut self, screen: Point, mode: PanMode) -> bool {
        if self.mode != PanMode::Idle || mode == PanMode::Idle {
            return false;
        }
        log::debug!("pan start {:?} at ({:.1}, {:.1})", mode, screen.x, screen.y);
        self.mode = mode;
        self.last_pan_point = Some(screen);
        self.pending_pan.cancel();
        true
    }

    /// Apply a pan move immediately.
    pub fn pan_move(&mut self, screen: Point) {
        if self.mode == PanMode::Idle {
            return;
        }
        if let Some(last) = self.last_pan_point {
            self.translate += screen - last;
        }
        self.last_pan_point = Some(screen);
    }

    /// Queue a pan move; the latest one is applied on the next [`Self::flush_pan`].
    pub fn schedule_pan_move(&mut self, screen: Point) -> bool {
        if self.mode == PanMode::Idle {
            return false;
        }
        self.pending_pan.schedule(screen)
    }

    /// Apply the queued pan move, if any. Returns true if the translate changed.
    pub fn flush_pan(&mut self) -> bool {
        match self.pending_pan.flush() {
            Some(point) => {
                let before = self.translate;
                self.pan_move(point);
                self.translate != before
            }
            None => false,
        }
    }

    pub fn has_pending_pan(&self) -> bool {
        self.pending_pan.is_scheduled()
    }

    /// End the pan. A queued move is applied first so the release position sticks.
    pub fn pan_end(&mut self) {
        if self.mode == PanMode::Idle {
            return;
        }
        self.flush_pan();
        log::debug!("pan end, translate ({:.1}, {:.1})", self.translate.x, self.translate.y);
        self.mode = PanMode::Idle;
        self.last_pan_point = None;
    }

    /// Drop any in-flight pan without applying queued moves.
    pub fn cancel_pan(&mut self) {
        self.pending_pan.cancel();
        self.mode = PanMode::Idle;
        self.last_pan_point = None;
    }

    /// Zoom by `factor`, keeping the world point under `origin` fixed on screen.
    pub fn zoom_at(&mut self, origin: Point, factor: f64) {
        // Overflowed or underflowed factors saturate at the scale limits.
        let new_scale = if factor.is_nan() {
            return;
        } else if factor <= 0.0 {
            self.min_scale
        } else {
            (self.scale * factor).clamp(self.min_scale, self.max_scale)
        };
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_world(origin);
        self.scale = new_scale;
        self.translate = Vec2::new(
            origin.x - anchor.x * new_scale,
            origin.y - anchor.y * new_scale,
        );
    }

    /// Wheel zoom: `factor = exp(-delta_y * sensitivity)`, anchored at `origin`.
    pub fn wheel_zoom(&mut self, delta_y: f64, origin: Point, sensitivity: f64) {
        self.zoom_at(origin, (-delta_y * sensitivity).exp());
    }

    /// Translate without changing scale.
    pub fn wheel_pan(&mut self, dx: f64, dy: f64) {
        self.translate += Vec2::new(dx, dy);
    }

    /// Set the scale directly, clamped, without re-anchoring.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.set_scale(self.scale * step);
    }

    pub fn zoom_out(&mut self, step: f64) {
        self.set_scale(self.scale / step);
    }

    /// Back to scale 1 at the origin.
    pub fn reset(&mut self) {
        self.cancel_pan();
        self.translate = Vec2::ZERO;
        self.set_scale(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.translate, Vec2::ZERO);
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.mode(), PanMode::Idle);
    }

    #[test]
    fn test_inverse_transform_roundtrip() {
        let cases = [
            (Point::new(123.0, 456.0), Vec2::new(30.0, -20.0), 1.5),
            (Point::new(-10.0, 0.5), Vec2::new(0.0, 0.0), 0.1),
            (Point::new(800.0, 600.0), Vec2::new(-350.25, 12.5), 5.0),
        ];
        for (screen, translate, scale) in cases {
            let world = screen_to_world(screen, translate, scale);
            assert_point_eq(world_to_screen(world, translate, scale), screen);
        }
    }

    #[test]
    fn test_affine_matches_formula() {
        let mut viewport = Viewport::new();
        viewport.translate = Vec2::new(40.0, 10.0);
        viewport.scale = 2.0;
        let world = Point::new(3.0, 4.0);
        assert_point_eq(viewport.transform() * world, viewport.world_to_screen(world));
    }

    #[test]
    fn test_zoom_anchoring() {
        let mut viewport = Viewport::new();
        viewport.translate = Vec2::new(25.0, -40.0);
        let origin = Point::new(300.0, 200.0);
        let before = viewport.screen_to_world(origin);

        viewport.wheel_zoom(-120.0, origin, 0.0015);
        assert!(viewport.scale > 1.0);
        assert_point_eq(viewport.screen_to_world(origin), before);

        viewport.wheel_zoom(300.0, origin, 0.0015);
        assert_point_eq(viewport.screen_to_world(origin), before);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.zoom_at(Point::ZERO, 0.0001);
        assert!((viewport.scale - viewport.min_scale).abs() < f64::EPSILON);
        viewport.zoom_at(Point::ZERO, 1e6);
        assert!((viewport.scale - viewport.max_scale).abs() < f64::EPSILON);
        viewport.zoom_at(Point::ZERO, f64::NAN);
        assert!((viewport.scale - viewport.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extreme_wheel_delta_saturates() {
        let mut viewport = Viewport::new();
        let origin = Point::new(120.0, 80.0);
        let before = viewport.screen_to_world(origin);

        // exp() overflows to infinity here.
        viewport.wheel_zoom(-1e6, origin, 0.0015);
        assert!((viewport.scale - viewport.max_scale).abs() < f64::EPSILON);
        assert_point_eq(viewport.screen_to_world(origin), before);

        // And underflows to zero here.
        viewport.wheel_zoom(1e6, origin, 0.0015);
        assert!((viewport.scale - viewport.min_scale).abs() < f64::EPSILON);
        assert_point_eq(viewport.screen_to_world(origin), before);
    }

    #[test]
    fn test_pan_requires_idle() {
        let mut viewport = Viewport::new();
        assert!(viewport.pan_start(Point::ZERO, PanMode::Panning));
        assert!(!viewport.pan_start(Point::ZERO, PanMode::ShiftPanning));
        assert_eq!(viewport.mode(), PanMode::Panning);
        viewport.pan_end();
        assert_eq!(viewport.mode(), PanMode::Idle);
    }

    #[test]
    fn test_pan_moves_are_coalesced() {
        let mut viewport = Viewport::new();
        viewport.pan_start(Point::new(10.0, 10.0), PanMode::Panning);
        assert!(viewport.schedule_pan_move(Point::new(15.0, 10.0)));
        assert!(!viewport.schedule_pan_move(Point::new(20.0, 12.0)));
        assert!(!viewport.schedule_pan_move(Point::new(30.0, 20.0)));
        assert_eq!(viewport.translate, Vec2::ZERO);

        assert!(viewport.flush_pan());
        assert_eq!(viewport.translate, Vec2::new(20.0, 10.0));
        assert!(!viewport.flush_pan());
    }

    #[test]
    fn test_pan_end_applies_pending_move() {
        let mut viewport = Viewport::new();
        viewport.pan_start(Point::ZERO, PanMode::ShiftPanning);
        viewport.schedule_pan_move(Point::new(-5.0, 7.0));
        viewport.pan_end();
        assert_eq!(viewport.translate, Vec2::new(-5.0, 7.0));
        assert!(!viewport.has_pending_pan());
    }

    #[test]
    fn test_moves_without_pan_are_ignored() {
        let mut viewport = Viewport::new();
        assert!(!viewport.schedule_pan_move(Point::new(5.0, 5.0)));
        viewport.pan_move(Point::new(5.0, 5.0));
        assert_eq!(viewport.translate, Vec2::ZERO);
    }

    #[test]
    fn test_wheel_pan_and_buttons() {
        let mut viewport = Viewport::new();
        viewport.wheel_pan(-3.0, 4.0);
        assert_eq!(viewport.translate, Vec2::new(-3.0, 4.0));

        viewport.zoom_in(1.2);
        assert!((viewport.scale - 1.2).abs() < EPS);
        viewport.zoom_out(1.2);
        assert!((viewport.scale - 1.0).abs() < EPS);
        assert_eq!(viewport.translate, Vec2::new(-3.0, 4.0));

        viewport.reset();
        assert_eq!(viewport.translate, Vec2::ZERO);
    }
}

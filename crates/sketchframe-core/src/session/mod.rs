//! Editor session: the owned, injectable state of one canvas.
//!
//! All mutation goes through [`EditorSession`]. Hosts feed it pointer, wheel,
//! keyboard and resize input, call [`EditorSession::tick`] once per rendered
//! frame, and redraw when [`EditorSession::take_redraw`] says so.

mod generated;
mod gesture;
mod pointer;
mod resize;

pub use gesture::{
    Draft, DraftShape, EraseGesture, Gesture, InteractionState, MoveGesture, ResizeGesture,
};

use crate::config::EditorConfig;
use crate::document::CanvasDocument;
use crate::input::{KeyEvent, PointerEvent, WheelInput};
use crate::resize::ResizeCommand;
use crate::scheduler::{Duration, Instant, RedrawThrottle};
use crate::shapes::{Frame, Shape, ShapeId, ShapePatch};
use crate::storage::{ProjectSnapshot, ShapesData, ViewportData};
use crate::tools::Tool;
use crate::viewport::Viewport;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One input for the session, as recorded by a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    Pointer(PointerEvent),
    Wheel(WheelInput),
    Key(KeyEvent),
    Resize(ResizeCommand),
    SetTool { tool: Tool },
    /// Animation-frame callback. `elapsedMs` advances the session clock.
    #[serde(rename_all = "camelCase")]
    Tick { elapsed_ms: u64 },
}

/// Interaction state for one canvas.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    document: CanvasDocument,
    viewport: Viewport,
    tool: Tool,
    selection: HashSet<ShapeId>,
    gesture: Gesture,
    hand_tool: bool,
    frame_counter: u32,
    freehand_throttle: RedrawThrottle,
    needs_redraw: bool,
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let viewport = Viewport::with_bounds(config.min_scale, config.max_scale);
        let freehand_throttle =
            RedrawThrottle::new(Duration::from_millis(config.freehand_redraw_interval_ms));
        Self {
            config,
            document: CanvasDocument::new(),
            viewport,
            tool: Tool::default(),
            selection: HashSet::new(),
            gesture: Gesture::None,
            hand_tool: false,
            frame_counter: 0,
            freehand_throttle,
            needs_redraw: true,
            revision: 0,
        }
    }

    /// Create a session seeded from persisted state.
    pub fn from_snapshot(config: EditorConfig, snapshot: ProjectSnapshot) -> Self {
        let mut session = Self::new(config);
        session.load_snapshot(snapshot);
        session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("tool {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
            self.mark_changed();
        }
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Bumped on every change to persisted state (shapes, tool, selection, viewport).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Return and clear the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub(crate) fn mark_changed(&mut self) {
        self.revision += 1;
        self.needs_redraw = true;
    }

    // Selection

    pub fn selection(&self) -> &HashSet<ShapeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Add a shape to the selection. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        if self.selection.insert(id.to_string()) {
            self.mark_changed();
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.mark_changed();
        }
    }

    // Shapes

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.document.get_shape(id)
    }

    /// Insert a fully built shape on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.document.add_shape(shape);
        self.mark_changed();
        id
    }

    /// Remove a shape, dropping it from the selection too.
    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        let removed = self.document.remove_shape(id)?;
        self.selection.remove(id);
        self.mark_changed();
        Some(removed)
    }

    pub fn remove_shapes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter()
            .filter(|id| self.remove_shape(id).is_some())
            .count()
    }

    /// Apply a partial update. Missing ids are a no-op.
    pub fn update_shape(&mut self, id: &str, patch: &ShapePatch) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => {
                shape.apply_patch(patch);
                self.mark_changed();
                true
            }
            None => false,
        }
    }

    pub(crate) fn next_frame_number(&mut self) -> u32 {
        self.frame_counter += 1;
        self.frame_counter
    }

    /// Shapes a frame would export, excluding the frame itself.
    pub fn shapes_inside_frame(&self, frame_id: &str) -> Vec<&Shape> {
        match self.document.frame(frame_id) {
            Some(frame) => self.document.shapes_inside_frame(frame),
            None => Vec::new(),
        }
    }

    pub fn frame(&self, frame_id: &str) -> Option<&Frame> {
        self.document.frame(frame_id)
    }

    // Gesture state

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn interaction_state(&self) -> InteractionState {
        InteractionState::from_parts(self.viewport.mode(), &self.gesture)
    }

    /// The draft being dragged out, for preview rendering.
    pub fn draft_shape(&self) -> Option<&DraftShape> {
        match &self.gesture {
            Gesture::Drawing(Draft::Shape(draft)) => Some(draft),
            _ => None,
        }
    }

    /// Points of the freehand stroke in progress.
    pub fn freehand_points(&self) -> &[Point] {
        match &self.gesture {
            Gesture::Drawing(Draft::Freehand(points)) => points,
            _ => &[],
        }
    }

    pub fn hand_tool_enabled(&self) -> bool {
        self.hand_tool
    }

    pub fn set_hand_tool(&mut self, enabled: bool) {
        self.hand_tool = enabled;
    }

    // Viewport

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(self.config.button_zoom_step);
        self.mark_changed();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(self.config.button_zoom_step);
        self.mark_changed();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.mark_changed();
    }

    // Scheduling

    /// Animation-frame callback using the current time.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Animation-frame callback. Applies the coalesced pan move and runs the
    /// freehand redraw throttle. Returns true when a redraw is due.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let mut redraw = false;
        if self.viewport.flush_pan() {
            self.revision += 1;
            redraw = true;
        }
        let drawing_freehand = !self.freehand_points().is_empty();
        if drawing_freehand && self.freehand_throttle.poll(now) {
            redraw = true;
        }
        if redraw {
            self.needs_redraw = true;
        }
        redraw
    }

    /// Stop all scheduled work and drop any in-progress gesture.
    ///
    /// Drafts are discarded, not committed.
    pub fn teardown(&mut self) {
        self.viewport.cancel_pan();
        self.freehand_throttle.stop();
        if !self.gesture.is_none() {
            log::debug!("teardown dropped {:?}", self.interaction_state());
        }
        self.gesture = Gesture::None;
        self.hand_tool = false;
    }

    /// Dispatch one recorded event. `clock` is advanced by tick events.
    pub fn handle_event(&mut self, event: SessionEvent, clock: &mut Instant) {
        match event {
            SessionEvent::Pointer(pointer) => self.handle_pointer(pointer),
            SessionEvent::Wheel(wheel) => self.on_wheel(wheel),
            SessionEvent::Key(key) => self.handle_key(&key),
            SessionEvent::Resize(command) => {
                self.apply_resize_command(command);
            }
            SessionEvent::SetTool { tool } => self.set_tool(tool),
            SessionEvent::Tick { elapsed_ms } => {
                *clock += Duration::from_millis(elapsed_ms);
                self.tick_at(*clock);
            }
        }
    }

    // Persistence

    /// Plain-data copy of the persisted state.
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            shapes_data: ShapesData {
                shapes: self.document.clone(),
                tool: self.tool,
                selected: self.selection.iter().map(|id| (id.clone(), true)).collect(),
                frame_counter: self.frame_counter,
            },
            viewport_data: ViewportData {
                scale: self.viewport.scale,
                translate: self.viewport.translate,
            },
        }
    }

    /// Replace the session state with a persisted snapshot.
    ///
    /// Any gesture in progress is dropped. Selected ids that do not exist are
    /// ignored and the scale is clamped to the configured bounds.
    pub fn load_snapshot(&mut self, snapshot: ProjectSnapshot) {
        self.teardown();
        let ProjectSnapshot {
            shapes_data,
            viewport_data,
        } = snapshot;

        self.document = shapes_data.shapes;
        self.document.normalize();
        self.tool = shapes_data.tool;
        self.selection = shapes_data
            .selected
            .into_iter()
            .filter(|(id, selected)| *selected && self.document.contains(id))
            .map(|(id, _)| id)
            .collect();

        let highest_frame = self.document.frames().map(|f| f.frame_number).max().unwrap_or(0);
        self.frame_counter = shapes_data.frame_counter.max(highest_frame);

        self.viewport.set_scale(if viewport_data.scale > 0.0 { viewport_data.scale } else { 1.0 });
        self.viewport.translate = viewport_data.translate;

        log::info!(
            "loaded {} shapes, {} selected, scale {:.2}",
            self.document.len(),
            self.selection.len(),
            self.viewport.scale
        );
        self.mark_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Frame, Rectangle, Text};
    use kurbo::Vec2;

    #[test]
    fn test_remove_prunes_selection() {
        let mut session = EditorSession::default();
        let id = session.add_shape(Shape::Rectangle(Rectangle::new(0.0, 0.0, 10.0, 10.0)));
        assert!(session.select(&id));
        assert!(session.remove_shape(&id).is_some());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_remove_shapes_batch() {
        let mut session = EditorSession::default();
        let ids: Vec<ShapeId> = (0..4)
            .map(|i| {
                let x = i as f64 * 20.0;
                session.add_shape(Shape::Rectangle(Rectangle::new(x, 0.0, 10.0, 10.0)))
            })
            .collect();
        session.select(&ids[1]);
        session.select(&ids[3]);
        let revision = session.revision();

        let removed = session.remove_shapes([ids[1].as_str(), "ghost", ids[2].as_str()]);
        assert_eq!(removed, 2);
        assert_eq!(session.document().ids(), &[ids[0].clone(), ids[3].clone()]);
        assert!(!session.is_selected(&ids[1]));
        assert!(session.is_selected(&ids[3]));
        assert_eq!(session.selection().len(), 1);
        assert!(session.revision() > revision);

        let revision = session.revision();
        assert_eq!(session.remove_shapes(["ghost"]), 0);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut session = EditorSession::default();
        assert!(!session.select("nope"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_update_shape() {
        let mut session = EditorSession::default();
        let id = session.add_shape(Shape::Text(Text::new(Point::ZERO)));
        let revision = session.revision();
        let patch = ShapePatch {
            text: Some("hello".into()),
            font_size: Some(24.0),
            ..Default::default()
        };
        assert!(session.update_shape(&id, &patch));
        assert!(session.revision() > revision);
        match session.shape(&id) {
            Some(Shape::Text(t)) => {
                assert_eq!(t.text, "hello");
                assert!((t.font_size - 24.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!session.update_shape("missing", &patch));
    }

    #[test]
    fn test_snapshot_roundtrip_restores_state() {
        let mut session = EditorSession::default();
        let frame_number = session.next_frame_number();
        let frame_id = session.add_shape(Shape::Frame(Frame::new(0.0, 0.0, 100.0, 100.0, frame_number)));
        let rect_id = session.add_shape(Shape::Rectangle(Rectangle::new(10.0, 10.0, 5.0, 5.0)));
        session.select(&rect_id);
        session.set_tool(Tool::Ellipse);
        session.viewport.scale = 2.0;
        session.viewport.translate = Vec2::new(12.0, -3.0);

        let json = session.snapshot().to_json().unwrap();
        let restored = EditorSession::from_snapshot(
            EditorConfig::default(),
            ProjectSnapshot::from_json(&json).unwrap(),
        );

        assert_eq!(restored.document().ids(), &[frame_id, rect_id.clone()]);
        assert!(restored.is_selected(&rect_id));
        assert_eq!(restored.tool(), Tool::Ellipse);
        assert_eq!(restored.frame_counter(), 1);
        assert!((restored.viewport().scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(restored.viewport().translate, Vec2::new(12.0, -3.0));
    }

    #[test]
    fn test_load_drops_stale_selection_and_clamps_scale() {
        let mut snapshot = ProjectSnapshot::default();
        snapshot.shapes_data.selected.insert("ghost".into(), true);
        snapshot.viewport_data.scale = 100.0;
        let session = EditorSession::from_snapshot(EditorConfig::default(), snapshot);
        assert!(session.selection().is_empty());
        assert!((session.viewport().scale - session.config().max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_frame_counter_never_reuses_numbers() {
        let mut snapshot = ProjectSnapshot::default();
        snapshot
            .shapes_data
            .shapes
            .add_shape(Shape::Frame(Frame::new(0.0, 0.0, 10.0, 10.0, 7)));
        snapshot.shapes_data.frame_counter = 2;
        let session = EditorSession::from_snapshot(EditorConfig::default(), snapshot);
        assert_eq!(session.frame_counter(), 7);
    }

    #[test]
    fn test_take_redraw_clears_flag() {
        let mut session = EditorSession::default();
        assert!(session.take_redraw());
        assert!(!session.take_redraw());
        session.set_tool(Tool::Rect);
        assert!(session.take_redraw());
    }
}

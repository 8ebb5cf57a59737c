//! Corner-handle resizing driven by the selection overlay.

use super::EditorSession;
use super::gesture::{Gesture, ResizeGesture};
use crate::resize::{ResizeCommand, ResizeCorner, resize_bounds};
use kurbo::{Point, Rect};

impl EditorSession {
    /// Start resizing `shape_id` from `corner`. `bounds` is the box the
    /// overlay displayed when the handle was grabbed.
    pub fn begin_resize(&mut self, shape_id: &str, corner: ResizeCorner, bounds: Rect) -> bool {
        if !self.gesture.is_none() || self.viewport.is_panning() {
            return false;
        }
        if !self.document.contains(shape_id) {
            log::warn!("resize requested for missing shape {shape_id}");
            return false;
        }
        self.gesture = Gesture::Resizing(ResizeGesture {
            shape_id: shape_id.to_string(),
            corner,
            initial: bounds,
        });
        true
    }

    /// Move the grabbed handle to `screen`. The opposite corner stays put.
    pub fn update_resize(&mut self, screen: Point) -> bool {
        let Gesture::Resizing(resize) = &self.gesture else {
            return false;
        };
        let world = self.viewport.screen_to_world(screen);
        let target = resize_bounds(
            resize.initial,
            resize.corner,
            world,
            self.config.min_resize_size,
        );
        let min_size = self.config.min_resize_size;
        match self.document.get_shape_mut(&resize.shape_id) {
            Some(shape) => {
                shape.resize_to(target, min_size);
                self.mark_changed();
                true
            }
            None => false,
        }
    }

    pub fn end_resize(&mut self) {
        if let Gesture::Resizing(resize) = std::mem::take(&mut self.gesture) {
            log::debug!("resized {}", resize.shape_id);
        }
    }

    pub fn apply_resize_command(&mut self, command: ResizeCommand) -> bool {
        match command {
            ResizeCommand::Begin {
                shape_id,
                corner,
                bounds,
            } => {
                let bounds = match bounds.or_else(|| self.document.get_shape(&shape_id).map(|s| s.bounds())) {
                    Some(bounds) => bounds,
                    None => return false,
                };
                self.begin_resize(&shape_id, corner, bounds)
            }
            ResizeCommand::Update { position } => self.update_resize(position),
            ResizeCommand::End => {
                let active = matches!(self.gesture, Gesture::Resizing(_));
                self.end_resize();
                active
            }
        }
    }
}

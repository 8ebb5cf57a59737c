//! Pointer, wheel and keyboard handling.

use super::EditorSession;
use super::gesture::{Draft, DraftShape, EraseGesture, Gesture, MoveGesture};
use crate::input::{KeyEvent, MouseButton, PointerDown, PointerEvent, WheelInput};
use crate::shapes::{Freehand, Shape, Text};
use crate::tools::Tool;
use crate::viewport::PanMode;
use kurbo::Point;

impl EditorSession {
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(down) => {
                self.pointer_down(down);
            }
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Start a gesture. Returns false when the press is left to the UI layer
    /// (interactive target) or a gesture is already running.
    pub fn pointer_down(&mut self, down: PointerDown) -> bool {
        if down.interactive_target {
            return false;
        }
        if self.viewport.is_panning() || !self.gesture.is_none() {
            log::debug!("pointer down ignored during {:?}", self.interaction_state());
            return false;
        }

        let wants_pan = matches!(down.button, MouseButton::Middle | MouseButton::Right)
            || (self.hand_tool && down.button == MouseButton::Left);
        if wants_pan {
            let mode = if self.hand_tool {
                PanMode::ShiftPanning
            } else {
                PanMode::Panning
            };
            return self.viewport.pan_start(down.position, mode);
        }
        if down.button != MouseButton::Left {
            return false;
        }

        let world = self.viewport.screen_to_world(down.position);
        let additive = down.modifiers.shift;
        let tolerance = self.config.hit_tolerance;

        match self.tool {
            Tool::Select => {
                let hit = self
                    .document
                    .shape_at(world, tolerance)
                    .map(|shape| shape.id().to_string());
                match hit {
                    Some(id) => {
                        if !self.selection.contains(&id) && !additive {
                            self.selection.clear();
                        }
                        let selection_changed = self.selection.insert(id);
                        let originals = self
                            .document
                            .shapes_ordered()
                            .filter(|shape| self.selection.contains(shape.id()))
                            .cloned()
                            .collect();
                        self.gesture = Gesture::Moving(MoveGesture {
                            start: world,
                            originals,
                        });
                        if selection_changed {
                            self.mark_changed();
                        }
                    }
                    None => {
                        if !additive {
                            self.clear_selection();
                        }
                    }
                }
            }
            Tool::Eraser => {
                let mut erase = EraseGesture::default();
                self.erase_at(world, &mut erase);
                self.gesture = Gesture::Erasing(erase);
            }
            Tool::Text => {
                let text = Text::new(world);
                let id = self.add_shape(Shape::Text(text));
                log::debug!("text {id} placed at ({:.1}, {:.1})", world.x, world.y);
                self.selection.clear();
                self.selection.insert(id);
                self.set_tool(Tool::Select);
            }
            Tool::Freedraw => {
                self.gesture = Gesture::Drawing(Draft::Freehand(vec![world]));
                self.freehand_throttle.start();
            }
            tool => {
                if let Some(kind) = tool.draft_kind() {
                    self.gesture = Gesture::Drawing(Draft::Shape(DraftShape::new(kind, world)));
                    self.needs_redraw = true;
                }
            }
        }
        true
    }

    /// Continue the active gesture. Moves without one are ignored.
    pub fn pointer_move(&mut self, screen: Point) {
        if self.viewport.is_panning() {
            self.viewport.schedule_pan_move(screen);
            return;
        }
        let world = self.viewport.screen_to_world(screen);

        match std::mem::take(&mut self.gesture) {
            Gesture::None => {}
            Gesture::Moving(moving) => {
                let delta = world - moving.start;
                for original in &moving.originals {
                    if let Some(slot) = self.document.get_shape_mut(original.id()) {
                        *slot = original.translated(delta);
                    }
                }
                self.gesture = Gesture::Moving(moving);
                self.mark_changed();
            }
            Gesture::Erasing(mut erase) => {
                self.erase_at(world, &mut erase);
                self.gesture = Gesture::Erasing(erase);
            }
            Gesture::Drawing(Draft::Shape(mut draft)) => {
                draft.current = world;
                self.gesture = Gesture::Drawing(Draft::Shape(draft));
                self.needs_redraw = true;
            }
            // Redraws for freehand come from the throttle in `tick`.
            Gesture::Drawing(Draft::Freehand(mut points)) => {
                points.push(world);
                self.gesture = Gesture::Drawing(Draft::Freehand(points));
            }
            Gesture::Resizing(resize) => {
                self.gesture = Gesture::Resizing(resize);
                self.update_resize(screen);
            }
        }
    }

    fn is_hand_tool_key(&self, key: &str) -> bool {
        key == self.config.hand_tool_key || (self.config.hand_tool_key == "Space" && key == " ")
    }

    /// Finish the active gesture: commit or discard drafts, end pans.
    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// Identical to a release.
    pub fn pointer_cancel(&mut self) {
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        if self.viewport.is_panning() {
            let before = self.viewport.translate;
            self.viewport.pan_end();
            if self.viewport.translate != before {
                self.mark_changed();
            }
        }

        match std::mem::take(&mut self.gesture) {
            Gesture::None => {}
            Gesture::Moving(moving) => {
                log::debug!("moved {} shapes", moving.originals.len());
            }
            Gesture::Erasing(erase) => {
                log::debug!("erase gesture removed {} shapes", erase.erased.len());
            }
            Gesture::Drawing(Draft::Shape(draft)) => {
                let frame_number = self.frame_counter + 1;
                match draft.commit(self.config.min_draft_size, frame_number) {
                    Some(shape) => {
                        if matches!(shape, Shape::Frame(_)) {
                            self.next_frame_number();
                        }
                        log::debug!("committed {}", shape.kind().as_str());
                        self.add_shape(shape);
                    }
                    None => log::debug!("discarded {:?} draft below minimum size", draft.kind),
                }
                self.needs_redraw = true;
            }
            Gesture::Drawing(Draft::Freehand(points)) => {
                self.freehand_throttle.stop();
                if points.len() > 1 {
                    log::debug!("committed freedraw with {} points", points.len());
                    self.add_shape(Shape::Freehand(Freehand::new(points)));
                } else {
                    log::debug!("discarded single-point freedraw");
                }
                self.needs_redraw = true;
            }
            Gesture::Resizing(resize) => {
                log::debug!("resize of {} ended", resize.shape_id);
            }
        }
    }

    /// Delete the topmost shape under `world` unless this gesture already erased it.
    fn erase_at(&mut self, world: Point, erase: &mut EraseGesture) {
        let hit = self
            .document
            .shape_at(world, self.config.hit_tolerance)
            .map(|shape| shape.id().to_string());
        if let Some(id) = hit {
            if erase.erased.insert(id.clone()) {
                log::debug!("erased {id}");
                self.remove_shape(&id);
            }
        }
    }

    /// Wheel input: zoom with Ctrl/Cmd held, otherwise pan. Shift maps vertical
    /// scrolling to horizontal.
    pub fn on_wheel(&mut self, input: WheelInput) {
        if input.modifiers.zoom_modifier() {
            self.viewport.wheel_zoom(
                input.delta.y,
                input.position,
                self.config.wheel_zoom_sensitivity,
            );
        } else {
            let (dx, dy) = if input.modifiers.shift {
                (input.delta.y, 0.0)
            } else {
                (input.delta.x, input.delta.y)
            };
            self.viewport.wheel_pan(-dx, -dy);
        }
        self.mark_changed();
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed { key, repeat } => {
                if self.is_hand_tool_key(key) {
                    if !repeat {
                        self.set_hand_tool(true);
                    }
                } else if self.gesture.is_none() && !self.viewport.is_panning() {
                    if let Some(tool) = Tool::from_shortcut(key) {
                        self.set_tool(tool);
                    }
                }
            }
            KeyEvent::Released { key } => {
                if self.is_hand_tool_key(key) {
                    self.set_hand_tool(false);
                }
            }
        }
    }
}

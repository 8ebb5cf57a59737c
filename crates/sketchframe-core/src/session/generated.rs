//! Generated UI placement and markup ingestion.

use super::EditorSession;
use crate::shapes::{GeneratedUi, Shape, ShapeId};

impl EditorSession {
    /// Place an empty generated UI shape to the right of a frame.
    pub fn begin_generated_ui(&mut self, frame_id: &str) -> Option<ShapeId> {
        let placement = &self.config.generated_ui;
        let frame = self.document.frame(frame_id)?;
        let shape = GeneratedUi::new(
            frame.x + frame.w + placement.gap,
            frame.y,
            frame.w.max(placement.min_width),
            frame.h.max(placement.min_height),
            frame.id.clone(),
        );
        log::debug!("generated ui {} placed for {}", shape.id, frame_id);
        Some(self.add_shape(Shape::GeneratedUi(shape)))
    }

    fn generated_mut(&mut self, id: &str) -> Option<&mut GeneratedUi> {
        match self.document.get_shape_mut(id) {
            Some(Shape::GeneratedUi(ui)) => Some(ui),
            _ => None,
        }
    }

    /// Append a streamed markup chunk.
    pub fn append_generated_markup(&mut self, id: &str, chunk: &str) -> bool {
        let Some(ui) = self.generated_mut(id) else {
            return false;
        };
        ui.append_markup(chunk);
        self.mark_changed();
        true
    }

    /// Replace the markup wholesale.
    pub fn set_generated_markup(&mut self, id: &str, markup: Option<String>) -> bool {
        let Some(ui) = self.generated_mut(id) else {
            return false;
        };
        ui.ui_spec_data = markup;
        self.mark_changed();
        true
    }

    /// Adopt the rendered content height once it settles. Small changes are
    /// ignored so layout jitter does not churn the document.
    pub fn apply_measured_height(&mut self, id: &str, measured: f64) -> bool {
        let threshold = self.config.generated_ui.height_threshold;
        let Some(ui) = self.generated_mut(id) else {
            return false;
        };
        if !(measured > 0.0) || (measured - ui.h).abs() <= threshold {
            return false;
        }
        ui.h = measured;
        self.mark_changed();
        true
    }

    /// Lay out a row of workflow pages to the right of `source_id`.
    ///
    /// The source may be a generated UI shape or a frame. Returns the new ids
    /// left to right; empty when the source does not exist.
    pub fn create_workflow_pages(&mut self, source_id: &str) -> Vec<ShapeId> {
        let placement = self.config.generated_ui.clone();
        let (x, y, w, h, frame_id) = match self.document.get_shape(source_id) {
            Some(Shape::GeneratedUi(ui)) => (ui.x, ui.y, ui.w, ui.h, ui.source_frame_id.clone()),
            Some(Shape::Frame(frame)) => (frame.x, frame.y, frame.w, frame.h, frame.id.clone()),
            Some(other) => {
                log::warn!("workflow pages need a frame or generated ui, got {}", other.kind().as_str());
                return Vec::new();
            }
            None => return Vec::new(),
        };

        let base_x = x + w + placement.workflow_gap;
        let spacing = (w + placement.gap).max(placement.workflow_min_spacing);
        let page_w = w.max(placement.min_width);
        let page_h = h.max(placement.min_height);

        (0..placement.workflow_pages)
            .map(|i| {
                let mut page = GeneratedUi::new(
                    base_x + spacing * i as f64,
                    y,
                    page_w,
                    page_h,
                    frame_id.clone(),
                );
                page.is_workflow_page = true;
                self.add_shape(Shape::GeneratedUi(page))
            })
            .collect()
    }
}

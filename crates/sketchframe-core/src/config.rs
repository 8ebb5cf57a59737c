//! Editor tuning knobs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Placement rules for generated UI shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedUiConfig {
    /// Horizontal gap between a frame and its generated output.
    pub gap: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// A measured height closer than this to the current one is ignored.
    pub height_threshold: f64,
    /// Gap between the source shape and the first workflow page.
    pub workflow_gap: f64,
    /// Minimum horizontal distance between workflow pages.
    pub workflow_min_spacing: f64,
    pub workflow_pages: usize,
}

impl Default for GeneratedUiConfig {
    fn default() -> Self {
        Self {
            gap: 50.0,
            min_width: 400.0,
            min_height: 300.0,
            height_threshold: 10.0,
            workflow_gap: 100.0,
            workflow_min_spacing: 450.0,
            workflow_pages: 4,
        }
    }
}

/// Settings for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom factor per wheel unit: `factor = exp(-delta_y * sensitivity)`.
    pub wheel_zoom_sensitivity: f64,
    /// Multiplier used by the zoom in/out buttons.
    pub button_zoom_step: f64,
    pub freehand_redraw_interval_ms: u64,
    pub autosave_debounce_ms: u64,
    /// Distance threshold for stroke-like hit tests.
    pub hit_tolerance: f64,
    /// Drafts must exceed this in both dimensions to be committed.
    pub min_draft_size: f64,
    /// Smallest width/height a resize can produce.
    pub min_resize_size: f64,
    /// Holding this key turns left-button drags into pans.
    pub hand_tool_key: String,
    pub generated_ui: GeneratedUiConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            wheel_zoom_sensitivity: 0.0015,
            button_zoom_step: 1.2,
            freehand_redraw_interval_ms: 8,
            autosave_debounce_ms: 1000,
            hit_tolerance: 5.0,
            min_draft_size: 1.0,
            min_resize_size: 10.0,
            hand_tool_key: "Space".to_string(),
            generated_ui: GeneratedUiConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    // Keep the scale range usable even if the file says otherwise.
    fn sanitize(&mut self) {
        let defaults = EditorConfig::default();
        if !(self.min_scale > 0.0) {
            log::warn!("min_scale {} is not positive, using {}", self.min_scale, defaults.min_scale);
            self.min_scale = defaults.min_scale;
        }
        if !(self.max_scale >= self.min_scale) {
            log::warn!("max_scale {} below min_scale, using {}", self.max_scale, self.min_scale);
            self.max_scale = self.min_scale;
        }
        if !(self.button_zoom_step > 1.0) {
            self.button_zoom_step = defaults.button_zoom_step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.freehand_redraw_interval_ms, 8);
        assert_eq!(config.autosave_debounce_ms, 1000);
        assert!((config.min_resize_size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.generated_ui.workflow_pages, 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"maxScale": 8.0, "generatedUi": {"gap": 20}}"#).unwrap();
        assert!((config.max_scale - 8.0).abs() < f64::EPSILON);
        assert!((config.min_scale - 0.1).abs() < f64::EPSILON);
        assert!((config.generated_ui.gap - 20.0).abs() < f64::EPSILON);
        assert!((config.generated_ui.min_width - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_scale_range_is_repaired() {
        let config = EditorConfig::from_json(r#"{"minScale": 0.0, "maxScale": 0.05}"#).unwrap();
        assert!((config.min_scale - 0.1).abs() < f64::EPSILON);
        assert!(config.max_scale >= config.min_scale);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"hitTolerance": 7.5}}"#).unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert!((config.hit_tolerance - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            EditorConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}

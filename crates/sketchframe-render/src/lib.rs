//! SketchFrame Render Library
//!
//! CPU rasterizer that turns a frame and the shapes inside it into a PNG.
//! The output is the only artifact handed to the generation service.

mod export;
mod raster;
mod text;

pub use export::{BACKGROUND, MAX_EXPORT_DIMENSION, encode_png, export_frame_png, render_frame};
pub use image::RgbaImage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Frame has no area ({width} x {height})")]
    EmptyFrame { width: f64, height: f64 },
    #[error("Frame is too large to export ({width} x {height})")]
    TooLarge { width: f64, height: f64 },
    #[error("Shape {0} is not a frame")]
    NotAFrame(String),
    #[error("Frame not found: {0}")]
    MissingFrame(String),
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

pub type RenderResult<T> = Result<T, RenderError>;

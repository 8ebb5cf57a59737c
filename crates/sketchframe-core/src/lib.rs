//! SketchFrame Core Library
//!
//! Platform-agnostic interaction engine for the SketchFrame infinite canvas:
//! shapes, viewport, tools, the pointer state machine and project persistence.

pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod resize;
pub mod scheduler;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use config::{ConfigError, EditorConfig, GeneratedUiConfig};
pub use document::CanvasDocument;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerDown, PointerEvent, WheelInput};
pub use resize::{ResizeCommand, ResizeCorner, resize_bounds};
pub use scheduler::{FrameCoalescer, RedrawThrottle};
pub use session::{EditorSession, InteractionState, SessionEvent};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapePatch, ShapeTrait};
pub use storage::{ProjectSnapshot, Storage, StorageError, StorageResult};
pub use tools::Tool;
pub use viewport::{PanMode, Viewport, screen_to_world, world_to_screen};

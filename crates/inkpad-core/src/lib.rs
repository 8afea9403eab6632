//! inkpad core library
//!
//! Platform-agnostic core of the exam drawing canvas: the element model,
//! view transform, gesture interpretation, undo history and the
//! serialization bridge to the web editor and the grading backend.

pub mod camera;
pub mod document;
pub mod element;
pub mod gesture;
pub mod history;
pub mod surface;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use document::{decode_document, encode_document, encode_submission, DocumentError};
pub use element::{Element, Shape, ShapeKind, Stroke, StrokePoint, Text, Tool};
pub use gesture::{GestureEnd, GestureSession, PendingTextBox, ToolSettings};
pub use history::History;
pub use surface::{DrawingSurface, SurfaceConfig, SurfaceEvent};

//! Drawing element model.
//!
//! Elements live in logical (untransformed) coordinates and are stored in an
//! ordered sequence; sequence order is paint order. Every element carries the
//! color and thickness that were in effect when it was finalized, so later
//! tool changes never restyle committed work.
//!
//! The JSON field names are camelCase because the serialized form is shared
//! byte-for-byte with the web editor's reader.

use serde::{Deserialize, Serialize};

/// Eraser strokes paint with the canvas background color at this multiple of
/// their logical thickness. This is deliberately not a true compositing erase.
pub const ERASER_WIDTH_FACTOR: f64 = 7.0;

/// Font size of a new text box is the active thickness times this factor,
/// fixed at creation time.
pub const TEXT_FONT_SIZE_FACTOR: f64 = 4.0;

/// The drawing tools a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Line,
    Rectangle,
    Circle,
    Text,
    Pan,
}

impl Tool {
    /// Tools that accumulate freehand stroke points.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }

    /// Tools that drag out a two-corner shape.
    pub fn is_shape(&self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }
}

/// One sampled point of a freehand stroke, in logical coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// CSS hex color string, e.g. "#000000".
    pub color: String,
    pub thickness: f64,
    pub tool: Tool,
}

/// A freehand stroke: the ordered points recorded during one gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Pencil or eraser, locked at gesture start.
    pub tool: Tool,
    pub points: Vec<StrokePoint>,
}

/// Geometry of a two-corner shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

/// A primitive shape defined by two corner points in logical space.
///
/// Render-time geometry is derived from the corners: a rectangle uses the
/// min/max bounding box, a circle uses the midpoint as center and half the
/// corner distance as radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub kind: ShapeKind,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub color: String,
    pub thickness: f64,
}

/// A placed piece of text.
///
/// `font_size` is derived from the active thickness at creation time
/// (thickness x 4) and is not independently adjustable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
    pub font_size: f64,
}

/// A single drawn element. The tag is carried in the serialized form so the
/// web reader can dispatch on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
}

impl Element {
    /// Whether this element is a text box (routed to `textBoxes` on
    /// submission rather than `lines`).
    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text(_))
    }
}

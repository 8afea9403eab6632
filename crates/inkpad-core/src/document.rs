//! Serialization bridge between the element sequence and the two wire
//! formats consumed outside the core.
//!
//! The persisted document is a rich-text-editor-like node tree shared with
//! the web editor: one paragraph under the root, one text leaf per element,
//! and each leaf's `text` field holds one JSON-stringified element. Decoding
//! is best-effort: unparseable leaves are dropped with a warning, an older
//! flat-array encoding is detected by shape-sniffing, and total garbage
//! decodes to an empty sequence. The decode path never fails.
//!
//! The submission shape is a separate, purpose-built encoding for the
//! grading backend and shares nothing with the persisted document.

use crate::element::{Element, Shape, Stroke, StrokePoint, Text, Tool};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Default pixel width of a text box in the submission shape.
pub const DEFAULT_TEXT_BOX_WIDTH: f64 = 150.0;
/// Default pixel height of a text box in the submission shape.
pub const DEFAULT_TEXT_BOX_HEIGHT: f64 = 50.0;

/// Errors from the encode paths. Decoding is lenient and has no error type.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to encode drawing document: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct TextLeaf {
    detail: u32,
    format: u32,
    mode: String,
    style: String,
    text: String,
    #[serde(rename = "type")]
    kind: String,
    version: u32,
}

impl TextLeaf {
    fn new(text: String) -> Self {
        Self {
            detail: 0,
            format: 0,
            mode: "normal".to_string(),
            style: String::new(),
            text,
            kind: "text".to_string(),
            version: 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ParagraphNode {
    children: Vec<TextLeaf>,
    direction: String,
    format: String,
    indent: u32,
    #[serde(rename = "type")]
    kind: String,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct RootNode {
    children: Vec<ParagraphNode>,
    direction: String,
    format: String,
    indent: u32,
    #[serde(rename = "type")]
    kind: String,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct DrawingDocument {
    root: RootNode,
}

impl DrawingDocument {
    fn from_elements(elements: &[Element]) -> Result<Self, DocumentError> {
        let leaves = elements
            .iter()
            .map(|element| Ok(TextLeaf::new(serde_json::to_string(element)?)))
            .collect::<Result<Vec<_>, DocumentError>>()?;
        Ok(Self {
            root: RootNode {
                children: vec![ParagraphNode {
                    children: leaves,
                    direction: "ltr".to_string(),
                    format: String::new(),
                    indent: 0,
                    kind: "paragraph".to_string(),
                    version: 1,
                }],
                direction: "ltr".to_string(),
                format: String::new(),
                indent: 0,
                kind: "root".to_string(),
                version: 1,
            },
        })
    }
}

/// Encode the element sequence as the persisted document shared with the
/// web editor.
pub fn encode_document(elements: &[Element]) -> Result<String, DocumentError> {
    let document = DrawingDocument::from_elements(elements)?;
    Ok(serde_json::to_string(&document)?)
}

/// Decode a persisted document back into an element sequence.
///
/// Accepts both the node-tree format and the legacy flat-array format,
/// distinguished by shape-sniffing. Never fails: bad leaves are skipped.
pub fn decode_document(input: &str) -> Vec<Element> {
    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(err) => {
            warn!("drawing document is not valid JSON, starting empty: {err}");
            return Vec::new();
        }
    };

    match &value {
        // Legacy format: a bare array of elements.
        Value::Array(items) => {
            debug!("decoding legacy flat-array drawing document ({} items)", items.len());
            items.iter().filter_map(decode_element).collect()
        }
        Value::Object(_) => {
            let Some(paragraphs) = value
                .get("root")
                .and_then(|root| root.get("children"))
                .and_then(Value::as_array)
            else {
                warn!("drawing document has no root.children, starting empty");
                return Vec::new();
            };
            paragraphs
                .iter()
                .filter_map(|paragraph| paragraph.get("children")?.as_array())
                .flatten()
                .filter_map(decode_leaf)
                .collect()
        }
        _ => {
            warn!("drawing document has unexpected top-level shape, starting empty");
            Vec::new()
        }
    }
}

/// Decode one text leaf whose `text` field embeds a JSON element.
fn decode_leaf(leaf: &Value) -> Option<Element> {
    let text = leaf.get("text").and_then(Value::as_str)?;
    let embedded: Value = match serde_json::from_str(text) {
        Ok(embedded) => embedded,
        Err(err) => {
            warn!("skipping unparseable drawing leaf: {err}");
            return None;
        }
    };
    decode_element(&embedded)
}

/// Decode one element value, falling back to legacy untagged shapes.
fn decode_element(value: &Value) -> Option<Element> {
    if let Ok(element) = serde_json::from_value::<Element>(value.clone()) {
        return Some(element);
    }
    match decode_legacy_element(value) {
        Some(element) => Some(element),
        None => {
            warn!("skipping unrecognized drawing element: {value}");
            None
        }
    }
}

/// Older documents stored elements without the `type` tag; recognize them by
/// their distinguishing fields.
fn decode_legacy_element(value: &Value) -> Option<Element> {
    let object = value.as_object()?;

    if let Some(points) = object.get("points").and_then(Value::as_array) {
        let points: Vec<StrokePoint> = points
            .iter()
            .filter_map(|point| serde_json::from_value(point.clone()).ok())
            .collect();
        let tool = match points.first().map(|p| p.tool) {
            Some(Tool::Eraser) => Tool::Eraser,
            _ => Tool::Pencil,
        };
        return Some(Element::Stroke(Stroke { tool, points }));
    }

    if object.contains_key("startX") || object.contains_key("kind") {
        return serde_json::from_value::<Shape>(value.clone())
            .ok()
            .map(Element::Shape);
    }

    if object.contains_key("text") && object.contains_key("fontSize") {
        return serde_json::from_value::<Text>(value.clone())
            .ok()
            .map(Element::Text);
    }

    None
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionTextBox {
    id: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: String,
    font_size: f64,
    color: String,
    is_editing: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Submission<'a> {
    lines: Vec<&'a Element>,
    text_boxes: Vec<SubmissionTextBox>,
}

/// Encode the element sequence as the backend submission shape:
/// `lines` carries every non-text element in paint order, text elements
/// become `textBoxes` entries with default dimensions and a fresh id.
pub fn encode_submission(elements: &[Element]) -> Result<String, DocumentError> {
    let mut lines = Vec::new();
    let mut text_boxes = Vec::new();

    for element in elements {
        match element {
            Element::Text(text) => text_boxes.push(SubmissionTextBox {
                id: Uuid::new_v4().to_string(),
                x: text.x,
                y: text.y,
                width: DEFAULT_TEXT_BOX_WIDTH,
                height: DEFAULT_TEXT_BOX_HEIGHT,
                text: text.text.clone(),
                font_size: text.font_size,
                color: text.color.clone(),
                is_editing: false,
            }),
            Element::Stroke(_) | Element::Shape(_) => lines.push(element),
        }
    }

    Ok(serde_json::to_string(&Submission { lines, text_boxes })?)
}

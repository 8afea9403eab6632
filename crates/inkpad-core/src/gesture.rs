//! Gesture interpretation for single-pointer drawing tools.
//!
//! A `GestureSession` is created when a pointer goes down and lives for the
//! duration of that gesture. The tool, color and thickness are captured once
//! at creation and held fixed, so changing the tool selector mid-stroke can
//! never corrupt the element being drawn.

use crate::element::{Element, Shape, ShapeKind, Stroke, StrokePoint, Tool};
use kurbo::Point;

/// Tool settings in effect for the *next* gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: Tool,
    /// CSS hex color string.
    pub color: String,
    pub thickness: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: "#000000".to_string(),
            thickness: 2.0,
        }
    }
}

/// A dragged-out text box awaiting the user's text entry.
///
/// Held by the surface while the modal prompt is open; on confirm it becomes
/// a rectangle `Shape` plus a `Text` element, on cancel it is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTextBox {
    /// First corner in logical coordinates.
    pub start: Point,
    /// Opposite corner in logical coordinates.
    pub end: Point,
    pub color: String,
    pub thickness: f64,
}

/// What a finished gesture produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEnd {
    /// A committed element (stroke or shape).
    Element(Element),
    /// A text box rectangle; the element pair is created on prompt confirm.
    TextBox(PendingTextBox),
    /// Nothing to commit (pan tool).
    None,
}

/// State of one single-pointer gesture, from touch-down to release.
#[derive(Debug, Clone)]
pub struct GestureSession {
    tool: Tool,
    color: String,
    thickness: f64,
    /// Accumulated points for pencil/eraser.
    points: Vec<StrokePoint>,
    /// First corner for shape/text tools.
    start: Point,
    /// Latest pointer position for shape/text tools.
    current: Point,
}

impl GestureSession {
    /// Begin a gesture at a logical point, locking the current settings.
    pub fn begin(settings: &ToolSettings, logical: Point) -> Self {
        let mut session = Self {
            tool: settings.tool,
            color: settings.color.clone(),
            thickness: settings.thickness,
            points: Vec::new(),
            start: logical,
            current: logical,
        };
        if session.tool.is_freehand() {
            session.push_point(logical);
        }
        session
    }

    /// The tool locked at gesture start.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Feed a pointer movement, in logical coordinates.
    pub fn update(&mut self, logical: Point) {
        self.current = logical;
        if self.tool.is_freehand() {
            self.push_point(logical);
        }
    }

    /// Finish the gesture and produce its outcome.
    ///
    /// Degenerate results (a single-point stroke, a zero-area shape) are
    /// still produced; filtering them out is a policy decision left to the
    /// caller and currently not applied.
    pub fn finish(self) -> GestureEnd {
        match self.tool {
            Tool::Pencil | Tool::Eraser => GestureEnd::Element(Element::Stroke(Stroke {
                tool: self.tool,
                points: self.points,
            })),
            Tool::Line => GestureEnd::Element(self.shape_element(ShapeKind::Line)),
            Tool::Rectangle => GestureEnd::Element(self.shape_element(ShapeKind::Rectangle)),
            Tool::Circle => GestureEnd::Element(self.shape_element(ShapeKind::Circle)),
            Tool::Text => GestureEnd::TextBox(PendingTextBox {
                start: self.start,
                end: self.current,
                color: self.color,
                thickness: self.thickness,
            }),
            Tool::Pan => GestureEnd::None,
        }
    }

    /// The in-progress element, rendered as a live preview.
    ///
    /// The text tool previews its drag rectangle; the pan tool has nothing
    /// to preview.
    pub fn preview(&self) -> Option<Element> {
        match self.tool {
            Tool::Pencil | Tool::Eraser => Some(Element::Stroke(Stroke {
                tool: self.tool,
                points: self.points.clone(),
            })),
            Tool::Line => Some(self.clone().shape_element(ShapeKind::Line)),
            Tool::Rectangle | Tool::Text => {
                Some(self.clone().shape_element(ShapeKind::Rectangle))
            }
            Tool::Circle => Some(self.clone().shape_element(ShapeKind::Circle)),
            Tool::Pan => None,
        }
    }

    fn push_point(&mut self, logical: Point) {
        self.points.push(StrokePoint {
            x: logical.x,
            y: logical.y,
            color: self.color.clone(),
            thickness: self.thickness,
            tool: self.tool,
        });
    }

    fn shape_element(self, kind: ShapeKind) -> Element {
        Element::Shape(Shape {
            kind,
            start_x: self.start.x,
            start_y: self.start.y,
            end_x: self.current.x,
            end_y: self.current.y,
            color: self.color,
            thickness: self.thickness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(tool: Tool) -> ToolSettings {
        ToolSettings {
            tool,
            color: "#000000".to_string(),
            thickness: 2.0,
        }
    }

    #[test]
    fn test_pencil_accumulates_points() {
        let mut session = GestureSession::begin(&settings(Tool::Pencil), Point::new(10.0, 10.0));
        session.update(Point::new(20.0, 10.0));
        session.update(Point::new(20.0, 20.0));

        let GestureEnd::Element(Element::Stroke(stroke)) = session.finish() else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.tool, Tool::Pencil);
        assert_eq!(stroke.points.len(), 3);
        for point in &stroke.points {
            assert_eq!(point.color, "#000000");
            assert!((point.thickness - 2.0).abs() < f64::EPSILON);
            assert_eq!(point.tool, Tool::Pencil);
        }
    }

    #[test]
    fn test_settings_are_locked_at_start() {
        let mut live_settings = settings(Tool::Pencil);
        let mut session = GestureSession::begin(&live_settings, Point::new(0.0, 0.0));

        // Selector changes mid-gesture must not affect the in-flight stroke.
        live_settings.tool = Tool::Eraser;
        live_settings.color = "#ff0000".to_string();
        session.update(Point::new(5.0, 5.0));

        let GestureEnd::Element(Element::Stroke(stroke)) = session.finish() else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.tool, Tool::Pencil);
        assert!(stroke.points.iter().all(|p| p.color == "#000000"));
    }

    #[test]
    fn test_rectangle_drag() {
        let mut session =
            GestureSession::begin(&settings(Tool::Rectangle), Point::new(0.0, 0.0));
        session.update(Point::new(50.0, 30.0));

        let GestureEnd::Element(Element::Shape(shape)) = session.finish() else {
            panic!("expected a shape");
        };
        assert_eq!(shape.kind, ShapeKind::Rectangle);
        assert!((shape.start_x).abs() < f64::EPSILON);
        assert!((shape.start_y).abs() < f64::EPSILON);
        assert!((shape.end_x - 50.0).abs() < f64::EPSILON);
        assert!((shape.end_y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_stroke_still_commits() {
        let session = GestureSession::begin(&settings(Tool::Pencil), Point::new(3.0, 3.0));
        let GestureEnd::Element(Element::Stroke(stroke)) = session.finish() else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.points.len(), 1);
    }

    #[test]
    fn test_text_drag_yields_pending_box() {
        let mut session = GestureSession::begin(&settings(Tool::Text), Point::new(10.0, 10.0));
        session.update(Point::new(60.0, 40.0));

        let GestureEnd::TextBox(pending) = session.finish() else {
            panic!("expected a pending text box");
        };
        assert_eq!(pending.start, Point::new(10.0, 10.0));
        assert_eq!(pending.end, Point::new(60.0, 40.0));
        assert!((pending.thickness - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_preview_is_a_rectangle() {
        let mut session = GestureSession::begin(&settings(Tool::Text), Point::new(0.0, 0.0));
        session.update(Point::new(10.0, 10.0));
        let Some(Element::Shape(shape)) = session.preview() else {
            panic!("expected a rectangle preview");
        };
        assert_eq!(shape.kind, ShapeKind::Rectangle);
    }

    #[test]
    fn test_pan_produces_nothing() {
        let session = GestureSession::begin(&settings(Tool::Pan), Point::new(0.0, 0.0));
        assert!(session.preview().is_none());
        assert_eq!(session.finish(), GestureEnd::None);
    }
}

//! Display-list construction.
//!
//! `build_display_list` is a pure function of the committed elements, the
//! in-flight preview element and the camera: it maps every element's logical
//! coordinates through the view transform and emits ordered draw commands.
//! It never mutates the model.

use crate::color::parse_hex_color;
use inkpad_core::camera::Camera;
use inkpad_core::element::{Element, Shape, ShapeKind, Stroke, Text, Tool, ERASER_WIDTH_FACTOR};
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use peniko::Color;

/// One drawing command, in screen coordinates.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    /// Stroke a path outline.
    Path {
        path: BezPath,
        color: Color,
        width: f64,
    },
    /// Draw a text run.
    Text {
        origin: Point,
        content: String,
        color: Color,
        font_size: f64,
    },
}

/// Build the full display list: committed elements in paint order, then the
/// live preview (if any) on top.
pub fn build_display_list(
    elements: &[Element],
    preview: Option<&Element>,
    camera: &Camera,
    background: Color,
) -> Vec<DrawCmd> {
    elements
        .iter()
        .chain(preview)
        .filter_map(|element| element_cmd(element, camera, background))
        .collect()
}

fn element_cmd(element: &Element, camera: &Camera, background: Color) -> Option<DrawCmd> {
    match element {
        Element::Stroke(stroke) => stroke_cmd(stroke, camera, background),
        Element::Shape(shape) => Some(shape_cmd(shape, camera)),
        Element::Text(text) => Some(text_cmd(text, camera)),
    }
}

fn stroke_cmd(stroke: &Stroke, camera: &Camera, background: Color) -> Option<DrawCmd> {
    let first = stroke.points.first()?;

    let mut path = BezPath::new();
    path.move_to(camera.to_screen(Point::new(first.x, first.y)));
    for point in stroke.points.iter().skip(1) {
        path.line_to(camera.to_screen(Point::new(point.x, point.y)));
    }

    // Erasing is painting with the background color at an inflated width,
    // not a compositing erase.
    let (color, logical_width) = match stroke.tool {
        Tool::Eraser => (background, first.thickness * ERASER_WIDTH_FACTOR),
        _ => (parse_hex_color(&first.color), first.thickness),
    };

    Some(DrawCmd::Path {
        path,
        color,
        width: camera.display_thickness(logical_width),
    })
}

fn shape_cmd(shape: &Shape, camera: &Camera) -> DrawCmd {
    let start = camera.to_screen(Point::new(shape.start_x, shape.start_y));
    let end = camera.to_screen(Point::new(shape.end_x, shape.end_y));

    let path = match shape.kind {
        ShapeKind::Line => {
            let mut path = BezPath::new();
            path.move_to(start);
            path.line_to(end);
            path
        }
        ShapeKind::Rectangle => Rect::new(
            start.x.min(end.x),
            start.y.min(end.y),
            start.x.max(end.x),
            start.y.max(end.y),
        )
        .to_path(0.1),
        ShapeKind::Circle => {
            let center = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
            let radius = start.distance(end) / 2.0;
            Circle::new(center, radius).to_path(0.1)
        }
    };

    DrawCmd::Path {
        path,
        color: parse_hex_color(&shape.color),
        width: camera.display_thickness(shape.thickness),
    }
}

fn text_cmd(text: &Text, camera: &Camera) -> DrawCmd {
    DrawCmd::Text {
        origin: camera.to_screen(Point::new(text.x, text.y)),
        content: text.text.clone(),
        color: parse_hex_color(&text.color),
        font_size: text.font_size * camera.zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::element::StrokePoint;
    use kurbo::Size;

    fn white() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }

    fn camera() -> Camera {
        Camera::new(Size::new(400.0, 300.0))
    }

    fn stroke(tool: Tool, thickness: f64) -> Element {
        let color = "#000000".to_string();
        Element::Stroke(Stroke {
            tool,
            points: vec![
                StrokePoint {
                    x: 10.0,
                    y: 10.0,
                    color: color.clone(),
                    thickness,
                    tool,
                },
                StrokePoint {
                    x: 20.0,
                    y: 20.0,
                    color,
                    thickness,
                    tool,
                },
            ],
        })
    }

    #[test]
    fn test_eraser_renders_background_at_inflated_width() {
        let cmds = build_display_list(&[stroke(Tool::Eraser, 2.0)], None, &camera(), white());

        let DrawCmd::Path { color, width, .. } = &cmds[0] else {
            panic!("expected a path command");
        };
        assert_eq!(color.to_rgba8(), white().to_rgba8());
        assert!((width - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pencil_width_scales_with_zoom() {
        let mut cam = camera();
        cam.begin_pinch(Point::ZERO);
        cam.update_pinch(2.0, Point::ZERO);

        let cmds = build_display_list(&[stroke(Tool::Pencil, 2.0)], None, &cam, white());
        let DrawCmd::Path { width, color, .. } = &cmds[0] else {
            panic!("expected a path command");
        };
        assert!((width - 4.0).abs() < f64::EPSILON);
        assert_eq!(color.to_rgba8(), Color::from_rgba8(0, 0, 0, 255).to_rgba8());
    }

    #[test]
    fn test_circle_geometry_derived_from_corners() {
        let element = Element::Shape(Shape {
            kind: ShapeKind::Circle,
            start_x: 0.0,
            start_y: 0.0,
            end_x: 30.0,
            end_y: 40.0,
            color: "#000000".to_string(),
            thickness: 1.0,
        });

        let cmds = build_display_list(&[element], None, &camera(), white());
        let DrawCmd::Path { path, .. } = &cmds[0] else {
            panic!("expected a path command");
        };
        // Center (15, 20), radius 25: bounds are [-10, 40] x [-5, 45].
        let bounds = path.bounding_box();
        assert!((bounds.x0 - (-10.0)).abs() < 0.5);
        assert!((bounds.x1 - 40.0).abs() < 0.5);
        assert!((bounds.y0 - (-5.0)).abs() < 0.5);
        assert!((bounds.y1 - 45.0).abs() < 0.5);
    }

    #[test]
    fn test_preview_renders_last() {
        let committed = stroke(Tool::Pencil, 2.0);
        let preview = stroke(Tool::Eraser, 1.0);
        let cmds = build_display_list(&[committed], Some(&preview), &camera(), white());

        assert_eq!(cmds.len(), 2);
        let DrawCmd::Path { color, .. } = &cmds[1] else {
            panic!("expected a path command");
        };
        // The eraser preview uses the background color.
        assert_eq!(color.to_rgba8(), white().to_rgba8());
    }

    #[test]
    fn test_text_transforms_origin_and_size() {
        let mut cam = camera();
        cam.begin_pinch(Point::ZERO);
        cam.update_pinch(2.0, Point::ZERO);

        let element = Element::Text(Text {
            x: 10.0,
            y: 20.0,
            text: "hello".to_string(),
            color: "#0000ff".to_string(),
            font_size: 8.0,
        });
        let cmds = build_display_list(&[element], None, &cam, white());
        let DrawCmd::Text {
            origin, font_size, ..
        } = &cmds[0]
        else {
            panic!("expected a text command");
        };
        assert!((origin.x - 20.0).abs() < 1e-9);
        assert!((origin.y - 40.0).abs() < 1e-9);
        assert!((font_size - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stroke_is_skipped() {
        let element = Element::Stroke(Stroke {
            tool: Tool::Pencil,
            points: Vec::new(),
        });
        assert!(build_display_list(&[element], None, &camera(), white()).is_empty());
    }
}

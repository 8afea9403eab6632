//! The drawing surface: owns the element sequence, camera, history and the
//! in-flight gesture, and exposes the host-facing contract.
//!
//! All input arrives in screen coordinates and is converted through the
//! camera. Every commit pushes exactly one history entry and emits exactly
//! one `ElementsChanged`; persistence of the emitted elements is the host's
//! concern. One surface instance owns its state exclusively; switching
//! questions means constructing a fresh surface.

use crate::camera::Camera;
use crate::element::{Element, Shape, ShapeKind, Text, Tool, TEXT_FONT_SIZE_FACTOR};
use crate::gesture::{GestureEnd, GestureSession, PendingTextBox, ToolSettings};
use crate::history::History;
use kurbo::{Point, Size, Vec2};
use log::debug;

/// Inset of the text origin from the top-left corner of its box.
pub const TEXT_PADDING: f64 = 5.0;

/// Zoom factor applied by the host toolbar's zoom in/out buttons.
pub const BUTTON_ZOOM_FACTOR: f64 = 1.25;

/// Configuration for mounting a surface.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Elements restored from a persisted document, if any.
    pub initial_elements: Vec<Element>,
    /// Canvas pixel dimensions.
    pub canvas_size: Size,
    /// Canvas background color; eraser strokes paint with it.
    pub background_color: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            initial_elements: Vec::new(),
            canvas_size: Size::new(400.0, 300.0),
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Events emitted for the host screen, drained with [`DrawingSurface::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The committed element sequence changed (commit, undo, redo, reset).
    ElementsChanged(Vec<Element>),
    /// A gesture started or ended; hosts disable outer scrolling while true.
    DrawingActive(bool),
    /// A text-box drag finished; the host must prompt for text and call
    /// `confirm_text` or `cancel_text`.
    TextPromptRequested,
}

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    elements: Vec<Element>,
    camera: Camera,
    history: History,
    settings: ToolSettings,
    session: Option<GestureSession>,
    /// Screen-space start of a single-finger pan-tool gesture.
    pan_start: Option<Point>,
    /// Text box awaiting the prompt outcome; drawing input is ignored
    /// while this is set.
    pending_text: Option<PendingTextBox>,
    background_color: String,
    events: Vec<SurfaceEvent>,
}

impl DrawingSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            history: History::new(config.initial_elements.clone()),
            elements: config.initial_elements,
            camera: Camera::new(config.canvas_size),
            settings: ToolSettings::default(),
            session: None,
            pan_start: None,
            pending_text: None,
            background_color: config.background_color,
            events: Vec::new(),
        }
    }

    /// The committed element sequence, in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// The in-flight scratch element, for live preview rendering.
    pub fn preview_element(&self) -> Option<Element> {
        self.session.as_ref().and_then(GestureSession::preview)
    }

    /// The text box awaiting prompt confirmation, if any.
    pub fn pending_text(&self) -> Option<&PendingTextBox> {
        self.pending_text.as_ref()
    }

    /// Update the canvas pixel dimensions after a layout change.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.camera.canvas_size = size;
    }

    /// Take the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    // Settings apply to the next gesture; an in-flight gesture keeps the
    // settings it captured at start.

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    pub fn set_thickness(&mut self, thickness: f64) {
        self.settings.thickness = thickness;
    }

    // Single-pointer input, in screen coordinates.

    pub fn pointer_down(&mut self, screen: Point) {
        if self.pending_text.is_some() {
            // The modal prompt owns input until confirmed or cancelled.
            return;
        }
        if self.session.is_some() || self.pan_start.is_some() {
            return;
        }
        match self.settings.tool {
            Tool::Pan => {
                self.camera.begin_pan();
                self.pan_start = Some(screen);
            }
            Tool::Pencil
            | Tool::Eraser
            | Tool::Line
            | Tool::Rectangle
            | Tool::Circle
            | Tool::Text => {
                let logical = self.camera.to_logical(screen);
                self.session = Some(GestureSession::begin(&self.settings, logical));
            }
        }
        self.events.push(SurfaceEvent::DrawingActive(true));
    }

    pub fn pointer_move(&mut self, screen: Point) {
        if let Some(start) = self.pan_start {
            self.camera
                .update_pan(Vec2::new(screen.x - start.x, screen.y - start.y));
        } else if let Some(session) = self.session.as_mut() {
            session.update(self.camera.to_logical(screen));
        }
    }

    pub fn pointer_up(&mut self, screen: Point) {
        if let Some(start) = self.pan_start.take() {
            self.camera
                .update_pan(Vec2::new(screen.x - start.x, screen.y - start.y));
            self.camera.end_pan();
            self.events.push(SurfaceEvent::DrawingActive(false));
            return;
        }
        let Some(mut session) = self.session.take() else {
            return;
        };
        // Freehand strokes record a point per move; the release position was
        // already recorded by the final move. Shape and text gestures track a
        // corner, which the release may still reposition.
        if !session.tool().is_freehand() {
            session.update(self.camera.to_logical(screen));
        }
        self.finish_session(session);
        self.events.push(SurfaceEvent::DrawingActive(false));
    }

    // Two-pointer pinch/pan gesture.

    /// Begin a pinch. A pointer-count transition is a gesture boundary: any
    /// single-pointer gesture still in flight is ended cleanly first.
    pub fn pinch_begin(&mut self, focal: Point) {
        self.end_active_gesture();
        self.camera.begin_pinch(focal);
        self.events.push(SurfaceEvent::DrawingActive(true));
    }

    pub fn pinch_update(&mut self, scale: f64, focal: Point) {
        self.camera.update_pinch(scale, focal);
    }

    pub fn pinch_end(&mut self) {
        self.camera.end_pinch();
        self.events.push(SurfaceEvent::DrawingActive(false));
    }

    // Text prompt flow.

    /// Commit the pending text box with the entered text: its rectangle and
    /// the text element are appended together under a single history entry.
    pub fn confirm_text(&mut self, text: impl Into<String>) {
        let Some(pending) = self.pending_text.take() else {
            return;
        };
        let rect = Shape {
            kind: ShapeKind::Rectangle,
            start_x: pending.start.x,
            start_y: pending.start.y,
            end_x: pending.end.x,
            end_y: pending.end.y,
            color: pending.color.clone(),
            thickness: pending.thickness,
        };
        let origin = Point::new(
            pending.start.x.min(pending.end.x) + TEXT_PADDING,
            pending.start.y.min(pending.end.y) + TEXT_PADDING,
        );
        let label = Text {
            x: origin.x,
            y: origin.y,
            text: text.into(),
            color: pending.color,
            font_size: pending.thickness * TEXT_FONT_SIZE_FACTOR,
        };
        self.elements.push(Element::Shape(rect));
        self.elements.push(Element::Text(label));
        self.commit();
    }

    /// Discard the pending text box.
    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // Control handle for the host toolbar.

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.elements = snapshot.to_vec();
            self.events
                .push(SurfaceEvent::ElementsChanged(self.elements.clone()));
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.elements = snapshot.to_vec();
            self.events
                .push(SurfaceEvent::ElementsChanged(self.elements.clone()));
        }
    }

    /// Clear everything: elements, history, scratch state and the view
    /// transform all return to their initial empty state.
    pub fn reset(&mut self) {
        self.elements.clear();
        self.history.reset();
        self.session = None;
        self.pan_start = None;
        self.pending_text = None;
        self.camera.reset();
        self.events
            .push(SurfaceEvent::ElementsChanged(Vec::new()));
    }

    pub fn zoom_in(&mut self) {
        self.camera
            .zoom_about(self.canvas_center(), BUTTON_ZOOM_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.camera
            .zoom_about(self.canvas_center(), 1.0 / BUTTON_ZOOM_FACTOR);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn zoom_level(&self) -> f64 {
        self.camera.zoom
    }

    fn canvas_center(&self) -> Point {
        Point::new(
            self.camera.canvas_size.width / 2.0,
            self.camera.canvas_size.height / 2.0,
        )
    }

    /// End whatever single-pointer gesture is in flight, committing what it
    /// accumulated so far.
    fn end_active_gesture(&mut self) {
        if self.pan_start.take().is_some() {
            self.camera.end_pan();
            self.events.push(SurfaceEvent::DrawingActive(false));
        }
        if let Some(session) = self.session.take() {
            debug!("ending {:?} gesture at pointer-count transition", session.tool());
            self.finish_session(session);
            self.events.push(SurfaceEvent::DrawingActive(false));
        }
    }

    fn finish_session(&mut self, session: GestureSession) {
        match session.finish() {
            GestureEnd::Element(element) => {
                self.elements.push(element);
                self.commit();
            }
            GestureEnd::TextBox(pending) => {
                self.pending_text = Some(pending);
                self.events.push(SurfaceEvent::TextPromptRequested);
            }
            GestureEnd::None => {}
        }
    }

    fn commit(&mut self) {
        self.history.commit(self.elements.clone());
        self.events
            .push(SurfaceEvent::ElementsChanged(self.elements.clone()));
    }
}

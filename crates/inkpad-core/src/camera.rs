//! Camera module for the canvas view transform.
//!
//! The camera maps logical drawing coordinates to screen coordinates via
//! `screen = logical * zoom + pan` and back. Pinch gestures zoom around a
//! focal point (anchor-preserving), pans translate, and both are clamped so
//! the visible content can never be dragged entirely off the canvas.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum zoom level (1 = unscaled).
pub const MIN_ZOOM: f64 = 1.0;
/// Maximum zoom level.
pub const MAX_ZOOM: f64 = 5.0;

/// Snapshot taken when a pinch gesture starts.
#[derive(Debug, Clone, Copy)]
struct PinchBaseline {
    /// Zoom at gesture start.
    zoom: f64,
    /// Logical point that was under the focal point at gesture start.
    anchor: Point,
}

/// Camera manages zoom and pan for a canvas of known pixel size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level, always within [MIN_ZOOM, MAX_ZOOM].
    pub zoom: f64,
    /// Current translation offset in screen pixels.
    pub pan: Vec2,
    /// Canvas pixel dimensions, used for pan clamping.
    pub canvas_size: Size,
    #[serde(skip)]
    pinch: Option<PinchBaseline>,
    #[serde(skip)]
    pan_baseline: Option<Vec2>,
}

impl Camera {
    /// Create a camera at identity for the given canvas size.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Vec2::ZERO,
            canvas_size,
            pinch: None,
            pan_baseline: None,
        }
    }

    /// Convert a logical point to screen coordinates.
    pub fn to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.zoom + self.pan.x,
            logical.y * self.zoom + self.pan.y,
        )
    }

    /// Convert a screen point to logical coordinates.
    pub fn to_logical(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Stroke width as drawn on screen, so weight looks consistent under zoom.
    pub fn display_thickness(&self, logical_thickness: f64) -> f64 {
        logical_thickness * self.zoom
    }

    /// Begin a pinch gesture at the given screen focal point.
    pub fn begin_pinch(&mut self, focal: Point) {
        self.pinch = Some(PinchBaseline {
            zoom: self.zoom,
            anchor: self.to_logical(focal),
        });
    }

    /// Update an in-progress pinch.
    ///
    /// The new zoom is the baseline zoom scaled by `scale` and clamped; the
    /// pan is solved so the logical anchor captured at `begin_pinch` stays
    /// under the (possibly moved) focal point, which also covers two-finger
    /// panning. The result is then clamped to the canvas bounds.
    pub fn update_pinch(&mut self, scale: f64, focal: Point) {
        let Some(baseline) = self.pinch else {
            return;
        };
        self.zoom = (baseline.zoom * scale).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = Vec2::new(
            focal.x - baseline.anchor.x * self.zoom,
            focal.y - baseline.anchor.y * self.zoom,
        );
        self.clamp_pan();
    }

    /// End the pinch gesture.
    pub fn end_pinch(&mut self) {
        self.pinch = None;
    }

    /// Begin a pan gesture (two-finger drag or the single-finger pan tool).
    pub fn begin_pan(&mut self) {
        self.pan_baseline = Some(self.pan);
    }

    /// Update an in-progress pan with the translation from the gesture start.
    pub fn update_pan(&mut self, translation: Vec2) {
        let Some(baseline) = self.pan_baseline else {
            return;
        };
        self.pan = baseline + translation;
        self.clamp_pan();
    }

    /// End the pan gesture.
    pub fn end_pan(&mut self) {
        self.pan_baseline = None;
    }

    /// Zoom by a factor, keeping the given screen point fixed.
    /// Used by host toolbar zoom buttons.
    pub fn zoom_about(&mut self, focal: Point, factor: f64) {
        let anchor = self.to_logical(focal);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = Vec2::new(
            focal.x - anchor.x * self.zoom,
            focal.y - anchor.y * self.zoom,
        );
        self.clamp_pan();
    }

    /// Reset to identity (zoom 1, no pan).
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = Vec2::ZERO;
        self.pinch = None;
        self.pan_baseline = None;
    }

    /// Clamp the pan so the scaled content rectangle covers the canvas:
    /// each axis stays within [min(0, canvas - canvas * zoom), 0].
    fn clamp_pan(&mut self) {
        let min_x = (self.canvas_size.width - self.canvas_size.width * self.zoom).min(0.0);
        let min_y = (self.canvas_size.height - self.canvas_size.height * self.zoom).min(0.0);
        self.pan.x = self.pan.x.clamp(min_x, 0.0);
        self.pan.y = self.pan.y.clamp(min_y, 0.0);
    }
}

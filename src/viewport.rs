//! Pan/zoom state and the logical ↔ screen transform.
//!
//! Logical coordinates are the canvas' own units (node positions live here).
//! Screen coordinates are pixels relative to the canvas surface:
//!
//! ```text
//! screen  = logical * zoom + pan
//! logical = (screen - pan) / zoom
//! ```
//!
//! Pan is a screen-space translation applied after scaling, so it is never
//! divided by zoom.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub const DEFAULT_MIN_ZOOM: f32 = 0.3;
pub const DEFAULT_MAX_ZOOM: f32 = 3.0;
pub const DEFAULT_ZOOM_STEP: f32 = 1.2;

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Map a logical position to screen pixels.
pub fn to_screen(logical: Point, pan: Point, zoom: f32) -> Point {
    logical.scale(zoom) + pan
}

/// Map a screen position back to logical units.
///
/// A non-positive zoom is treated as 1.0.
pub fn to_logical(screen: Point, pan: Point, zoom: f32) -> Point {
    let z = if zoom > 0.0 { zoom } else { 1.0 };
    (screen - pan).scale(1.0 / z)
}

/// Zoom factor plus pan offset, with clamped zoom stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Zoom 1.0, no pan, default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_ZOOM_STEP)
    }

    /// Create a viewport with custom zoom bounds and step factor.
    ///
    /// Bounds are swapped if given in the wrong order; a step factor of 1.0 or
    /// less falls back to the default.
    pub fn with_limits(min_zoom: f32, max_zoom: f32, zoom_step: f32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        let zoom_step = if zoom_step > 1.0 { zoom_step } else { DEFAULT_ZOOM_STEP };
        Self {
            zoom: 1.0f32.clamp(min_zoom, max_zoom),
            pan: Point::ZERO,
            min_zoom,
            max_zoom,
            zoom_step,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Zoom as a rounded percentage, as shown in the status bar
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }

    pub fn to_screen(&self, logical: Point) -> Point {
        to_screen(logical, self.pan, self.zoom)
    }

    pub fn to_logical(&self, screen: Point) -> Point {
        to_logical(screen, self.pan, self.zoom)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * self.zoom_step).min(self.max_zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / self.zoom_step).max(self.min_zoom);
    }

    /// Back to 1:1. Pan is left alone.
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0f32.clamp(self.min_zoom, self.max_zoom);
    }

    /// Set zoom directly, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Translate the view by a raw screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan + delta;
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }
}

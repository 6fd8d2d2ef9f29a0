//! Decorative page effects: the event set they react to and the small
//! formulas that turn each event into a style change.

use crate::config::DEFAULT_PARALLAX_STRENGTH;
use std::cell::Cell;

/// Everything the page effects react to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Window scrolled; carries the vertical offset in px.
    Scroll { offset_y: f64 },
    /// A same-page link was clicked.
    AnchorClick { href: String },
    /// Pointer moved over the tilt element.
    PointerMove { client_x: f64, client_y: f64 },
    /// Pointer left or was released over the tilt element.
    PointerEnd,
    /// Reduced-motion preference changed.
    MotionChanged { reduced: bool },
}

pub fn nav_is_scrolled(offset_y: f64, threshold_px: f64) -> bool {
    offset_y > threshold_px
}

/// Read `data-parallax`; missing or non-numeric values use the default.
pub fn parallax_strength(attr: Option<&str>) -> f64 {
    attr.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_STRENGTH)
}

pub fn parallax_offset(offset_y: f64, strength: f64) -> f64 {
    offset_y * strength / 100.0
}

pub fn parallax_transform(offset_y: f64, strength: f64) -> String {
    format!("translate3d(0, {}px, 0)", parallax_offset(offset_y, strength))
}

/// Element box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation of the hero element, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x_deg: f64,
    pub y_deg: f64,
}

impl Tilt {
    pub const RESET: Tilt = Tilt { x_deg: 0.0, y_deg: 0.0 };

    /// Tilt for a pointer at (`x`, `y`) over `bounds`. The horizontal
    /// position drives rotation around the Y axis and the vertical position
    /// around the X axis, both scaled linearly to `±max_deg`.
    pub fn from_pointer(x: f64, y: f64, bounds: Bounds, max_deg: f64) -> Tilt {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Tilt::RESET;
        }
        let nx = ((x - bounds.left) / bounds.width).clamp(0.0, 1.0);
        let ny = ((y - bounds.top) / bounds.height).clamp(0.0, 1.0);
        Tilt {
            x_deg: (0.5 - ny) * 2.0 * max_deg,
            y_deg: (nx - 0.5) * 2.0 * max_deg,
        }
    }

    pub fn css_x(&self) -> String {
        format!("{:.2}deg", self.x_deg)
    }

    pub fn css_y(&self) -> String {
        format!("{:.2}deg", self.y_deg)
    }
}

/// Coalesces bursts of events into one update per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Cell<bool>,
}

impl FrameThrottle {
    /// `true` if the caller should schedule a frame; `false` if one is
    /// already in flight.
    pub fn try_schedule(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Mark the in-flight frame as run.
    pub fn complete(&self) {
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

//! Zoom factor and the time ruler derived from it.

use crate::config::ZoomConfig;
use crate::core::time::{format_time, Units};

/// Width of the timeline grid at zoom 1.0
pub const BASE_WIDTH: Units = 1200.0;
/// Distance between ruler markers at zoom 1.0
pub const MARKER_SPACING: Units = 60.0;
/// Ruler markers shown at zoom 1.0
const BASE_MARKER_COUNT: f64 = 20.0;

/// Multiplier applied to every unit-to-pixel conversion, kept within `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    factor: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl Zoom {
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            factor: 1.0,
            min: config.min,
            max: config.max,
            step: config.step,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn zoom_in(&mut self) {
        self.factor = (self.factor * self.step).min(self.max);
    }

    pub fn zoom_out(&mut self) {
        self.factor = (self.factor / self.step).max(self.min);
    }

    pub fn reset(&mut self) {
        self.factor = 1.0;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.factor < self.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.factor > self.min
    }

    /// Zoom as a rounded percentage, e.g. "150%"
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.factor * 100.0).round() as i64)
    }

    pub fn to_pixels(&self, units: Units) -> f64 {
        units * self.factor
    }

    pub fn to_units(&self, pixels: f64) -> Units {
        pixels / self.factor
    }

    /// Width of the timeline grid in pixels
    pub fn timeline_width(&self) -> f64 {
        self.to_pixels(BASE_WIDTH)
    }

    /// Markers for the time ruler
    pub fn ruler(&self) -> Vec<RulerMarker> {
        let count = (BASE_MARKER_COUNT * self.factor).ceil() as usize;
        (0..count)
            .map(|i| {
                let position = i as Units * MARKER_SPACING;
                RulerMarker {
                    x: self.to_pixels(position),
                    position,
                    label: format_time(position),
                }
            })
            .collect()
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(&ZoomConfig::default())
    }
}

/// One labelled tick on the time ruler
#[derive(Debug, Clone, PartialEq)]
pub struct RulerMarker {
    /// Horizontal offset in pixels
    pub x: f64,
    pub position: Units,
    pub label: String,
}

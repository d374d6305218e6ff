// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::{MIN_WINDOW_MILLIS, TimeStamp, TimeWindow};

/// Linear map between instants in a [`TimeWindow`] and horizontal pixels.
///
/// `TimeScale` is a pure function of the window, the canvas width, and the
/// horizontal margin: `window.start` maps to `margin_x`, `window.end` maps
/// to `pixel_width - margin_x`, and everything in between is linear. It
/// holds no history; zoom and pan reach it only as a different window on
/// the next frame.
#[derive(Clone, Debug)]
pub struct TimeScale {
    window: TimeWindow,
    pixel_width: f64,
    margin_x: f64,
}

impl TimeScale {
    /// Creates a scale for a window on a canvas of the given width.
    ///
    /// A degenerate window (zero duration, e.g. a timeline holding a
    /// single event) is widened to [`MIN_WINDOW_MILLIS`] centered on the
    /// instant so projection never divides by zero.
    #[must_use]
    pub fn new(window: TimeWindow, pixel_width: f64, margin_x: f64) -> Self {
        Self {
            window: window.widened_to_minimum(MIN_WINDOW_MILLIS),
            pixel_width,
            margin_x,
        }
    }

    /// Returns the window this scale projects, after degenerate widening.
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Returns the usable horizontal span in pixels.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.pixel_width - 2.0 * self.margin_x
    }

    /// Projects an instant onto a horizontal pixel coordinate.
    #[must_use]
    pub fn project(&self, t: TimeStamp) -> f64 {
        let frac = t.delta(self.window.start) / self.window.duration_millis();
        self.margin_x + frac * self.span()
    }

    /// Inverse-maps a horizontal pixel coordinate back to an instant.
    ///
    /// Used for hit-testing and hover: "what time is under the cursor".
    #[must_use]
    pub fn unproject(&self, x: f64) -> TimeStamp {
        let frac = (x - self.margin_x) / self.span();
        self.window
            .start
            .offset(frac * self.window.duration_millis())
    }

    /// Convenience inverse map from a `Point`, using its X coordinate.
    ///
    /// The Y coordinate is ignored; on a horizontal timeline only X
    /// carries temporal meaning.
    #[must_use]
    pub fn unproject_point(&self, pt: Point) -> TimeStamp {
        self.unproject(pt.x)
    }

    /// Returns the current milliseconds-per-pixel ratio.
    #[must_use]
    pub fn millis_per_pixel(&self) -> f64 {
        self.window.duration_millis() / self.span()
    }

    /// Suggests a "nice" tick spacing in milliseconds for the current zoom.
    ///
    /// The spacing is chosen from a 1-2-5 ladder so ticks land roughly
    /// 64 pixels apart, with `base_millis` as a lower bound (e.g. one day
    /// for a date-granularity timeline).
    #[must_use]
    pub fn suggest_tick_spacing(&self, base_millis: f64) -> f64 {
        let base = if base_millis > f64::MIN_POSITIVE {
            base_millis
        } else {
            f64::MIN_POSITIVE
        };
        let target_px = 64.0_f64;
        let mut desired = self.millis_per_pixel() * target_px;
        // A zero or negative pixel span has no finite zoom level; the
        // lower bound is the only sensible answer.
        if !desired.is_finite() {
            return base;
        }
        if desired < base {
            desired = base;
        }

        let mut unit = 1.0_f64;
        while unit * 10.0 <= desired {
            unit *= 10.0;
        }

        loop {
            for m in [1.0_f64, 2.0, 5.0, 10.0] {
                let step = m * unit;
                if step >= desired {
                    return step;
                }
            }
            unit *= 10.0;
        }
    }
}

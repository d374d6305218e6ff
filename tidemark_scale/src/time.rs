// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time instants and visible time windows.
//!
//! Zoom and pan over a timeline are expressed purely as changes to a
//! [`TimeWindow`]; no type in this module holds view history or pixel
//! geometry.

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The minimum synthetic window duration substituted for a degenerate
/// (zero-length) window: one day.
pub const MIN_WINDOW_MILLIS: f64 = MILLIS_PER_DAY;

/// An instant on the timeline, in milliseconds relative to an arbitrary epoch.
///
/// Callers derive instants from their own calendar types (a date plus an
/// optional time-of-day); this crate only does arithmetic on them. The
/// epoch does not matter as long as every instant passed to the engine
/// uses the same one.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct TimeStamp(f64);

impl TimeStamp {
    /// Creates an instant from milliseconds since the caller's epoch.
    #[must_use]
    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Creates an instant from whole days since the caller's epoch.
    ///
    /// Convenience for tests and callers that work at date granularity.
    #[must_use]
    pub const fn from_days(days: f64) -> Self {
        Self(days * MILLIS_PER_DAY)
    }

    /// Returns the instant as milliseconds since the caller's epoch.
    #[must_use]
    pub const fn millis(self) -> f64 {
        self.0
    }

    /// Returns this instant shifted by `delta` milliseconds.
    #[must_use]
    pub const fn offset(self, delta: f64) -> Self {
        Self(self.0 + delta)
    }

    /// Returns `self - other` in milliseconds.
    #[must_use]
    pub const fn delta(self, other: Self) -> f64 {
        self.0 - other.0
    }

    /// Returns `true` if the instant is a finite number.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

/// The currently visible slice of time.
///
/// Invariant: `start <= end`. Equality is degenerate but valid (a window
/// collapsed onto a single instant, e.g. a timeline with one event);
/// consumers substitute a [`MIN_WINDOW_MILLIS`] span centered on the
/// instant rather than dividing by zero. A window with `start > end` or a
/// non-finite bound is invalid input and is rejected by the layout entry
/// point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeWindow {
    /// Earliest visible instant.
    pub start: TimeStamp,
    /// Latest visible instant.
    pub end: TimeStamp,
}

impl TimeWindow {
    /// Creates a window from two instants.
    #[must_use]
    pub const fn new(start: TimeStamp, end: TimeStamp) -> Self {
        Self { start, end }
    }

    /// Returns the window duration in milliseconds.
    ///
    /// Zero for a degenerate window; negative only for invalid input.
    #[must_use]
    pub const fn duration_millis(&self) -> f64 {
        self.end.delta(self.start)
    }

    /// Returns `true` if both bounds are finite and `start <= end`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start.0 <= self.end.0
    }

    /// Returns `true` if the window has collapsed onto a single instant.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.duration_millis() == 0.0
    }

    /// Returns `true` if `t` lies within the window, bounds inclusive.
    #[must_use]
    pub fn contains(&self, t: TimeStamp) -> bool {
        self.start.0 <= t.0 && t.0 <= self.end.0
    }

    /// Returns this window widened (if needed) to a minimum duration,
    /// centered on the original midpoint.
    ///
    /// Windows already at least `min_millis` long are returned unchanged.
    #[must_use]
    pub fn widened_to_minimum(&self, min_millis: f64) -> Self {
        let duration = self.duration_millis();
        if duration >= min_millis {
            return *self;
        }
        let mid = (self.start.0 + self.end.0) * 0.5;
        let half = min_millis * 0.5;
        Self::new(TimeStamp(mid - half), TimeStamp(mid + half))
    }

    /// Returns this window zoomed by `factor` about a pivot instant.
    ///
    /// `factor > 1` zooms in (shorter duration), `factor < 1` zooms out.
    /// The pivot keeps its relative position inside the window, so the
    /// instant under the cursor stays under the cursor. Non-positive
    /// factors are ignored.
    #[must_use]
    pub fn zoomed_about(&self, factor: f64, pivot: TimeStamp) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let duration = self.duration_millis();
        let new_duration = duration / factor;
        // Fraction of the window to the left of the pivot.
        let frac = if duration > 0.0 {
            (pivot.0 - self.start.0) / duration
        } else {
            0.5
        };
        let start = pivot.0 - frac * new_duration;
        Self::new(TimeStamp(start), TimeStamp(start + new_duration))
    }

    /// Returns this window shifted by `delta` milliseconds.
    #[must_use]
    pub const fn panned_by(&self, delta: f64) -> Self {
        Self::new(self.start.offset(delta), self.end.offset(delta))
    }

    /// Builds a window from normalized `[0, 1]` fractions over a full range.
    ///
    /// This is the exchange format used by overview/minimap collaborators:
    /// they deal in fractions of the full event range and never in pixels
    /// belonging to this engine.
    #[must_use]
    pub fn from_fractions(full: &Self, start_frac: f64, end_frac: f64) -> Self {
        let len = full.duration_millis();
        Self::new(
            full.start.offset(start_frac * len),
            full.start.offset(end_frac * len),
        )
    }

    /// Returns this window as normalized `(start, end)` fractions of `full`.
    ///
    /// The inverse of [`TimeWindow::from_fractions`]. A degenerate `full`
    /// range maps everything to `(0.0, 1.0)`.
    #[must_use]
    pub fn to_fractions(&self, full: &Self) -> (f64, f64) {
        let len = full.duration_millis();
        if len <= 0.0 {
            return (0.0, 1.0);
        }
        (
            self.start.delta(full.start) / len,
            self.end.delta(full.start) / len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MILLIS_PER_DAY, MIN_WINDOW_MILLIS, TimeStamp, TimeWindow};

    #[test]
    fn widening_is_centered_and_idempotent_for_long_windows() {
        let degenerate = TimeWindow::new(TimeStamp::from_days(10.0), TimeStamp::from_days(10.0));
        let widened = degenerate.widened_to_minimum(MIN_WINDOW_MILLIS);
        assert!((widened.duration_millis() - MIN_WINDOW_MILLIS).abs() < 1e-9);
        let mid = (widened.start.millis() + widened.end.millis()) * 0.5;
        assert!((mid - 10.0 * MILLIS_PER_DAY).abs() < 1e-9);

        let long = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(30.0));
        assert_eq!(long.widened_to_minimum(MIN_WINDOW_MILLIS), long);
    }

    #[test]
    fn zoom_about_pivot_keeps_pivot_fraction_fixed() {
        let window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(100.0));
        let pivot = TimeStamp::from_days(25.0);

        let zoomed = window.zoomed_about(2.0, pivot);
        assert!((zoomed.duration_millis() - window.duration_millis() / 2.0).abs() < 1e-6);
        // Pivot was at fraction 0.25 and must stay there.
        let frac = pivot.delta(zoomed.start) / zoomed.duration_millis();
        assert!((frac - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_then_out_round_trips() {
        let original = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(50.0 * 365.0));
        let pivot = TimeStamp::from_days(400.0);

        let mut window = original;
        let steps = 10;
        let per_step = 1.5_f64;
        for _ in 0..steps {
            window = window.zoomed_about(per_step, pivot);
        }
        for _ in 0..steps {
            window = window.zoomed_about(1.0 / per_step, pivot);
        }

        let tolerance = original.duration_millis() * 1e-9;
        assert!(window.start.delta(original.start).abs() < tolerance);
        assert!(window.end.delta(original.end).abs() < tolerance);
    }

    #[test]
    fn fractions_round_trip_through_full_range() {
        let full = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(200.0));
        let window = TimeWindow::from_fractions(&full, 0.25, 0.75);
        assert_eq!(window.start, TimeStamp::from_days(50.0));
        assert_eq!(window.end, TimeStamp::from_days(150.0));

        let (s, e) = window.to_fractions(&full);
        assert!((s - 0.25).abs() < 1e-12);
        assert!((e - 0.75).abs() < 1e-12);
    }

    #[test]
    fn validity_rejects_reversed_and_non_finite_bounds() {
        let reversed = TimeWindow::new(TimeStamp::from_days(5.0), TimeStamp::from_days(1.0));
        assert!(!reversed.is_valid());

        let nan = TimeWindow::new(TimeStamp::from_millis(f64::NAN), TimeStamp::from_days(1.0));
        assert!(!nan.is_valid());

        let collapsed = TimeWindow::new(TimeStamp::from_days(3.0), TimeStamp::from_days(3.0));
        assert!(collapsed.is_valid());
        assert!(collapsed.is_degenerate());
    }
}

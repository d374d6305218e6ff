// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas dimensions and layout tuning knobs.

use crate::group::Side;

/// Static per-frame canvas geometry.
///
/// All lengths are device pixels. The axis is a horizontal line at
/// `axis_y`; cards stack outward from it on both sides. The struct is a
/// plain record so callers can build it with a struct literal from their
/// container measurements each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Canvas width.
    pub pixel_width: f64,
    /// Canvas height.
    pub pixel_height: f64,
    /// Vertical position of the time axis.
    pub axis_y: f64,
    /// Horizontal margin kept free on both canvas edges.
    pub margin_x: f64,
    /// Vertical margin kept free at the top and bottom edges.
    pub margin_y: f64,
    /// Width of every card representation.
    pub card_width: f64,
    /// Height of a full card (title, description, date).
    pub card_full_height: f64,
    /// Height of a compact card (title and date only).
    pub card_compact_height: f64,
    /// Height of a title-only card (single text line).
    pub card_title_height: f64,
}

impl Viewport {
    /// Returns the first invalid field, if any.
    ///
    /// Dimensions and card sizes must be positive and finite; margins must
    /// be non-negative and leave a positive horizontal span between them;
    /// the axis must lie inside the canvas.
    #[must_use]
    pub fn invalid_field(&self) -> Option<(&'static str, f64)> {
        let positive = [
            ("pixel_width", self.pixel_width),
            ("pixel_height", self.pixel_height),
            ("card_width", self.card_width),
            ("card_full_height", self.card_full_height),
            ("card_compact_height", self.card_compact_height),
            ("card_title_height", self.card_title_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Some((name, value));
            }
        }
        for (name, value) in [("margin_x", self.margin_x), ("margin_y", self.margin_y)] {
            if !value.is_finite() || value < 0.0 {
                return Some((name, value));
            }
        }
        if 2.0 * self.margin_x >= self.pixel_width {
            return Some(("margin_x", self.margin_x));
        }
        if !self.axis_y.is_finite() || self.axis_y <= 0.0 || self.axis_y >= self.pixel_height {
            return Some(("axis_y", self.axis_y));
        }
        None
    }

    /// Returns the vertical space available for cards on one side.
    ///
    /// `axis_y - margin_y` above the axis, `pixel_height - axis_y -
    /// margin_y` below; with a centered axis both reduce to
    /// `pixel_height / 2 - margin_y`. Clamped to zero when the margins
    /// leave no room.
    #[must_use]
    pub fn available_height(&self, side: Side) -> f64 {
        let raw = match side {
            Side::Above => self.axis_y - self.margin_y,
            Side::Below => self.pixel_height - self.axis_y - self.margin_y,
        };
        raw.max(0.0)
    }
}

/// Tuning knobs for a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Use the title-only representation in place of compact.
    ///
    /// Set by the caller for high-density situations such as extreme
    /// zoom-out over long ranges.
    pub high_density: bool,
    /// Position delta below which a card is not considered to have moved
    /// between frames, in pixels.
    pub stability_tolerance_px: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            high_density: false,
            stability_tolerance_px: 16.0,
        }
    }
}

// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fail-fast validation errors for the layout entry point.

use core::fmt;

use crate::event::EventId;

/// Error returned when `layout()` is given invalid input.
///
/// These indicate programming defects in the caller: the window and
/// viewport are expected to be computed and clamped upstream, so none of
/// these should surface to end users. Degenerate-but-valid inputs (zero
/// events, a single event, a window collapsed onto one instant) are not
/// errors.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// The window's bounds are reversed or non-finite.
    InvalidWindow {
        /// Window start in milliseconds.
        start: f64,
        /// Window end in milliseconds.
        end: f64,
    },
    /// A viewport dimension is out of range.
    InvalidViewport {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An event carries a non-finite or inconsistent timestamp.
    InvalidEvent {
        /// Id of the offending event.
        id: EventId,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindow { start, end } => {
                write!(f, "invalid time window: start {start} must not exceed end {end}, and both must be finite")
            }
            Self::InvalidViewport { field, value } => {
                write!(f, "invalid viewport: {field} = {value}")
            }
            Self::InvalidEvent { id, reason } => {
                write!(f, "invalid event {:?}: {reason}", id.as_str())
            }
        }
    }
}

impl core::error::Error for LayoutError {}

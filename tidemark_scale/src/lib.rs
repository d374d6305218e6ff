// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidemark Scale: time/pixel projection primitives for timeline views.
//!
//! This crate provides small, headless models of the horizontal axis of a
//! timeline, where view extents are expressed in device pixels and world
//! positions are instants. It focuses on:
//! - The visible [`TimeWindow`] and its manipulation (zoom about a pivot,
//!   pan, normalized overview fractions).
//! - Linear coordinate conversion between instants and pixels via
//!   [`TimeScale`].
//! - Tick spacing suggestions for axis labelling.
//!
//! It does **not** own any event data or layout decisions. Callers are
//! expected to:
//! - Derive `TimeStamp`s from their own calendar types.
//! - Drive the window from user gestures (wheel zoom, drag pan) or from an
//!   overview component exchanging normalized fractions.
//! - Hand the window to a layout layer (for example `tidemark_layout`)
//!   that positions content along the projected axis.
//!
//! ## Minimal example
//!
//! ```rust
//! use tidemark_scale::{TimeScale, TimeStamp, TimeWindow};
//!
//! // Ten visible days on an 800px canvas with 40px margins.
//! let window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(10.0));
//! let scale = TimeScale::new(window, 800.0, 40.0);
//!
//! // Instants project linearly between the margins.
//! let x = scale.project(TimeStamp::from_days(5.0));
//! assert!((x - 400.0).abs() < 1e-9);
//!
//! // Pixel coordinates map back to instants for hit-testing.
//! let t = scale.unproject(400.0);
//! assert!(t.delta(TimeStamp::from_days(5.0)).abs() < 1e-6);
//! ```
//!
//! ## Zoom and pan
//!
//! Zoom and pan are expressed purely as changes to the window; the scale
//! itself holds no history:
//!
//! ```rust
//! use tidemark_scale::{TimeStamp, TimeWindow};
//!
//! let window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(100.0));
//! let pivot = TimeStamp::from_days(30.0);
//!
//! // One wheel tick in: duration halves, the pivot instant stays put.
//! let zoomed = window.zoomed_about(2.0, pivot);
//! assert!((zoomed.duration_millis() - window.duration_millis() / 2.0).abs() < 1e-6);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod scale;
mod time;

pub use scale::TimeScale;
pub use time::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MIN_WINDOW_MILLIS, TimeStamp, TimeWindow};

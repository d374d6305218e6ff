// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidemark Layout: a timeline card layout and degradation engine.
//!
//! Given a set of timestamped events and a visible [`TimeWindow`], one
//! call to [`layout`] produces a collision-free arrangement of event
//! cards around a horizontal time axis:
//!
//! - Events that would visually collide are clustered into *half-columns*
//!   alternating above and below the axis.
//! - Each half-column picks a card representation (full, compact,
//!   title-only) that fits the vertical space on its side; members beyond
//!   capacity are summarized by an overflow badge rather than dropped.
//! - One [`Anchor`] per half-column marks its temporal position on the
//!   axis and maps back to every member, shown or hidden.
//! - Passing the previous frame's [`LayoutResult`] back in biases side
//!   assignment toward the previous placement, keeping churn low while
//!   the viewport zooms and pans.
//!
//! The engine produces geometry, never pixels: rendering, persistence,
//! and input handling belong to the caller.
//!
//! ## Minimal example
//!
//! ```rust
//! use tidemark_layout::{Event, LayoutOptions, TimeStamp, TimeWindow, Viewport, layout};
//!
//! let events = [
//!     Event::new("launch", TimeStamp::from_days(10.0), "Launch"),
//!     Event::new("retro", TimeStamp::from_days(11.0), "Retrospective"),
//! ];
//! let window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(30.0));
//! let viewport = Viewport {
//!     pixel_width: 1200.0,
//!     pixel_height: 900.0,
//!     axis_y: 450.0,
//!     margin_x: 40.0,
//!     margin_y: 50.0,
//!     card_width: 80.0,
//!     card_full_height: 80.0,
//!     card_compact_height: 40.0,
//!     card_title_height: 20.0,
//! };
//!
//! let frame = layout(&events, window, &viewport, &LayoutOptions::default(), None).unwrap();
//! assert_eq!(frame.cards.len() + frame.hidden_count(), 2);
//!
//! // Feed the frame back in on the next pass for placement stability.
//! let zoomed = window.zoomed_about(1.2, TimeStamp::from_days(10.0));
//! let next = layout(&events, zoomed, &viewport, &LayoutOptions::default(), Some(&frame)).unwrap();
//! assert!(next.telemetry.migrations <= 2);
//! ```
//!
//! ## Per-frame value semantics
//!
//! A layout pass is a pure function: it never mutates its inputs, holds
//! no ambient state, and returns a freshly allocated result each call.
//! The only state threaded between frames is the `previous` result the
//! caller passes back explicitly, so speculative or parallel
//! re-evaluation is always safe.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod degrade;
mod error;
mod event;
mod group;
mod stability;
mod telemetry;
mod viewport;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

pub use tidemark_scale::{TimeScale, TimeStamp, TimeWindow};

pub use anchor::Anchor;
pub use degrade::{ColumnPlan, Representation};
pub use error::LayoutError;
pub use event::{Event, EventFlags, EventId};
pub use group::{HalfColumnId, Side};
pub use telemetry::{SideTelemetry, Telemetry};
pub use viewport::{LayoutOptions, Viewport};

use degrade::{slot_count, slot_top};
use group::Candidate;
use stability::FrameMemory;

/// One rendered card: the placement of a single shown event.
#[derive(Clone, Debug, PartialEq)]
pub struct CardPlacement {
    /// The event this card shows.
    pub event_id: EventId,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Card width; identical for every representation.
    pub width: f64,
    /// Card height; determined by the representation.
    pub height: f64,
    /// Representation chosen for the card's half-column.
    pub representation: Representation,
    /// Side of the axis the card sits on.
    pub side: Side,
    /// Pass-through of the caller's highlight flag for this event.
    pub is_highlighted: bool,
}

impl CardPlacement {
    /// Returns the card's rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Counter marking events present in a half-column but not individually
/// rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct OverflowBadge {
    /// The half-column whose members overflowed.
    pub half_column_id: HalfColumnId,
    /// Left edge, aligned with the column's card stack.
    pub x: f64,
    /// Top edge; sits at the outer end of the stack.
    pub y: f64,
    /// Side of the axis the column sits on.
    pub side: Side,
    /// Number of members hidden behind the badge.
    pub hidden_count: usize,
}

/// The complete output of one layout pass.
///
/// Entirely recomputed per frame and never partially mutated. Pass it
/// back as `previous` on the next call to enable stability tracking.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Echo of the window this frame was laid out for.
    pub window: TimeWindow,
    /// Card placements, in half-column creation order.
    pub cards: Vec<CardPlacement>,
    /// Overflow badges, at most one per half-column.
    pub badges: Vec<OverflowBadge>,
    /// One anchor per half-column, on the axis line.
    pub anchors: Vec<Anchor>,
    /// Diagnostics snapshot for this frame.
    pub telemetry: Telemetry,
}

impl LayoutResult {
    /// Total events summarized behind overflow badges.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.badges.iter().map(|b| b.hidden_count).sum()
    }

    /// Returns the topmost card containing `point`, if any.
    ///
    /// Cards never overlap, so "topmost" only matters at shared edges;
    /// the first match in placement order wins.
    #[must_use]
    pub fn card_at(&self, point: Point) -> Option<&CardPlacement> {
        self.cards.iter().find(|c| c.rect().contains(point))
    }

    /// Returns the anchor closest to `x` within `tolerance` pixels.
    ///
    /// Hover helper: the anchor's `member_event_ids` then maps back to
    /// every event in the group, including ones hidden behind a badge.
    #[must_use]
    pub fn anchor_near(&self, x: f64, tolerance: f64) -> Option<&Anchor> {
        self.anchors
            .iter()
            .filter(|a| (a.x - x).abs() <= tolerance)
            .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
    }
}

/// Lays out `events` within `window` on the given canvas.
///
/// Events need not be pre-sorted. `previous` is the result of the last
/// pass, or `None` on a cold start; it only biases side assignment and
/// feeds the migration counter, never correctness. The call either
/// returns a consistent [`LayoutResult`] or an error; there is no partial
/// state to roll back.
///
/// # Errors
///
/// [`LayoutError`] when the window is reversed or non-finite, a viewport
/// dimension is out of range, or an event timestamp is invalid. Zero
/// events, a single event, identical timestamps, and a `start == end`
/// window are all valid.
pub fn layout(
    events: &[Event],
    window: TimeWindow,
    viewport: &Viewport,
    options: &LayoutOptions,
    previous: Option<&LayoutResult>,
) -> Result<LayoutResult, LayoutError> {
    validate(events, window, viewport, options)?;

    let scale = TimeScale::new(window, viewport.pixel_width, viewport.margin_x);
    let visible_window = scale.window();

    let mut sorted: Vec<&Event> = events
        .iter()
        .filter(|e| visible_window.contains(e.timestamp()))
        .collect();
    sorted.sort_by(|a, b| {
        a.timestamp()
            .millis()
            .total_cmp(&b.timestamp().millis())
            .then_with(|| a.id().cmp(b.id()))
    });

    let memory = previous.map(FrameMemory::from_result);

    let candidates: Vec<Candidate<'_>> = sorted
        .iter()
        .enumerate()
        .map(|(index, event)| Candidate {
            index,
            x: scale.project(event.timestamp()),
            timestamp: event.timestamp(),
            id: event.id(),
        })
        .collect();

    // Room cap for merging: the side's capacity at the smallest
    // representation the options allow.
    let smallest = if options.high_density {
        Representation::TitleOnly
    } else {
        Representation::Compact
    };
    let room = [Side::Above, Side::Below].map(|side| {
        slot_count(
            viewport.available_height(side),
            smallest.height_in(viewport),
        )
        .max(1)
    });

    let columns = group::group_columns(&candidates, viewport.card_width, room, |id| {
        memory.as_ref().and_then(|m| m.previous_side(id))
    });

    let mut cards = Vec::new();
    let mut badges = Vec::new();
    let mut anchors = Vec::new();
    let mut telemetry = Telemetry::default();
    // Right edge of the last card stack per side; clamping at the canvas
    // extremes may compress anchors, and no-overlap wins over clamping.
    let mut last_right: [Option<f64>; 2] = [None, None];

    for column in &columns {
        let side = column.side();
        let plan = ColumnPlan::choose(column.len(), side, viewport, options.high_density);
        let anchor = Anchor::for_column(column, &sorted, viewport);

        let mut card_x = clamp_card_x(anchor.x, viewport);
        if plan.shown > 0 {
            if let Some(right) = last_right[side.index()] {
                if card_x < right {
                    card_x = right;
                }
            }
            last_right[side.index()] = Some(card_x + viewport.card_width);
        }

        let height = plan.representation.height_in(viewport);
        for (slot, member) in column.members().iter().take(plan.shown).enumerate() {
            let event = sorted[member.index];
            cards.push(CardPlacement {
                event_id: event.id().clone(),
                x: card_x,
                y: slot_top(side, slot, height, viewport),
                width: viewport.card_width,
                height,
                representation: plan.representation,
                side,
                is_highlighted: event.flags().contains(EventFlags::HIGHLIGHTED),
            });
        }

        if plan.hidden > 0 {
            let stack = plan.shown as f64 * height;
            let y = match side {
                Side::Above => viewport.axis_y - stack - viewport.card_title_height,
                Side::Below => viewport.axis_y + stack,
            };
            badges.push(OverflowBadge {
                half_column_id: anchor.half_column_id,
                x: card_x,
                y,
                side,
                hidden_count: plan.hidden,
            });
        }

        telemetry.record_column(side, &plan, plan.capacity(side, viewport));
        anchors.push(anchor);
    }

    let mut result = LayoutResult {
        window,
        cards,
        badges,
        anchors,
        telemetry: Telemetry::default(),
    };

    let current = FrameMemory::from_result(&result);
    let migrations = memory
        .as_ref()
        .map_or(0, |m| m.count_migrations(&current, options.stability_tolerance_px));
    telemetry.finalize(sorted.len(), migrations);
    result.telemetry = telemetry;
    Ok(result)
}

fn validate(
    events: &[Event],
    window: TimeWindow,
    viewport: &Viewport,
    options: &LayoutOptions,
) -> Result<(), LayoutError> {
    if !window.is_valid() {
        return Err(LayoutError::InvalidWindow {
            start: window.start.millis(),
            end: window.end.millis(),
        });
    }
    if let Some((field, value)) = viewport.invalid_field() {
        return Err(LayoutError::InvalidViewport { field, value });
    }
    if !options.stability_tolerance_px.is_finite() || options.stability_tolerance_px < 0.0 {
        return Err(LayoutError::InvalidViewport {
            field: "stability_tolerance_px",
            value: options.stability_tolerance_px,
        });
    }
    for event in events {
        if !event.timestamp().is_finite() {
            return Err(LayoutError::InvalidEvent {
                id: event.id().clone(),
                reason: "timestamp is not finite",
            });
        }
        if let Some(end) = event.end() {
            if !end.is_finite() || end < event.timestamp() {
                return Err(LayoutError::InvalidEvent {
                    id: event.id().clone(),
                    reason: "range ends before it starts",
                });
            }
        }
    }
    Ok(())
}

/// Shifts a card inward just enough to keep its full width on-canvas.
fn clamp_card_x(anchor_x: f64, viewport: &Viewport) -> f64 {
    let min = viewport.margin_x;
    let max = (viewport.pixel_width - viewport.margin_x - viewport.card_width).max(min);
    (anchor_x - viewport.card_width * 0.5).clamp(min, max)
}

// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only per-frame diagnostics.
//!
//! Telemetry is a snapshot value carried on every `LayoutResult`, in the
//! same spirit as a viewport debug-info struct: callers that want a debug
//! surface copy the field out, the engine never writes into shared state,
//! and nothing here feeds back into layout decisions.

use crate::degrade::{ColumnPlan, Representation};
use crate::group::Side;

/// Per-side aggregate counters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SideTelemetry {
    /// Half-columns on this side.
    pub columns: usize,
    /// Cards actually placed.
    pub cards: usize,
    /// Events summarized by overflow badges.
    pub hidden: usize,
    /// Card slots occupied across all columns.
    pub slots_used: usize,
    /// Card slots available across all columns at their chosen
    /// representations.
    pub slots_available: usize,
    /// `slots_used / slots_available`, zero when no slots exist.
    pub utilization: f64,
}

impl SideTelemetry {
    fn record(&mut self, plan: &ColumnPlan, capacity: usize) {
        self.columns += 1;
        self.cards += plan.shown;
        self.hidden += plan.hidden;
        self.slots_used += plan.shown;
        self.slots_available += capacity;
    }

    fn finalize(&mut self) {
        if self.slots_available > 0 {
            self.utilization = self.slots_used as f64 / self.slots_available as f64;
        }
    }
}

/// Aggregate counters for one completed layout pass.
///
/// Satisfies the coverage bookkeeping by construction:
/// `cards_placed + hidden_events` equals `events_in_window`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Telemetry {
    /// Events whose timestamp fell inside the window.
    pub events_in_window: usize,
    /// Cards placed across both sides.
    pub cards_placed: usize,
    /// Cards using the full representation.
    pub full_cards: usize,
    /// Cards using the compact representation.
    pub compact_cards: usize,
    /// Cards using the title-only representation.
    pub title_only_cards: usize,
    /// Overflow badges emitted.
    pub overflow_badges: usize,
    /// Events summarized behind badges.
    pub hidden_events: usize,
    /// Migrations relative to the previous frame; zero on a cold start.
    pub migrations: usize,
    /// Counters for the side above the axis.
    pub above: SideTelemetry,
    /// Counters for the side below the axis.
    pub below: SideTelemetry,
}

impl Telemetry {
    fn side_mut(&mut self, side: Side) -> &mut SideTelemetry {
        match side {
            Side::Above => &mut self.above,
            Side::Below => &mut self.below,
        }
    }

    pub(crate) fn record_column(&mut self, side: Side, plan: &ColumnPlan, capacity: usize) {
        self.side_mut(side).record(plan, capacity);
        self.cards_placed += plan.shown;
        self.hidden_events += plan.hidden;
        if plan.hidden > 0 {
            self.overflow_badges += 1;
        }
        match plan.representation {
            Representation::Full => self.full_cards += plan.shown,
            Representation::Compact => self.compact_cards += plan.shown,
            Representation::TitleOnly => self.title_only_cards += plan.shown,
        }
    }

    pub(crate) fn finalize(&mut self, events_in_window: usize, migrations: usize) {
        self.events_in_window = events_in_window;
        self.migrations = migrations;
        self.above.finalize();
        self.below.finalize();
    }
}

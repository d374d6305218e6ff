// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis markers connecting half-columns to their temporal position.

use alloc::vec::Vec;

use crate::event::{Event, EventFlags, EventId};
use crate::group::{HalfColumn, HalfColumnId};
use crate::viewport::Viewport;

/// The connector marker for one half-column, always on the axis line.
///
/// `member_event_ids` lists every member regardless of degradation state
/// so hover and selection can map back to events hidden behind an
/// overflow badge. `is_highlighted` is a pass-through of the caller's
/// [`EventFlags::HIGHLIGHTED`] flag on any member; the engine invents no
/// highlighting logic of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Id of the half-column this marker belongs to.
    pub half_column_id: HalfColumnId,
    /// Horizontal position, within `[margin_x, pixel_width - margin_x]`.
    pub x: f64,
    /// Vertical position; always the axis line.
    pub y: f64,
    /// Every member of the half-column, shown or hidden.
    pub member_event_ids: Vec<EventId>,
    /// True when any member carries the highlight flag.
    pub is_highlighted: bool,
}

impl Anchor {
    pub(crate) fn for_column(
        column: &HalfColumn,
        sorted_events: &[&Event],
        viewport: &Viewport,
    ) -> Self {
        let member_event_ids: Vec<EventId> = column
            .members()
            .iter()
            .map(|m| sorted_events[m.index].id().clone())
            .collect();
        let is_highlighted = column
            .members()
            .iter()
            .any(|m| sorted_events[m.index].flags().contains(EventFlags::HIGHLIGHTED));
        let x = column
            .anchor_x()
            .clamp(viewport.margin_x, viewport.pixel_width - viewport.margin_x);
        Self {
            half_column_id: HalfColumnId::from_member_ids(member_event_ids.iter()),
            x,
            y: viewport.axis_y,
            member_event_ids,
            is_highlighted,
        }
    }
}

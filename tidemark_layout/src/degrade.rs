// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Density-dependent card representation selection.
//!
//! Each half-column gets one representation for all the members it shows.
//! When even the smallest allowed representation cannot show everyone, the
//! remainder is summarized by an overflow badge rather than treated as an
//! error.

use crate::group::Side;
use crate::viewport::Viewport;

/// How a card is drawn, from most to least detailed.
///
/// The variant order is the degradation ladder; `Ord` follows it, so
/// "more degraded" compares greater. Growth of a column's member count
/// may only move the chosen representation down the ladder, never up.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Representation {
    /// Title, description, and date.
    Full,
    /// Title and date at roughly half height.
    Compact,
    /// A single text line.
    TitleOnly,
}

impl Representation {
    /// Returns this representation's card height in the given viewport.
    #[must_use]
    pub fn height_in(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Full => viewport.card_full_height,
            Self::Compact => viewport.card_compact_height,
            Self::TitleOnly => viewport.card_title_height,
        }
    }
}

/// Number of cards of height `card_height` that fit into `available`.
#[must_use]
pub(crate) fn slot_count(available: f64, card_height: f64) -> usize {
    if card_height <= 0.0 || available <= 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Ratio is non-negative and flooring is exactly the slot semantics"
    )]
    let slots = (available / card_height) as usize;
    slots
}

/// The Degradation Selector's verdict for one half-column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Representation used for every shown member.
    pub representation: Representation,
    /// Members drawn as cards, stacked outward from the axis.
    pub shown: usize,
    /// Members summarized by the overflow badge.
    pub hidden: usize,
}

impl ColumnPlan {
    /// Chooses a representation and overflow split for `members` events on
    /// one side.
    ///
    /// The slot arithmetic is `floor(available / height)` per
    /// representation. At an exact capacity boundary the less degraded
    /// representation wins (favor showing information over compacting).
    /// With `high_density` the compact rung is replaced by title-only,
    /// same arithmetic with the smaller height.
    #[must_use]
    pub fn choose(members: usize, side: Side, viewport: &Viewport, high_density: bool) -> Self {
        let available = viewport.available_height(side);

        let full_slots = slot_count(available, viewport.card_full_height);
        if members <= full_slots {
            return Self {
                representation: Representation::Full,
                shown: members,
                hidden: 0,
            };
        }

        let degraded = if high_density {
            Representation::TitleOnly
        } else {
            Representation::Compact
        };
        let degraded_slots = slot_count(available, degraded.height_in(viewport));
        if members <= degraded_slots {
            return Self {
                representation: degraded,
                shown: members,
                hidden: 0,
            };
        }

        Self {
            representation: degraded,
            shown: degraded_slots,
            hidden: members - degraded_slots,
        }
    }

    /// Returns the slot capacity of this plan's representation on `side`.
    #[must_use]
    pub fn capacity(&self, side: Side, viewport: &Viewport) -> usize {
        slot_count(
            viewport.available_height(side),
            self.representation.height_in(viewport),
        )
    }
}

/// Top edge of the card in outward slot `index` (0 touches the axis).
#[must_use]
pub(crate) fn slot_top(side: Side, index: usize, card_height: f64, viewport: &Viewport) -> f64 {
    let offset = index as f64 * card_height;
    match side {
        Side::Above => viewport.axis_y - offset - card_height,
        Side::Below => viewport.axis_y + offset,
    }
}

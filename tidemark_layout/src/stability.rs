// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-to-frame placement memory.
//!
//! The tracker holds one frame of history: per-event side, representation,
//! and position as reconstructed from the previous `LayoutResult`. It
//! biases the grouper's side choices and counts migrations, but never
//! vetoes a candidate layout; correctness (no overlaps) always wins over
//! continuity.

use hashbrown::{DefaultHashBuilder, HashMap};

use crate::LayoutResult;
use crate::degrade::Representation;
use crate::event::EventId;
use crate::group::{HalfColumnId, Side};

/// Where one event ended up in the previous frame.
#[derive(Clone, Debug)]
struct PlacementRecord {
    column: HalfColumnId,
    side: Side,
    /// `None` while the event is summarized by an overflow badge.
    representation: Option<Representation>,
    x: f64,
    y: f64,
    /// Member count of the column, used to tell forced representation
    /// changes (membership changed) from gratuitous ones.
    column_len: usize,
}

/// One frame of per-event placement history.
///
/// Rebuilt wholesale from each `LayoutResult`; there is no longer-lived
/// identity than "previous frame".
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameMemory {
    records: HashMap<EventId, PlacementRecord, DefaultHashBuilder>,
}

impl FrameMemory {
    /// Reconstructs memory from a finished frame.
    pub(crate) fn from_result(result: &LayoutResult) -> Self {
        let mut cards: HashMap<&EventId, usize, DefaultHashBuilder> = HashMap::default();
        for (i, card) in result.cards.iter().enumerate() {
            cards.insert(&card.event_id, i);
        }

        let mut records: HashMap<EventId, PlacementRecord, DefaultHashBuilder> =
            HashMap::default();
        for anchor in &result.anchors {
            let column_len = anchor.member_event_ids.len();
            // A column always emits either cards or a badge, so one of the
            // two determines its side.
            let badge_side = result
                .badges
                .iter()
                .find(|b| b.half_column_id == anchor.half_column_id)
                .map(|b| b.side);
            for id in &anchor.member_event_ids {
                let record = match cards.get(id).map(|&i| &result.cards[i]) {
                    Some(card) => PlacementRecord {
                        column: anchor.half_column_id,
                        side: card.side,
                        representation: Some(card.representation),
                        x: card.x,
                        y: card.y,
                        column_len,
                    },
                    None => {
                        let Some(side) = badge_side else {
                            continue;
                        };
                        PlacementRecord {
                            column: anchor.half_column_id,
                            side,
                            representation: None,
                            x: anchor.x,
                            y: anchor.y,
                            column_len,
                        }
                    }
                };
                records.insert(id.clone(), record);
            }
        }
        Self { records }
    }

    /// Returns the side this event sat on in the previous frame.
    pub(crate) fn previous_side(&self, id: &EventId) -> Option<Side> {
        self.records.get(id).map(|r| r.side)
    }

    /// Counts visible migrations from this frame to `current`.
    ///
    /// A migration is a changed side, a shown card moving by more than
    /// `tolerance_px` on either axis, or a representation change (including
    /// shown/hidden flips) while the column's member count stayed the same.
    /// Events present in only one of the two frames never count.
    pub(crate) fn count_migrations(&self, current: &Self, tolerance_px: f64) -> usize {
        let mut migrations = 0_usize;
        for (id, new) in &current.records {
            let Some(old) = self.records.get(id) else {
                continue;
            };
            if old.side != new.side {
                migrations += 1;
                continue;
            }
            let membership_changed =
                old.column != new.column || old.column_len != new.column_len;
            match (old.representation, new.representation) {
                (Some(old_rep), Some(new_rep)) => {
                    if old_rep != new_rep && !membership_changed {
                        migrations += 1;
                    } else if (new.x - old.x).abs() > tolerance_px
                        || (new.y - old.y).abs() > tolerance_px
                    {
                        migrations += 1;
                    }
                }
                (Some(_), None) | (None, Some(_)) => {
                    if !membership_changed {
                        migrations += 1;
                    }
                }
                (None, None) => {}
            }
        }
        migrations
    }

    #[cfg(test)]
    fn insert(
        &mut self,
        id: &str,
        column: HalfColumnId,
        side: Side,
        representation: Option<Representation>,
        x: f64,
        y: f64,
        column_len: usize,
    ) {
        self.records.insert(
            EventId::new(id),
            PlacementRecord {
                column,
                side,
                representation,
                x,
                y,
                column_len,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::degrade::Representation;
    use crate::event::EventId;
    use crate::group::{HalfColumnId, Side};

    use super::FrameMemory;

    fn column(name: &str) -> HalfColumnId {
        HalfColumnId::from_member_ids([&EventId::new(name)])
    }

    #[test]
    fn unchanged_placements_produce_no_migrations() {
        let mut old = FrameMemory::default();
        old.insert("a", column("c1"), Side::Above, Some(Representation::Full), 100.0, 300.0, 1);
        let new = old.clone();
        assert_eq!(old.count_migrations(&new, 16.0), 0);
    }

    #[test]
    fn side_changes_and_large_moves_count() {
        let mut old = FrameMemory::default();
        old.insert("a", column("c1"), Side::Above, Some(Representation::Full), 100.0, 300.0, 1);
        old.insert("b", column("c2"), Side::Below, Some(Representation::Full), 400.0, 500.0, 1);

        let mut new = FrameMemory::default();
        // "a" flipped sides.
        new.insert("a", column("c1"), Side::Below, Some(Representation::Full), 100.0, 520.0, 1);
        // "b" drifted 20px right, beyond a 16px tolerance.
        new.insert("b", column("c2"), Side::Below, Some(Representation::Full), 420.0, 500.0, 1);

        assert_eq!(old.count_migrations(&new, 16.0), 2);
        // A looser tolerance forgives the drift but not the side flip.
        assert_eq!(old.count_migrations(&new, 32.0), 1);
    }

    #[test]
    fn representation_changes_count_only_without_membership_change() {
        let mut old = FrameMemory::default();
        old.insert("a", column("c1"), Side::Above, Some(Representation::Full), 100.0, 300.0, 2);
        old.insert("b", column("c2"), Side::Below, Some(Representation::Full), 400.0, 500.0, 2);

        let mut new = FrameMemory::default();
        // Same column size, yet "a" was compacted: gratuitous, counts.
        new.insert("a", column("c1"), Side::Above, Some(Representation::Compact), 100.0, 300.0, 2);
        // "b"'s column grew, so its compaction was forced: free.
        new.insert("b", column("c2"), Side::Below, Some(Representation::Compact), 400.0, 500.0, 3);

        assert_eq!(old.count_migrations(&new, 16.0), 1);
    }

    #[test]
    fn events_entering_or_leaving_the_window_are_free() {
        let mut old = FrameMemory::default();
        old.insert("gone", column("c1"), Side::Above, Some(Representation::Full), 10.0, 20.0, 1);

        let mut new = FrameMemory::default();
        new.insert("fresh", column("c2"), Side::Below, Some(Representation::Full), 30.0, 40.0, 1);

        assert_eq!(old.count_migrations(&new, 16.0), 0);
    }
}

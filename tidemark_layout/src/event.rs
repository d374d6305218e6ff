// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event records.
//!
//! Events are owned by the calling application; the engine only reads
//! them. A layout pass receives a slice of [`Event`]s in any order and
//! sorts internally.

use alloc::string::String;

use tidemark_scale::TimeStamp;

/// Identifier for an event, unique within one layout pass.
///
/// Wraps the caller's string id. Equality and hashing are on the string
/// content, so ids remain stable across frames even though every frame
/// receives a fresh event slice.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

bitflags::bitflags! {
    /// Per-event display flags threaded through to the output geometry.
    ///
    /// The engine interprets only [`EventFlags::HIGHLIGHTED`]; it is a pure
    /// pass-through set by the caller (typically the event under the cursor
    /// or the current selection) so that other views can stay consistent
    /// without re-deriving geometry. The mask is intentionally open-ended:
    /// callers may define additional bits and read them back from
    /// placements unchanged.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u32 {
        /// Event is highlighted by the caller (hover or selection).
        const HIGHLIGHTED = 1 << 0;
        /// All remaining bits are available for application-defined use.
        const _ = !0;
    }
}

/// An immutable timestamped record to be placed on the timeline.
///
/// `end` is present for range events (a span rather than a point); the
/// grouper places range events by their start instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    id: EventId,
    timestamp: TimeStamp,
    title: String,
    description: Option<String>,
    end: Option<TimeStamp>,
    flags: EventFlags,
}

impl Event {
    /// Creates a point event.
    pub fn new(id: impl Into<EventId>, timestamp: TimeStamp, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp,
            title: title.into(),
            description: None,
            end: None,
            flags: EventFlags::default(),
        }
    }

    /// Attaches a longer description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Turns this into a range event ending at `end`.
    #[must_use]
    pub fn with_end(mut self, end: TimeStamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the display flags.
    #[must_use]
    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the event id.
    #[must_use]
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Returns the instant the event is placed at.
    #[must_use]
    pub fn timestamp(&self) -> TimeStamp {
        self.timestamp
    }

    /// Returns the title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the end instant for range events.
    #[must_use]
    pub fn end(&self) -> Option<TimeStamp> {
        self.end
    }

    /// Returns the display flags.
    #[must_use]
    pub fn flags(&self) -> EventFlags {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use tidemark_scale::TimeStamp;

    use super::{Event, EventFlags, EventId};

    #[test]
    fn builder_helpers_fill_optional_fields() {
        let event = Event::new("e1", TimeStamp::from_days(2.0), "Launch")
            .with_description("First public release")
            .with_end(TimeStamp::from_days(4.0))
            .with_flags(EventFlags::HIGHLIGHTED);

        assert_eq!(event.id(), &EventId::new("e1"));
        assert_eq!(event.description(), Some("First public release"));
        assert_eq!(event.end(), Some(TimeStamp::from_days(4.0)));
        assert!(event.flags().contains(EventFlags::HIGHLIGHTED));
    }

    #[test]
    fn flags_keep_application_defined_bits() {
        let custom = EventFlags::from_bits_retain(1 << 12);
        let flags = EventFlags::HIGHLIGHTED | custom;
        assert!(flags.contains(custom));
        assert!(flags.contains(EventFlags::HIGHLIGHTED));
    }
}

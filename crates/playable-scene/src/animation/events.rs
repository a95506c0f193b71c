//! Timeline lifecycle events.
//!
//! The scheduler records an event whenever a timeline starts, completes, or
//! is cancelled. The shell drains and logs them after each tick.
//!
//! ```ignore
//! for event in scheduler.drain_events() {
//!     if let TimelineEvent::Completed { owner, property, .. } = event {
//!         println!("{owner:?} finished animating {property}");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{AnimatableProperty, OwnerId, TimelineId};

/// Event emitted when a timeline changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// Timeline was registered.
    Started {
        timeline_id: TimelineId,
        owner: OwnerId,
        property: AnimatableProperty,
    },
    /// Timeline reached its target; its completion callback ran.
    Completed {
        timeline_id: TimelineId,
        owner: OwnerId,
        property: AnimatableProperty,
    },
    /// Timeline was cancelled (explicitly or by a replacement on the same
    /// property); its completion callback was dropped.
    Cancelled {
        timeline_id: TimelineId,
        owner: OwnerId,
        property: AnimatableProperty,
    },
}

impl TimelineEvent {
    /// Get the owner for this event.
    pub fn owner(&self) -> OwnerId {
        match self {
            Self::Started { owner, .. }
            | Self::Completed { owner, .. }
            | Self::Cancelled { owner, .. } => *owner,
        }
    }

    /// Get the timeline ID for this event.
    pub fn timeline_id(&self) -> TimelineId {
        match self {
            Self::Started { timeline_id, .. }
            | Self::Completed { timeline_id, .. }
            | Self::Cancelled { timeline_id, .. } => *timeline_id,
        }
    }

    /// Get the property for this event.
    pub fn property(&self) -> AnimatableProperty {
        match self {
            Self::Started { property, .. }
            | Self::Completed { property, .. }
            | Self::Cancelled { property, .. } => *property,
        }
    }

    /// Check if this is a "completed" event.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Check if this is a "cancelled" event.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Queue for collecting timeline events during update cycles.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TimelineEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the queue.
    pub fn push(&mut self, event: TimelineEvent) {
        self.events.push_back(event);
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.events.drain(..)
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(owner: OwnerId) -> TimelineEvent {
        TimelineEvent::Started {
            timeline_id: TimelineId::new(),
            owner,
            property: AnimatableProperty::Opacity,
        }
    }

    #[test]
    fn test_queue_drains_in_order() {
        let owner = OwnerId::new();
        let mut queue = EventQueue::new();
        let first = started(owner);
        let second = started(owner);
        queue.push(first.clone());
        queue.push(second.clone());

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![first, second]);
        assert_eq!(queue.drain().count(), 0);

        queue.push(started(owner));
        queue.clear();
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_event_accessors() {
        let owner = OwnerId::new();
        let id = TimelineId::new();
        let event = TimelineEvent::Cancelled {
            timeline_id: id,
            owner,
            property: AnimatableProperty::Scale,
        };
        assert_eq!(event.owner(), owner);
        assert_eq!(event.timeline_id(), id);
        assert_eq!(event.property(), AnimatableProperty::Scale);
        assert!(event.is_cancelled());
        assert!(!event.is_completed());
    }
}

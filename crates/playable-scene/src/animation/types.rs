//! Core animation types and data structures.
//!
//! - `TimelineId`: Unique identifier for a timeline instance
//! - `OwnerId`: Identifier of the component that owns a group of timelines
//! - `AnimatableProperty`: The scalar a timeline writes
//! - `AnimationState`: Current state of a timeline

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a timeline instance.
///
/// Ids are handed out in increasing order, so sorting by id yields
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    /// Generate a new unique timeline ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a component owning timelines (a scene, a button, a popup panel).
///
/// Tearing a component down is a single `Scheduler::cancel_owner` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

impl OwnerId {
    /// Generate a new unique owner ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Timeline is advancing every tick.
    Running,
    /// Timeline reached its target.
    Finished,
    /// Timeline was cancelled before completion.
    Cancelled,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Running
    }
}

/// Scalar properties driven by timelines.
///
/// A `(OwnerId, AnimatableProperty)` pair has at most one active timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatableProperty {
    /// Whole-node opacity (scene cross-fade).
    Opacity,
    /// Render scale of an interactive control.
    Scale,
    /// Normalized progress of a popup reveal or dismiss.
    Reveal,
    /// Pulse scale of a directional cue sprite.
    CueScale,
    /// A plain timer whose completion is the only thing that matters.
    Hold,
}

impl AnimatableProperty {
    /// Get the property name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Reveal => "reveal",
            Self::CueScale => "cue-scale",
            Self::Hold => "hold",
        }
    }
}

impl std::fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let a = TimelineId::new();
        let b = TimelineId::new();
        assert!(b > a);

        let o1 = OwnerId::new();
        let o2 = OwnerId::new();
        assert_ne!(o1, o2);
    }

    #[test]
    fn test_property_names() {
        assert_eq!(AnimatableProperty::Opacity.to_string(), "opacity");
        assert_eq!(AnimatableProperty::CueScale.name(), "cue-scale");
    }
}

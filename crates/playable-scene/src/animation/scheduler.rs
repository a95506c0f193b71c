//! Frame scheduler coordinating every active timeline.
//!
//! The `Scheduler` is the registry all per-frame animation runs through. It
//! handles:
//! - Registering timelines, one per `(owner, property)` pair
//! - Cancelling the previous timeline when a property is re-animated
//! - Advancing all timelines once per tick, in registration order
//! - Running completion callbacks exactly once
//! - Reporting completion to state machines that poll for it
//! - Cancelling everything a component owns in one call
//!
//! # Usage
//!
//! ```
//! use playable_scene::animation::{AnimatableProperty, EasingFunction, OwnerId, Scheduler, TimelineStatus};
//!
//! let mut scheduler = Scheduler::new();
//! let owner = OwnerId::new();
//!
//! let id = scheduler.tween(owner, AnimatableProperty::Reveal, 0.0, 1.0, 0.5, EasingFunction::Linear);
//! scheduler.tick(0.25);
//! assert_eq!(scheduler.value(owner, AnimatableProperty::Reveal), Some(0.5));
//!
//! scheduler.tick(0.25);
//! assert_eq!(scheduler.poll(id), TimelineStatus::Completed { value: 1.0 });
//! ```

use std::collections::{BTreeMap, HashMap};

use super::easing::EasingFunction;
use super::events::{EventQueue, TimelineEvent};
use super::timeline::{Driver, Timeline};
use super::types::{AnimatableProperty, OwnerId, TimelineId};

/// Callback invoked once when a timeline finishes.
pub struct CompletionCallback(Box<dyn FnOnce() + Send>);

impl std::fmt::Debug for CompletionCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CompletionCallback")
    }
}

/// Result of polling a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineStatus {
    /// Still registered.
    Active,
    /// Reached its target since the last poll. Reported once.
    Completed { value: f32 },
    /// Cancelled, already reported, or never registered.
    Gone,
}

/// Central registry for all active timelines.
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Active timelines. Ids grow monotonically so iteration order is
    /// registration order.
    timelines: BTreeMap<TimelineId, Timeline>,

    /// Only one timeline can be active per (owner, property) pair.
    property_index: HashMap<(OwnerId, AnimatableProperty), TimelineId>,

    callbacks: HashMap<TimelineId, CompletionCallback>,

    /// Finished timelines awaiting a `poll`, with their pair and final value.
    settled: HashMap<TimelineId, (OwnerId, AnimatableProperty, f32)>,

    /// Last finished timeline per pair. A replacement on the pair drops its
    /// unpolled completion.
    settled_index: HashMap<(OwnerId, AnimatableProperty), TimelineId>,

    frame: u64,

    event_queue: EventQueue,
}

impl Scheduler {
    /// Create a new scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timeline for `(owner, property)`.
    ///
    /// Any timeline already animating the same pair is cancelled first and its
    /// completion callback is dropped without running.
    pub fn animate(
        &mut self,
        owner: OwnerId,
        property: AnimatableProperty,
        driver: Driver,
    ) -> TimelineId {
        self.cancel_property(owner, property);
        if let Some(stale) = self.settled_index.remove(&(owner, property)) {
            self.settled.remove(&stale);
        }

        let timeline = Timeline::new(owner, property, driver);
        let id = timeline.id;

        self.event_queue.push(TimelineEvent::Started {
            timeline_id: id,
            owner,
            property,
        });

        self.timelines.insert(id, timeline);
        self.property_index.insert((owner, property), id);

        id
    }

    /// Start a fixed-duration tween. Durations are in seconds.
    pub fn tween(
        &mut self,
        owner: OwnerId,
        property: AnimatableProperty,
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> TimelineId {
        self.animate(owner, property, Driver::tween(from, to, duration, easing))
    }

    /// Start a fixed per-frame step from `from` to `to`.
    pub fn step(
        &mut self,
        owner: OwnerId,
        property: AnimatableProperty,
        from: f32,
        to: f32,
        step: f32,
    ) -> TimelineId {
        self.animate(owner, property, Driver::step(from, to, step))
    }

    /// Attach a completion callback to an active timeline.
    ///
    /// Returns `false` if the timeline is not active.
    pub fn on_complete<F>(&mut self, id: TimelineId, callback: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if !self.timelines.contains_key(&id) {
            return false;
        }
        self.callbacks.insert(id, CompletionCallback(Box::new(callback)));
        true
    }

    /// Advance every active timeline by one frame of `dt` seconds.
    ///
    /// Timelines advance in registration order. Finished timelines are
    /// unregistered, then their callbacks run in the same order.
    pub fn tick(&mut self, dt: f32) {
        self.frame += 1;

        if self.timelines.is_empty() {
            return;
        }

        let mut finished = Vec::new();
        for (id, timeline) in self.timelines.iter_mut() {
            if !timeline.update(dt) {
                finished.push(*id);
            }
        }

        for id in finished {
            let Some(timeline) = self.timelines.remove(&id) else {
                continue;
            };
            self.property_index.remove(&(timeline.owner, timeline.property));
            self.settled
                .insert(id, (timeline.owner, timeline.property, timeline.value()));
            self.settled_index
                .insert((timeline.owner, timeline.property), id);
            self.event_queue.push(TimelineEvent::Completed {
                timeline_id: id,
                owner: timeline.owner,
                property: timeline.property,
            });

            if let Some(CompletionCallback(callback)) = self.callbacks.remove(&id) {
                callback();
            }
        }
    }

    /// Number of ticks processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current value of the timeline animating `(owner, property)`.
    pub fn value(&self, owner: OwnerId, property: AnimatableProperty) -> Option<f32> {
        let id = self.property_index.get(&(owner, property))?;
        self.timelines.get(id).map(Timeline::value)
    }

    /// Current value of an active timeline.
    pub fn timeline_value(&self, id: TimelineId) -> Option<f32> {
        self.timelines.get(&id).map(Timeline::value)
    }

    /// Move the target of a smoothing timeline.
    pub fn set_target(&mut self, id: TimelineId, target: f32) -> bool {
        self.timelines
            .get_mut(&id)
            .is_some_and(|timeline| timeline.retarget(target))
    }

    /// Report whether a timeline is still active or has completed.
    ///
    /// `Completed` is returned once per finished timeline; later polls report
    /// `Gone`.
    pub fn poll(&mut self, id: TimelineId) -> TimelineStatus {
        if self.timelines.contains_key(&id) {
            return TimelineStatus::Active;
        }
        match self.settled.remove(&id) {
            Some((owner, property, value)) => {
                if self.settled_index.get(&(owner, property)) == Some(&id) {
                    self.settled_index.remove(&(owner, property));
                }
                TimelineStatus::Completed { value }
            }
            None => TimelineStatus::Gone,
        }
    }

    /// Cancel a timeline by ID. Its completion callback never runs.
    pub fn cancel(&mut self, id: TimelineId) -> bool {
        let Some(mut timeline) = self.timelines.remove(&id) else {
            return false;
        };
        timeline.cancel();
        self.property_index.remove(&(timeline.owner, timeline.property));
        self.callbacks.remove(&id);
        self.event_queue.push(TimelineEvent::Cancelled {
            timeline_id: id,
            owner: timeline.owner,
            property: timeline.property,
        });
        true
    }

    /// Cancel the timeline animating `(owner, property)`, if any.
    pub fn cancel_property(&mut self, owner: OwnerId, property: AnimatableProperty) -> bool {
        match self.property_index.get(&(owner, property)).copied() {
            Some(id) => self.cancel(id),
            None => false,
        }
    }

    /// Cancel every timeline owned by `owner` and forget its unpolled
    /// completions. Returns the number of timelines cancelled.
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        let ids: Vec<TimelineId> = self
            .timelines
            .values()
            .filter(|t| t.owner == owner)
            .map(|t| t.id)
            .collect();

        self.settled.retain(|_, (settled_owner, _, _)| *settled_owner != owner);
        self.settled_index
            .retain(|(settled_owner, _), _| *settled_owner != owner);

        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Check if a timeline is registered.
    pub fn is_active(&self, id: TimelineId) -> bool {
        self.timelines.contains_key(&id)
    }

    /// Get the number of registered timelines.
    pub fn active_count(&self) -> usize {
        self.timelines.len()
    }

    /// Get the number of registered timelines owned by `owner`.
    pub fn owner_count(&self, owner: OwnerId) -> usize {
        self.timelines.values().filter(|t| t.owner == owner).count()
    }

    /// Cancel everything and forget unpolled completions.
    pub fn clear(&mut self) {
        let ids: Vec<TimelineId> = self.timelines.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
        self.settled.clear();
        self.settled_index.clear();
    }

    // ========================================================================
    // Event Methods
    // ========================================================================

    /// Drain all pending events from the queue.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TimelineEvent> + '_ {
        self.event_queue.drain()
    }

    /// Clear all pending events without processing them.
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }
}

// Completion callbacks are `Send`, so the scheduler can move across threads
// together with the rest of the presentation state.
static_assertions::assert_impl_all!(Scheduler: Send);

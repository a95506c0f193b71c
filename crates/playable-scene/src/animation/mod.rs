//! Animation module: the cooperative, per-frame timeline scheduler.
//!
//! This module provides:
//! - **Easing Functions**: timing curves, including the popup overshoot curve
//! - **Timelines**: tween, per-frame step, exponential smoothing, and pulse drivers
//! - **Scheduler**: the registry every timeline is polled through once per tick
//! - **Timeline Events**: lifecycle records for started/completed/cancelled timelines
//!
//! # Architecture
//!
//! ```text
//! Scheduler
//!   ├── Timelines keyed by TimelineId (registration order)
//!   ├── (OwnerId, AnimatableProperty) → TimelineId  (one per property)
//!   ├── Completion callbacks + settled completions awaiting poll
//!   └── EventQueue
//! ```

pub mod easing;
pub mod events;
pub mod scheduler;
pub mod timeline;
pub mod types;

pub use easing::EasingFunction;
pub use events::{EventQueue, TimelineEvent};
pub use scheduler::{Scheduler, TimelineStatus};
pub use timeline::{Driver, Timeline};
pub use types::{AnimatableProperty, AnimationState, OwnerId, TimelineId};

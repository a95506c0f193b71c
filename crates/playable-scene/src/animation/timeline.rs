//! Timelines: the runtime state of one animated scalar.
//!
//! A `Timeline` is driven by a `Driver`:
//! - `Tween`: fixed-duration interpolation on elapsed frame time
//! - `Step`: fixed change per frame toward a target (scene cross-fade)
//! - `Smooth`: continuous exponential smoothing toward a movable target
//! - `Pulse`: continuous sinusoid around a base value
//!
//! `Tween` and `Step` finish; `Smooth` and `Pulse` run until cancelled.
//!
//! # Example
//!
//! ```
//! use playable_scene::animation::{AnimatableProperty, Driver, EasingFunction, OwnerId, Timeline};
//!
//! let mut timeline = Timeline::new(
//!     OwnerId::new(),
//!     AnimatableProperty::Opacity,
//!     Driver::tween(0.0, 1.0, 0.5, EasingFunction::Linear),
//! );
//! assert!(timeline.update(0.25));
//! assert!((timeline.value() - 0.5).abs() < 1e-6);
//! assert!(!timeline.update(0.25));
//! ```

use super::easing::EasingFunction;
use super::types::{AnimatableProperty, AnimationState, OwnerId, TimelineId};

/// How a timeline produces its value each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Driver {
    /// Interpolate `from → to` over `duration` seconds.
    Tween {
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    },
    /// Move `from → to` by `step` every frame, regardless of the frame delta.
    Step { from: f32, to: f32, step: f32 },
    /// `value += (target - value) * factor` every frame; snaps once the
    /// residual drops below `epsilon`.
    Smooth {
        initial: f32,
        target: f32,
        factor: f32,
        epsilon: f32,
    },
    /// `base + sin(phase) * amplitude`, phase advancing at `speed` rad/s.
    Pulse {
        base: f32,
        amplitude: f32,
        speed: f32,
    },
}

impl Driver {
    /// Create a tween driver.
    pub fn tween(from: f32, to: f32, duration: f32, easing: EasingFunction) -> Self {
        Self::Tween {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Create a per-frame step driver. The step magnitude is used; its sign is
    /// derived from the direction of travel.
    pub fn step(from: f32, to: f32, step: f32) -> Self {
        Self::Step {
            from,
            to,
            step: step.abs(),
        }
    }

    /// Create an exponential smoothing driver resting at `value`.
    pub fn smooth(value: f32, factor: f32, epsilon: f32) -> Self {
        Self::Smooth {
            initial: value,
            target: value,
            factor,
            epsilon,
        }
    }

    /// Create a sinusoidal pulse driver.
    pub fn pulse(base: f32, amplitude: f32, speed: f32) -> Self {
        Self::Pulse {
            base,
            amplitude,
            speed,
        }
    }

    /// Value written before the first tick.
    pub fn initial_value(&self) -> f32 {
        match *self {
            Self::Tween { from, easing, to, .. } => from + (to - from) * easing.evaluate(0.0),
            Self::Step { from, .. } => from,
            Self::Smooth { initial, .. } => initial,
            Self::Pulse { base, .. } => base,
        }
    }

    /// Whether this driver ever finishes on its own.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Smooth { .. } | Self::Pulse { .. })
    }
}

/// A registered animation of one scalar property.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Unique identifier for this timeline.
    pub id: TimelineId,
    /// The component owning this timeline.
    pub owner: OwnerId,
    /// The property being animated.
    pub property: AnimatableProperty,
    /// How the value evolves.
    pub driver: Driver,
    /// Seconds of frame time accumulated while running.
    pub elapsed: f32,
    /// Frames advanced while running.
    pub frames: u64,
    /// Current state.
    pub state: AnimationState,
    value: f32,
    phase: f32,
}

impl Timeline {
    /// Create a running timeline.
    pub fn new(owner: OwnerId, property: AnimatableProperty, driver: Driver) -> Self {
        Self {
            id: TimelineId::new(),
            owner,
            property,
            driver,
            elapsed: 0.0,
            frames: 0,
            state: AnimationState::Running,
            value: driver.initial_value(),
            phase: 0.0,
        }
    }

    /// Current value of the animated property.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance the timeline by one frame of `dt` seconds.
    ///
    /// Returns `true` while the timeline is running, `false` once it has
    /// finished or was cancelled.
    pub fn update(&mut self, dt: f32) -> bool {
        match self.state {
            AnimationState::Finished | AnimationState::Cancelled => return false,
            AnimationState::Running => {}
        }

        self.elapsed += dt;
        self.frames += 1;

        match self.driver {
            Driver::Tween {
                from, to, easing, ..
            } => {
                let t = self.progress();
                self.value = from + (to - from) * easing.evaluate(t);
                if t >= 1.0 {
                    self.value = from + (to - from) * easing.evaluate(1.0);
                    self.state = AnimationState::Finished;
                }
            }
            Driver::Step { from, to, step } => {
                if to >= from {
                    self.value += step;
                    if self.value >= to {
                        self.value = to;
                        self.state = AnimationState::Finished;
                    }
                } else {
                    self.value -= step;
                    if self.value <= to {
                        self.value = to;
                        self.state = AnimationState::Finished;
                    }
                }
            }
            Driver::Smooth {
                target,
                factor,
                epsilon,
                ..
            } => {
                let diff = target - self.value;
                self.value += diff * factor;
                if diff.abs() < epsilon {
                    self.value = target;
                }
            }
            Driver::Pulse {
                base,
                amplitude,
                speed,
            } => {
                self.phase += dt * speed;
                self.value = base + self.phase.sin() * amplitude;
            }
        }

        self.state != AnimationState::Finished
    }

    /// Normalized progress from 0.0 to 1.0.
    ///
    /// Continuous drivers report 0.0.
    pub fn progress(&self) -> f32 {
        match self.driver {
            Driver::Tween { duration, .. } => {
                if duration > 0.0 {
                    (self.elapsed / duration).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            Driver::Step { from, to, .. } => {
                let span = (to - from).abs();
                if span > 0.0 {
                    ((self.value - from).abs() / span).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            Driver::Smooth { .. } | Driver::Pulse { .. } => 0.0,
        }
    }

    /// Move the target of a `Smooth` driver. Other drivers are left unchanged.
    ///
    /// Returns `true` if the target was updated.
    pub fn retarget(&mut self, new_target: f32) -> bool {
        match &mut self.driver {
            Driver::Smooth { target, .. } => {
                *target = new_target;
                true
            }
            _ => false,
        }
    }

    /// Cancel the timeline.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.state = AnimationState::Cancelled;
        }
    }

    /// Check if this timeline is still active.
    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Check if this timeline has completed successfully.
    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn timeline(driver: Driver) -> Timeline {
        Timeline::new(OwnerId::new(), AnimatableProperty::Opacity, driver)
    }

    #[test]
    fn test_tween_progress_and_finish() {
        let mut t = timeline(Driver::tween(10.0, 20.0, 1.0, EasingFunction::Linear));
        assert!(approx_eq(t.value(), 10.0));

        assert!(t.update(0.5));
        assert!(approx_eq(t.value(), 15.0));
        assert!(approx_eq(t.progress(), 0.5));

        assert!(!t.update(0.75));
        assert!(t.is_finished());
        assert_eq!(t.value(), 20.0);

        // Finished timelines never move again
        assert!(!t.update(1.0));
        assert_eq!(t.value(), 20.0);
    }

    #[test]
    fn test_tween_zero_delta_stalls() {
        let mut t = timeline(Driver::tween(0.0, 1.0, 0.5, EasingFunction::Linear));
        for _ in 0..100 {
            assert!(t.update(0.0));
        }
        assert_eq!(t.value(), 0.0);
        assert!(t.is_active());
    }

    #[test]
    fn test_zero_duration_tween_finishes_on_first_tick() {
        let mut t = timeline(Driver::tween(0.0, 1.0, 0.0, EasingFunction::Linear));
        assert!(!t.update(0.0));
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn test_step_down_reaches_exact_target() {
        let mut t = timeline(Driver::step(1.0, 0.0, 0.05));
        let mut last = t.value();
        let mut frames = 0;
        while t.update(1.0 / 60.0) {
            assert!(t.value() <= last);
            last = t.value();
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(t.value(), 0.0);
        assert!((19..=21).contains(&t.frames));
    }

    #[test]
    fn test_step_up_reaches_exact_target() {
        let mut t = timeline(Driver::step(0.0, 1.0, 0.05));
        while t.update(1.0 / 60.0) {}
        assert_eq!(t.value(), 1.0);
        assert!(approx_eq(t.progress(), 1.0));
    }

    #[test]
    fn test_smooth_converges_and_snaps() {
        let mut t = timeline(Driver::smooth(1.0, 0.15, 1e-3));
        assert!(t.retarget(0.9));
        for _ in 0..100 {
            assert!(t.update(1.0 / 60.0));
        }
        assert_eq!(t.value(), 0.9);
    }

    #[test]
    fn test_pulse_stays_within_amplitude() {
        let mut t = timeline(Driver::pulse(0.65, 0.05, 3.0));
        for _ in 0..240 {
            assert!(t.update(1.0 / 60.0));
            assert!(t.value() >= 0.6 - 1e-6 && t.value() <= 0.7 + 1e-6);
        }
    }

    #[test]
    fn test_retarget_ignored_for_tween() {
        let mut t = timeline(Driver::tween(0.0, 1.0, 1.0, EasingFunction::Linear));
        assert!(!t.retarget(5.0));
    }

    #[test]
    fn test_cancel() {
        let mut t = timeline(Driver::pulse(1.0, 0.1, 1.0));
        t.cancel();
        assert!(!t.is_active());
        assert!(!t.update(0.1));
        assert_eq!(t.state, AnimationState::Cancelled);
    }
}

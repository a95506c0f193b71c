//! Easing functions for animation timing.
//!
//! Two curves drive every tween in the playable:
//! - Linear
//! - Overshoot (rise past 1 with a quadratic ease-out, then settle back
//!   linearly)
//!
//! # Usage
//!
//! ```
//! use playable_scene::animation::easing::EasingFunction;
//!
//! let pop = EasingFunction::overshoot(1.2, 0.7);
//! assert!((pop.evaluate(0.7) - 1.2).abs() < 1e-4);
//! assert_eq!(pop.evaluate(1.0), 1.0);
//! ```

/// Easing function for animation timing.
///
/// Maps linear progress (0.0 to 1.0) to eased output. `Overshoot` leaves the
/// 0.0-1.0 range on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[default]
    Linear,

    /// Two-phase "pop" curve.
    ///
    /// Until `split` the output rises from 0 to `peak` along a quadratic
    /// ease-out; after `split` it falls linearly from `peak` to 1.
    Overshoot { peak: f32, split: f32 },
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress. Input is clamped
    /// to 0.0-1.0.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Overshoot { peak, split } => overshoot(*peak, *split, t),
        }
    }

    /// Overshoot curve peaking at `peak` when progress reaches `split`.
    ///
    /// `split` is clamped to `[0.01, 0.99]` so both phases keep a non-zero
    /// length.
    pub fn overshoot(peak: f32, split: f32) -> Self {
        Self::Overshoot {
            peak,
            split: split.clamp(0.01, 0.99),
        }
    }
}

#[inline]
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn overshoot(peak: f32, split: f32, t: f32) -> f32 {
    if t < split {
        ease_out_quad(t / split) * peak
    } else {
        let pt = (t - split) / (1.0 - split);
        peak + (1.0 - peak) * pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_overshoot_trajectory() {
        let pop = EasingFunction::overshoot(1.2, 0.7);

        assert!(approx_eq(pop.evaluate(0.0), 0.0));
        assert!(approx_eq(pop.evaluate(0.35), 0.75 * 1.2));
        assert!(approx_eq(pop.evaluate(0.7), 1.2));
        assert!(approx_eq(pop.evaluate(0.85), 1.1));
        assert!(approx_eq(pop.evaluate(1.0), 1.0));

        // Rising during the first phase, falling during the second
        assert!(pop.evaluate(0.5) < pop.evaluate(0.69));
        assert!(pop.evaluate(0.75) > pop.evaluate(0.95));
    }

    #[test]
    fn test_clamping() {
        let pop = EasingFunction::overshoot(1.2, 0.7);
        assert!(approx_eq(pop.evaluate(-0.5), 0.0));
        assert!(approx_eq(pop.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_default_is_linear() {
        assert_eq!(EasingFunction::default(), EasingFunction::Linear);
    }

    #[test]
    fn test_overshoot_split_is_clamped() {
        assert_eq!(
            EasingFunction::overshoot(1.2, 1.0),
            EasingFunction::Overshoot { peak: 1.2, split: 0.99 }
        );
        let pop = EasingFunction::overshoot(1.2, 0.0);
        assert!(pop.evaluate(0.5).is_finite());
    }
}

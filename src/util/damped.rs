//! Time-based exponential damping between a source and a target value.
//!
//! A [`DampedValue`] never jumps: retargeting restarts the curve from the
//! value currently on screen, so motion stays continuous no matter how
//! often input arrives.

use glam::{Vec2, Vec3};

/// Values that can be interpolated component-wise by a [`DampedValue`].
pub trait Damp: Copy {
    /// Linear interpolation from `self` toward `other` by `t` in `[0, 1]`.
    fn lerp_to(self, other: Self, t: f32) -> Self;

    /// Largest absolute component difference between two values.
    fn max_delta(self, other: Self) -> f32;
}

impl Damp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    fn max_delta(self, other: Self) -> f32 {
        (other - self).abs()
    }
}

impl Damp for Vec2 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    #[inline]
    fn max_delta(self, other: Self) -> f32 {
        (other - self).abs().max_element()
    }
}

impl Damp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    #[inline]
    fn max_delta(self, other: Self) -> f32 {
        (other - self).abs().max_element()
    }
}

/// A value that eases toward its target with half-life semantics.
///
/// After `elapsed` seconds the remaining distance to the target is
/// `0.5^(elapsed / half_life)` of the distance at the last [`goto`].
/// A half-life of zero snaps straight to the target.
///
/// [`goto`]: DampedValue::goto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedValue<T: Damp> {
    source: T,
    target: T,
    value: T,
    elapsed: f32,
    half_life: f32,
}

impl<T: Damp> DampedValue<T> {
    /// Create a settled value (source, target and value all equal).
    pub fn new(initial: T) -> Self {
        Self {
            source: initial,
            target: initial,
            value: initial,
            elapsed: 0.0,
            half_life: 0.0,
        }
    }

    /// Start easing toward `target`, restarting the curve from the current
    /// value. `half_life <= 0` snaps immediately.
    pub fn goto(&mut self, target: T, half_life: f32) {
        self.source = self.value;
        self.target = target;
        self.elapsed = 0.0;
        self.half_life = half_life.max(0.0);
        if self.half_life == 0.0 {
            self.value = target;
            self.source = target;
        }
    }

    /// Jump to `value` with no easing.
    pub fn snap(&mut self, value: T) {
        *self = Self::new(value);
    }

    /// Advance the curve by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.half_life == 0.0 {
            self.value = self.target;
            return;
        }
        self.elapsed += dt.max(0.0);
        let t = 1.0 - 0.5_f32.powf(self.elapsed / self.half_life);
        self.value = self.source.lerp_to(self.target, t);
    }

    /// Rebase source, value and target by `f` without changing the
    /// remaining motion. Used to keep angles inside a canonical range.
    pub fn rebase(&mut self, f: impl Fn(T) -> T) {
        self.source = f(self.source);
        self.value = f(self.value);
        self.target = f(self.target);
    }

    /// Rebase only the source and current value, leaving the target alone.
    pub(crate) fn rebase_source(&mut self, f: impl Fn(T) -> T) {
        self.source = f(self.source);
        self.value = f(self.value);
    }

    /// Current interpolated value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Value the curve is heading toward.
    #[inline]
    #[must_use]
    pub fn target(&self) -> T {
        self.target
    }

    /// Value at the last retarget.
    #[inline]
    #[must_use]
    pub fn source(&self) -> T {
        self.source
    }

    /// Seconds since the last retarget.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the value is within `epsilon` of the target in every
    /// component.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.value.max_delta(self.target) <= epsilon
    }
}

impl<T: Damp + Default> Default for DampedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

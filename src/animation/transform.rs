use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::animation::arrangement::Arrangement;
use crate::animation::tween::Tween;
use crate::utils::Time;

/// A mutation of an [`Arrangement`] that can be applied partially.
///
/// `tween` is the progress in `[0, 1]`. Implementations must be linear in
/// the sense that 0 leaves the arrangement untouched and 1 applies the full
/// effect, and they must accumulate onto the arrangement rather than
/// overwrite it, since several transforms are folded in sequence.
pub trait Transformer: fmt::Debug + Send + Sync {
    fn transform(&self, ar: &mut Arrangement, tween: f32);
}

/// Rotates counter-clockwise, measured in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate(pub f32);

impl Transformer for Rotate {
    fn transform(&self, ar: &mut Arrangement, tween: f32) {
        ar.rotation += tween * self.0;
    }
}

/// Moves the arrangement offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move(pub Vec2);

impl Move {
    #[must_use]
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }
}

impl Transformer for Move {
    fn transform(&self, ar: &mut Arrangement, tween: f32) {
        ar.offset.x += self.0.x * tween;
        ar.offset.y += self.0.y * tween;
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({},{})", self.0.x, self.0.y)
    }
}

/// A transformer scheduled over the window `[t0, t1]`.
///
/// Cloning is cheap: the transformer is shared.
#[derive(Debug, Clone)]
pub struct Transform {
    pub(crate) t0: Time,
    pub(crate) t1: Time,
    pub(crate) tween: Tween,
    pub(crate) transformer: Arc<dyn Transformer>,
}

impl Transform {
    /// Creates a linear transform over `[t0, t1]`. A reversed window is
    /// put back in order.
    #[must_use]
    pub fn new(t0: Time, t1: Time, transformer: impl Transformer + 'static) -> Self {
        Self::from_shared(t0, t1, Tween::Linear, Arc::new(transformer))
    }

    #[must_use]
    pub fn from_shared(t0: Time, t1: Time, tween: Tween, transformer: Arc<dyn Transformer>) -> Self {
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        Self {
            t0,
            t1,
            tween,
            transformer,
        }
    }

    /// A transform without a window, for use in an
    /// [`AnimationState`](crate::animation::AnimationState). It is scheduled
    /// over the whole state when the state is entered.
    #[must_use]
    pub fn template(transformer: impl Transformer + 'static) -> Self {
        Self::new(0, 0, transformer)
    }

    /// Replaces the tween curve.
    #[must_use]
    pub fn with_tween(mut self, tween: Tween) -> Self {
        self.tween = tween;
        self
    }

    /// Same transformer and tween over a new window.
    #[must_use]
    pub fn rescheduled(&self, t0: Time, t1: Time) -> Self {
        Self::from_shared(t0, t1, self.tween, Arc::clone(&self.transformer))
    }

    #[inline]
    #[must_use]
    pub fn t0(&self) -> Time {
        self.t0
    }

    #[inline]
    #[must_use]
    pub fn t1(&self) -> Time {
        self.t1
    }

    #[inline]
    #[must_use]
    pub fn tween(&self) -> Tween {
        self.tween
    }

    #[inline]
    #[must_use]
    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }

    /// Whether the window has fully elapsed at `t`.
    #[inline]
    #[must_use]
    pub fn is_expired(&self, t: Time) -> bool {
        self.t1 <= t
    }

    /// Samples the tween at `t` and applies the transformer to `ar`.
    pub fn apply(&self, ar: &mut Arrangement, t: Time) {
        let tween = self.tween.sample(self.t0, self.t1, t);
        self.transformer.transform(ar, tween);
    }

    /// Applies the full effect to `ar`.
    pub fn commit(&self, ar: &mut Arrangement) {
        self.transformer.transform(ar, 1.0);
    }

    /// Whether `other` is this exact scheduled transform: same shared
    /// transformer over the same window.
    #[must_use]
    pub fn same_as(&self, other: &Transform) -> bool {
        Arc::ptr_eq(&self.transformer, &other.transformer) && self.t0 == other.t0 && self.t1 == other.t1
    }
}

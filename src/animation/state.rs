use rustc_hash::FxHashMap;

use crate::animation::transform::Transform;
use crate::scene::NodeHandle;
use crate::utils::Time;

/// One named state of an [`AnimationMachine`](crate::animation::AnimationMachine).
///
/// On entering the state, every `(target, transform)` pair is installed on
/// the target's arrangement. Targets are weak handles: a target that has
/// left the scene is skipped.
#[derive(Debug, Clone)]
pub struct AnimationState {
    /// Ticks spent in this state before advancing
    pub duration: Time,
    /// State entered when `duration` has elapsed
    pub next: String,
    /// Transform templates, keyed by target node
    pub transforms: FxHashMap<NodeHandle, Transform>,
}

impl AnimationState {
    #[must_use]
    pub fn new(duration: Time, next: impl Into<String>) -> Self {
        Self {
            duration,
            next: next.into(),
            transforms: FxHashMap::default(),
        }
    }

    /// Adds a transform for `target`, replacing any earlier one.
    #[must_use]
    pub fn with_transform(mut self, target: NodeHandle, transform: Transform) -> Self {
        self.transforms.insert(target, transform);
        self
    }

    /// Schedules a template for a state entered at `now`.
    ///
    /// A template with an empty window spans the whole state. A template
    /// with a non-empty window keeps that window, relative to `now`.
    #[must_use]
    pub(crate) fn schedule(&self, template: &Transform, now: Time) -> Transform {
        if template.t1() > template.t0() {
            template.rescheduled(now + template.t0(), now + template.t1())
        } else {
            template.rescheduled(now, now + self.duration)
        }
    }
}

use glam::{Affine2, Vec2};

use crate::animation::affine::affine;
use crate::animation::transform::Transform;
use crate::engine::{SpriteEngine, SubTexture};
use crate::scene::NodeHandle;
use crate::utils::Time;

/// The 2D pose of one scene node, described with high-level parameters,
/// plus the transforms currently animating it.
///
/// The stored fields are the *base* pose. The pose shown on a given frame is
/// the base pose with every active transform folded in, in insertion order
/// (see [`Arrangement::evaluate`]). Transforms do not commute, so the order
/// of `transforms` is never changed. [`Arrangement::squash`] removes a
/// committed prefix; [`Arrangement::retire`] and [`Arrangement::cancel`]
/// remove one named transform.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    /// Distance between parent origin and pivot
    pub offset: Vec2,
    /// Point on the sized, unrotated node
    pub pivot: Vec2,
    /// Optional bounding size for scaling
    pub size: Option<Vec2>,
    /// Radians, counter-clockwise
    pub rotation: f32,
    /// Optional renderer texture region
    pub texture: Option<SubTexture>,
    /// Active transforms applied on arrange
    pub transforms: Vec<Transform>,
}

impl Arrangement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Chainable configuration ===

    #[must_use]
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, x: f32, y: f32) -> Self {
        self.pivot = Vec2::new(x, y);
        self
    }

    #[must_use]
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Vec2::new(w, h));
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: SubTexture) -> Self {
        self.texture = Some(texture);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Local affine of the base pose.
    #[must_use]
    pub fn affine(&self) -> Affine2 {
        affine(self.offset, self.pivot, self.rotation, self.size)
    }

    /// Local affine of an optional arrangement; identity for `None`.
    #[must_use]
    pub fn affine_of(ar: Option<&Arrangement>) -> Affine2 {
        ar.map_or(Affine2::IDENTITY, Arrangement::affine)
    }

    /// Copy of the base pose without transforms.
    fn pose(&self) -> Arrangement {
        Arrangement {
            offset: self.offset,
            pivot: self.pivot,
            size: self.size,
            rotation: self.rotation,
            texture: self.texture,
            transforms: Vec::new(),
        }
    }

    /// The pose at time `t`: a scratch copy of the base pose with every
    /// active transform applied in order. `self` is not modified.
    #[must_use]
    pub fn evaluate(&self, t: Time) -> Arrangement {
        let mut pose = self.pose();
        for transform in &self.transforms {
            transform.apply(&mut pose, t);
        }
        pose
    }

    /// Evaluates the pose at `t` and hands its texture and affine to the
    /// rendering collaborator for `node`.
    pub fn arrange<E: SpriteEngine + ?Sized>(&self, engine: &mut E, node: NodeHandle, t: Time) {
        let pose = self.evaluate(t);
        engine.set_texture(node, t, pose.texture);
        engine.set_transform(node, t, pose.affine());
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Commits every leading transform that has expired at `t` into the base
    /// pose and removes it. Returns how many were committed.
    ///
    /// Scanning stops at the first transform still running: a later
    /// transform is never committed ahead of an earlier one, even if its own
    /// window has already ended.
    pub fn squash(&mut self, t: Time) -> usize {
        let mut remove = 0;
        let transforms = std::mem::take(&mut self.transforms);
        for transform in &transforms {
            if !transform.is_expired(t) {
                break;
            }
            transform.commit(self);
            log::debug!(
                "squash: {:?} -> offset={} rotation={}",
                transform.transformer(),
                self.offset,
                self.rotation
            );
            remove += 1;
        }
        self.transforms = transforms;
        self.transforms.drain(..remove);
        remove
    }

    /// Appends `transform`, first retiring `replaces` at `now`.
    ///
    /// A state machine re-entering a target passes the transform it
    /// installed there before. Nothing else in the queue is touched, so
    /// other expired transforms stay until the next [`Arrangement::squash`].
    pub fn install(&mut self, transform: Transform, replaces: Option<&Transform>, now: Time) {
        if let Some(previous) = replaces {
            self.retire(previous, now);
        }
        self.transforms.push(transform);
    }

    /// Commits `transform` at its tween value for `now` (full effect once
    /// expired) and removes it from the queue. Returns `false` if it is no
    /// longer queued, e.g. because a squash already committed it.
    ///
    /// The commit happens ahead of any earlier transform still running.
    /// Built-in transformers only add to separate fields, so the folded
    /// pose is the same.
    pub fn retire(&mut self, transform: &Transform, now: Time) -> bool {
        let Some(index) = self.position_of(transform) else {
            return false;
        };
        let retired = self.transforms.remove(index);
        retired.apply(self, now);
        log::debug!(
            "retire: {:?} at {now} -> offset={} rotation={}",
            retired.transformer(),
            self.offset,
            self.rotation
        );
        true
    }

    /// Removes `transform` from the queue without applying it. Returns
    /// `false` if it is no longer queued.
    pub fn cancel(&mut self, transform: &Transform) -> bool {
        match self.position_of(transform) {
            Some(index) => {
                self.transforms.remove(index);
                true
            }
            None => false,
        }
    }

    fn position_of(&self, transform: &Transform) -> Option<usize> {
        self.transforms.iter().position(|tr| tr.same_as(transform))
    }

    /// Whether any transform is still running at `t`.
    #[must_use]
    pub fn is_animating(&self, t: Time) -> bool {
        self.transforms.iter().any(|tr| !tr.is_expired(t))
    }
}

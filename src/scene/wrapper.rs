//! Chainable node operation wrapper.
//!
//! [`SceneNode`] borrows a [`Scene`] mutably and provides a fluent API
//! for setting up a node's base pose without `arrangement_mut().unwrap()`.
//!
//! Setters create a default [`Arrangement`] on first use. All methods
//! silently no-op when the handle is stale.
//!
//! # Example
//!
//! ```rust,ignore
//! scene.node(skull)
//!     .set_offset(24.0, -36.0)
//!     .set_pivot(18.0, 18.0)
//!     .set_size(36.0, 36.0)
//!     .set_texture(frame);
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]
use glam::Vec2;

use crate::animation::{Arrangement, Transform};
use crate::engine::SubTexture;
use crate::scene::NodeHandle;
use crate::scene::scene::Scene;

/// Temporary mutable borrow of a scene node for chainable operations.
pub struct SceneNode<'a> {
    scene: &'a mut Scene,
    handle: NodeHandle,
}

impl<'a> SceneNode<'a> {
    #[inline]
    pub fn new(scene: &'a mut Scene, handle: NodeHandle) -> Self {
        Self { scene, handle }
    }

    /// Returns the underlying handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    fn with_arrangement(self, f: impl FnOnce(&mut Arrangement)) -> Self {
        if self.scene.contains(self.handle) {
            if !self.scene.arrangements.contains_key(self.handle) {
                self.scene.arrangements.insert(self.handle, Arrangement::new());
            }
            if let Some(ar) = self.scene.arrangements.get_mut(self.handle) {
                f(ar);
            }
        }
        self
    }

    // -- Pose setters (chainable) --

    #[inline]
    pub fn set_offset(self, x: f32, y: f32) -> Self {
        self.with_arrangement(|ar| ar.offset = Vec2::new(x, y))
    }

    #[inline]
    pub fn set_pivot(self, x: f32, y: f32) -> Self {
        self.with_arrangement(|ar| ar.pivot = Vec2::new(x, y))
    }

    #[inline]
    pub fn set_size(self, w: f32, h: f32) -> Self {
        self.with_arrangement(|ar| ar.size = Some(Vec2::new(w, h)))
    }

    /// Removes scaling.
    #[inline]
    pub fn clear_size(self) -> Self {
        self.with_arrangement(|ar| ar.size = None)
    }

    #[inline]
    pub fn set_rotation(self, radians: f32) -> Self {
        self.with_arrangement(|ar| ar.rotation = radians)
    }

    #[inline]
    pub fn set_texture(self, texture: SubTexture) -> Self {
        self.with_arrangement(|ar| ar.texture = Some(texture))
    }

    /// Appends a transform directly (outside of any state machine).
    #[inline]
    pub fn push_transform(self, transform: Transform) -> Self {
        self.with_arrangement(|ar| ar.transforms.push(transform))
    }

    /// Sets node visibility.
    #[inline]
    pub fn set_visible(self, visible: bool) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.visible = visible;
        }
        self
    }
}

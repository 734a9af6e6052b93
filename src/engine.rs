//! Rendering Collaborator
//!
//! The arrangement core never draws anything. Once per frame it hands every
//! arranged node's texture and local affine to a [`SpriteEngine`], which is
//! implemented by whatever sprite renderer hosts the game.
//!
//! Textures are owned by the renderer. The core only stores [`SubTexture`]
//! values, which are plain copyable references into renderer storage.

use glam::{Affine2, UVec2};
use slotmap::new_key_type;

use crate::scene::NodeHandle;
use crate::utils::Time;

new_key_type! {
    /// Handle to a texture owned by the rendering collaborator.
    pub struct TextureKey;
}

/// A rectangular region of a renderer-owned texture (e.g. one frame of a
/// sprite sheet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTexture {
    pub texture: TextureKey,
    /// Top-left corner in texels (inclusive)
    pub min: UVec2,
    /// Bottom-right corner in texels (exclusive)
    pub max: UVec2,
}

impl SubTexture {
    #[must_use]
    pub fn new(texture: TextureKey, min: UVec2, max: UVec2) -> Self {
        Self { texture, min, max }
    }

    /// Width and height of the region in texels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.max.saturating_sub(self.min)
    }
}

/// Per-frame sink for arranged node state.
///
/// Both calls carry the node, the animation-clock time of the frame and the
/// value, and are issued in that order (texture first) for every arranged
/// node on every frame.
pub trait SpriteEngine {
    fn set_texture(&mut self, node: NodeHandle, t: Time, texture: Option<SubTexture>);

    fn set_transform(&mut self, node: NodeHandle, t: Time, affine: Affine2);
}

//! Affine builder.
//!
//! Composes a node's local 2D affine from its high-level pose parameters.
//! The order is fixed:
//!
//! ```text
//! identity · translate(offset) · rotate(rotation) · translate(-pivot) · scale(size)
//! ```
//!
//! so a local point is first scaled, then moved so the pivot sits at the
//! origin, rotated about it, and finally placed at `offset` in the parent.

use glam::{Affine2, Vec2};

/// Builds the affine for a pose.
///
/// The rotation step is skipped when `rotation` is exactly zero and the
/// scale step when `size` is `None`, so an unrotated, unsized pose is a
/// pure translation by `offset - pivot`.
#[must_use]
pub fn affine(offset: Vec2, pivot: Vec2, rotation: f32, size: Option<Vec2>) -> Affine2 {
    let mut a = Affine2::IDENTITY;
    a = a * Affine2::from_translation(offset);
    if rotation != 0.0 {
        a = a * Affine2::from_angle(rotation);
    }
    a = a * Affine2::from_translation(-pivot);
    if let Some(size) = size {
        a = a * Affine2::from_scale(size);
    }
    a
}

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! 2D sprite arrangement core.
//!
//! Computes per-node 2D affines over animation-clock time from a base pose
//! and a queue of tweened transforms, and drives those transforms with
//! per-entity animation state machines. Drawing is left to a
//! [`SpriteEngine`] supplied by the host.

pub mod animation;
pub mod engine;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{
    AnimationMachine, AnimationState, AnimationSystem, Arrangement, Move, Rotate, Transform,
    Transformer, Tween,
};
pub use engine::{SpriteEngine, SubTexture, TextureKey};
pub use errors::{ArrangeError, Result};
pub use scene::{Node, NodeHandle, Scene, SceneNode};
pub use settings::AnimationSettings;
pub use utils::{Clock, Time};

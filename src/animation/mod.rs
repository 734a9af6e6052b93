//! Animation Module
//!
//! Time-driven arrangement of 2D sprite nodes:
//!
//! - [`affine`]: composes a pose into a local `Affine2`
//! - [`Arrangement`]: base pose plus active [`Transform`]s; arrange/squash
//! - [`Transformer`]: the mutation capability ([`Rotate`], [`Move`], ...)
//! - [`Tween`]: progress curves over a transform window
//! - [`AnimationMachine`]: per-entity state machine installing transforms
//! - [`AnimationSystem`]: ticks every machine in a scene

pub mod affine;
pub mod arrangement;
pub mod machine;
pub mod state;
pub mod system;
pub mod transform;
pub mod tween;

pub use affine::affine;
pub use arrangement::Arrangement;
pub use machine::{AnimationMachine, AnimationMachineBuilder, ArrangementTargets};
pub use state::AnimationState;
pub use system::AnimationSystem;
pub use transform::{Move, Rotate, Transform, Transformer};
pub use tween::Tween;

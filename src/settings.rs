//! Animation Settings
//!
//! Runtime knobs for the per-frame update performed by `Scene::update`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sprite_arrange::settings::AnimationSettings;
//!
//! // Default: 60 ticks per second, squash every frame.
//! let settings = AnimationSettings::default();
//!
//! // Keep expired transforms queued (e.g. for debugging the fold).
//! let settings = AnimationSettings {
//!     auto_squash: false,
//!     ..Default::default()
//! };
//!
//! let scene = Scene::with_settings(settings);
//! ```

use crate::utils::time::TICKS_PER_SECOND;

/// Configuration for the arrangement and animation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Animation-clock ticks per real-time second. Only used to build the
    /// scene's [`Clock`](crate::utils::Clock); scheduling itself is in ticks.
    pub ticks_per_second: i64,

    /// Commit and prune expired transforms after the animation pass of every
    /// frame.
    ///
    /// Evaluation folds all active transforms each frame, so the visual
    /// result is the same either way. Squashing keeps the active list short
    /// for long-lived arrangements. With squashing off, a machine still
    /// commits the one transform it replaces on a target; everything else
    /// stays queued.
    pub auto_squash: bool,

    /// Upper bound on state transitions a single machine may take in one
    /// tick. `None` uses the machine's number of states, which is enough to
    /// walk any chain of zero-duration states once.
    pub zero_duration_advance_limit: Option<usize>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            auto_squash: true,
            zero_duration_advance_limit: None,
        }
    }
}

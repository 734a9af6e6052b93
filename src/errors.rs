//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ArrangeError`] covers configuration failures that
//! are detected while building an [`AnimationMachine`]. Everything that can
//! go wrong at runtime (a target node that has been removed, a zero-length
//! state) is handled as a defined no-op instead of an error, so a machine
//! that was built successfully never fails mid-game.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sprite_arrange::errors::{ArrangeError, Result};
//!
//! fn build() -> Result<AnimationMachine> {
//!     AnimationMachine::builder("init")
//!         .state("init", AnimationState::new(60, "init"))
//!         .build()
//! }
//! ```
//!
//! [`AnimationMachine`]: crate::animation::AnimationMachine

use thiserror::Error;

/// The main error type for the arrangement core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrangeError {
    // ========================================================================
    // State Table Errors
    // ========================================================================
    /// The machine was built without any states.
    #[error("Animation state table is empty")]
    EmptyStateTable,

    /// The initial state is not part of the state table.
    #[error("Initial animation state not found: {0}")]
    UnknownInitialState(String),

    /// A state names a `next` state that does not exist.
    #[error("Animation state '{state}' transitions to unknown state '{next}'")]
    UnknownNextState {
        /// The state holding the bad reference
        state: String,
        /// The missing target state
        next: String,
    },

    /// A state was declared with a negative duration.
    #[error("Animation state '{state}' has negative duration {duration}")]
    NegativeDuration {
        /// The offending state
        state: String,
        /// The declared duration in ticks
        duration: i64,
    },
}

/// Alias for `Result<T, ArrangeError>`.
pub type Result<T> = std::result::Result<T, ArrangeError>;

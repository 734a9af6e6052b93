//! Utility Module
//!
//! - [`time`]: the animation clock and the [`Time`] tick unit
//!
//! ```rust,ignore
//! use sprite_arrange::utils::Clock;
//!
//! let mut clock = Clock::new();
//! loop {
//!     let now = clock.tick();
//!     scene.update(&mut engine, now);
//! }
//! ```

pub mod time;

pub use time::{Clock, TICKS_PER_SECOND, Time};

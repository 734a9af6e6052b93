#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Animation-clock time, measured in ticks.
///
/// All scheduling in the crate (transform windows, state durations) is
/// expressed in this unit.
pub type Time = i64;

/// Default number of animation-clock ticks per real-time second.
pub const TICKS_PER_SECOND: i64 = 60;

/// Converts a wall-clock duration into animation-clock ticks.
#[must_use]
pub fn ticks_from_duration(elapsed: Duration, ticks_per_second: i64) -> Time {
    (elapsed.as_nanos() * u128::from(ticks_per_second.unsigned_abs()) / 1_000_000_000) as Time
}

/// Monotonic animation clock.
///
/// Maps real time elapsed since creation onto [`Time`] ticks. The frame
/// driver samples [`Clock::now`] once per frame and passes the value to
/// `Scene::update`.
pub struct Clock {
    start_time: Instant,
    ticks_per_second: i64,
    /// Time of the last [`Clock::tick`]
    pub last: Time,
    /// Ticks elapsed between the last two [`Clock::tick`] calls
    pub delta: Time,
    /// Number of frames sampled with [`Clock::tick`]
    pub frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Creates a new clock starting from now, running at 60 ticks per second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate(TICKS_PER_SECOND)
    }

    #[must_use]
    pub fn with_rate(ticks_per_second: i64) -> Self {
        Self {
            start_time: Instant::now(),
            ticks_per_second,
            last: 0,
            delta: 0,
            frame_count: 0,
        }
    }

    /// Current animation-clock time.
    #[must_use]
    pub fn now(&self) -> Time {
        ticks_from_duration(self.start_time.elapsed(), self.ticks_per_second)
    }

    /// Samples the clock for a new frame and returns the frame time.
    pub fn tick(&mut self) -> Time {
        let now = self.now();
        self.delta = now - self.last;
        self.last = now;
        self.frame_count += 1;
        now
    }

    #[must_use]
    pub fn ticks_per_second(&self) -> i64 {
        self.ticks_per_second
    }
}

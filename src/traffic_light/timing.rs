//! Sources of time for the cycling thread.
//!
//! The light never touches the global random generator or the system clock directly, it asks a
//! [`DwellTime`] how long to hold a phase and a [`Clock`] what time it is. Tests swap in
//! [`FixedDwell`] and [`SteppingClock`] to get the same sequence of flips on every run.

use std::time::{Duration, Instant};

use rand::Rng;

pub const DEFAULT_MIN_DWELL: Duration = Duration::from_millis(4000);
pub const DEFAULT_MAX_DWELL: Duration = Duration::from_millis(6000);

/// Decides how long a phase is held before the light flips
pub trait DwellTime: Send + 'static {
    /// Called once per loop iteration, the result is compared against the time since the last flip
    fn next_dwell(&mut self) -> Duration;
}

/// Uniformly random dwell time, drawn from `min..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDwell {
    min: Duration,
    max: Duration,
}

impl RandomDwell {
    /// Panics if `min > max`, use [`crate::SimulationConfig::validate`] for untrusted input
    pub fn new(min: Duration, max: Duration) -> Self {
        assert!(min <= max, "dwell range is empty: {min:?} > {max:?}");
        Self { min, max }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Default for RandomDwell {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DWELL, DEFAULT_MAX_DWELL)
    }
}

impl DwellTime for RandomDwell {
    fn next_dwell(&mut self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDwell(pub Duration);

impl DwellTime for FixedDwell {
    fn next_dwell(&mut self) -> Duration {
        self.0
    }
}

/// Monotonic time source
pub trait Clock: Send + 'static {
    /// Time elapsed since the clock's own origin
    fn now(&mut self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that moves forward by `step` every time it is read, regardless of real time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppingClock {
    step: Duration,
    elapsed: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            elapsed: Duration::ZERO,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&mut self) -> Duration {
        self.elapsed += self.step;
        self.elapsed
    }
}

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use super::{
    cycler::{Cycler, PhaseCycle},
    phase::{AtomicPhase, Phase},
    timing::{Clock, DwellTime, RandomDwell, SystemClock},
};
use crate::{config::SimulationConfig, message_queue::MessageQueue, Error, Result};

pub const DEFAULT_TICK: Duration = Duration::from_millis(1);
/// Longest pause between two loop iterations, also the longest `shutdown` waits on a cycler
pub const MAX_TICK: Duration = Duration::from_millis(1000);

/// A two-phase traffic light driven by a background thread.
///
/// [`TrafficLight::simulate`] starts the thread that flips the light between red and green and
/// publishes the phase on every iteration. Any number of threads may then block in
/// [`TrafficLight::wait_for_green`] until they see green.
///
/// Dropping the light stops and joins its cycling threads.
pub struct TrafficLight<D = RandomDwell, C = SystemClock> {
    current_phase: Arc<AtomicPhase>,
    message_queue: Arc<MessageQueue<Phase>>,
    cyclers: Mutex<Vec<Cycler>>,
    dwell: D,
    clock: C,
    tick_interval: Duration,
}

impl TrafficLight {
    /// Red light that holds each phase for 4 to 6 seconds
    pub fn new() -> Self {
        Self::build(RandomDwell::default(), SystemClock::new(), DEFAULT_TICK)
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            RandomDwell::new(config.min_dwell(), config.max_dwell()),
            SystemClock::new(),
            config.tick(),
        ))
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, C> TrafficLight<D, C>
where
    D: DwellTime + Clone,
    C: Clock + Clone,
{
    /// Every thread started by `simulate` gets its own clone of `dwell` and `clock`.
    ///
    /// `tick_interval` must be non-zero and at most [`MAX_TICK`], otherwise [`Error::InvalidTick`].
    pub fn with_timing(dwell: D, clock: C, tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() || tick_interval > MAX_TICK {
            return Err(Error::InvalidTick);
        }
        Ok(Self::build(dwell, clock, tick_interval))
    }

    fn build(dwell: D, clock: C, tick_interval: Duration) -> Self {
        Self {
            current_phase: Arc::new(AtomicPhase::new(Phase::Red)),
            message_queue: Arc::new(MessageQueue::new()),
            cyclers: Mutex::new(Vec::new()),
            dwell,
            clock,
            tick_interval,
        }
    }

    /// Starts a cycling thread and returns immediately.
    ///
    /// Call this once per light. Each extra call starts another thread flipping the same phase.
    pub fn simulate(&self) -> Result<()> {
        let cycle = PhaseCycle::new(
            self.current_phase.clone(),
            self.message_queue.clone(),
            self.dwell.clone(),
            self.clock.clone(),
        );

        let mut cyclers = self.cyclers.lock().unwrap_or_else(PoisonError::into_inner);
        let name = format!("phase-cycler-{}", cyclers.len());
        debug!(%name, tick = ?self.tick_interval, "starting simulation");
        let cycler = Cycler::spawn(name, cycle, self.tick_interval).map_err(Error::Spawn)?;
        cyclers.push(cycler);
        Ok(())
    }

    /// Best effort snapshot, the phase may change right after it is read
    pub fn current_phase(&self) -> Phase {
        self.current_phase.load()
    }

    /// Blocks until a green phase is received from the cycling thread.
    ///
    /// [`TrafficLight::simulate`] must have been called and the light must not be shut down,
    /// otherwise this never returns. The light may already be red again once this returns.
    pub fn wait_for_green(&self) {
        loop {
            let phase = self.message_queue.receive();
            self.current_phase.store(phase);
            trace!(%phase, "received phase");
            if phase == Phase::Green {
                return;
            }
        }
    }

    /// Like [`TrafficLight::wait_for_green`], but gives up after `timeout`.
    /// Returns whether green was seen.
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait_for_green();
            return true;
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.message_queue.receive_timeout(remaining) {
                Some(phase) => {
                    self.current_phase.store(phase);
                    trace!(%phase, "received phase");
                    if phase == Phase::Green {
                        return true;
                    }
                }
                None => return false,
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.cyclers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| !c.is_finished())
    }

    /// Stops every cycling thread and waits for them to exit
    pub fn shutdown(&self) {
        let cyclers = std::mem::take(
            &mut *self.cyclers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if !cyclers.is_empty() {
            debug!(count = cyclers.len(), "shutting down phase cyclers");
        }
        drop(cyclers);
    }

    /// Number of published phases nobody has received yet
    pub fn pending(&self) -> usize {
        self.message_queue.len()
    }

    #[cfg(test)]
    pub(crate) fn message_queue(&self) -> &MessageQueue<Phase> {
        &self.message_queue
    }
}

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use tracing::{debug, error};

use super::{
    phase::{AtomicPhase, Phase},
    timing::{Clock, DwellTime},
};
use crate::message_queue::MessageQueue;

/// State of one cycling loop: the flip timer plus the shared phase and queue it publishes to
pub(crate) struct PhaseCycle<D, C> {
    current_phase: Arc<AtomicPhase>,
    message_queue: Arc<MessageQueue<Phase>>,
    dwell: D,
    clock: C,
    last_flip: Duration,
}

impl<D: DwellTime, C: Clock> PhaseCycle<D, C> {
    pub(crate) fn new(
        current_phase: Arc<AtomicPhase>,
        message_queue: Arc<MessageQueue<Phase>>,
        dwell: D,
        mut clock: C,
    ) -> Self {
        let last_flip = clock.now();
        Self {
            current_phase,
            message_queue,
            dwell,
            clock,
            last_flip,
        }
    }

    /// One loop iteration without the sleep. Flips the phase once the dwell time has passed, then
    /// publishes the current phase whether it changed or not. Returns the new phase on a flip.
    pub(crate) fn tick(&mut self) -> Option<Phase> {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_flip);
        // a fresh threshold every iteration
        let threshold = self.dwell.next_dwell();

        let mut flipped = None;
        if elapsed >= threshold {
            let phase = self.current_phase.load().toggled();
            self.current_phase.store(phase);
            self.last_flip = now;
            debug!(%phase, ?elapsed, "phase changed");
            flipped = Some(phase);
        }

        self.message_queue.send(self.current_phase.load());
        flipped
    }

    fn run(mut self, tick_interval: Duration, stop: Arc<AtomicBool>) {
        while !stop.load(Ordering::Acquire) {
            thread::sleep(tick_interval);
            self.tick();
        }
    }
}

/// Handle to a cycling thread. Dropping it stops the loop and joins the thread.
#[derive(Debug)]
pub(crate) struct Cycler {
    handle: Option<thread::JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl Cycler {
    pub(crate) fn spawn<D: DwellTime, C: Clock>(
        name: String,
        cycle: PhaseCycle<D, C>,
        tick_interval: Duration,
    ) -> Result<Self, std::io::Error> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_thread = stop.clone();

        let handle = thread::Builder::new().name(name).spawn(move || {
            debug!("phase cycler started");
            cycle.run(tick_interval, stop_thread);
            debug!("phase cycler stopped");
        })?;

        Ok(Self {
            handle: Some(handle),
            stop,
        })
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for Cycler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.stop.store(true, Ordering::Release);
            if let Err(e) = handle.join() {
                error!("Couldn't join the phase cycler thread: {:?}", e)
            }
        }
    }
}

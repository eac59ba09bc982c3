mod controller;
mod cycler;
mod phase;
pub mod timing;

pub use controller::{TrafficLight, DEFAULT_TICK, MAX_TICK};
pub use phase::{ParsePhaseError, Phase};

#[cfg(test)]
pub(crate) use cycler::PhaseCycle;
#[cfg(test)]
pub(crate) use phase::AtomicPhase;

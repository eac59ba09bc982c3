mod config;
mod error;
mod message_queue;
mod traffic_light;

#[cfg(test)]
mod tests;

pub use config::SimulationConfig;
pub use error::Error;
pub use message_queue::MessageQueue;
pub use traffic_light::{
    timing, ParsePhaseError, Phase, TrafficLight, DEFAULT_TICK, MAX_TICK,
};

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("minimum dwell time {min_ms}ms is greater than maximum {max_ms}ms")]
    InvalidDwellRange { min_ms: u64, max_ms: u64 },

    #[error("tick interval must be between 1ms and 1000ms")]
    InvalidTick,

    #[error("couldn't spawn phase cycler thread: {0}")]
    Spawn(#[source] std::io::Error),
}

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, MAX_TICK};

/// Timing of a simulated light. Every field may be left out of the JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Shortest time a phase is held
    pub min_dwell_ms: u64,
    /// Longest time a phase is held
    pub max_dwell_ms: u64,
    /// Pause between two iterations of the cycling loop, 1 to 1000
    pub tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_dwell_ms: 4000,
            max_dwell_ms: 6000,
            tick_ms: 1,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_dwell_ms > self.max_dwell_ms {
            return Err(Error::InvalidDwellRange {
                min_ms: self.min_dwell_ms,
                max_ms: self.max_dwell_ms,
            });
        }
        if self.tick_ms == 0 || self.tick() > MAX_TICK {
            return Err(Error::InvalidTick);
        }
        Ok(())
    }

    pub fn min_dwell(&self) -> Duration {
        Duration::from_millis(self.min_dwell_ms)
    }

    pub fn max_dwell(&self) -> Duration {
        Duration::from_millis(self.max_dwell_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

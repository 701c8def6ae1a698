//! Logger configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LagerError, Result};
use crate::storage;

/// Sampling and sizing knobs for a [`SeriesBuffer`](crate::SeriesBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial row count, and the size of every growth block (default: 1000)
    pub buffer_capacity: usize,
    /// Store a sample every N steps (default: 50)
    pub record_interval: usize,
    /// Re-render charts every N steps (default: 100)
    pub plot_interval: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1000,
            record_interval: 50,
            plot_interval: 100,
        }
    }
}

impl LoggerConfig {
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub fn with_record_interval(mut self, record_interval: usize) -> Self {
        self.record_interval = record_interval;
        self
    }

    pub fn with_plot_interval(mut self, plot_interval: usize) -> Self {
        self.plot_interval = plot_interval;
        self
    }

    /// Every field must be at least 1.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("buffer_capacity", self.buffer_capacity),
            ("record_interval", self.record_interval),
            ("plot_interval", self.plot_interval),
        ] {
            if value == 0 {
                return Err(LagerError::InvalidConfig(format!("{name} must be >= 1")));
            }
        }
        Ok(())
    }

    /// Load a config from YAML, or JSON when the file ends in `.json`.
    /// Missing fields take their defaults; a missing file yields `Default`.
    pub fn load(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Self = if is_json {
            if !path.exists() {
                return Ok(Self::default());
            }
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            storage::load_yaml(path)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        storage::save_yaml(path, self)
    }
}

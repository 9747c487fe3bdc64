//! Optional TOML configuration for the demo drivers.
//!
//! A `sweepf1.toml` next to the working directory can override the default
//! grid and trainer settings; command-line flags override both.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sweepf1.toml";

/// Errors that may occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Threshold-grid settings for the sweep metric.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_start")]
    pub start: f32,
    #[serde(default = "default_grid_stop")]
    pub stop: f32,
    #[serde(default = "default_grid_steps")]
    pub steps: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: default_grid_start(),
            stop: default_grid_stop(),
            steps: default_grid_steps(),
        }
    }
}

/// Trainer settings for the demo runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainConfig {
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            learning_rate: default_learning_rate(),
            bins: default_bins(),
        }
    }
}

/// Parsed contents of `sweepf1.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub train: TrainConfig,
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<DemoConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

fn default_grid_start() -> f32 {
    0.1
}

fn default_grid_stop() -> f32 {
    0.7
}

fn default_grid_steps() -> usize {
    10
}

fn default_rounds() -> usize {
    5
}

fn default_learning_rate() -> f32 {
    0.1
}

fn default_bins() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: DemoConfig = toml::from_str("").unwrap();
        assert_eq!(config.grid.steps, 10);
        assert!((config.grid.start - 0.1).abs() < 1e-6);
        assert!((config.grid.stop - 0.7).abs() < 1e-6);
        assert_eq!(config.train.rounds, 5);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: DemoConfig = toml::from_str(
            "[grid]\nsteps = 25\n\n[train]\nrounds = 50\n",
        )
        .unwrap();
        assert_eq!(config.grid.steps, 25);
        assert!((config.grid.start - 0.1).abs() < 1e-6);
        assert_eq!(config.train.rounds, 50);
        assert!((config.train.learning_rate - 0.1).abs() < 1e-6);
    }
}

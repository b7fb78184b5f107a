use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::vecmath::EPSILON;
use std::path::Path;

// Per-vector mutation and comparison policy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct VectorPolicy {
    /// Notify observers even when `set` writes bit-identical coordinates.
    /// When false such a `set` is a full no-op.
    #[serde(default = "default_notify_unchanged")]
    pub notify_unchanged: bool,
    /// Round finite incoming coordinates to `PRECISION_DIGITS` decimals on `set`.
    #[serde(default)]
    pub clean_values: bool,
    /// Tolerance for `equal` and collinearity checks.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_notify_unchanged() -> bool {
    true
}

fn default_epsilon() -> f64 {
    EPSILON
}

impl Default for VectorPolicy {
    fn default() -> Self {
        VectorPolicy {
            notify_unchanged: default_notify_unchanged(),
            clean_values: false,
            epsilon: default_epsilon(),
        }
    }
}

impl VectorPolicy {
    /// Raw arithmetic, no rounding on `set`.
    pub fn fast() -> Self {
        Self::default()
    }

    /// Rounds every finite coordinate written through `set`.
    pub fn cleaned() -> Self {
        VectorPolicy { clean_values: true, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            anyhow::bail!("epsilon must be a positive finite number, got {}.", self.epsilon);
        }
        Ok(())
    }
}

// Benchmark run settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RunConfig {
    pub iterations: u64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of callbacks registered by the `ignore` scenario.
    #[serde(default = "default_observers")]
    pub observers: usize,
}

fn default_seed() -> u64 {
    42
}

fn default_observers() -> usize {
    10_000
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    pub save_stats: bool,
    #[serde(default)]
    pub save_csv: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

// Main benchmark configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BenchConfig {
    #[serde(default)]
    pub policy: VectorPolicy,
    pub run: RunConfig,
    pub output: OutputConfig,
}

impl BenchConfig {
    /// Loads the benchmark configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a configuration held in memory.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;

        if config.run.iterations == 0 {
            anyhow::bail!("iterations must be greater than 0.");
        }
        config.policy.validate()?;

        Ok(config)
    }
}

//! Layered CLI configuration: defaults, then an optional JSON file, then flags.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anomaly::{IsolationForestConfig, Method, SyntheticConfig};
use serde::{Deserialize, Serialize};

use crate::CliResult;

/// Seed used when neither the config file nor the command line sets one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub method: Method,
    pub forest: IsolationForestConfig,
    pub synthetic: SyntheticConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            method: Method::default(),
            forest: IsolationForestConfig::default(),
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the config file if one is given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = File::open(path).map_err(|e| format!("Failed to open config: {}", e))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        tracing::debug!(?path, "loaded configuration file");
        Ok(config)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self
    }

    pub fn with_contamination(mut self, contamination: Option<f64>) -> Self {
        if let Some(c) = contamination {
            self.forest.contamination = c;
        }
        self
    }
}

//! Configuration module for rankeval
//!
//! Configuration can be loaded from TOML files and/or environment variables.
//! The `[metric]` section selects the metric used when an evaluation request
//! does not name one; `[evaluator]` tunes how requests are scheduled.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use crate::metric::{MeanAveragePrecisionAtK, Metric, RecallAtK};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.rankeval/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".rankeval").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default metric configuration
    #[serde(default)]
    pub metric: MetricConfig,

    /// Evaluator configuration
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

/// Default metric used when a request does not carry its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Metric kind: "recall" (default) or "mean_average_precision"
    #[serde(default = "default_metric_kind")]
    pub kind: String,

    /// Ratings at or above this value count as relevant
    #[serde(default = "default_relevant_rating_threshold")]
    pub relevant_rating_threshold: i64,

    /// Skip hits without a judgment instead of counting them as false positives
    #[serde(default)]
    pub ignore_unlabeled: bool,

    /// Window size; only the top `k` hits of each request are evaluated
    #[serde(default = "default_k")]
    pub k: i64,
}

/// Evaluator scheduling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Maximum number of requests evaluated at the same time
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            kind: default_metric_kind(),
            relevant_rating_threshold: default_relevant_rating_threshold(),
            ignore_unlabeled: false,
            k: default_k(),
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_queries: default_max_concurrent_queries(),
        }
    }
}

impl MetricConfig {
    /// Build the configured metric, validating its parameters
    pub fn build(&self) -> Result<Metric> {
        match self.kind.as_str() {
            RecallAtK::NAME => Ok(RecallAtK::new(
                self.relevant_rating_threshold,
                self.ignore_unlabeled,
                self.k,
            )?
            .into()),
            MeanAveragePrecisionAtK::NAME => Ok(MeanAveragePrecisionAtK::new(
                self.relevant_rating_threshold,
                self.ignore_unlabeled,
                self.k,
            )?
            .into()),
            other => Err(Error::config(format!(
                "Unknown metric kind: '{other}'. Valid kinds: {}, {}",
                RecallAtK::NAME,
                MeanAveragePrecisionAtK::NAME
            ))),
        }
    }
}

impl From<&Metric> for MetricConfig {
    fn from(metric: &Metric) -> Self {
        Self {
            kind: metric.name().to_string(),
            relevant_rating_threshold: i64::from(metric.relevant_rating_threshold()),
            ignore_unlabeled: metric.ignore_unlabeled(),
            k: i64::try_from(metric.k()).unwrap_or(i64::MAX),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.metric
            .build()
            .map_err(|e| Error::config(format!("Invalid metric configuration: {e}")))?;

        if self.evaluator.max_concurrent_queries == 0 {
            return Err(Error::config(
                "Invalid max_concurrent_queries: must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))
    }
}

//! Evaluation input: the metric and the rated requests to score

use rankeval_core::error::{Error, Result, ResultExt};
use rankeval_core::{Hit, Judgment, Metric};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One query with its judgments and the ranked hits the engine returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatedRequest {
    /// Unique identifier of the query within a spec
    pub id: String,
    /// Relevance judgments for this query
    #[serde(default)]
    pub ratings: Vec<Judgment>,
    /// Ranked hits, best first
    #[serde(default)]
    pub hits: Vec<Hit>,
}

impl RatedRequest {
    pub fn new(id: impl Into<String>, ratings: Vec<Judgment>, hits: Vec<Hit>) -> Self {
        Self {
            id: id.into(),
            ratings,
            hits,
        }
    }
}

/// A full evaluation: an optional metric and the requests it applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankEvalSpec {
    /// Metric to use; the evaluator's default metric applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    /// Requests to evaluate
    pub requests: Vec<RatedRequest>,
}

impl RankEvalSpec {
    pub fn new(metric: Option<Metric>, requests: Vec<RatedRequest>) -> Self {
        Self { metric, requests }
    }

    /// Parse a spec from JSON and validate it
    pub fn from_json_str(content: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(content)
            .map_err(|e| Error::parse("evaluation spec", e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read and parse a spec from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read evaluation spec {}", path.display()))?;
        let spec: Self = serde_json::from_str(&content)
            .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check that there is at least one request and that request ids are
    /// non-empty and unique
    pub fn validate(&self) -> Result<()> {
        if self.requests.is_empty() {
            return Err(Error::invalid_argument(
                "Evaluation spec must contain at least one request",
            ));
        }

        let mut seen = HashSet::with_capacity(self.requests.len());
        for request in &self.requests {
            if request.id.trim().is_empty() {
                return Err(Error::invalid_argument("Request id must not be empty"));
            }
            if !seen.insert(request.id.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "Duplicate request id: '{}'",
                    request.id
                )));
            }
        }
        Ok(())
    }
}

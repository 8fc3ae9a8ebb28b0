//! Per-query evaluation output

use crate::judgment::{DocumentKey, RatedHit};
use crate::metric::MetricDetail;
use serde::{Deserialize, Serialize};

/// Quality of a single query's ranked results under one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalQueryQuality {
    /// Identifier of the evaluated query
    pub query_id: String,
    /// Metric score, 0.0 for degenerate inputs
    pub metric_score: f64,
    /// Metric specific breakdown of how the score was derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_details: Option<MetricDetail>,
    /// Hits in rank order together with their ratings
    #[serde(default)]
    pub hits: Vec<RatedHit>,
}

impl EvalQueryQuality {
    /// Create a result carrying only a score. Metrics attach details and hits
    /// before handing the result back.
    pub fn new(query_id: impl Into<String>, metric_score: f64) -> Self {
        Self {
            query_id: query_id.into(),
            metric_score,
            metric_details: None,
            hits: Vec::new(),
        }
    }

    pub fn with_metric_details(mut self, details: MetricDetail) -> Self {
        debug_assert!(
            self.metric_details.is_none(),
            "metric details attached twice for query {}",
            self.query_id
        );
        self.metric_details = Some(details);
        self
    }

    pub fn with_hits(mut self, hits: Vec<RatedHit>) -> Self {
        self.hits.extend(hits);
        self
    }

    /// Keys of the hits that had no judgment, in rank order
    pub fn unrated_docs(&self) -> Vec<&DocumentKey> {
        self.hits
            .iter()
            .filter(|h| h.is_unrated())
            .map(|h| &h.hit.key)
            .collect()
    }
}

//! Corpus level evaluation output

use rankeval_core::EvalQueryQuality;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of evaluating a whole spec
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankEvalResponse {
    /// Mean of the scores of all successfully evaluated requests
    pub metric_score: f64,
    /// Per-request quality, keyed by request id
    pub details: BTreeMap<String, EvalQueryQuality>,
    /// Per-request failure messages, keyed by request id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,
}

/// Counts summarizing a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Total number of requests evaluated or failed
    pub total_queries: usize,
    /// Number of requests that produced a score
    pub evaluated: usize,
    /// Number of requests that failed
    pub failed: usize,
    /// Relevant documents retrieved, summed over all requests
    pub relevant_docs_retrieved: usize,
    /// Documents retrieved, summed over all requests
    pub docs_retrieved: usize,
    /// Hits without a judgment, summed over all requests
    pub unrated_docs: usize,
}

impl RankEvalResponse {
    /// Check if no request produced a score.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Ids of the requests that failed, in id order.
    pub fn failed_queries(&self) -> Vec<&str> {
        self.failures.keys().map(String::as_str).collect()
    }

    /// Compute summary counts over all details and failures.
    pub fn summary(&self) -> EvaluationSummary {
        let mut summary = EvaluationSummary {
            total_queries: self.details.len() + self.failures.len(),
            evaluated: self.details.len(),
            failed: self.failures.len(),
            ..EvaluationSummary::default()
        };

        for quality in self.details.values() {
            if let Some(detail) = quality.metric_details {
                summary.relevant_docs_retrieved += detail.relevant_docs_retrieved();
                summary.docs_retrieved += detail.docs_retrieved();
            }
            summary.unrated_docs += quality.unrated_docs().len();
        }

        summary
    }
}

//! Library interface for the rankeval CLI
//!
//! This module exposes the pieces of the binary that are worth testing on
//! their own: metric overrides from flags and report rendering.

use rankeval_core::config::MetricConfig;
use rankeval_core::Metric;
use rankeval_evaluator::RankEvalResponse;

// Re-export commonly needed types for tests
pub use anyhow::Result;
pub use rankeval_core::config::Config;

/// Metric settings given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricOverrides {
    pub kind: Option<String>,
    pub k: Option<i64>,
    pub relevant_rating_threshold: Option<i64>,
    pub ignore_unlabeled: Option<bool>,
}

impl MetricOverrides {
    /// True when no flag was given
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.k.is_none()
            && self.relevant_rating_threshold.is_none()
            && self.ignore_unlabeled.is_none()
    }

    /// Apply the given flags on top of a metric configuration
    pub fn apply(&self, metric: &mut MetricConfig) {
        if let Some(kind) = &self.kind {
            metric.kind = kind.clone();
        }
        if let Some(k) = self.k {
            metric.k = k;
        }
        if let Some(threshold) = self.relevant_rating_threshold {
            metric.relevant_rating_threshold = threshold;
        }
        if let Some(ignore_unlabeled) = self.ignore_unlabeled {
            metric.ignore_unlabeled = ignore_unlabeled;
        }
    }

    /// Metric to evaluate with once the flags are applied.
    ///
    /// Flags refine the metric named in the evaluation spec when it has one,
    /// and the configured metric otherwise. Returns `None` when no flag was
    /// given, leaving the spec and configuration untouched.
    pub fn resolve(
        &self,
        configured: &MetricConfig,
        spec_metric: Option<&Metric>,
    ) -> rankeval_core::Result<Option<Metric>> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut base = spec_metric.map_or_else(|| configured.clone(), MetricConfig::from);
        self.apply(&mut base);
        base.build().map(Some)
    }
}

/// Render a response as a human readable report
pub fn render_text(response: &RankEvalResponse) -> String {
    let summary = response.summary();
    let mut out = format!("Rank Evaluation Results (n={}):\n", summary.total_queries);
    out.push_str(&format!("  Metric score:            {:.4}\n", response.metric_score));
    out.push_str(&format!("  Evaluated:               {}\n", summary.evaluated));
    out.push_str(&format!("  Failed:                  {}\n", summary.failed));
    out.push_str(&format!(
        "  Relevant docs retrieved: {}/{}\n",
        summary.relevant_docs_retrieved, summary.docs_retrieved
    ));
    out.push_str(&format!("  Unrated docs:            {}\n", summary.unrated_docs));

    if !response.details.is_empty() {
        out.push_str("\nPer-query scores:\n");
        for (id, quality) in &response.details {
            let counts = quality
                .metric_details
                .map(|d| format!("{}/{}", d.relevant_docs_retrieved(), d.docs_retrieved()))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  - {id}: {:.4} (relevant {counts}, unrated {})\n",
                quality.metric_score,
                quality.unrated_docs().len()
            ));
        }
    }

    if !response.failures.is_empty() {
        out.push_str("\nFailed queries:\n");
        for (id, message) in &response.failures {
            out.push_str(&format!("  - {id}: {message}\n"));
        }
    }

    out
}

/// Render a response as pretty printed JSON
pub fn render_json(response: &RankEvalResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

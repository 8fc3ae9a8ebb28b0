//! Concurrent evaluation of every request in a spec

use crate::response::RankEvalResponse;
use crate::spec::{RankEvalSpec, RatedRequest};
use futures::stream::{self, StreamExt};
use rankeval_core::error::{Error, Result};
use rankeval_core::{Config, EvalQueryQuality, Metric};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Score a single request, keeping only the metric's forced search size of
/// top hits.
pub fn evaluate_request(metric: &Metric, request: &RatedRequest) -> Result<EvalQueryQuality> {
    let window = metric
        .forced_search_size()
        .map_or(request.hits.len(), |size| size.min(request.hits.len()));
    if window < request.hits.len() {
        debug!(
            query_id = %request.id,
            supplied = request.hits.len(),
            window,
            "Truncating hits to forced search size"
        );
    }
    metric.evaluate(&request.id, &request.hits[..window], &request.ratings)
}

/// Evaluates specs by scoring their requests concurrently
#[derive(Debug, Clone)]
pub struct RankEvaluator {
    default_metric: Metric,
    max_concurrent_queries: usize,
}

impl RankEvaluator {
    /// Create an evaluator from configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            default_metric: config.metric.build()?,
            max_concurrent_queries: config.evaluator.max_concurrent_queries,
        })
    }

    /// Replace the metric used for specs that don't carry one
    pub fn with_default_metric(mut self, metric: Metric) -> Self {
        self.default_metric = metric;
        self
    }

    pub fn default_metric(&self) -> &Metric {
        &self.default_metric
    }

    pub fn max_concurrent_queries(&self) -> usize {
        self.max_concurrent_queries
    }

    /// Evaluate every request of an evaluation spec.
    ///
    /// A request that cannot be scored is recorded under `failures` and left
    /// out of the corpus score; the remaining requests are still evaluated.
    /// An invalid spec fails as a whole.
    pub async fn evaluate(&self, spec: RankEvalSpec) -> Result<RankEvalResponse> {
        spec.validate()?;
        let metric = spec
            .metric
            .clone()
            .unwrap_or_else(|| self.default_metric.clone());

        info!(
            metric = metric.name(),
            requests = spec.requests.len(),
            "Starting rank evaluation"
        );

        let outcomes: Vec<(String, Result<EvalQueryQuality>)> =
            stream::iter(spec.requests.into_iter().map(|request| {
                let metric = metric.clone();
                async move {
                    let id = request.id.clone();
                    let outcome =
                        tokio::task::spawn_blocking(move || evaluate_request(&metric, &request))
                            .await
                            .map_err(|e| Error::with_context("Evaluation task failed", e))
                            .and_then(|result| result);
                    (id, outcome)
                }
            }))
            .buffer_unordered(self.max_concurrent_queries)
            .collect()
            .await;

        let mut details = BTreeMap::new();
        let mut failures = BTreeMap::new();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(quality) => {
                    details.insert(id, quality);
                }
                Err(e) => {
                    warn!(query_id = %id, error = %e, "Failed to evaluate request");
                    failures.insert(id, e.to_string());
                }
            }
        }

        let qualities: Vec<EvalQueryQuality> = details.values().cloned().collect();
        let metric_score = metric.combine(&qualities);

        info!(
            metric = metric.name(),
            metric_score,
            evaluated = details.len(),
            failed = failures.len(),
            "Rank evaluation complete"
        );

        Ok(RankEvalResponse {
            metric_score,
            details,
            failures,
        })
    }
}

impl Default for RankEvaluator {
    fn default() -> Self {
        let config = Config::default();
        Self {
            default_metric: Metric::default(),
            max_concurrent_queries: config.evaluator.max_concurrent_queries,
        }
    }
}

//! Ranking quality metrics
//!
//! The set of metrics is closed: [`Metric`] has one variant per metric kind and
//! evaluation is dispatched by matching on it. Every metric:
//!
//! - joins the ranked hits with the query's judgments,
//! - scores the joined sequence and attaches a [`MetricDetail`],
//! - reports a forced search size, the number of top hits the caller should
//!   keep before evaluating (metrics never truncate on their own),
//! - combines per-query scores into a corpus score by arithmetic mean.
//!
//! Configuration (de)serializes as an externally tagged object, for example
//! `{"recall": {"relevant_rating_threshold": 1, "ignore_unlabeled": false, "k": 10}}`.
//! Missing fields take their defaults and unknown fields are rejected.

mod mean_average_precision;
mod recall;

pub use mean_average_precision::MeanAveragePrecisionAtK;
pub use recall::RecallAtK;

use crate::aggregate;
use crate::error::{Error, Result};
use crate::judgment::{Hit, Judgment};
use crate::query_quality::EvalQueryQuality;
use serde::{Deserialize, Serialize};

/// Window size used when `k` is not given
pub const DEFAULT_K: usize = 10;

/// Ratings at or above this value count as relevant when no threshold is given
pub const DEFAULT_RELEVANT_RATING_THRESHOLD: u32 = 1;

/// A configured ranking metric
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Recall(RecallAtK),
    MeanAveragePrecision(MeanAveragePrecisionAtK),
}

impl Metric {
    /// Name used as the tag in serialized configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::Recall(_) => RecallAtK::NAME,
            Self::MeanAveragePrecision(_) => MeanAveragePrecisionAtK::NAME,
        }
    }

    /// Score one query's hits against its judgments.
    ///
    /// Fails only when the judgments or the hits repeat a document.
    pub fn evaluate(
        &self,
        query_id: &str,
        hits: &[Hit],
        judgments: &[Judgment],
    ) -> Result<EvalQueryQuality> {
        match self {
            Self::Recall(m) => m.evaluate(query_id, hits, judgments),
            Self::MeanAveragePrecision(m) => m.evaluate(query_id, hits, judgments),
        }
    }

    /// Number of top hits the caller should pass to [`Metric::evaluate`].
    pub fn forced_search_size(&self) -> Option<usize> {
        match self {
            Self::Recall(m) => Some(m.k()),
            Self::MeanAveragePrecision(m) => Some(m.k()),
        }
    }

    pub fn relevant_rating_threshold(&self) -> u32 {
        match self {
            Self::Recall(m) => m.relevant_rating_threshold(),
            Self::MeanAveragePrecision(m) => m.relevant_rating_threshold(),
        }
    }

    pub fn ignore_unlabeled(&self) -> bool {
        match self {
            Self::Recall(m) => m.ignore_unlabeled(),
            Self::MeanAveragePrecision(m) => m.ignore_unlabeled(),
        }
    }

    pub fn k(&self) -> usize {
        match self {
            Self::Recall(m) => m.k(),
            Self::MeanAveragePrecision(m) => m.k(),
        }
    }

    /// Corpus level score: the mean of the per-query scores.
    pub fn combine(&self, qualities: &[EvalQueryQuality]) -> f64 {
        aggregate::combine(qualities.iter().map(|q| q.metric_score))
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::Recall(RecallAtK::default())
    }
}

impl From<RecallAtK> for Metric {
    fn from(metric: RecallAtK) -> Self {
        Self::Recall(metric)
    }
}

impl From<MeanAveragePrecisionAtK> for Metric {
    fn from(metric: MeanAveragePrecisionAtK) -> Self {
        Self::MeanAveragePrecision(metric)
    }
}

/// Breakdown of a metric score, one variant per metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDetail {
    Recall(RetrievalDetail),
    MeanAveragePrecision(RetrievalDetail),
}

impl MetricDetail {
    pub fn relevant_docs_retrieved(&self) -> usize {
        match self {
            Self::Recall(d) | Self::MeanAveragePrecision(d) => d.relevant_docs_retrieved,
        }
    }

    pub fn docs_retrieved(&self) -> usize {
        match self {
            Self::Recall(d) | Self::MeanAveragePrecision(d) => d.docs_retrieved,
        }
    }
}

/// Relevant and total retrieved document counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetrievalDetail {
    pub relevant_docs_retrieved: usize,
    pub docs_retrieved: usize,
}

impl RetrievalDetail {
    pub fn new(relevant_docs_retrieved: usize, docs_retrieved: usize) -> Self {
        debug_assert!(relevant_docs_retrieved <= docs_retrieved);
        Self {
            relevant_docs_retrieved,
            docs_retrieved,
        }
    }
}

/// Raw metric parameters as they appear in configuration.
///
/// Values are signed so that negative input reaches validation and produces a
/// metric specific message instead of a generic type error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricParams {
    #[serde(default = "default_relevant_rating_threshold")]
    pub relevant_rating_threshold: i64,
    #[serde(default)]
    pub ignore_unlabeled: bool,
    #[serde(default = "default_k")]
    pub k: i64,
}

fn default_relevant_rating_threshold() -> i64 {
    i64::from(DEFAULT_RELEVANT_RATING_THRESHOLD)
}

fn default_k() -> i64 {
    DEFAULT_K as i64
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            relevant_rating_threshold: default_relevant_rating_threshold(),
            ignore_unlabeled: false,
            k: default_k(),
        }
    }
}

/// Validated (threshold, k) pair shared by the retrieval metrics
pub(crate) fn validate_params(metric_name: &str, threshold: i64, k: i64) -> Result<(u32, usize)> {
    let threshold = u32::try_from(threshold).map_err(|_| {
        Error::invalid_argument(format!(
            "Relevant rating threshold for {metric_name} must be a non-negative integer, got {threshold}"
        ))
    })?;
    if k <= 0 {
        return Err(Error::invalid_argument(format!(
            "Window size k for {metric_name} must be positive, got {k}"
        )));
    }
    let k = usize::try_from(k)
        .map_err(|_| Error::invalid_argument(format!("Window size k is too large: {k}")))?;
    Ok((threshold, k))
}

/// How one joined hit counts towards a retrieval metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitClass {
    Relevant,
    Irrelevant,
    Ignored,
}

pub(crate) fn classify(rating: Option<u32>, threshold: u32, ignore_unlabeled: bool) -> HitClass {
    match rating {
        Some(r) if r >= threshold => HitClass::Relevant,
        Some(_) => HitClass::Irrelevant,
        None if ignore_unlabeled => HitClass::Ignored,
        None => HitClass::Irrelevant,
    }
}

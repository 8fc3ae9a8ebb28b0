use super::{classify, validate_params, HitClass, MetricDetail, MetricParams, RetrievalDetail};
use crate::error::{Error, Result};
use crate::judgment::{join_hits_with_ratings, Hit, Judgment};
use crate::query_quality::EvalQueryQuality;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Recall@K: the share of all relevant judged documents that show up in the hits.
///
/// Every supplied hit is evaluated. Callers keep only the top
/// [`RecallAtK::k`] hits before calling [`RecallAtK::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MetricParams", into = "MetricParams")]
pub struct RecallAtK {
    relevant_rating_threshold: u32,
    ignore_unlabeled: bool,
    k: usize,
}

impl RecallAtK {
    pub const NAME: &'static str = "recall";

    /// Create a Recall@K metric.
    ///
    /// # Arguments
    /// * `threshold` - ratings at or above this value are relevant, must be >= 0
    /// * `ignore_unlabeled` - when true, hits without a judgment count as neither
    ///   true nor false positives; otherwise they are false positives
    /// * `k` - window size reported as the forced search size, must be > 0
    pub fn new(threshold: i64, ignore_unlabeled: bool, k: i64) -> Result<Self> {
        let (relevant_rating_threshold, k) = validate_params(Self::NAME, threshold, k)?;
        Ok(Self {
            relevant_rating_threshold,
            ignore_unlabeled,
            k,
        })
    }

    pub fn relevant_rating_threshold(&self) -> u32 {
        self.relevant_rating_threshold
    }

    pub fn ignore_unlabeled(&self) -> bool {
        self.ignore_unlabeled
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Score the hits of one query.
    ///
    /// The denominator is the number of judgments rated at or above the
    /// threshold, so documents that were never retrieved still lower recall.
    pub fn evaluate(
        &self,
        query_id: &str,
        hits: &[Hit],
        judgments: &[Judgment],
    ) -> Result<EvalQueryQuality> {
        let rated_hits = join_hits_with_ratings(hits, judgments)?;

        let mut true_positives = 0usize;
        let mut false_positives = 0usize;
        for rated in &rated_hits {
            match classify(
                rated.rating,
                self.relevant_rating_threshold,
                self.ignore_unlabeled,
            ) {
                HitClass::Relevant => true_positives += 1,
                HitClass::Irrelevant => false_positives += 1,
                HitClass::Ignored => {}
            }
        }

        let relevant_docs = judgments
            .iter()
            .filter(|j| j.rating >= self.relevant_rating_threshold)
            .count();

        let recall = if true_positives > 0 && relevant_docs > 0 {
            true_positives as f64 / relevant_docs as f64
        } else {
            0.0
        };

        debug!(
            query_id,
            true_positives, false_positives, relevant_docs, recall, "Evaluated recall"
        );

        Ok(EvalQueryQuality::new(query_id, recall)
            .with_metric_details(MetricDetail::Recall(RetrievalDetail::new(
                true_positives,
                true_positives + false_positives,
            )))
            .with_hits(rated_hits))
    }
}

impl Default for RecallAtK {
    fn default() -> Self {
        Self {
            relevant_rating_threshold: super::DEFAULT_RELEVANT_RATING_THRESHOLD,
            ignore_unlabeled: false,
            k: super::DEFAULT_K,
        }
    }
}

impl TryFrom<MetricParams> for RecallAtK {
    type Error = Error;

    fn try_from(params: MetricParams) -> Result<Self> {
        Self::new(
            params.relevant_rating_threshold,
            params.ignore_unlabeled,
            params.k,
        )
    }
}

impl From<RecallAtK> for MetricParams {
    fn from(metric: RecallAtK) -> Self {
        Self {
            relevant_rating_threshold: i64::from(metric.relevant_rating_threshold),
            ignore_unlabeled: metric.ignore_unlabeled,
            k: metric.k as i64,
        }
    }
}

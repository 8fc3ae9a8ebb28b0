use super::{classify, validate_params, HitClass, MetricDetail, MetricParams, RetrievalDetail};
use crate::error::{Error, Result};
use crate::judgment::{join_hits_with_ratings, Hit, Judgment};
use crate::query_quality::EvalQueryQuality;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mean Average Precision@K over the retrieved documents.
///
/// At every rank holding a relevant hit, precision up to that rank is added to
/// an accumulator. The sum is divided by the number of *retrieved* documents
/// (true plus false positives), not by the number of relevant judgments. This
/// differs from the textbook definition and is kept as-is so existing scores
/// stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MetricParams", into = "MetricParams")]
pub struct MeanAveragePrecisionAtK {
    relevant_rating_threshold: u32,
    ignore_unlabeled: bool,
    k: usize,
}

impl MeanAveragePrecisionAtK {
    pub const NAME: &'static str = "mean_average_precision";

    /// Create a MAP@K metric.
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
    /// Ignored unlabeled hits still occupy their rank position, so a relevant
    /// hit after them is measured against its true rank.
    pub fn evaluate(
        &self,
        query_id: &str,
        hits: &[Hit],
        judgments: &[Judgment],
    ) -> Result<EvalQueryQuality> {
        let rated_hits = join_hits_with_ratings(hits, judgments)?;

        let mut true_positives = 0usize;
        let mut false_positives = 0usize;
        let mut precision_sum = 0.0f64;
        for (position, rated) in rated_hits.iter().enumerate() {
            let rank = position + 1;
            match classify(
                rated.rating,
                self.relevant_rating_threshold,
                self.ignore_unlabeled,
            ) {
                HitClass::Relevant => {
                    true_positives += 1;
                    precision_sum += true_positives as f64 / rank as f64;
                }
                HitClass::Irrelevant => false_positives += 1,
                HitClass::Ignored => {}
            }
        }

        let retrieved = true_positives + false_positives;
        let average_precision = if precision_sum > 0.0 {
            precision_sum / retrieved as f64
        } else {
            0.0
        };

        debug!(
            query_id,
            true_positives,
            false_positives,
            average_precision,
            "Evaluated mean average precision"
        );

        Ok(EvalQueryQuality::new(query_id, average_precision)
            .with_metric_details(MetricDetail::MeanAveragePrecision(RetrievalDetail::new(
                true_positives,
                retrieved,
            )))
            .with_hits(rated_hits))
    }
}

impl Default for MeanAveragePrecisionAtK {
    fn default() -> Self {
        Self {
            relevant_rating_threshold: super::DEFAULT_RELEVANT_RATING_THRESHOLD,
            ignore_unlabeled: false,
            k: super::DEFAULT_K,
        }
    }
}

impl TryFrom<MetricParams> for MeanAveragePrecisionAtK {
    type Error = Error;

    fn try_from(params: MetricParams) -> Result<Self> {
        Self::new(
            params.relevant_rating_threshold,
            params.ignore_unlabeled,
            params.k,
        )
    }
}

impl From<MeanAveragePrecisionAtK> for MetricParams {
    fn from(metric: MeanAveragePrecisionAtK) -> Self {
        Self {
            relevant_rating_threshold: i64::from(metric.relevant_rating_threshold),
            ignore_unlabeled: metric.ignore_unlabeled,
            k: metric.k as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRRELEVANT: u32 = 0;
    const RELEVANT: u32 = 1;

    fn rated_docs(ratings: &[u32]) -> Vec<Judgment> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| Judgment::new("test", i.to_string(), *r))
            .collect()
    }

    fn hits_for(judgments: &[Judgment]) -> Vec<Hit> {
        judgments
            .iter()
            .map(|j| Hit::new(j.key.index.clone(), j.key.id.clone()))
            .collect()
    }

    fn detail(quality: &EvalQueryQuality) -> (usize, usize) {
        let d = quality.metric_details.expect("details attached");
        (d.relevant_docs_retrieved(), d.docs_retrieved())
    }

    #[test]
    fn test_map_at_three() {
        let rated = rated_docs(&[IRRELEVANT, IRRELEVANT, RELEVANT]);

        let quality = MeanAveragePrecisionAtK::default()
            .evaluate("id", &hits_for(&rated), &rated)
            .unwrap();

        // (1/3) / 3 retrieved
        assert!((quality.metric_score - 0.111111).abs() < 1e-5);
        assert_eq!(detail(&quality), (1, 3));
    }

    #[test]
    fn test_map_divides_by_retrieved_not_relevant() {
        let rated = rated_docs(&[RELEVANT, RELEVANT, IRRELEVANT, RELEVANT, RELEVANT]);

        let quality = MeanAveragePrecisionAtK::default()
            .evaluate("id", &hits_for(&rated), &rated)
            .unwrap();

        // (1/1 + 2/2 + 3/4 + 4/5) / 5 retrieved, not / 4 relevant
        assert!((quality.metric_score - 0.71).abs() < 1e-5);
        assert_eq!(detail(&quality), (4, 5));
    }

    #[test]
    fn test_relevance_threshold() {
        let rated = rated_docs(&[0, 1, 2, 3, 4]);
        let metric = MeanAveragePrecisionAtK::new(2, false, 5).unwrap();

        let quality = metric.evaluate("id", &hits_for(&rated), &rated).unwrap();

        // (1/3 + 2/4 + 3/5) / 5
        assert!((quality.metric_score - 0.286).abs() < 0.01);
        assert_eq!(detail(&quality), (3, 5));
    }

    #[test]
    fn test_ignore_unlabeled() {
        let rated = rated_docs(&[RELEVANT, RELEVANT]);
        let mut hits = hits_for(&rated);
        hits.push(Hit::new("index", "2"));

        let quality = MeanAveragePrecisionAtK::default()
            .evaluate("id", &hits, &rated)
            .unwrap();
        assert!((quality.metric_score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(detail(&quality), (2, 3));

        let quality = MeanAveragePrecisionAtK::new(1, true, 10)
            .unwrap()
            .evaluate("id", &hits, &rated)
            .unwrap();
        assert!((quality.metric_score - 1.0).abs() < 1e-9);
        assert_eq!(detail(&quality), (2, 2));
    }

    #[test]
    fn test_ignored_hit_still_consumes_rank() {
        let rated = rated_docs(&[RELEVANT]);
        let hits = vec![Hit::new("index", "unlabeled"), Hit::new("test", "0")];

        let quality = MeanAveragePrecisionAtK::new(1, true, 10)
            .unwrap()
            .evaluate("id", &hits, &rated)
            .unwrap();

        // relevant hit sits at rank 2: (1/2) / 1 retrieved
        assert!((quality.metric_score - 0.5).abs() < 1e-9);
        assert_eq!(detail(&quality), (1, 1));
    }

    #[test]
    fn test_leading_irrelevant_hit_never_raises_score() {
        let rated = rated_docs(&[RELEVANT, IRRELEVANT, RELEVANT, IRRELEVANT]);
        let metric = MeanAveragePrecisionAtK::default();
        let base_hits = vec![Hit::new("test", "0"), Hit::new("test", "2")];
        let mut padded_hits = vec![Hit::new("test", "1")];
        padded_hits.extend(base_hits.clone());

        let base = metric.evaluate("id", &base_hits, &rated).unwrap();
        let padded = metric.evaluate("id", &padded_hits, &rated).unwrap();

        assert!(padded.metric_score <= base.metric_score);
    }

    #[test]
    fn test_no_rated_docs() {
        let hits: Vec<Hit> = (0..5).map(|i| Hit::new("index", i.to_string())).collect();

        let quality = MeanAveragePrecisionAtK::default()
            .evaluate("id", &hits, &[])
            .unwrap();
        assert_eq!(quality.metric_score, 0.0);
        assert_eq!(detail(&quality), (0, 5));

        let quality = MeanAveragePrecisionAtK::new(1, true, 10)
            .unwrap()
            .evaluate("id", &hits, &[])
            .unwrap();
        assert_eq!(quality.metric_score, 0.0);
        assert_eq!(detail(&quality), (0, 0));
    }

    #[test]
    fn test_no_results() {
        let quality = MeanAveragePrecisionAtK::default()
            .evaluate("id", &[], &[])
            .unwrap();
        assert_eq!(quality.metric_score, 0.0);
        assert_eq!(detail(&quality), (0, 0));
    }

    #[test]
    fn test_invalid_relevant_threshold() {
        assert!(matches!(
            MeanAveragePrecisionAtK::new(-1, false, 10).unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_invalid_k() {
        assert!(matches!(
            MeanAveragePrecisionAtK::new(1, false, -10).unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }
}

//! Properties that hold for every metric over a range of inputs

use rankeval_core::{combine, Error, Hit, Judgment, MeanAveragePrecisionAtK, Metric, RecallAtK};

/// Deterministic pseudo random ratings so failures are reproducible
fn ratings(seed: u64, len: usize) -> Vec<Option<u32>> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            match (state >> 33) % 5 {
                0 => None,
                r => Some((r - 1) as u32),
            }
        })
        .collect()
}

/// Build hits for every position plus judgments for the rated positions.
/// Two extra relevant judgments are never retrieved.
fn scenario(ratings: &[Option<u32>]) -> (Vec<Hit>, Vec<Judgment>) {
    let hits = (0..ratings.len())
        .map(|i| Hit::new("test", i.to_string()))
        .collect();
    let mut judgments: Vec<Judgment> = ratings
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.map(|r| Judgment::new("test", i.to_string(), r)))
        .collect();
    judgments.push(Judgment::new("test", "missing-1", 3));
    judgments.push(Judgment::new("test", "missing-2", 1));
    (hits, judgments)
}

fn all_metrics() -> Vec<Metric> {
    let mut metrics: Vec<Metric> = Vec::new();
    for threshold in 0..3 {
        for ignore_unlabeled in [false, true] {
            metrics.push(RecallAtK::new(threshold, ignore_unlabeled, 10).unwrap().into());
            metrics.push(
                MeanAveragePrecisionAtK::new(threshold, ignore_unlabeled, 10)
                    .unwrap()
                    .into(),
            );
        }
    }
    metrics
}

#[test]
fn test_scores_bounded_and_details_consistent() {
    for seed in 0..50 {
        let ratings = ratings(seed, (seed % 12) as usize);
        let (hits, judgments) = scenario(&ratings);

        for metric in all_metrics() {
            let quality = metric.evaluate("q", &hits, &judgments).unwrap();
            let detail = quality.metric_details.expect("details attached");

            assert!(
                (0.0..=1.0).contains(&quality.metric_score),
                "{} scored {} for seed {seed}",
                metric.name(),
                quality.metric_score
            );
            assert!(detail.relevant_docs_retrieved() <= detail.docs_retrieved());
            assert!(detail.docs_retrieved() <= hits.len());
            assert_eq!(quality.hits.len(), hits.len());
        }
    }
}

#[test]
fn test_recall_true_positives_bounded_by_judgments() {
    for seed in 0..50 {
        let (hits, judgments) = scenario(&ratings(seed, 10));
        let quality = Metric::from(RecallAtK::default())
            .evaluate("q", &hits, &judgments)
            .unwrap();
        let detail = quality.metric_details.expect("details attached");
        assert!(detail.relevant_docs_retrieved() <= judgments.len());
    }
}

#[test]
fn test_repeated_hit_cannot_inflate_score() {
    let hits = vec![Hit::new("test", "a"), Hit::new("test", "a")];
    let judgments = vec![Judgment::new("test", "a", 1)];
    for metric in all_metrics() {
        let err = metric.evaluate("q", &hits, &judgments).unwrap_err();
        assert!(
            matches!(err, Error::DuplicateHit { ref id, .. } if id == "a"),
            "{} accepted a repeated hit",
            metric.name()
        );
    }
}

#[test]
fn test_empty_hits_score_zero_for_every_metric() {
    let judgments = vec![Judgment::new("test", "0", 1)];
    for metric in all_metrics() {
        let quality = metric.evaluate("q", &[], &judgments).unwrap();
        let detail = quality.metric_details.expect("details attached");
        assert_eq!(quality.metric_score, 0.0);
        assert_eq!((detail.relevant_docs_retrieved(), detail.docs_retrieved()), (0, 0));
    }
}

#[test]
fn test_all_unlabeled_hits_ignored() {
    let hits: Vec<Hit> = (0..4).map(|i| Hit::new("test", i.to_string())).collect();
    let judgments = vec![Judgment::new("other", "0", 2)];
    for metric in all_metrics().into_iter().filter(|m| m.ignore_unlabeled()) {
        let quality = metric.evaluate("q", &hits, &judgments).unwrap();
        let detail = quality.metric_details.expect("details attached");
        assert_eq!(detail.docs_retrieved(), 0);
        assert_eq!(quality.metric_score, 0.0);
        assert_eq!(quality.unrated_docs().len(), 4);
    }
}

#[test]
fn test_leading_irrelevant_hit_never_raises_map() {
    for seed in 0..50 {
        let (hits, mut judgments) = scenario(&ratings(seed, 8));
        judgments.push(Judgment::new("test", "leading", 0));
        let mut padded = vec![Hit::new("test", "leading")];
        padded.extend(hits.iter().cloned());

        let metric = Metric::from(MeanAveragePrecisionAtK::default());
        let base = metric.evaluate("q", &hits, &judgments).unwrap();
        let worse = metric.evaluate("q", &padded, &judgments).unwrap();
        assert!(
            worse.metric_score <= base.metric_score + 1e-12,
            "seed {seed}: {} > {}",
            worse.metric_score,
            base.metric_score
        );
    }
}

#[test]
fn test_corpus_combine() {
    assert!((combine([0.1, 0.2, 0.6]) - 0.3).abs() < 1e-12);
}

//! Reduction of per-query scores into a corpus score

/// Arithmetic mean of the given scores.
///
/// An empty input yields 0.0, the same value a query with no results scores.
pub fn combine<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_mean() {
        assert!((combine([0.1, 0.2, 0.6]) - 0.3).abs() < 1e-12);
        assert_eq!(combine([0.5]), 0.5);
    }

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(Vec::<f64>::new()), 0.0);
    }
}

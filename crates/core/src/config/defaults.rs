//! Default values and functions for configuration

use crate::metric::{RecallAtK, DEFAULT_K, DEFAULT_RELEVANT_RATING_THRESHOLD};

pub(crate) const DEFAULT_METRIC_KIND: &str = RecallAtK::NAME;

pub(crate) fn default_metric_kind() -> String {
    DEFAULT_METRIC_KIND.to_string()
}

pub(crate) fn default_relevant_rating_threshold() -> i64 {
    i64::from(DEFAULT_RELEVANT_RATING_THRESHOLD)
}

pub(crate) fn default_k() -> i64 {
    DEFAULT_K as i64
}

pub(crate) fn default_max_concurrent_queries() -> usize {
    4
}

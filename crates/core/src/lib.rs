//! Core types for ranking quality evaluation
//!
//! This crate scores a query's ranked hits against human relevance judgments:
//!
//! - **Judgments**: rated documents and the joiner that pairs them with hits
//! - **Metrics**: Recall@K and Mean Average Precision@K
//! - **Query quality**: per-query score, detail, and rated hits
//! - **Aggregation**: corpus level score from per-query scores
//! - **Configuration**: default metric and evaluator settings
//! - **Error handling**: unified error types

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod judgment;
pub mod metric;
pub mod query_quality;

// Re-export main types for convenience
pub use aggregate::combine;
pub use config::{Config, EvaluatorConfig, MetricConfig};
pub use error::{Error, Result, ResultExt};
pub use judgment::{join_hits_with_ratings, DocumentKey, Hit, Judgment, RatedHit};
pub use metric::{
    MeanAveragePrecisionAtK, Metric, MetricDetail, RecallAtK, RetrievalDetail, DEFAULT_K,
    DEFAULT_RELEVANT_RATING_THRESHOLD,
};
pub use query_quality::EvalQueryQuality;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, ResultExt};
    pub use crate::judgment::{Hit, Judgment};
    pub use crate::metric::{Metric, MetricDetail};
    pub use crate::query_quality::EvalQueryQuality;
}

//! Multi-query ranking evaluation for rankeval.
//!
//! This crate provides:
//! - The evaluation spec: a metric plus a set of rated requests
//! - A concurrent evaluator that scores every request and records failures
//! - The corpus level response and a summary of its details

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod evaluator;
pub mod response;
pub mod spec;

pub use evaluator::{evaluate_request, RankEvaluator};
pub use response::{EvaluationSummary, RankEvalResponse};
pub use spec::{RankEvalSpec, RatedRequest};

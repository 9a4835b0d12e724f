//! Experiment analysis data model
//!
//! ## Schema Overview
//!
//! ```text
//! Experiment (1) ──< Variation (N)
//!      │
//!      └──< MetricAssignment (N) ──< Analysis (N) [append-only]
//!                  │
//!                  └── Metric (reference, by metric_id)
//! ```
//!
//! `Analysis` records arrive as one flat batch per render from the external
//! analysis pipeline; everything else is read-only reference data owned by
//! the host. This crate never mutates any of it.
//!
//! ## Wire Format
//!
//! All records deserialize from the pipeline's JSON contract: camelCase
//! object keys, snake_case strategy/warning codes, attribution windows as
//! integer seconds. Codes outside the known sets are captured verbatim in
//! `Unrecognized` variants so a dump/reload cycle cannot lose them.

mod analysis;
mod experiment;
mod metric;

pub use analysis::{
    Analysis, AnalysisBuilder, AnalysisStrategy, MetricEstimate, MetricEstimates,
    ParticipantStats, Recommendation, RecommendationBuilder, RecommendationReason,
    RecommendationWarning,
};
pub use experiment::{AttributionWindow, Experiment, MetricAssignment, Variation};
pub use metric::{Metric, ParameterType};

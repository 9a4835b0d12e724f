//! Error types for veredicto
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)
//!
//! Referential-integrity violations are hard failures: they mean the analysis
//! pipeline and the experiment reference data have drifted apart, and must
//! never be papered over with a blank cell.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Veredicto error types
#[derive(Error, Debug)]
pub enum Error {
    /// A recommendation chose a variation the experiment does not define
    #[error("recommendation chose variation {variation_id}, which is not a variation of this experiment\nThe analysis pipeline and the experiment data have drifted; refusing to render a blank name.")]
    UnknownChosenVariation {
        /// The unresolvable variation id from the recommendation payload
        variation_id: u64,
    },

    /// A metric assignment references a metric absent from the metric list
    #[error("metric assignment {metric_assignment_id} references metric {metric_id}, which is not in the supplied metric list")]
    UnknownMetric {
        /// The assignment whose metric could not be resolved
        metric_assignment_id: u64,
        /// The unresolvable metric id
        metric_id: u64,
    },

    /// The experiment defines no primary metric assignment
    #[error("experiment {experiment_name:?} has no primary metric assignment\nEvery experiment is expected to designate exactly one primary metric.")]
    MissingPrimaryMetricAssignment {
        /// Name of the experiment with broken reference data
        experiment_name: String,
    },

    /// JSON serialization error (debug dump passthrough)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

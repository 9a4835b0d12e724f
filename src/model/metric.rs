//! Bare metric reference data

use serde::{Deserialize, Serialize};

/// How a metric measures outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Event-based conversion metric.
    Conversion,
    /// Cash-value revenue metric.
    Revenue,
}

/// Bare metric reference record: identity and descriptive fields only.
///
/// The summary resolves each metric assignment's display name through this
/// list; the heavier metric definition (event/revenue parameters) stays with
/// the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    metric_id: u64,
    name: String,
    description: String,
    parameter_type: ParameterType,
}

impl Metric {
    /// Create a bare metric record.
    #[must_use]
    pub fn new(
        metric_id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_type: ParameterType,
    ) -> Self {
        Self {
            metric_id,
            name: name.into(),
            description: description.into(),
            parameter_type,
        }
    }

    /// Get the metric id.
    #[must_use]
    pub const fn metric_id(&self) -> u64 {
        self.metric_id
    }

    /// Get the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the metric description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the metric's parameter type.
    #[must_use]
    pub const fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }
}

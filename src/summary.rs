//! Summary assembly - cohorts and decisions composed into display data
//!
//! One call per render of a summary view: take the full analysis batch for an
//! experiment, isolate the latest cohorts, and emit plain structured data the
//! display layer can show without further logic. Participant counts come from
//! the primary metric's cohort; one results table is emitted per metric
//! assignment that has analyses, in display order.
//!
//! All table cells are pre-rendered strings so no formatting rule leaks into
//! the presentation layer. The raw batch can be passed through verbatim as
//! pretty JSON for debugging.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::cohort;
use crate::decision;
use crate::error::{Error, Result};
use crate::model::{
    Analysis, AnalysisStrategy, Experiment, Metric, MetricAssignment, MetricEstimates,
    ParticipantStats, Variation,
};

/// Outcome of summarizing one experiment's analysis batch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisSummary {
    /// No analyses exist yet; a recognized state, not an error.
    Empty {
        /// User-visible message naming the experiment.
        message: String,
    },
    /// Analyses exist and the summary tables are populated.
    Ready(SummaryData),
}

impl AnalysisSummary {
    /// Whether the batch contained no analyses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Populated summary for one experiment.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    /// Number of analysis records in the raw batch, before cohort selection.
    pub total_analyses: usize,
    /// Participant counts for the primary metric's latest cohort; `None`
    /// when no analyses exist for the primary assignment yet.
    pub participant_counts: Option<ParticipantCountsTable>,
    /// One results table per metric assignment with analyses, primary first
    /// then by assignment id.
    pub latest_results: Vec<MetricResultSummary>,
    /// Raw batch as pretty JSON when debug mode was requested.
    pub debug_json: Option<String>,
}

impl SummaryData {
    /// Headline line shown above the tables.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("Found {} analysis objects in total.", self.total_analyses)
    }
}

/// Participant counts for the primary metric, one row per strategy.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantCountsTable {
    /// Column headers: variation names, default variation first then by name.
    pub variation_names: Vec<String>,
    /// One row per cohort member, in cohort (strategy) order.
    pub rows: Vec<ParticipantCountRow>,
}

/// One participant-count row.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantCountRow {
    /// Human label of the analysis strategy.
    pub strategy_label: String,
    /// Total participants assigned so far.
    pub total: u64,
    /// Per-variation counts, parallel to the table's `variation_names`.
    pub variation_counts: Vec<u64>,
}

/// Latest results for one metric assignment.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResultSummary {
    /// Metric assignment these results belong to.
    pub metric_assignment_id: u64,
    /// Name of the tracked metric, resolved through the metric list.
    pub metric_name: String,
    /// Human label of the assignment's attribution window.
    pub attribution_window_label: String,
    /// Date of the cohort's analysis run.
    pub last_analyzed: NaiveDate,
    /// One row per cohort member, in cohort (strategy) order.
    pub rows: Vec<LatestResultRow>,
}

/// One latest-results row, cells pre-rendered for display.
#[derive(Debug, Clone, Serialize)]
pub struct LatestResultRow {
    /// Human label of the analysis strategy.
    pub strategy_label: String,
    /// Participant cell, rendered `"total (not_final)"`.
    pub participants: String,
    /// Difference interval rendered `"[bottom, top]"` with bounds rounded to
    /// four decimal places, or `"N/A"` when the run produced no estimate.
    pub difference_interval: String,
    /// Decision text; empty when the run produced no recommendation.
    pub recommendation: String,
    /// Warning lines in pipeline order.
    pub warnings: Vec<String>,
}

/// Summarize one experiment's analysis batch into display data.
///
/// An empty batch yields [`AnalysisSummary::Empty`] with the dedicated
/// "No analyses yet" message. Otherwise the summary carries the headline
/// count, the primary metric's participant-count table, and one results
/// table per metric assignment that has analyses. Analyses referencing an
/// assignment the experiment does not declare are logged and skipped.
///
/// With `debug_mode` set, the raw batch is serialized verbatim as pretty
/// JSON alongside the tables.
///
/// # Errors
///
/// Returns [`Error::MissingPrimaryMetricAssignment`] when the experiment
/// designates no primary metric, [`Error::UnknownMetric`] when an assignment
/// references a metric absent from `metrics`, and
/// [`Error::UnknownChosenVariation`] when a recommendation names a variation
/// the experiment does not have. Referential-integrity failures are never
/// rendered as blanks.
pub fn summarize(
    analyses: &[Analysis],
    experiment: &Experiment,
    metrics: &[Metric],
    debug_mode: bool,
) -> Result<AnalysisSummary> {
    if analyses.is_empty() {
        return Ok(AnalysisSummary::Empty {
            message: format!("No analyses yet for {}.", experiment.name()),
        });
    }

    let cohorts = cohort::select_latest_cohorts(analyses);

    let primary_assignment_id = experiment.primary_metric_assignment_id().ok_or_else(|| {
        Error::MissingPrimaryMetricAssignment {
            experiment_name: experiment.name().to_string(),
        }
    })?;
    let participant_counts = cohorts
        .get(&primary_assignment_id)
        .map(|cohort| participant_counts_table(cohort, experiment));

    let mut latest_results = Vec::new();
    for assignment in cohort::ordered_metric_assignments(experiment.metric_assignments()) {
        let Some(cohort) = cohorts.get(&assignment.metric_assignment_id()) else {
            continue;
        };
        let Some(last_analyzed) = cohort
            .iter()
            .map(|analysis| analysis.analysis_datetime())
            .max()
        else {
            continue;
        };
        latest_results.push(metric_result_summary(
            assignment,
            cohort,
            last_analyzed,
            experiment.variations(),
            metrics,
        )?);
    }

    for &assignment_id in cohorts.keys() {
        let declared = experiment
            .metric_assignments()
            .iter()
            .any(|assignment| assignment.metric_assignment_id() == assignment_id);
        if !declared {
            tracing::warn!(
                metric_assignment_id = assignment_id,
                "analyses reference a metric assignment the experiment does not declare"
            );
        }
    }

    let debug_json = if debug_mode {
        Some(serde_json::to_string_pretty(analyses)?)
    } else {
        None
    };

    Ok(AnalysisSummary::Ready(SummaryData {
        total_analyses: analyses.len(),
        participant_counts,
        latest_results,
        debug_json,
    }))
}

fn participant_counts_table(
    cohort: &[&Analysis],
    experiment: &Experiment,
) -> ParticipantCountsTable {
    let variations = cohort::ordered_variations(experiment.variations());
    let rows = cohort
        .iter()
        .map(|analysis| {
            let stats = analysis.participant_stats();
            ParticipantCountRow {
                strategy_label: strategy_label(analysis.analysis_strategy()),
                total: stats.total(),
                variation_counts: variations
                    .iter()
                    .map(|variation| stats.variation(variation.variation_id()))
                    .collect(),
            }
        })
        .collect();
    ParticipantCountsTable {
        variation_names: variations
            .into_iter()
            .map(|variation| variation.name().to_string())
            .collect(),
        rows,
    }
}

fn metric_result_summary(
    assignment: &MetricAssignment,
    cohort: &[&Analysis],
    last_analyzed: DateTime<Utc>,
    variations: &[Variation],
    metrics: &[Metric],
) -> Result<MetricResultSummary> {
    let metric = metrics
        .iter()
        .find(|metric| metric.metric_id() == assignment.metric_id())
        .ok_or(Error::UnknownMetric {
            metric_assignment_id: assignment.metric_assignment_id(),
            metric_id: assignment.metric_id(),
        })?;

    let attribution_window = assignment.attribution_window();
    if attribution_window.is_unrecognized() {
        tracing::warn!(
            seconds = attribution_window.seconds(),
            "unrecognized attribution window"
        );
    }

    let mut rows = Vec::with_capacity(cohort.len());
    for analysis in cohort {
        let decision = decision::render_decision(analysis.recommendation(), variations)?;
        let warnings = analysis
            .recommendation()
            .map(decision::warning_lines)
            .unwrap_or_default();
        rows.push(LatestResultRow {
            strategy_label: strategy_label(analysis.analysis_strategy()),
            participants: participants_cell(analysis.participant_stats()),
            difference_interval: interval_cell(analysis.metric_estimates()),
            recommendation: decision.to_string(),
            warnings,
        });
    }

    Ok(MetricResultSummary {
        metric_assignment_id: assignment.metric_assignment_id(),
        metric_name: metric.name().to_string(),
        attribution_window_label: attribution_window.human_label().into_owned(),
        last_analyzed: last_analyzed.date_naive(),
        rows,
    })
}

fn strategy_label(strategy: &AnalysisStrategy) -> String {
    if strategy.is_unrecognized() {
        tracing::warn!(
            code = strategy.as_str(),
            "unrecognized analysis strategy code"
        );
    }
    strategy.human_label().into_owned()
}

fn participants_cell(stats: &ParticipantStats) -> String {
    format!("{} ({})", stats.total(), stats.not_final())
}

fn interval_cell(estimates: Option<&MetricEstimates>) -> String {
    match estimates {
        None => "N/A".to_string(),
        Some(estimates) => {
            let diff = estimates.diff();
            format!("[{}, {}]", round4(diff.bottom()), round4(diff.top()))
        }
    }
}

fn round4(value: f64) -> f64 {
    // +0.0 keeps a rounded -0.0 from rendering as "-0".
    (value * 10_000.0).round() / 10_000.0 + 0.0
}

//! Latest-cohort selection over analysis batches
//!
//! The analysis pipeline appends one record per (assignment, strategy) each
//! time it runs, so a batch carries the full history of an experiment.
//! Results are only comparable within a single pipeline run, so every view
//! starts by isolating, per metric assignment, the subset of records at the
//! maximum `analysis_datetime` - the "latest cohort".
//!
//! Everything here is a pure function of its arguments: no state is retained
//! between calls, and repeated invocation over successive snapshots of the
//! same batch is safe. Grouping is O(n log g) and per-group sorting
//! O(k log k), so whole-batch recomputation stays O(n log n).

use std::collections::BTreeMap;

use crate::model::{Analysis, Experiment, MetricAssignment, Variation};

/// Group analyses by metric assignment and keep each group's latest cohort.
///
/// Within a group, only records sharing the maximum `analysis_datetime`
/// survive; the cohort is then sorted by the strategy's canonical string
/// form, tie-broken by original input index. The result order is therefore a
/// pure function of `(strategy, input index)` and never of pointer identity
/// or grouping internals.
///
/// Every key present in the input maps to a non-empty cohort. Duplicate
/// `(datetime, strategy)` pairs are an input-quality defect upstream; both
/// records are retained, in input order, rather than silently deduplicated.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use veredicto::cohort::select_latest_cohorts;
/// use veredicto::model::{Analysis, AnalysisStrategy, ParticipantStats};
///
/// let run = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
/// let analyses = vec![
///     Analysis::new(7, AnalysisStrategy::PpNaive, run, ParticipantStats::new(90, 9)),
///     Analysis::new(7, AnalysisStrategy::IttPure, run, ParticipantStats::new(100, 10)),
/// ];
///
/// let cohorts = select_latest_cohorts(&analyses);
/// let cohort = &cohorts[&7];
/// assert_eq!(cohort.len(), 2);
/// // itt_pure sorts before pp_naive regardless of input order.
/// assert_eq!(cohort[0].analysis_strategy(), &AnalysisStrategy::IttPure);
/// ```
#[must_use]
pub fn select_latest_cohorts(analyses: &[Analysis]) -> BTreeMap<u64, Vec<&Analysis>> {
    let mut groups: BTreeMap<u64, Vec<(usize, &Analysis)>> = BTreeMap::new();
    for (index, analysis) in analyses.iter().enumerate() {
        groups
            .entry(analysis.metric_assignment_id())
            .or_default()
            .push((index, analysis));
    }

    groups
        .into_iter()
        .map(|(metric_assignment_id, mut group)| {
            if let Some(latest) = group
                .iter()
                .map(|(_, analysis)| analysis.analysis_datetime())
                .max()
            {
                group.retain(|(_, analysis)| analysis.analysis_datetime() == latest);
            }
            group.sort_by(|(left_index, left), (right_index, right)| {
                left.analysis_strategy()
                    .as_str()
                    .cmp(right.analysis_strategy().as_str())
                    .then(left_index.cmp(right_index))
            });
            (
                metric_assignment_id,
                group.into_iter().map(|(_, analysis)| analysis).collect(),
            )
        })
        .collect()
}

/// Latest cohort for the experiment's primary metric assignment.
///
/// Empty when the experiment designates no primary assignment or when no
/// analyses exist for it yet. "No analyses yet" is a first-class empty
/// state callers must render as such, never an error.
#[must_use]
pub fn latest_primary_cohort<'a>(
    analyses: &'a [Analysis],
    experiment: &Experiment,
) -> Vec<&'a Analysis> {
    experiment
        .primary_metric_assignment_id()
        .and_then(|assignment_id| select_latest_cohorts(analyses).remove(&assignment_id))
        .unwrap_or_default()
}

/// Variations in display order: default variation first, then by name.
///
/// Table columns derive from this order, so it is part of the presentation
/// contract. Name comparison is case-sensitive.
#[must_use]
pub fn ordered_variations(variations: &[Variation]) -> Vec<&Variation> {
    let mut ordered: Vec<&Variation> = variations.iter().collect();
    ordered.sort_by(|left, right| {
        right
            .is_default()
            .cmp(&left.is_default())
            .then_with(|| left.name().cmp(right.name()))
    });
    ordered
}

/// Metric assignments in display order: primary first, then by assignment id.
#[must_use]
pub fn ordered_metric_assignments(assignments: &[MetricAssignment]) -> Vec<&MetricAssignment> {
    let mut ordered: Vec<&MetricAssignment> = assignments.iter().collect();
    ordered.sort_by(|left, right| {
        right
            .is_primary()
            .cmp(&left.is_primary())
            .then_with(|| {
                left.metric_assignment_id()
                    .cmp(&right.metric_assignment_id())
            })
    });
    ordered
}

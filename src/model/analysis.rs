//! Analysis record - one statistical analysis run for one metric assignment

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistical strategy used to compute an analysis.
///
/// Strategies differ in which participants they count: intent-to-treat
/// variants keep everyone assigned, the per-protocol variant keeps only
/// participants actually exposed. The wire form is the snake_case code
/// emitted by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStrategy {
    /// Intent-to-treat over all assigned participants.
    IttPure,
    /// Modified intent-to-treat with crossover participants removed.
    MittNoCrossovers,
    /// Modified intent-to-treat with spammer participants removed.
    MittNoSpammers,
    /// Modified intent-to-treat with crossovers and spammers removed.
    MittNoSpammersNoCrossovers,
    /// Naive per-protocol: exposed participants, no crossovers or spammers.
    PpNaive,
    /// Strategy code this crate does not know (producer drift, kept verbatim).
    #[serde(untagged)]
    Unrecognized(String),
}

impl AnalysisStrategy {
    /// Canonical wire form of the strategy code.
    ///
    /// Cohorts sort lexicographically on this string, which keeps
    /// cross-render output order reproducible for identical input sets.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::IttPure => "itt_pure",
            Self::MittNoCrossovers => "mitt_no_crossovers",
            Self::MittNoSpammers => "mitt_no_spammers",
            Self::MittNoSpammersNoCrossovers => "mitt_no_spammers_no_crossovers",
            Self::PpNaive => "pp_naive",
            Self::Unrecognized(code) => code,
        }
    }

    /// Human label for the strategy column of the summary tables.
    ///
    /// Unrecognized codes fall back to the raw code so data drift stays
    /// visible instead of rendering a blank cell.
    #[must_use]
    pub fn human_label(&self) -> Cow<'static, str> {
        match self {
            Self::IttPure => Cow::Borrowed("All participants"),
            Self::MittNoCrossovers => Cow::Borrowed("Without crossovers"),
            Self::MittNoSpammers => Cow::Borrowed("Without spammers"),
            Self::MittNoSpammersNoCrossovers => Cow::Borrowed("Without crossovers and spammers"),
            Self::PpNaive => Cow::Borrowed("Exposed without crossovers and spammers"),
            Self::Unrecognized(code) => Cow::Owned(code.clone()),
        }
    }

    /// Whether the code was outside the known strategy set.
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

/// Warning code attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationWarning {
    /// The experiment has not run long enough for a safe read.
    ShortPeriod,
    /// The experiment has run longer than it should.
    LongPeriod,
    /// The credible interval is too wide relative to the ROPE.
    WideCi,
    /// Warning code this crate does not know (producer drift, kept verbatim).
    #[serde(untagged)]
    Unrecognized(String),
}

impl RecommendationWarning {
    /// Canonical wire form of the warning code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ShortPeriod => "short_period",
            Self::LongPeriod => "long_period",
            Self::WideCi => "wide_ci",
            Self::Unrecognized(code) => code,
        }
    }

    /// Human text for the warning list.
    ///
    /// Unrecognized codes render a visible fallback so drift is caught by
    /// observation rather than silently dropped.
    #[must_use]
    pub fn human_label(&self) -> Cow<'static, str> {
        match self {
            Self::ShortPeriod => {
                Cow::Borrowed("Experiment period is too short. Wait a few days to be safer.")
            }
            Self::LongPeriod => {
                Cow::Borrowed("Experiment period is too long. Consider stopping it.")
            }
            Self::WideCi => Cow::Borrowed(
                "The CI is too wide in comparison to the ROPE. Collect more data to be safer.",
            ),
            Self::Unrecognized(code) => Cow::Owned(format!("Unrecognized warning: {code}")),
        }
    }

    /// Whether the code was outside the known warning set.
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

/// Why the pipeline recommended what it did (credible interval vs ROPE).
///
/// Carried through verbatim for downstream consumers; the summary does not
/// render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    /// The credible interval sits entirely inside the ROPE.
    CiInRope,
    /// The credible interval sits entirely above the ROPE.
    CiGreaterThanRope,
    /// The credible interval sits entirely below the ROPE.
    CiLessThanRope,
    /// The credible interval and the ROPE partly overlap.
    CiRopePartlyOverlap,
    /// The ROPE sits entirely inside the credible interval.
    RopeInCi,
    /// Reason code this crate does not know (producer drift, kept verbatim).
    #[serde(untagged)]
    Unrecognized(String),
}

/// Participant counts keyed by `"total"`, `"not_final"`, and
/// `"variation_<id>"`, exactly as the pipeline emits them.
///
/// Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantStats {
    counts: HashMap<String, u64>,
}

impl ParticipantStats {
    /// Create stats with the aggregate counters set.
    #[must_use]
    pub fn new(total: u64, not_final: u64) -> Self {
        let mut counts = HashMap::new();
        counts.insert("total".to_string(), total);
        counts.insert("not_final".to_string(), not_final);
        Self { counts }
    }

    /// Add a per-variation participant count.
    #[must_use]
    pub fn with_variation(mut self, variation_id: u64, count: u64) -> Self {
        self.counts.insert(format!("variation_{variation_id}"), count);
        self
    }

    /// Participants assigned so far.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.get("total")
    }

    /// Participants whose attribution window has not yet closed.
    #[must_use]
    pub fn not_final(&self) -> u64 {
        self.get("not_final")
    }

    /// Participants assigned to one variation; zero when the key is absent.
    #[must_use]
    pub fn variation(&self, variation_id: u64) -> u64 {
        self.get(&format!("variation_{variation_id}"))
    }

    fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// One interval estimate: point estimate plus credible-interval bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEstimate {
    estimate: f64,
    bottom: f64,
    top: f64,
}

impl MetricEstimate {
    /// Create an estimate from its point value and interval bounds.
    #[must_use]
    pub const fn new(estimate: f64, bottom: f64, top: f64) -> Self {
        Self {
            estimate,
            bottom,
            top,
        }
    }

    /// Get the point estimate.
    #[must_use]
    pub const fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Get the lower credible bound.
    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Get the upper credible bound.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top
    }
}

/// Interval estimates attached to an analysis.
///
/// The pipeline emits more keyed intervals than the summary consumes; only
/// the between-variation `diff` interval is modeled here and unknown keys
/// are ignored on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEstimates {
    diff: MetricEstimate,
}

impl MetricEstimates {
    /// Create estimates from the difference interval.
    #[must_use]
    pub const fn new(diff: MetricEstimate) -> Self {
        Self { diff }
    }

    /// Get the difference interval between variations.
    #[must_use]
    pub const fn diff(&self) -> MetricEstimate {
        self.diff
    }
}

/// Machine recommendation attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    end_experiment: bool,
    chosen_variation_id: Option<u64>,
    reason: RecommendationReason,
    warnings: Vec<RecommendationWarning>,
}

impl Recommendation {
    /// Create a recommendation with no chosen variation and no warnings.
    #[must_use]
    pub const fn new(end_experiment: bool, reason: RecommendationReason) -> Self {
        Self {
            end_experiment,
            chosen_variation_id: None,
            reason,
            warnings: Vec::new(),
        }
    }

    /// Create a builder for constructing a recommendation with optional fields.
    #[must_use]
    pub fn builder(end_experiment: bool, reason: RecommendationReason) -> RecommendationBuilder {
        RecommendationBuilder::new(end_experiment, reason)
    }

    /// Whether the pipeline recommends ending the experiment.
    #[must_use]
    pub const fn end_experiment(&self) -> bool {
        self.end_experiment
    }

    /// The variation to deploy, when the pipeline picked a winner.
    #[must_use]
    pub const fn chosen_variation_id(&self) -> Option<u64> {
        self.chosen_variation_id
    }

    /// Why the pipeline recommended this outcome.
    #[must_use]
    pub const fn reason(&self) -> &RecommendationReason {
        &self.reason
    }

    /// Warning codes in pipeline order (duplicates permitted).
    #[must_use]
    pub fn warnings(&self) -> &[RecommendationWarning] {
        &self.warnings
    }
}

/// Builder for `Recommendation`.
#[derive(Debug)]
pub struct RecommendationBuilder {
    end_experiment: bool,
    chosen_variation_id: Option<u64>,
    reason: RecommendationReason,
    warnings: Vec<RecommendationWarning>,
}

impl RecommendationBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(end_experiment: bool, reason: RecommendationReason) -> Self {
        Self {
            end_experiment,
            chosen_variation_id: None,
            reason,
            warnings: Vec::new(),
        }
    }

    /// Set the winning variation to deploy.
    #[must_use]
    pub const fn chosen_variation_id(mut self, variation_id: u64) -> Self {
        self.chosen_variation_id = Some(variation_id);
        self
    }

    /// Set the warning list.
    #[must_use]
    pub fn warnings(mut self, warnings: Vec<RecommendationWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Build the `Recommendation`.
    #[must_use]
    pub fn build(self) -> Recommendation {
        Recommendation {
            end_experiment: self.end_experiment,
            chosen_variation_id: self.chosen_variation_id,
            reason: self.reason,
            warnings: self.warnings,
        }
    }
}

/// Analysis record: one statistical analysis run for one metric assignment.
///
/// Produced externally by the analysis pipeline, append-only, never mutated
/// here. An experiment may track the same metric under several assignments
/// with different attribution windows, so records key on the assignment
/// rather than the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    metric_assignment_id: u64,
    analysis_strategy: AnalysisStrategy,
    analysis_datetime: DateTime<Utc>,
    participant_stats: ParticipantStats,
    #[serde(default)]
    metric_estimates: Option<MetricEstimates>,
    #[serde(default)]
    recommendation: Option<Recommendation>,
}

impl Analysis {
    /// Create an analysis with no estimates and no recommendation.
    ///
    /// # Arguments
    ///
    /// * `metric_assignment_id` - The tracked-metric instance this run reports on
    /// * `analysis_strategy` - Statistical strategy used for the run
    /// * `analysis_datetime` - When the run completed
    /// * `participant_stats` - Participant counts observed by the run
    #[must_use]
    pub const fn new(
        metric_assignment_id: u64,
        analysis_strategy: AnalysisStrategy,
        analysis_datetime: DateTime<Utc>,
        participant_stats: ParticipantStats,
    ) -> Self {
        Self {
            metric_assignment_id,
            analysis_strategy,
            analysis_datetime,
            participant_stats,
            metric_estimates: None,
            recommendation: None,
        }
    }

    /// Create a builder for constructing an analysis with optional payloads.
    #[must_use]
    pub const fn builder(
        metric_assignment_id: u64,
        analysis_strategy: AnalysisStrategy,
        analysis_datetime: DateTime<Utc>,
        participant_stats: ParticipantStats,
    ) -> AnalysisBuilder {
        AnalysisBuilder::new(
            metric_assignment_id,
            analysis_strategy,
            analysis_datetime,
            participant_stats,
        )
    }

    /// Get the metric assignment this run reports on.
    #[must_use]
    pub const fn metric_assignment_id(&self) -> u64 {
        self.metric_assignment_id
    }

    /// Get the statistical strategy used for the run.
    #[must_use]
    pub const fn analysis_strategy(&self) -> &AnalysisStrategy {
        &self.analysis_strategy
    }

    /// Get the completion timestamp of the run.
    #[must_use]
    pub const fn analysis_datetime(&self) -> DateTime<Utc> {
        self.analysis_datetime
    }

    /// Get the participant counts observed by the run.
    #[must_use]
    pub const fn participant_stats(&self) -> &ParticipantStats {
        &self.participant_stats
    }

    /// Get the interval estimates, absent when the run produced none.
    #[must_use]
    pub const fn metric_estimates(&self) -> Option<&MetricEstimates> {
        self.metric_estimates.as_ref()
    }

    /// Get the recommendation, absent when the run produced none.
    #[must_use]
    pub const fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }
}

/// Builder for `Analysis`.
#[derive(Debug)]
pub struct AnalysisBuilder {
    metric_assignment_id: u64,
    analysis_strategy: AnalysisStrategy,
    analysis_datetime: DateTime<Utc>,
    participant_stats: ParticipantStats,
    metric_estimates: Option<MetricEstimates>,
    recommendation: Option<Recommendation>,
}

impl AnalysisBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(
        metric_assignment_id: u64,
        analysis_strategy: AnalysisStrategy,
        analysis_datetime: DateTime<Utc>,
        participant_stats: ParticipantStats,
    ) -> Self {
        Self {
            metric_assignment_id,
            analysis_strategy,
            analysis_datetime,
            participant_stats,
            metric_estimates: None,
            recommendation: None,
        }
    }

    /// Attach interval estimates.
    #[must_use]
    pub const fn metric_estimates(mut self, estimates: MetricEstimates) -> Self {
        self.metric_estimates = Some(estimates);
        self
    }

    /// Attach a recommendation.
    #[must_use]
    pub fn recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }

    /// Build the `Analysis`.
    #[must_use]
    pub fn build(self) -> Analysis {
        Analysis {
            metric_assignment_id: self.metric_assignment_id,
            analysis_strategy: self.analysis_strategy,
            analysis_datetime: self.analysis_datetime,
            participant_stats: self.participant_stats,
            metric_estimates: self.metric_estimates,
            recommendation: self.recommendation,
        }
    }
}

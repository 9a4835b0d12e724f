//! Cohort selection integration tests
//!
//! Cover the aggregation contract end to end: grouping by metric assignment,
//! latest-datetime filtering, deterministic strategy ordering, and the
//! display orderings the summary tables rely on.

use chrono::{DateTime, TimeZone, Utc};
use veredicto::cohort::{
    latest_primary_cohort, ordered_metric_assignments, ordered_variations, select_latest_cohorts,
};
use veredicto::model::{
    Analysis, AnalysisStrategy, AttributionWindow, Experiment, MetricAssignment, ParticipantStats,
    Variation,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

fn analysis(assignment: u64, strategy: AnalysisStrategy, datetime: DateTime<Utc>) -> Analysis {
    Analysis::new(assignment, strategy, datetime, ParticipantStats::new(100, 10))
}

// =============================================================================
// Grouping and Latest-Cohort Filtering
// =============================================================================

#[test]
fn test_output_keys_match_distinct_assignment_ids() {
    let analyses = vec![
        analysis(3, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(1, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(3, AnalysisStrategy::PpNaive, at(1, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);

    assert_eq!(cohorts.len(), 2);
    assert!(cohorts.contains_key(&1));
    assert!(cohorts.contains_key(&3));
    assert!(cohorts.values().all(|cohort| !cohort.is_empty()));
}

#[test]
fn test_two_strategies_from_one_run_form_one_cohort() {
    // Two records for assignment 7 from the same pipeline run.
    let analyses = vec![
        analysis(7, AnalysisStrategy::PpNaive, at(1, 6)),
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);
    let cohort = &cohorts[&7];

    assert_eq!(cohort.len(), 2);
    let strategies: Vec<&str> = cohort
        .iter()
        .map(|analysis| analysis.analysis_strategy().as_str())
        .collect();
    assert_eq!(strategies, vec!["itt_pure", "pp_naive"]);
}

#[test]
fn test_newer_run_supersedes_older() {
    let analyses = vec![
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::IttPure, at(2, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);
    let cohort = &cohorts[&7];

    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort[0].analysis_datetime(), at(2, 6));
}

#[test]
fn test_latest_filter_is_per_assignment() {
    // Assignment 1 last ran on day 2, assignment 2 on day 3.
    let analyses = vec![
        analysis(1, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(1, AnalysisStrategy::IttPure, at(2, 6)),
        analysis(2, AnalysisStrategy::IttPure, at(3, 6)),
        analysis(2, AnalysisStrategy::PpNaive, at(3, 6)),
        analysis(2, AnalysisStrategy::PpNaive, at(1, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);

    assert_eq!(cohorts[&1].len(), 1);
    assert_eq!(cohorts[&1][0].analysis_datetime(), at(2, 6));
    assert_eq!(cohorts[&2].len(), 2);
    assert!(cohorts[&2]
        .iter()
        .all(|analysis| analysis.analysis_datetime() == at(3, 6)));
}

#[test]
fn test_full_strategy_ladder_orders_lexicographically() {
    let analyses = vec![
        analysis(7, AnalysisStrategy::MittNoSpammersNoCrossovers, at(1, 6)),
        analysis(7, AnalysisStrategy::PpNaive, at(1, 6)),
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::MittNoSpammers, at(1, 6)),
        analysis(7, AnalysisStrategy::MittNoCrossovers, at(1, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);
    let strategies: Vec<&str> = cohorts[&7]
        .iter()
        .map(|analysis| analysis.analysis_strategy().as_str())
        .collect();

    assert_eq!(
        strategies,
        vec![
            "itt_pure",
            "mitt_no_crossovers",
            "mitt_no_spammers",
            "mitt_no_spammers_no_crossovers",
            "pp_naive"
        ]
    );
}

#[test]
fn test_unrecognized_strategy_sorts_by_its_code() {
    let analyses = vec![
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(
            7,
            AnalysisStrategy::Unrecognized("aa_bootstrap".to_string()),
            at(1, 6),
        ),
    ];

    let cohorts = select_latest_cohorts(&analyses);
    let strategies: Vec<&str> = cohorts[&7]
        .iter()
        .map(|analysis| analysis.analysis_strategy().as_str())
        .collect();

    // "aa_bootstrap" < "itt_pure" lexicographically.
    assert_eq!(strategies, vec!["aa_bootstrap", "itt_pure"]);
}

#[test]
fn test_input_order_does_not_change_cohort_order() {
    let forward = vec![
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::MittNoSpammers, at(1, 6)),
        analysis(7, AnalysisStrategy::PpNaive, at(1, 6)),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    let from_forward: Vec<Analysis> = select_latest_cohorts(&forward)[&7]
        .iter()
        .map(|analysis| (*analysis).clone())
        .collect();
    let from_reversed: Vec<Analysis> = select_latest_cohorts(&reversed)[&7]
        .iter()
        .map(|analysis| (*analysis).clone())
        .collect();

    assert_eq!(from_forward, from_reversed);
}

#[test]
fn test_exact_duplicates_are_both_retained() {
    // Duplicate (datetime, strategy) pairs are an input-quality defect, but
    // they must not be silently deduplicated.
    let analyses = vec![
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
    ];

    let cohorts = select_latest_cohorts(&analyses);
    assert_eq!(cohorts[&7].len(), 2);
}

// =============================================================================
// Primary-Cohort Lookup
// =============================================================================

fn two_assignment_experiment() -> Experiment {
    Experiment::new(
        "landing_page_test",
        vec![
            Variation::new(1, "control", true),
            Variation::new(2, "treatment", false),
        ],
        vec![
            MetricAssignment::new(7, 100, AttributionWindow::OneWeek, true),
            MetricAssignment::new(8, 101, AttributionWindow::OneHour, false),
        ],
    )
}

#[test]
fn test_primary_cohort_picks_the_primary_assignment() {
    let analyses = vec![
        analysis(8, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::IttPure, at(1, 6)),
        analysis(7, AnalysisStrategy::PpNaive, at(1, 6)),
    ];

    let cohort = latest_primary_cohort(&analyses, &two_assignment_experiment());

    assert_eq!(cohort.len(), 2);
    assert!(cohort
        .iter()
        .all(|analysis| analysis.metric_assignment_id() == 7));
}

#[test]
fn test_primary_cohort_is_empty_without_records() {
    let analyses = vec![analysis(8, AnalysisStrategy::IttPure, at(1, 6))];
    let cohort = latest_primary_cohort(&analyses, &two_assignment_experiment());
    assert!(cohort.is_empty());
}

#[test]
fn test_primary_cohort_is_empty_without_primary_assignment() {
    let experiment = Experiment::new(
        "no_primary",
        vec![Variation::new(1, "control", true)],
        vec![MetricAssignment::new(
            7,
            100,
            AttributionWindow::OneWeek,
            false,
        )],
    );
    let analyses = vec![analysis(7, AnalysisStrategy::IttPure, at(1, 6))];
    assert!(latest_primary_cohort(&analyses, &experiment).is_empty());
}

// =============================================================================
// Display Orderings
// =============================================================================

#[test]
fn test_variation_columns_put_the_default_first() {
    let variations = vec![
        Variation::new(2, "treatment_b", false),
        Variation::new(3, "treatment_a", false),
        Variation::new(1, "control", true),
    ];

    let names: Vec<&str> = ordered_variations(&variations)
        .iter()
        .map(|variation| variation.name())
        .collect();

    assert_eq!(names, vec!["control", "treatment_a", "treatment_b"]);
}

#[test]
fn test_variation_name_ordering_is_case_sensitive() {
    let variations = vec![
        Variation::new(1, "alpha", false),
        Variation::new(2, "Beta", false),
    ];

    let names: Vec<&str> = ordered_variations(&variations)
        .iter()
        .map(|variation| variation.name())
        .collect();

    // Byte-wise comparison: uppercase sorts before lowercase.
    assert_eq!(names, vec!["Beta", "alpha"]);
}

#[test]
fn test_assignments_order_primary_first_then_by_id() {
    let assignments = vec![
        MetricAssignment::new(12, 100, AttributionWindow::OneWeek, false),
        MetricAssignment::new(11, 101, AttributionWindow::OneHour, true),
        MetricAssignment::new(10, 102, AttributionWindow::SixHours, false),
    ];

    let ids: Vec<u64> = ordered_metric_assignments(&assignments)
        .iter()
        .map(|assignment| assignment.metric_assignment_id())
        .collect();

    assert_eq!(ids, vec![11, 10, 12]);
}

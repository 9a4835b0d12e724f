//! Cohort selection benchmarks
//!
//! Toyota Way: Genchi Genbutsu (measure, don't guess)
//!
//! The aggregation runs once per render of a summary view, so per-call cost
//! is the budget that matters: grouping plus per-group sort must stay
//! O(n log n) in the batch size.
//!
//! Run with: cargo bench --bench cohort_selection

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use veredicto::cohort::select_latest_cohorts;
use veredicto::model::{
    Analysis, AnalysisStrategy, AttributionWindow, Experiment, Metric, MetricAssignment,
    ParameterType, ParticipantStats, Variation,
};
use veredicto::summary::summarize;

const SMALL_SIZE: usize = 1_000; // typical experiment history
const LARGE_SIZE: usize = 100_000; // pipeline-scale replay

const ASSIGNMENT_COUNT: u64 = 20;

const STRATEGIES: [AnalysisStrategy; 5] = [
    AnalysisStrategy::IttPure,
    AnalysisStrategy::MittNoCrossovers,
    AnalysisStrategy::MittNoSpammers,
    AnalysisStrategy::MittNoSpammersNoCrossovers,
    AnalysisStrategy::PpNaive,
];

fn base_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
}

/// Synthetic append-only batch: many runs over many assignments.
fn synthetic_batch(size: usize) -> Vec<Analysis> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|_| {
            let assignment_id = rng.gen_range(1..=ASSIGNMENT_COUNT);
            let strategy = STRATEGIES[rng.gen_range(0..STRATEGIES.len())].clone();
            let datetime = base_datetime() + Duration::hours(rng.gen_range(0..240));
            let total = rng.gen_range(100..100_000);
            Analysis::new(
                assignment_id,
                strategy,
                datetime,
                ParticipantStats::new(total, total / 10)
                    .with_variation(1, total / 2)
                    .with_variation(2, total / 2),
            )
        })
        .collect()
}

fn synthetic_experiment() -> Experiment {
    let assignments = (1..=ASSIGNMENT_COUNT)
        .map(|assignment_id| {
            MetricAssignment::new(
                assignment_id,
                100 + assignment_id,
                AttributionWindow::OneWeek,
                assignment_id == 1,
            )
        })
        .collect();
    Experiment::new(
        "bench_experiment",
        vec![
            Variation::new(1, "control", true),
            Variation::new(2, "treatment", false),
        ],
        assignments,
    )
}

fn synthetic_metrics() -> Vec<Metric> {
    (1..=ASSIGNMENT_COUNT)
        .map(|assignment_id| {
            Metric::new(
                100 + assignment_id,
                format!("metric_{assignment_id}"),
                "synthetic",
                ParameterType::Conversion,
            )
        })
        .collect()
}

/// Benchmark the grouping + latest-cohort filter on its own
fn bench_select_latest_cohorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_latest_cohorts");

    for size in [SMALL_SIZE, LARGE_SIZE] {
        let batch = synthetic_batch(size);
        group.bench_with_input(
            BenchmarkId::new("synthetic_batch", size),
            &batch,
            |b, batch| {
                b.iter(|| select_latest_cohorts(black_box(batch)));
            },
        );
    }

    group.finish();
}

/// Benchmark one full summary render (cohorts + tables + decisions)
fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    let experiment = synthetic_experiment();
    let metrics = synthetic_metrics();

    for size in [SMALL_SIZE, LARGE_SIZE] {
        let batch = synthetic_batch(size);
        group.bench_with_input(
            BenchmarkId::new("full_render", size),
            &batch,
            |b, batch| {
                b.iter(|| summarize(black_box(batch), &experiment, &metrics, false));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_select_latest_cohorts, bench_summarize);
criterion_main!(benches);

//! Analysis Summary Example
//!
//! Walks one experiment's analysis batch through the full pipeline: parse the
//! wire format, select latest cohorts, and render the summary tables and
//! decision strings a dashboard would display.
//!
//! Run with: cargo run --example analysis_summary
//! Set RUST_LOG=warn to see the unknown-code observability hook fire.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use veredicto::cohort::select_latest_cohorts;
use veredicto::model::{
    Analysis, AttributionWindow, Experiment, Metric, MetricAssignment, ParameterType, Variation,
};
use veredicto::summary::{summarize, AnalysisSummary};

/// Batch as the upstream analysis pipeline emits it: camelCase keys, three
/// records from the latest run plus one superseded record, and one warning
/// code this crate does not know.
const PIPELINE_BATCH: &str = r#"[
    {
        "metricAssignmentId": 12,
        "analysisStrategy": "itt_pure",
        "analysisDatetime": "2025-03-01T06:00:00Z",
        "participantStats": {"total": 1800, "not_final": 420, "variation_17": 910, "variation_18": 890}
    },
    {
        "metricAssignmentId": 12,
        "analysisStrategy": "itt_pure",
        "analysisDatetime": "2025-03-03T06:00:00Z",
        "participantStats": {"total": 3120, "not_final": 360, "variation_17": 1580, "variation_18": 1540},
        "metricEstimates": {"diff": {"estimate": 0.0312, "bottom": 0.0079, "top": 0.0547}},
        "recommendation": {
            "endExperiment": true,
            "chosenVariationId": 18,
            "reason": "ci_greater_than_rope",
            "warnings": []
        }
    },
    {
        "metricAssignmentId": 12,
        "analysisStrategy": "pp_naive",
        "analysisDatetime": "2025-03-03T06:00:00Z",
        "participantStats": {"total": 2480, "not_final": 300, "variation_17": 1260, "variation_18": 1220},
        "metricEstimates": {"diff": {"estimate": 0.0228, "bottom": -0.0041, "top": 0.0502}},
        "recommendation": {
            "endExperiment": false,
            "chosenVariationId": null,
            "reason": "ci_rope_partly_overlap",
            "warnings": ["short_period"]
        }
    },
    {
        "metricAssignmentId": 13,
        "analysisStrategy": "itt_pure",
        "analysisDatetime": "2025-03-03T06:00:00Z",
        "participantStats": {"total": 3120, "not_final": 360, "variation_17": 1580, "variation_18": 1540},
        "metricEstimates": {"diff": {"estimate": 0.14, "bottom": -0.22, "top": 0.51}},
        "recommendation": {
            "endExperiment": false,
            "chosenVariationId": null,
            "reason": "rope_in_ci",
            "warnings": ["wide_ci", "data_quality"]
        }
    }
]"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Veredicto Analysis Summary ===\n");

    // -------------------------------------------------------------------------
    // 1. Parse the pipeline batch (wire format)
    // -------------------------------------------------------------------------
    println!("1. Parsing the analysis batch...");

    let analyses: Vec<Analysis> = serde_json::from_str(PIPELINE_BATCH)?;
    println!("   Parsed {} analysis records", analyses.len());

    // -------------------------------------------------------------------------
    // 2. Experiment reference data
    // -------------------------------------------------------------------------
    println!("\n2. Experiment reference data...");

    let experiment = Experiment::new(
        "onboarding_checklist",
        vec![
            Variation::new(17, "control", true),
            Variation::new(18, "treatment", false),
        ],
        vec![
            MetricAssignment::new(12, 31, AttributionWindow::OneWeek, true),
            MetricAssignment::new(13, 32, AttributionWindow::SeventyTwoHours, false),
        ],
    );
    let metrics = vec![
        Metric::new(
            31,
            "signup_rate",
            "Visitors who finished signup",
            ParameterType::Conversion,
        ),
        Metric::new(
            32,
            "revenue_per_visitor",
            "Net revenue per unique visitor",
            ParameterType::Revenue,
        ),
    ];

    println!("   Experiment: {}", experiment.name());
    let variation_names: Vec<&str> = experiment
        .variations()
        .iter()
        .map(Variation::name)
        .collect();
    println!("   Variations: {}", variation_names.join(", "));
    println!(
        "   Metric assignments: {}",
        experiment.metric_assignments().len()
    );

    // -------------------------------------------------------------------------
    // 3. Select latest cohorts
    // -------------------------------------------------------------------------
    println!("\n3. Selecting latest cohorts...");

    let cohorts = select_latest_cohorts(&analyses);
    for (assignment_id, cohort) in &cohorts {
        println!(
            "   Assignment {}: {} record(s) at {}",
            assignment_id,
            cohort.len(),
            cohort[0].analysis_datetime()
        );
    }

    // -------------------------------------------------------------------------
    // 4. Build the summary
    // -------------------------------------------------------------------------
    println!("\n4. Building the summary...");

    let summary = summarize(&analyses, &experiment, &metrics, true)?;
    let AnalysisSummary::Ready(data) = summary else {
        println!("   No analyses yet.");
        return Ok(());
    };
    println!("   {}", data.headline());

    // -------------------------------------------------------------------------
    // 5. Participant counts (primary metric)
    // -------------------------------------------------------------------------
    if let Some(table) = &data.participant_counts {
        println!("\n5. Participant counts:");
        println!(
            "   {:<44} {:>8}  {}",
            "Strategy",
            "Total",
            table.variation_names.join("  ")
        );
        for row in &table.rows {
            let counts: Vec<String> = row
                .variation_counts
                .iter()
                .map(ToString::to_string)
                .collect();
            println!(
                "   {:<44} {:>8}  {}",
                row.strategy_label,
                row.total,
                counts.join("  ")
            );
        }
    }

    // -------------------------------------------------------------------------
    // 6. Latest results per metric assignment
    // -------------------------------------------------------------------------
    println!("\n6. Latest results:");

    for results in &data.latest_results {
        println!(
            "\n   {} ({}), last analyzed {}",
            results.metric_name, results.attribution_window_label, results.last_analyzed
        );
        for row in &results.rows {
            println!(
                "     {:<44} {:>12} {:>20}  {}",
                row.strategy_label, row.participants, row.difference_interval, row.recommendation
            );
            for warning in &row.warnings {
                println!("       warning: {warning}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // 7. Raw debug dump
    // -------------------------------------------------------------------------
    println!("\n7. Raw debug dump (first lines):");

    if let Some(dump) = &data.debug_json {
        for line in dump.lines().take(4) {
            println!("   {line}");
        }
        println!("   ...");
    }

    println!("\n=== Analysis Summary Complete ===");
    Ok(())
}

//! # Veredicto: Experiment Analysis Aggregation & Decision Rendering
//!
//! **Version**: 0.2.1
//!
//! Veredicto is the aggregation core of an experiment-reporting dashboard:
//! it takes the flat, append-only batch of statistical analysis records an
//! external pipeline produces for one experiment, isolates the most recent
//! comparable cohort per tracked metric, and renders machine recommendations
//! as a fixed set of human-facing outcomes.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Jidoka**: referential-integrity violations stop the line as hard
//!   errors instead of rendering blank names
//! - **Poka-Yoke safety**: closed code enums with exhaustive label tables,
//!   checked at compile time
//! - **Genchi Genbutsu**: unknown producer codes stay visible in the output
//!   and in the log, never silently dropped
//! - **Muda elimination**: one stateless O(n log n) pass per render, no
//!   caching that could go stale
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use veredicto::model::{
//!     Analysis, AnalysisStrategy, AttributionWindow, Experiment, Metric, MetricAssignment,
//!     ParameterType, ParticipantStats, Variation,
//! };
//! use veredicto::summary::{summarize, AnalysisSummary};
//!
//! let experiment = Experiment::new(
//!     "signup_button_color",
//!     vec![
//!         Variation::new(1, "control", true),
//!         Variation::new(2, "treatment", false),
//!     ],
//!     vec![MetricAssignment::new(7, 100, AttributionWindow::OneWeek, true)],
//! );
//! let metrics = vec![Metric::new(
//!     100,
//!     "signup_rate",
//!     "Completed signups",
//!     ParameterType::Conversion,
//! )];
//! let analyses = vec![Analysis::new(
//!     7,
//!     AnalysisStrategy::IttPure,
//!     Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap(),
//!     ParticipantStats::new(1000, 100)
//!         .with_variation(1, 600)
//!         .with_variation(2, 400),
//! )];
//!
//! let summary = summarize(&analyses, &experiment, &metrics, false)?;
//! if let AnalysisSummary::Ready(data) = summary {
//!     assert_eq!(data.headline(), "Found 1 analysis objects in total.");
//! }
//! # Ok::<(), veredicto::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cohort;
pub mod decision;
pub mod error;
pub mod model;
pub mod summary;

pub use error::{Error, Result};

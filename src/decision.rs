//! Decision rendering - recommendation payloads to human-facing outcomes
//!
//! The analysis pipeline attaches a machine recommendation to each record;
//! people are shown one of a fixed set of outcome strings. Rules evaluate in
//! order, first match wins, and every combination of `end_experiment` and
//! `chosen_variation_id` lands in exactly one of the four decision kinds.
//!
//! A chosen variation that does not resolve against the experiment's
//! variation list is a contract violation by the upstream producer and
//! surfaces as a hard error, never as a blank name.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::{Recommendation, Variation};

/// Human-facing outcome of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No recommendation was produced; renders as an empty string.
    None,
    /// The experiment should keep collecting data.
    KeepRunning,
    /// End the experiment; the variations are practically equivalent.
    EndEither,
    /// End the experiment and deploy the named winning variation.
    EndDeploy {
        /// Resolved name of the variation to deploy.
        variation_name: String,
    },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::KeepRunning => f.write_str("Keep running"),
            Self::EndEither => f.write_str("End experiment; deploy either variation"),
            Self::EndDeploy { variation_name } => {
                write!(f, "End experiment; deploy {variation_name}")
            }
        }
    }
}

/// Map a recommendation to its decision, resolving the chosen variation.
///
/// Rules, evaluated in order, first match wins:
/// 1. no recommendation - [`Decision::None`],
/// 2. `end_experiment` false - [`Decision::KeepRunning`],
/// 3. ended with no chosen variation - [`Decision::EndEither`],
/// 4. ended with a chosen variation - [`Decision::EndDeploy`] with the name
///    resolved from `variations`; an id that resolves to nothing fails with
///    [`Error::UnknownChosenVariation`].
///
/// `chosen_variation_id` is an explicit `Option`, so an id of `0` follows
/// rule 4 like any other id.
///
/// # Example
///
/// ```rust
/// use veredicto::decision::{render_decision, Decision};
/// use veredicto::model::{Recommendation, RecommendationReason, Variation};
///
/// let variations = vec![
///     Variation::new(1, "control", true),
///     Variation::new(42, "treatment", false),
/// ];
/// let recommendation = Recommendation::builder(true, RecommendationReason::CiGreaterThanRope)
///     .chosen_variation_id(42)
///     .build();
///
/// let decision = render_decision(Some(&recommendation), &variations)?;
/// assert_eq!(decision.to_string(), "End experiment; deploy treatment");
/// # Ok::<(), veredicto::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::UnknownChosenVariation`] when the recommendation names a
/// variation id absent from `variations`.
pub fn render_decision(
    recommendation: Option<&Recommendation>,
    variations: &[Variation],
) -> Result<Decision> {
    let Some(recommendation) = recommendation else {
        return Ok(Decision::None);
    };
    if !recommendation.end_experiment() {
        return Ok(Decision::KeepRunning);
    }
    match recommendation.chosen_variation_id() {
        None => Ok(Decision::EndEither),
        Some(variation_id) => {
            let variation = variations
                .iter()
                .find(|variation| variation.variation_id() == variation_id)
                .ok_or(Error::UnknownChosenVariation { variation_id })?;
            Ok(Decision::EndDeploy {
                variation_name: variation.name().to_string(),
            })
        }
    }
}

/// Render a recommendation's warnings as human-text lines.
///
/// Order and duplicates are preserved element-wise. Unrecognized codes render
/// the visible fallback from
/// [`RecommendationWarning::human_label`](crate::model::RecommendationWarning::human_label)
/// and are logged, so producer drift is observable without interrupting
/// rendering.
#[must_use]
pub fn warning_lines(recommendation: &Recommendation) -> Vec<String> {
    recommendation
        .warnings()
        .iter()
        .map(|warning| {
            if warning.is_unrecognized() {
                tracing::warn!(
                    code = warning.as_str(),
                    "unrecognized recommendation warning code"
                );
            }
            warning.human_label().into_owned()
        })
        .collect()
}

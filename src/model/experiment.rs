//! Experiment reference data - variations and metric assignments

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Attribution window: how long after assignment a conversion still counts.
///
/// The platform only offers a fixed set of durations; the wire form is the
/// raw number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum AttributionWindow {
    /// 1 hour
    OneHour,
    /// 6 hours
    SixHours,
    /// 12 hours
    TwelveHours,
    /// 24 hours
    TwentyFourHours,
    /// 72 hours
    SeventyTwoHours,
    /// 1 week
    OneWeek,
    /// 2 weeks
    TwoWeeks,
    /// 3 weeks
    ThreeWeeks,
    /// 4 weeks
    FourWeeks,
    /// Seconds value outside the fixed set (producer drift, kept verbatim).
    Unrecognized(u32),
}

impl AttributionWindow {
    /// Window length in seconds (the wire form).
    #[must_use]
    pub const fn seconds(self) -> u32 {
        match self {
            Self::OneHour => 3_600,
            Self::SixHours => 21_600,
            Self::TwelveHours => 43_200,
            Self::TwentyFourHours => 86_400,
            Self::SeventyTwoHours => 259_200,
            Self::OneWeek => 604_800,
            Self::TwoWeeks => 1_209_600,
            Self::ThreeWeeks => 1_814_400,
            Self::FourWeeks => 2_419_200,
            Self::Unrecognized(seconds) => seconds,
        }
    }

    /// Human label for the attribution window.
    ///
    /// Unrecognized windows fall back to a raw seconds display so drift stays
    /// visible.
    #[must_use]
    pub fn human_label(self) -> Cow<'static, str> {
        match self {
            Self::OneHour => Cow::Borrowed("1 hour"),
            Self::SixHours => Cow::Borrowed("6 hours"),
            Self::TwelveHours => Cow::Borrowed("12 hours"),
            Self::TwentyFourHours => Cow::Borrowed("24 hours"),
            Self::SeventyTwoHours => Cow::Borrowed("72 hours"),
            Self::OneWeek => Cow::Borrowed("1 week"),
            Self::TwoWeeks => Cow::Borrowed("2 weeks"),
            Self::ThreeWeeks => Cow::Borrowed("3 weeks"),
            Self::FourWeeks => Cow::Borrowed("4 weeks"),
            Self::Unrecognized(seconds) => Cow::Owned(format!("{seconds} seconds")),
        }
    }

    /// Whether the seconds value was outside the fixed window set.
    #[must_use]
    pub const fn is_unrecognized(self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl From<u32> for AttributionWindow {
    fn from(seconds: u32) -> Self {
        match seconds {
            3_600 => Self::OneHour,
            21_600 => Self::SixHours,
            43_200 => Self::TwelveHours,
            86_400 => Self::TwentyFourHours,
            259_200 => Self::SeventyTwoHours,
            604_800 => Self::OneWeek,
            1_209_600 => Self::TwoWeeks,
            1_814_400 => Self::ThreeWeeks,
            2_419_200 => Self::FourWeeks,
            other => Self::Unrecognized(other),
        }
    }
}

impl From<AttributionWindow> for u32 {
    fn from(window: AttributionWindow) -> Self {
        window.seconds()
    }
}

/// One experiment variation (arm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    variation_id: u64,
    name: String,
    is_default: bool,
}

impl Variation {
    /// Create a variation.
    #[must_use]
    pub fn new(variation_id: u64, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            variation_id,
            name: name.into(),
            is_default,
        }
    }

    /// Get the variation id.
    #[must_use]
    pub const fn variation_id(&self) -> u64 {
        self.variation_id
    }

    /// Get the variation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the default (control) variation.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Assignment of a metric to an experiment under one attribution window.
///
/// The same metric definition may be assigned to an experiment several times
/// with different windows, so the assignment id is the unit analyses key on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAssignment {
    metric_assignment_id: u64,
    metric_id: u64,
    #[serde(rename = "attributionWindowSeconds")]
    attribution_window: AttributionWindow,
    is_primary: bool,
}

impl MetricAssignment {
    /// Create a metric assignment.
    #[must_use]
    pub const fn new(
        metric_assignment_id: u64,
        metric_id: u64,
        attribution_window: AttributionWindow,
        is_primary: bool,
    ) -> Self {
        Self {
            metric_assignment_id,
            metric_id,
            attribution_window,
            is_primary,
        }
    }

    /// Get the assignment id.
    #[must_use]
    pub const fn metric_assignment_id(&self) -> u64 {
        self.metric_assignment_id
    }

    /// Get the id of the assigned metric definition.
    #[must_use]
    pub const fn metric_id(&self) -> u64 {
        self.metric_id
    }

    /// Get the attribution window for this assignment.
    #[must_use]
    pub const fn attribution_window(&self) -> AttributionWindow {
        self.attribution_window
    }

    /// Whether this is the experiment's primary metric assignment.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.is_primary
    }
}

/// Experiment reference data: name plus variation and metric-assignment lists.
///
/// Supplied read-only by the host; this crate never creates or mutates
/// experiments, it only resolves names and ids against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    name: String,
    variations: Vec<Variation>,
    metric_assignments: Vec<MetricAssignment>,
}

impl Experiment {
    /// Create experiment reference data.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        variations: Vec<Variation>,
        metric_assignments: Vec<MetricAssignment>,
    ) -> Self {
        Self {
            name: name.into(),
            variations,
            metric_assignments,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the variation list, in host-supplied order.
    #[must_use]
    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    /// Get the metric assignment list, in host-supplied order.
    #[must_use]
    pub fn metric_assignments(&self) -> &[MetricAssignment] {
        &self.metric_assignments
    }

    /// Resolve a variation by id.
    #[must_use]
    pub fn variation_by_id(&self, variation_id: u64) -> Option<&Variation> {
        self.variations
            .iter()
            .find(|variation| variation.variation_id() == variation_id)
    }

    /// The primary metric assignment id, when the experiment designates one.
    #[must_use]
    pub fn primary_metric_assignment_id(&self) -> Option<u64> {
        self.metric_assignments
            .iter()
            .find(|assignment| assignment.is_primary())
            .map(MetricAssignment::metric_assignment_id)
    }
}

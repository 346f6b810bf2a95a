//! Event and marker types produced by the extraction engine.
//!
//! All types here are immutable once constructed: each image-pair run
//! produces fresh `CandidateEvent`s and `MarkerPoint`s, derives
//! `AnnotatedEvent`s and `GradedEvent`s from them, and hands the graded
//! events to the persistence collaborator. Nothing is mutated after
//! creation, which is what makes per-pair parallel processing safe.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the origin of an image pair: which volcano and which sensor
/// produced the charts. Supplied by the caller and carried through to every
/// graded event so downstream consumers can merge results independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceTag {
    /// Volcano identifier.
    pub volcano: String,
    /// Sensor identifier.
    pub sensor: String,
}

impl SourceTag {
    /// Creates a new source tag.
    pub fn new(volcano: impl Into<String>, sensor: impl Into<String>) -> Self {
        Self {
            volcano: volcano.into(),
            sensor: sensor.into(),
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.volcano, self.sensor)
    }
}

/// An unvalidated (timestamp, power) pair extracted from recognized text,
/// prior to color correlation.
///
/// A candidate event only exists if both a timestamp and a power value were
/// resolved; timestamps with no value in their search window are dropped at
/// extraction time, never retained as partial records. An undefined reading
/// (a literal "NaN" token in the source text, or a numeric token that failed
/// conversion) is represented as `f64::NAN` in `power_mw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEvent {
    /// Absolute instant parsed from the `DD-Mon-YYYY HH:MM:SS` pattern.
    pub timestamp: NaiveDateTime,
    /// Volcanic radiative power in megawatts; `f64::NAN` when undefined.
    pub power_mw: f64,
    /// Position among extracted events for this image, in emission order.
    /// Used for tie-breaking and debugging only.
    pub sequence_index: usize,
}

impl CandidateEvent {
    /// Returns true if the power value is defined, positive, and usable.
    pub fn has_valid_power(&self) -> bool {
        !self.power_mw.is_nan() && self.power_mw > 0.0
    }
}

/// The color class of a detected marker point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    /// Alert color (red-dominant): the reading falls inside the alert range.
    Alert,
    /// Background/negative color (near-black): the reading falls outside it.
    Background,
}

/// A colored dot detected on the distance/trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPoint {
    /// Pixel x-coordinate of the region's area-weighted centroid.
    pub x: i32,
    /// Pixel y-coordinate of the region's area-weighted centroid.
    pub y: i32,
    /// Which marker color the source region matched.
    pub color_class: ColorClass,
}

/// Chart-level color verdict assigned by the correlator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorVerdict {
    /// No marker points were detected on the companion chart.
    NoMarker,
    /// Every detected marker was the alert color.
    Alert,
    /// Every detected marker was the background color.
    Background,
    /// Markers of both colors were present.
    Mixed,
}

/// How the color verdict was matched to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// A single marker was unambiguously attributable to this event.
    UniqueMatch,
    /// All markers on the chart were alert-colored; the group validates
    /// every event collectively.
    GroupValidationAllAlert,
    /// All markers on the chart were background-colored.
    AllBackground,
    /// Markers of both colors were present.
    MixedColors,
    /// No matching was possible (e.g. empty marker set).
    Unknown,
}

/// A candidate event enriched with the correlator's verdict.
///
/// 1:1 with its `CandidateEvent`; the marker set is consumed in aggregate
/// rather than attributed point-by-point, because chart-level color
/// consensus is the validation signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedEvent {
    /// The underlying candidate event.
    pub event: CandidateEvent,
    /// Chart-level color verdict for this event's image pair.
    pub color_verdict: ColorVerdict,
    /// How the verdict was matched.
    pub match_method: MatchMethod,
}

/// Confidence grade governing whether and how an event is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    /// The event must not be persisted.
    Invalid,
    /// Weak evidence; admissible but flagged.
    Low,
    /// Reasonable evidence; admissible but flagged.
    Medium,
    /// Strong evidence; admissible without review.
    High,
}

/// Fixed-vocabulary explanation tag for a classification outcome.
///
/// Serialized in kebab-case (e.g. `invalid-or-zero-power`) for audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rationale {
    /// The power value was undefined, zero, or negative.
    InvalidOrZeroPower,
    /// No marker was available to validate the event.
    NoValidationMarker,
    /// The marker consensus says the reading is outside the alert range.
    OutOfAlertRange,
    /// A single marker uniquely validated the event.
    UniqueMatch,
    /// The whole-chart alert consensus validated the event as part of a group.
    GroupValidation,
    /// Markers of both colors made the verdict ambiguous.
    AmbiguousMixedColors,
    /// No stronger rule applied; standard admission.
    StandardValidation,
}

impl Rationale {
    /// Returns the audit tag for this rationale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rationale::InvalidOrZeroPower => "invalid-or-zero-power",
            Rationale::NoValidationMarker => "no-validation-marker",
            Rationale::OutOfAlertRange => "out-of-alert-range",
            Rationale::UniqueMatch => "unique-match",
            Rationale::GroupValidation => "group-validation",
            Rationale::AmbiguousMixedColors => "ambiguous-mixed-colors",
            Rationale::StandardValidation => "standard-validation",
        }
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully classified event, ready for the persistence collaborator.
///
/// Only records with `admit = true` may be retained downstream; records with
/// `requires_manual_review = true` must be flagged for human follow-up, never
/// silently auto-approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedEvent {
    /// Origin of the image pair this event came from.
    pub tag: SourceTag,
    /// Event timestamp.
    pub timestamp: NaiveDateTime,
    /// Volcanic radiative power in megawatts; `f64::NAN` when undefined.
    pub power_mw: f64,
    /// Emission order within the source image.
    pub sequence_index: usize,
    /// Chart-level color verdict.
    pub color_verdict: ColorVerdict,
    /// How the verdict was matched.
    pub match_method: MatchMethod,
    /// Confidence grade.
    pub confidence_tier: ConfidenceTier,
    /// Whether a human must review this event before it is trusted.
    pub requires_manual_review: bool,
    /// Whether this event may be persisted at all.
    pub admit: bool,
    /// Audit tag explaining the classification.
    pub rationale: Rationale,
}

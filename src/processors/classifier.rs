//! Confidence classification of annotated events.
//!
//! The classifier is a pure, total decision table: an explicit ordered list
//! of (predicate, outcome) rules evaluated top-down, first match wins. The
//! ordering matters: data validity (rule 1) and the explicit out-of-range
//! verdict (rule 3) are hard exclusions that run before any
//! positive-evidence rule, so invalid data is never admitted regardless of
//! marker agreement. A catch-all final rule makes the table total.

use crate::domain::{
    AnnotatedEvent, ColorVerdict, ConfidenceTier, GradedEvent, MatchMethod, Rationale, SourceTag,
};

/// Classification outcome attached to an event by a matching rule.
#[derive(Debug, Clone, Copy)]
struct Outcome {
    tier: ConfidenceTier,
    requires_manual_review: bool,
    admit: bool,
    rationale: Rationale,
}

type Predicate = fn(&AnnotatedEvent) -> bool;

/// The ordered rule table. Every input matches at least the final rule.
const RULES: &[(Predicate, Outcome)] = &[
    // 1. Undefined, zero, or negative power is never admissible.
    (
        |e| !e.event.has_valid_power(),
        Outcome {
            tier: ConfidenceTier::Invalid,
            requires_manual_review: false,
            admit: false,
            rationale: Rationale::InvalidOrZeroPower,
        },
    ),
    // 2. No marker to validate against: admit, but flag for review.
    (
        |e| e.color_verdict == ColorVerdict::NoMarker,
        Outcome {
            tier: ConfidenceTier::Low,
            requires_manual_review: true,
            admit: true,
            rationale: Rationale::NoValidationMarker,
        },
    ),
    // 3. Background consensus: the reading is outside the alert range,
    //    regardless of how it was matched.
    (
        |e| e.color_verdict == ColorVerdict::Background,
        Outcome {
            tier: ConfidenceTier::Invalid,
            requires_manual_review: false,
            admit: false,
            rationale: Rationale::OutOfAlertRange,
        },
    ),
    // 4. A uniquely attributed alert marker is the strongest evidence.
    (
        |e| e.color_verdict == ColorVerdict::Alert && e.match_method == MatchMethod::UniqueMatch,
        Outcome {
            tier: ConfidenceTier::High,
            requires_manual_review: false,
            admit: true,
            rationale: Rationale::UniqueMatch,
        },
    ),
    // 5. Whole-chart alert consensus validates the group collectively.
    (
        |e| e.match_method == MatchMethod::GroupValidationAllAlert,
        Outcome {
            tier: ConfidenceTier::Medium,
            requires_manual_review: true,
            admit: true,
            rationale: Rationale::GroupValidation,
        },
    ),
    // 6. Conflicting marker colors: ambiguous evidence.
    (
        |e| e.color_verdict == ColorVerdict::Mixed || e.match_method == MatchMethod::MixedColors,
        Outcome {
            tier: ConfidenceTier::Low,
            requires_manual_review: true,
            admit: true,
            rationale: Rationale::AmbiguousMixedColors,
        },
    ),
    // 7. Fallback.
    (
        |_| true,
        Outcome {
            tier: ConfidenceTier::Medium,
            requires_manual_review: true,
            admit: true,
            rationale: Rationale::StandardValidation,
        },
    ),
];

/// Grades annotated events by the ordered rule table.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceClassifier;

impl ConfidenceClassifier {
    /// Creates a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classifies one annotated event. Total and deterministic: identical
    /// input always yields an identical graded event.
    pub fn classify(&self, tag: &SourceTag, annotated: &AnnotatedEvent) -> GradedEvent {
        let outcome = RULES
            .iter()
            .find(|(predicate, _)| predicate(annotated))
            .map(|(_, outcome)| *outcome)
            .unwrap_or_else(|| RULES[RULES.len() - 1].1);

        GradedEvent {
            tag: tag.clone(),
            timestamp: annotated.event.timestamp,
            power_mw: annotated.event.power_mw,
            sequence_index: annotated.event.sequence_index,
            color_verdict: annotated.color_verdict,
            match_method: annotated.match_method,
            confidence_tier: outcome.tier,
            requires_manual_review: outcome.requires_manual_review,
            admit: outcome.admit,
            rationale: outcome.rationale,
        }
    }
}

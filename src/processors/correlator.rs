//! Chart-level correlation of candidate events with the marker set.
//!
//! The two charts of an image pair are rendered independently and drift in
//! layout, so there is no reliable per-point-to-event geometric mapping.
//! The correlator instead takes the color consensus of the whole marker set
//! and applies the same verdict to every event of the pair. This trades
//! per-event precision for robustness against rendering drift and is
//! intentional; see the classifier for how each verdict is graded.

use crate::domain::{AnnotatedEvent, CandidateEvent, ColorClass, ColorVerdict, MarkerPoint, MatchMethod};

/// Annotates candidate events with the chart-wide color verdict.
#[derive(Debug, Clone, Default)]
pub struct EventMarkerCorrelator;

impl EventMarkerCorrelator {
    /// Creates a new correlator.
    pub fn new() -> Self {
        Self
    }

    /// Assigns the same (verdict, method) pair to every event, derived once
    /// from the full marker set of the companion chart.
    pub fn correlate(
        &self,
        events: Vec<CandidateEvent>,
        markers: &[MarkerPoint],
    ) -> Vec<AnnotatedEvent> {
        let (color_verdict, match_method) = chart_consensus(markers);
        events
            .into_iter()
            .map(|event| AnnotatedEvent {
                event,
                color_verdict,
                match_method,
            })
            .collect()
    }
}

/// Reduces a marker set to its chart-level consensus.
fn chart_consensus(markers: &[MarkerPoint]) -> (ColorVerdict, MatchMethod) {
    if markers.is_empty() {
        return (ColorVerdict::NoMarker, MatchMethod::Unknown);
    }
    let all_alert = markers.iter().all(|m| m.color_class == ColorClass::Alert);
    let all_background = markers
        .iter()
        .all(|m| m.color_class == ColorClass::Background);
    if all_alert {
        (ColorVerdict::Alert, MatchMethod::GroupValidationAllAlert)
    } else if all_background {
        (ColorVerdict::Background, MatchMethod::AllBackground)
    } else {
        (ColorVerdict::Mixed, MatchMethod::MixedColors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(sequence_index: usize) -> CandidateEvent {
        CandidateEvent {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(4, 12, 0)
                .unwrap(),
            power_mw: 3.4,
            sequence_index,
        }
    }

    fn marker(color_class: ColorClass) -> MarkerPoint {
        MarkerPoint {
            x: 10,
            y: 10,
            color_class,
        }
    }

    #[test]
    fn test_empty_marker_set_gives_no_marker_verdict() {
        let annotated = EventMarkerCorrelator::new().correlate(vec![event(0)], &[]);
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].color_verdict, ColorVerdict::NoMarker);
        assert_eq!(annotated[0].match_method, MatchMethod::Unknown);
    }

    #[test]
    fn test_all_alert_markers_validate_as_group() {
        let markers = vec![marker(ColorClass::Alert); 3];
        let annotated = EventMarkerCorrelator::new().correlate(vec![event(0), event(1)], &markers);
        assert_eq!(annotated.len(), 2);
        for a in &annotated {
            assert_eq!(a.color_verdict, ColorVerdict::Alert);
            assert_eq!(a.match_method, MatchMethod::GroupValidationAllAlert);
        }
    }

    #[test]
    fn test_all_background_markers() {
        let markers = vec![marker(ColorClass::Background)];
        let annotated = EventMarkerCorrelator::new().correlate(vec![event(0)], &markers);
        assert_eq!(annotated[0].color_verdict, ColorVerdict::Background);
        assert_eq!(annotated[0].match_method, MatchMethod::AllBackground);
    }

    #[test]
    fn test_mixed_markers() {
        let markers = vec![marker(ColorClass::Alert), marker(ColorClass::Background)];
        let annotated = EventMarkerCorrelator::new().correlate(vec![event(0)], &markers);
        assert_eq!(annotated[0].color_verdict, ColorVerdict::Mixed);
        assert_eq!(annotated[0].match_method, MatchMethod::MixedColors);
    }

    #[test]
    fn test_verdict_is_uniform_across_events() {
        let markers = vec![marker(ColorClass::Alert), marker(ColorClass::Background)];
        let events: Vec<_> = (0..5).map(event).collect();
        let annotated = EventMarkerCorrelator::new().correlate(events, &markers);
        assert!(annotated
            .iter()
            .all(|a| a.color_verdict == ColorVerdict::Mixed));
        // Enrichment is 1:1 and preserves order.
        let indexes: Vec<_> = annotated.iter().map(|a| a.event.sequence_index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    }
}

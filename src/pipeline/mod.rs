//! Image-pair processing pipeline.
//!
//! Wires the components together: the time-series chart goes through the
//! text recognizer and the timestamp/value extractor, the companion
//! distance/trend chart goes through the marker point detector, the
//! correlator merges the two, and the classifier grades every event. Each
//! image pair is one independent unit with no shared mutable state, so the
//! batch entry point can run pairs sequentially or in parallel with no
//! ordering requirement on completion.

use crate::core::config::PipelineConfig;
use crate::core::errors::{EngineError, EngineResult};
use crate::core::traits::TextRecognizer;
use crate::domain::{GradedEvent, SourceTag};
use crate::processors::{
    ConfidenceClassifier, EventMarkerCorrelator, MarkerPointDetector, TimestampValueExtractor,
};
use image::RgbImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// One unit of work: the two chart images of a scrape plus their origin tag.
#[derive(Debug, Clone)]
pub struct ChartPairInput {
    /// Origin of the pair (volcano, sensor), echoed into every graded event.
    pub tag: SourceTag,
    /// The rendered cumulative time-series chart; consumed via OCR.
    pub series_chart: RgbImage,
    /// The distance/trend chart carrying the colored marker dots.
    pub trend_chart: RgbImage,
}

/// Result of processing one image pair.
///
/// A failed pair carries its tag so the caller can log or retry at its own
/// discretion; failure of one pair never affects another.
#[derive(Debug)]
pub enum ChartPairOutcome {
    /// The pair was processed; events may be empty if recognition found
    /// no usable text.
    Completed {
        /// Origin of the pair.
        tag: SourceTag,
        /// Graded events in extraction order.
        events: Vec<GradedEvent>,
    },
    /// The pair could not be processed (image decode or recognizer failure).
    Failed {
        /// Origin of the pair.
        tag: SourceTag,
        /// The propagated failure.
        error: EngineError,
    },
}

impl ChartPairOutcome {
    /// Returns the tag of the originating pair.
    pub fn tag(&self) -> &SourceTag {
        match self {
            ChartPairOutcome::Completed { tag, .. } => tag,
            ChartPairOutcome::Failed { tag, .. } => tag,
        }
    }
}

/// Strategy for processing multiple image pairs.
#[derive(Debug, Clone)]
pub enum ProcessingStrategy {
    /// Always process sequentially.
    Sequential,
    /// Always process in parallel.
    Parallel,
    /// Parallel when the batch is larger than the threshold.
    Auto(usize),
}

impl ProcessingStrategy {
    /// Determines if parallel processing should be used for the given batch size.
    pub fn should_use_parallel(&self, pair_count: usize) -> bool {
        match self {
            ProcessingStrategy::Sequential => false,
            ProcessingStrategy::Parallel => true,
            ProcessingStrategy::Auto(threshold) => pair_count > *threshold,
        }
    }
}

/// The extraction engine: turns chart image pairs into graded events.
#[derive(Debug)]
pub struct Engine<R: TextRecognizer> {
    recognizer: R,
    extractor: TimestampValueExtractor,
    detector: MarkerPointDetector,
    correlator: EventMarkerCorrelator,
    classifier: ConfidenceClassifier,
}

impl<R: TextRecognizer> Engine<R> {
    /// Creates a new engine with the given recognizer and configuration.
    pub fn new(recognizer: R, config: PipelineConfig) -> EngineResult<Self> {
        Ok(Self {
            recognizer,
            extractor: TimestampValueExtractor::new(config.extractor)?,
            detector: MarkerPointDetector::new(config.detector),
            correlator: EventMarkerCorrelator::new(),
            classifier: ConfidenceClassifier::new(),
        })
    }

    /// Processes one image pair into graded events, in extraction order.
    ///
    /// Empty recognized text yields an empty event list, not an error; only
    /// a recognizer or image failure propagates, and it aborts this pair
    /// alone.
    pub fn process_pair(&self, input: &ChartPairInput) -> EngineResult<Vec<GradedEvent>> {
        let text = self.recognizer.recognize(&input.series_chart)?;
        if text.trim().is_empty() {
            debug!(tag = %input.tag, "recognizer returned no text");
        }
        let candidates = self.extractor.extract(&text);
        let markers = self.detector.detect(&input.trend_chart);
        debug!(
            tag = %input.tag,
            candidates = candidates.len(),
            markers = markers.len(),
            "correlating events with marker set"
        );
        let annotated = self.correlator.correlate(candidates, &markers);
        let graded = annotated
            .iter()
            .map(|a| self.classifier.classify(&input.tag, a))
            .collect();
        Ok(graded)
    }

    /// Processes a batch of image pairs, one outcome per input, in input
    /// order. Pairs are independent: a failure is captured in that pair's
    /// outcome and processing of the others continues.
    pub fn process_batch(
        &self,
        inputs: &[ChartPairInput],
        strategy: ProcessingStrategy,
    ) -> Vec<ChartPairOutcome> {
        let parallel = strategy.should_use_parallel(inputs.len());
        info!(pairs = inputs.len(), parallel, "processing chart pair batch");

        let process = |input: &ChartPairInput| match self.process_pair(input) {
            Ok(events) => ChartPairOutcome::Completed {
                tag: input.tag.clone(),
                events,
            },
            Err(error) => {
                warn!(tag = %input.tag, %error, "chart pair failed");
                ChartPairOutcome::Failed {
                    tag: input.tag.clone(),
                    error,
                }
            }
        };

        if parallel {
            inputs.par_iter().map(process).collect()
        } else {
            inputs.iter().map(process).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PipelineConfig;
    use crate::domain::{ConfidenceTier, Rationale};
    use image::Rgb;

    /// Recognizer stub returning a fixed text per call.
    struct FixedRecognizer(String);

    impl TextRecognizer for FixedRecognizer {
        fn recognize(&self, _image: &RgbImage) -> EngineResult<String> {
            Ok(self.0.clone())
        }
    }

    /// Recognizer stub that always fails.
    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn recognize(&self, _image: &RgbImage) -> EngineResult<String> {
            Err(EngineError::recognition(std::io::Error::new(
                std::io::ErrorKind::Other,
                "ocr backend unavailable",
            )))
        }
    }

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn fill_dot(chart: &mut RgbImage, cx: u32, cy: u32, color: Rgb<u8>) {
        for y in cy.saturating_sub(2)..=(cy + 2) {
            for x in cx.saturating_sub(2)..=(cx + 2) {
                chart.put_pixel(x, y, color);
            }
        }
    }

    fn input(trend_chart: RgbImage) -> ChartPairInput {
        ChartPairInput {
            tag: SourceTag::new("etna", "MODIS"),
            series_chart: blank(10, 10),
            trend_chart,
        }
    }

    fn engine(text: &str) -> Engine<FixedRecognizer> {
        Engine::new(
            FixedRecognizer(text.to_string()),
            PipelineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_group_validation() {
        let mut trend = blank(60, 20);
        for cx in [10, 30, 50] {
            fill_dot(&mut trend, cx, 10, Rgb([230, 10, 10]));
        }
        let engine = engine("15-Mar-2024 04:12:00\nVRP\n2.1 MW");
        let events = engine.process_pair(&input(trend)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].confidence_tier, ConfidenceTier::Medium);
        assert!(events[0].admit);
        assert!(events[0].requires_manual_review);
        assert_eq!(events[0].rationale, Rationale::GroupValidation);
        assert_eq!(events[0].tag, SourceTag::new("etna", "MODIS"));
    }

    #[test]
    fn test_end_to_end_nan_power_beats_empty_marker_set() {
        let engine = engine("15-Mar-2024 04:12:00\nVRP\nNaN MW");
        let events = engine.process_pair(&input(blank(20, 20))).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].confidence_tier, ConfidenceTier::Invalid);
        assert!(!events[0].admit);
        assert_eq!(events[0].rationale, Rationale::InvalidOrZeroPower);
    }

    #[test]
    fn test_end_to_end_background_marker_excludes_event() {
        let mut trend = blank(30, 30);
        fill_dot(&mut trend, 15, 15, Rgb([10, 10, 10]));
        let engine = engine("15-Mar-2024 04:12:00\nVRP\n5.0 MW");
        let events = engine.process_pair(&input(trend)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].confidence_tier, ConfidenceTier::Invalid);
        assert!(!events[0].admit);
        assert_eq!(events[0].rationale, Rationale::OutOfAlertRange);
    }

    #[test]
    fn test_empty_recognized_text_yields_no_events() {
        let engine = engine("");
        let events = engine.process_pair(&input(blank(10, 10))).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_recognizer_failure_isolated_per_pair() {
        let engine = Engine::new(FailingRecognizer, PipelineConfig::default()).unwrap();
        let inputs = vec![input(blank(10, 10)), input(blank(10, 10))];
        let outcomes = engine.process_batch(&inputs, ProcessingStrategy::Sequential);
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(matches!(outcome, ChartPairOutcome::Failed { .. }));
            assert_eq!(outcome.tag(), &SourceTag::new("etna", "MODIS"));
        }
    }

    #[test]
    fn test_batch_parallel_matches_sequential() {
        let engine = engine("15-Mar-2024 04:12:00\nVRP\n3.4 MW");
        let inputs: Vec<_> = (0..8).map(|_| input(blank(10, 10))).collect();
        let sequential = engine.process_batch(&inputs, ProcessingStrategy::Sequential);
        let parallel = engine.process_batch(&inputs, ProcessingStrategy::Parallel);
        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            match (s, p) {
                (
                    ChartPairOutcome::Completed { events: se, .. },
                    ChartPairOutcome::Completed { events: pe, .. },
                ) => {
                    assert_eq!(se.len(), pe.len());
                    assert_eq!(se[0].rationale, pe[0].rationale);
                }
                _ => panic!("expected completed outcomes"),
            }
        }
    }

    #[test]
    fn test_auto_strategy_threshold() {
        assert!(!ProcessingStrategy::Auto(4).should_use_parallel(4));
        assert!(ProcessingStrategy::Auto(4).should_use_parallel(5));
        assert!(!ProcessingStrategy::Sequential.should_use_parallel(100));
        assert!(ProcessingStrategy::Parallel.should_use_parallel(1));
    }
}

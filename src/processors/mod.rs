//! Processing components: extraction, detection, correlation, classification.

pub mod classifier;
pub mod correlator;
pub mod detector;
pub mod extractor;

pub use classifier::ConfidenceClassifier;
pub use correlator::EventMarkerCorrelator;
pub use detector::MarkerPointDetector;
pub use extractor::TimestampValueExtractor;

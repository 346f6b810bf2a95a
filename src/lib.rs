//! # pyrowatch
//!
//! A Rust library that extracts structured thermal-alert events from
//! periodically-scraped satellite-derived volcanic-activity chart images and
//! grades each event's confidence before it is handed to persistence.
//!
//! ## Components
//!
//! - **Timestamp/Value Extractor**: parses `DD-Mon-YYYY HH:MM:SS` timestamps
//!   and their adjacent "VRP … MW" radiative-power values out of noisy
//!   recognized text
//! - **Marker Point Detector**: finds colored marker dots in the companion
//!   distance/trend chart via RGB masks and connected-component labelling
//! - **Event–Marker Correlator**: applies the chart-wide marker color
//!   consensus to every candidate event of an image pair
//! - **Confidence Classifier**: an ordered decision table mapping power
//!   validity, color verdict, and match method to a confidence tier and an
//!   admission flag
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, and the text recognizer seam
//! * [`domain`] - Event, marker, verdict, and grade types
//! * [`processors`] - The four processing components
//! * [`pipeline`] - Per-pair and batch orchestration
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pyrowatch::prelude::*;
//!
//! # struct MyOcr;
//! # impl TextRecognizer for MyOcr {
//! #     fn recognize(&self, _image: &image::RgbImage) -> EngineResult<String> {
//! #         Ok(String::new())
//! #     }
//! # }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new(MyOcr, PipelineConfig::default())?;
//!
//! let input = ChartPairInput {
//!     tag: SourceTag::new("etna", "MODIS"),
//!     series_chart: pyrowatch::utils::load_image(std::path::Path::new("series.png"))?,
//!     trend_chart: pyrowatch::utils::load_image(std::path::Path::new("trend.png"))?,
//! };
//!
//! for event in engine.process_pair(&input)? {
//!     if event.admit {
//!         // hand off to persistence; review-flagged events must be
//!         // surfaced to a human, never silently auto-approved
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::core::{
        ColorRange, DetectorConfig, EngineError, EngineResult, ExtractorConfig, PipelineConfig,
        TextRecognizer,
    };
    pub use crate::domain::{
        AnnotatedEvent, CandidateEvent, ColorClass, ColorVerdict, ConfidenceTier, GradedEvent,
        MarkerPoint, MatchMethod, Rationale, SourceTag,
    };
    pub use crate::pipeline::{ChartPairInput, ChartPairOutcome, Engine, ProcessingStrategy};
    pub use crate::processors::{
        ConfidenceClassifier, EventMarkerCorrelator, MarkerPointDetector, TimestampValueExtractor,
    };
}

//! Core error handling, configuration, and trait definitions.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{ColorRange, DetectorConfig, ExtractorConfig, PipelineConfig};
pub use errors::{EngineError, EngineResult, ProcessingStage};
pub use traits::TextRecognizer;

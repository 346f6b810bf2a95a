//! Error types for the extraction engine.
//!
//! This module defines the errors that can occur while turning a scraped
//! chart image pair into graded events: image loading errors, text
//! recognition (adapter) errors, processing errors with stage context, and
//! configuration errors. Helper constructors attach context and preserve
//! the underlying error chain.

use thiserror::Error;

/// Enum representing different stages of processing in the extraction engine.
///
/// This enum is used to identify which stage of the engine an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while extracting timestamp/value pairs from recognized text.
    TextExtraction,
    /// Error occurred while detecting marker points in a chart image.
    MarkerDetection,
    /// Error occurred while correlating events with the marker set.
    Correlation,
    /// Error occurred while classifying an event.
    Classification,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::TextExtraction => write!(f, "text extraction"),
            ProcessingStage::MarkerDetection => write!(f, "marker detection"),
            ProcessingStage::Correlation => write!(f, "correlation"),
            ProcessingStage::Classification => write!(f, "classification"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the extraction engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error occurred while loading or decoding a chart image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error reported by the external text recognizer adapter.
    ///
    /// Carried opaquely: the engine does not interpret recognizer failures
    /// beyond aborting the affected image pair.
    #[error("text recognition")]
    Recognition(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of the engine where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates an EngineError for a failed text recognizer adapter call.
    pub fn recognition(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Recognition(Box::new(error))
    }

    /// Creates an EngineError for a processing failure in a specific stage.
    pub fn processing(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an EngineError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an EngineError for a configuration problem.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Convenient result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

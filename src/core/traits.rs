//! Trait definitions for the extraction engine's external seams.

use crate::core::errors::EngineResult;
use image::RgbImage;

/// Adapter over an external optical-character-recognition capability.
///
/// The engine treats recognition as a pure function from image to text: a
/// potentially slow, synchronous call whose failure aborts processing of the
/// affected image pair only. Cancellation and retry policy belong to the
/// caller, not to implementations of this trait.
pub trait TextRecognizer: Send + Sync {
    /// Recognizes text content in the given image.
    ///
    /// Returning an empty string is a valid outcome (no recognizable text)
    /// and is distinct from returning an error (the recognizer could not
    /// process the image at all).
    fn recognize(&self, image: &RgbImage) -> EngineResult<String>;
}

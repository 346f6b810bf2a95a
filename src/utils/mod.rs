//! Utility functions shared with callers.

use crate::core::errors::{EngineError, EngineResult};
use image::RgbImage;
use std::path::Path;

/// Loads an image from a file path and converts it to an RgbImage.
///
/// Handles any container format supported by the image crate; the engine
/// itself only consumes row-major RGB pixel grids.
pub fn load_image(path: &Path) -> EngineResult<RgbImage> {
    let img = image::open(path).map_err(EngineError::ImageLoad)?;
    Ok(img.to_rgb8())
}

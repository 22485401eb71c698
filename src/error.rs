//! Input validation and the pipeline error type.

use image::{GrayImage, RgbImage};

/// Smallest accepted image edge, set by the 5x5 structuring element used
/// during skin segmentation.
pub const MIN_IMAGE_DIM: u32 = 5;

/// Errors surfaced by the detection pipeline.
///
/// Every variant describes rejected input. Once an image passes validation
/// the stages never fail hard; degenerate content (no skin pixels, collapsed
/// contours) falls back or skips instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DetectError {
    #[error("input image is empty")]
    EmptyImage,

    #[error("input image is {width}x{height}, minimum is {min}x{min}")]
    ImageTooSmall { width: u32, height: u32, min: u32 },

    #[error("mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    MaskSizeMismatch {
        width: u32,
        height: u32,
        mask_width: u32,
        mask_height: u32,
    },
}

/// Rejects empty or too-small images before any pixels are touched.
pub fn validate_image(image: &RgbImage) -> Result<(), DetectError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyImage);
    }
    if width < MIN_IMAGE_DIM || height < MIN_IMAGE_DIM {
        return Err(DetectError::ImageTooSmall {
            width,
            height,
            min: MIN_IMAGE_DIM,
        });
    }
    Ok(())
}

/// Rejects masks whose dimensions do not match their source image.
pub fn validate_mask(image: &RgbImage, mask: &GrayImage) -> Result<(), DetectError> {
    if image.dimensions() != mask.dimensions() {
        let (width, height) = image.dimensions();
        let (mask_width, mask_height) = mask.dimensions();
        return Err(DetectError::MaskSizeMismatch {
            width,
            height,
            mask_width,
            mask_height,
        });
    }
    Ok(())
}

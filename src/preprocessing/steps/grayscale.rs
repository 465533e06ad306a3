use image::DynamicImage;

use crate::error::OcrError;

/// Collapse the image to single-channel luma.
/// Everything downstream operates on grayscale data.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    Ok(DynamicImage::ImageLuma8(image.to_luma8()))
}

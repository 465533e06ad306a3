use image::{imageops::FilterType, DynamicImage};

use crate::error::OcrError;

/// Fixed upscale factor; screenshot fonts tend to be smaller than the glyph
/// sizes Tesseract is tuned for.
const SCALE: u32 = 2;

/// Upscale the image 2x in both dimensions with cubic (Catmull-Rom)
/// interpolation.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let new_width = image.width().checked_mul(SCALE).ok_or_else(too_large)?;
    let new_height = image.height().checked_mul(SCALE).ok_or_else(too_large)?;

    Ok(image.resize_exact(new_width, new_height, FilterType::CatmullRom))
}

fn too_large() -> OcrError {
    OcrError::PreprocessingError("image too large to upscale".to_string())
}

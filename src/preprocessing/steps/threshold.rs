use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

use crate::error::OcrError;

/// Neighbourhood size for the local threshold.
const BLOCK_SIZE: u32 = 31;
/// Constant offset subtracted from the local mean.
const C: f32 = 5.0;

/// Apply adaptive Gaussian thresholding.
///
/// Each pixel is compared against the Gaussian-weighted mean of its
/// surrounding block minus a small constant. Pixels above the local
/// threshold become white, everything else black. Copes with uneven
/// lighting much better than a single global threshold.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let binarized = adaptive_threshold(&gray, BLOCK_SIZE, C);
    Ok(DynamicImage::ImageLuma8(binarized))
}

fn adaptive_threshold(img: &GrayImage, block_size: u32, c: f32) -> GrayImage {
    // The Gaussian-weighted local mean is just a Gaussian blur of the image
    let local_mean = gaussian_blur_f32(img, sigma_for_block(block_size));

    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let pixel = f32::from(img.get_pixel(x, y).0[0]);
        let threshold = f32::from(local_mean.get_pixel(x, y).0[0]) - c;
        if pixel > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Gaussian sigma for an odd kernel size, following the usual
/// 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8 convention.
fn sigma_for_block(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

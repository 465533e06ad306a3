use image::DynamicImage;
use imageproc::filter::filter3x3;

use crate::error::OcrError;

/// 3x3 binomial Gaussian kernel, normalized to sum 1.
#[rustfmt::skip]
const KERNEL: [f32; 9] = [
    1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0,
    2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0,
    1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0,
];

/// Apply a light Gaussian blur to suppress pixel-level noise before
/// thresholding.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let blurred = filter3x3(&gray, &KERNEL);
    Ok(DynamicImage::ImageLuma8(blurred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn uniform_image_is_unchanged() {
        let img = GrayImage::from_pixel(20, 20, Luma([128]));
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        for pixel in result.to_luma8().pixels() {
            assert_eq!(pixel.0[0], 128);
        }
    }

    #[test]
    fn isolated_bright_pixel_is_spread() {
        let mut img = GrayImage::from_pixel(11, 11, Luma([0]));
        img.put_pixel(5, 5, Luma([255]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        let gray = result.to_luma8();

        // The spike is attenuated and its neighbours pick up intensity
        assert!(gray.get_pixel(5, 5).0[0] < 255);
        assert!(gray.get_pixel(4, 5).0[0] > 0);
        assert!(gray.get_pixel(5, 4).0[0] > 0);
    }

    #[test]
    fn preserves_dimensions() {
        let img = GrayImage::new(33, 17);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!((result.width(), result.height()), (33, 17));
    }
}

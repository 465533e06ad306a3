use std::time::Instant;

use image::DynamicImage;

use crate::error::OcrError;

use super::steps;

/// Run the fixed preprocessing chain on `image`.
///
/// The chain is grayscale -> 2x cubic upscale -> 3x3 Gaussian blur ->
/// adaptive Gaussian threshold, producing a binary image. Output is
/// deterministic for a given input.
pub fn run(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let start = Instant::now();

    let mut img = image;
    img = run_step("grayscale", img, steps::grayscale::apply)?;
    img = run_step("upscale", img, steps::upscale::apply)?;
    img = run_step("blur", img, steps::blur::apply)?;
    img = run_step("threshold", img, steps::threshold::apply)?;

    tracing::debug!(
        "preprocessing finished in {}ms ({}x{})",
        start.elapsed().as_millis(),
        img.width(),
        img.height()
    );

    Ok(img)
}

fn run_step<F>(name: &str, img: DynamicImage, step_fn: F) -> Result<DynamicImage, OcrError>
where
    F: FnOnce(DynamicImage) -> Result<DynamicImage, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn(img)?;
    tracing::debug!("step {} took {}ms", name, step_start.elapsed().as_millis());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Light background with a dark horizontal bar, like a single line of
    /// UI text.
    fn text_fixture() -> DynamicImage {
        let mut img = RgbImage::from_pixel(80, 30, Rgb([230, 230, 230]));
        for x in 10..70 {
            for y in 12..18 {
                img.put_pixel(x, y, Rgb([25, 20, 30]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn output_is_deterministic() {
        let first = run(text_fixture()).unwrap().to_luma8();
        let second = run(text_fixture()).unwrap().to_luma8();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn output_doubles_input_dimensions() {
        let out = run(text_fixture()).unwrap();
        assert_eq!((out.width(), out.height()), (160, 60));
    }

    #[test]
    fn output_is_binary() {
        let out = run(text_fixture()).unwrap().to_luma8();
        for pixel in out.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn dark_bar_survives_binarization() {
        let out = run(text_fixture()).unwrap().to_luma8();
        // Center of the bar (scaled 2x) should be black, background white
        assert_eq!(out.get_pixel(80, 30).0[0], 0);
        assert_eq!(out.get_pixel(80, 6).0[0], 255);
    }
}

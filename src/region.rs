use std::fmt;
use std::str::FromStr;

use image::DynamicImage;

use crate::error::OcrError;

/// Rectangular region of interest in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Roi {
    /// Crop `image` to this region.
    ///
    /// Bounds are only checked here: parsing accepts any four integers, and
    /// a region that does not fit the image fails at crop time. Empty
    /// regions (zero width or height) are rejected the same way.
    pub fn crop(&self, image: &DynamicImage) -> Result<DynamicImage, OcrError> {
        let (width, height) = (image.width(), image.height());

        let out_of_bounds = || OcrError::RegionOutOfBounds {
            roi: self.to_string(),
            width,
            height,
        };

        if self.x < 0 || self.y < 0 || self.w <= 0 || self.h <= 0 {
            return Err(out_of_bounds());
        }

        let (x, y, w, h) = (self.x as u64, self.y as u64, self.w as u64, self.h as u64);
        if x + w > u64::from(width) || y + h > u64::from(height) {
            return Err(out_of_bounds());
        }

        Ok(image.crop_imm(x as u32, y as u32, w as u32, h as u32))
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.w, self.h)
    }
}

impl FromStr for Roi {
    type Err = OcrError;

    /// Parse a comma-separated "x,y,w,h" string. Whitespace around tokens
    /// is tolerated; anything other than exactly four integers is a format
    /// error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 4 {
            return Err(OcrError::RegionFormat(s.to_string()));
        }

        let mut values = [0i64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| OcrError::RegionFormat(s.to_string()))?;
        }

        Ok(Roi {
            x: values[0],
            y: values[1],
            w: values[2],
            h: values[3],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([(x + y) as u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn parse_four_integers() {
        let roi: Roi = "10,20,30,40".parse().unwrap();
        assert_eq!(
            roi,
            Roi {
                x: 10,
                y: 20,
                w: 30,
                h: 40
            }
        );
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let roi: Roi = " 1, 2 ,3, 4 ".parse().unwrap();
        assert_eq!(
            roi,
            Roi {
                x: 1,
                y: 2,
                w: 3,
                h: 4
            }
        );
    }

    #[test]
    fn parse_accepts_negative_integers() {
        // Negative values are integers, so they pass parsing; they are
        // rejected later when the crop is applied.
        let roi: Roi = "-5,0,10,10".parse().unwrap();
        assert_eq!(roi.x, -5);
    }

    #[test]
    fn parse_rejects_wrong_token_count() {
        assert!(matches!(
            "1,2,3".parse::<Roi>(),
            Err(OcrError::RegionFormat(_))
        ));
        assert!(matches!(
            "1,2,3,4,5".parse::<Roi>(),
            Err(OcrError::RegionFormat(_))
        ));
        assert!(matches!("".parse::<Roi>(), Err(OcrError::RegionFormat(_))));
    }

    #[test]
    fn parse_rejects_non_numeric_tokens() {
        assert!(matches!(
            "a,2,3,4".parse::<Roi>(),
            Err(OcrError::RegionFormat(_))
        ));
        assert!(matches!(
            "1,2,3,4.5".parse::<Roi>(),
            Err(OcrError::RegionFormat(_))
        ));
    }

    #[test]
    fn crop_returns_region_dimensions() {
        let image = gradient_image(100, 50);
        let roi: Roi = "10,5,30,20".parse().unwrap();

        let cropped = roi.crop(&image).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (30, 20));

        // Top-left of the crop is the source pixel at (10, 5)
        assert_eq!(cropped.to_luma8().get_pixel(0, 0).0[0], 15);
    }

    #[test]
    fn crop_rejects_out_of_bounds_region() {
        let image = gradient_image(100, 50);
        let roi: Roi = "90,40,20,20".parse().unwrap();
        assert!(matches!(
            roi.crop(&image),
            Err(OcrError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn crop_rejects_negative_origin() {
        let image = gradient_image(100, 50);
        let roi: Roi = "-1,0,10,10".parse().unwrap();
        assert!(matches!(
            roi.crop(&image),
            Err(OcrError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn crop_rejects_empty_region() {
        let image = gradient_image(100, 50);
        let roi: Roi = "10,10,0,5".parse().unwrap();
        assert!(matches!(
            roi.crop(&image),
            Err(OcrError::RegionOutOfBounds { .. })
        ));
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("ROI must be four comma-separated integers \"x,y,w,h\", got {0:?}")]
    RegionFormat(String),

    #[error("region {roi} does not fit in a {width}x{height} image")]
    RegionOutOfBounds {
        roi: String,
        width: u32,
        height: u32,
    },

    #[error("could not read image {}", .path.display())]
    ImageRead {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("could not write preprocessed image to {}", .path.display())]
    ImageWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("failed to process image: {0}")]
    ProcessingError(String),

    #[error("preprocessing failed: {0}")]
    PreprocessingError(String),
}

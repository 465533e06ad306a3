//! Tesseract OCR invocation
//!
//! Wraps the tesseract-static crate (statically linked, no system
//! dependencies). Training data is resolved from an explicit tessdata
//! directory when one is given, otherwise it is downloaded into a per-user
//! cache on first use.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use image::DynamicImage;
use tesseract_static::tesseract::Tesseract;

use crate::config::Config;
use crate::error::OcrError;

/// Outcome of one recognition pass.
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    /// Mean word confidence on a 0.0-1.0 scale.
    pub confidence: f32,
}

/// Tesseract-backed OCR engine.
pub struct TesseractEngine {
    tessdata_path: String,
    lang: String,
    psm: u32,
}

impl TesseractEngine {
    /// Set up the engine for one invocation, provisioning tessdata if
    /// needed.
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let tessdata_path = match &config.tessdata {
            Some(dir) => validate_tessdata_dir(dir, &config.lang)?,
            None => ensure_tessdata_available(&config.lang)?,
        };

        tracing::debug!(
            "tesseract ready (tessdata: {}, language: {}, psm: {})",
            tessdata_path,
            config.lang,
            config.psm
        );

        Ok(Self {
            tessdata_path,
            lang: config.lang.clone(),
            psm: config.psm,
        })
    }

    /// Recognize text in an already-preprocessed image. The returned text
    /// is trimmed of surrounding whitespace.
    pub fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        // Hand the image over as in-memory BMP; BMP is always understood
        // by leptonica
        let rgb_img = image.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut bmp_data = Vec::new();
        {
            let mut cursor = std::io::Cursor::new(&mut bmp_data);
            rgb_img
                .write_to(&mut cursor, image::ImageFormat::Bmp)
                .map_err(|e| {
                    OcrError::ProcessingError(format!("failed to convert to BMP: {}", e))
                })?;
        }

        tracing::debug!(
            "recognizing {}x{} image, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.lang))
            .map_err(|e| {
                OcrError::InitializationError(format!("failed to create Tesseract: {}", e))
            })?;

        tess = tess
            .set_variable("tessedit_pageseg_mode", &self.psm.to_string())
            .map_err(|e| {
                OcrError::ProcessingError(format!(
                    "failed to set page segmentation mode {}: {}",
                    self.psm, e
                ))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::ProcessingError(format!(
                "failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| OcrError::ProcessingError(format!("failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::ProcessingError(format!("failed to get text: {}", e)))?;

        // 0-100 scale, convert to 0.0-1.0
        let confidence = tess.mean_text_conf() as f32 / 100.0;

        Ok(OcrResult {
            text: text.trim().to_string(),
            confidence,
        })
    }
}

/// Check that an explicitly-given tessdata directory has training data for
/// `language`.
fn validate_tessdata_dir(dir: &str, language: &str) -> Result<String, OcrError> {
    let traineddata = Path::new(dir).join(format!("{}.traineddata", language));
    if !traineddata.exists() {
        return Err(OcrError::InitializationError(format!(
            "no {}.traineddata found in {}",
            language, dir
        )));
    }
    Ok(dir.to_string())
}

/// Ensure tessdata for `language` exists in the user cache, downloading it
/// on first use.
fn ensure_tessdata_available(language: &str) -> Result<String, OcrError> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("snaptext")
        .join("tessdata");

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        OcrError::InitializationError(format!("failed to create tessdata directory: {}", e))
    })?;

    let traineddata_path = cache_dir.join(format!("{}.traineddata", language));

    if !traineddata_path.exists() {
        let url = tessdata_url(language);
        tracing::info!(
            "downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&url, &traineddata_path)?;
        tracing::info!("downloaded tessdata to {:?}", traineddata_path);
    } else {
        tracing::debug!("using cached tessdata from {:?}", cache_dir);
    }

    // Tesseract expects the directory, not the file
    cache_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::InitializationError("invalid tessdata path".to_string()))
}

/// Tessdata download URL for a language. The tessdata_fast models are
/// small and accurate enough for screen text.
fn tessdata_url(language: &str) -> String {
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url).call().map_err(|e| {
        OcrError::InitializationError(format!("failed to download tessdata: {}", e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("failed to read tessdata response: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        OcrError::InitializationError(format!("failed to create tessdata file: {}", e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        OcrError::InitializationError(format!("failed to write tessdata file: {}", e))
    })?;

    Ok(())
}

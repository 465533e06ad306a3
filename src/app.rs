//! One-shot extraction driver
//!
//! Wires the linear pipeline together: load, crop, preprocess, recognize,
//! print. Fully synchronous; one invocation handles one image end-to-end.

use serde::Serialize;

use crate::config::Config;
use crate::error::OcrError;
use crate::ocr::TesseractEngine;
use crate::preprocessing;

#[derive(Serialize)]
struct JsonOutput<'a> {
    text: &'a str,
}

/// Run one extraction end-to-end and print the result to stdout.
pub fn run(config: Config) -> Result<(), OcrError> {
    let image = image::open(&config.image).map_err(|e| OcrError::ImageRead {
        path: config.image.clone(),
        source: e,
    })?;

    tracing::debug!(
        "loaded {} ({}x{})",
        config.image.display(),
        image.width(),
        image.height()
    );

    let image = match &config.roi {
        Some(roi) => roi.crop(&image)?,
        None => image,
    };

    let preprocessed = preprocessing::run(image)?;

    if let Some(path) = &config.debug_out {
        preprocessed.save(path).map_err(|e| OcrError::ImageWrite {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!("wrote preprocessed image to {}", path.display());
    }

    let engine = TesseractEngine::new(&config)?;
    let result = engine.recognize(&preprocessed)?;

    tracing::debug!(
        "recognition done, confidence: {:.2}, text length: {}",
        result.confidence,
        result.text.len()
    );

    println!("{}", format_output(&result.text, config.json));

    Ok(())
}

/// Render the extracted text as plain text or a {"text": ...} JSON object.
fn format_output(text: &str, json: bool) -> String {
    if json {
        // serde_json leaves non-ASCII characters unescaped
        serde_json::to_string(&JsonOutput { text }).expect("string serialization")
    } else {
        text.to_string()
    }
}

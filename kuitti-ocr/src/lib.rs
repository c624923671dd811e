//! Receipt OCR built on Tesseract (via `leptess`).
//!
//! Scanned receipts rarely come in clean, so recognition runs as a
//! three-stage pipeline:
//!
//! 1. preprocess: denoise, equalize contrast, binarize ([`prepare`])
//! 2. recognize: Tesseract with receipt-friendly settings ([`OcrEngine`])
//! 3. reflow: re-lay the word soup out in receipt form ([`reflow`])
//!
//! [`scan_receipt`] runs the whole pipeline on an image file. Callers that
//! need progress reporting between stages call the stage functions directly.
//!
//! Everything here is synchronous and CPU-bound; GUI callers should run it
//! on a worker thread.

mod config;
mod engine;
mod error;
mod preprocess;
mod reflow;
mod result;

pub use config::OcrConfig;
pub use engine::OcrEngine;
pub use error::{OcrError, OcrResult};
pub use preprocess::{detect_logo, enhance_to_file, prepare};
pub use reflow::reflow;
pub use result::OcrOutcome;

use std::path::Path;
use tracing::info;

/// Run the full scan pipeline on an image file.
pub fn scan_receipt(image_path: impl AsRef<Path>, config: &OcrConfig) -> OcrResult<OcrOutcome> {
    let path = image_path.as_ref();
    info!(path = %path.display(), "processing image");

    let image = image::open(path)?;

    let gray = if config.enhance {
        prepare(&image)
    } else {
        image.to_luma8()
    };

    let has_logo = config.detect_logo && detect_logo(&gray);

    let mut engine = OcrEngine::new(config)?;
    let (text, confidence) = engine.recognize(&gray)?;

    let structured_text = reflow(&text, config.output_width);

    info!(confidence, has_logo, "OCR completed");

    Ok(OcrOutcome {
        text,
        structured_text,
        confidence,
        has_logo,
        preprocessed: config.enhance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_applies_defaults() {
        let config = OcrConfig::default();
        assert_eq!(config.lang, "fin+eng");
        assert_eq!(config.psm, 6);
        assert_eq!(config.dpi, 300);
        assert_eq!(config.output_width, 48);
        assert!(config.enhance);
        assert!(config.detect_logo);
    }

    #[test]
    fn missing_image_file_is_an_error() {
        let config = OcrConfig::default();
        let result = scan_receipt("/nonexistent/receipt.png", &config);
        assert!(result.is_err());
    }

    // Full pipeline runs are exercised manually; they need a Tesseract
    // install with the fin+eng language packs.
    #[test]
    #[ignore = "requires Tesseract with fin+eng language packs"]
    fn scan_blank_receipt_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        let img = image::GrayImage::from_pixel(400, 600, image::Luma([255u8]));
        img.save(&path).unwrap();

        let config = OcrConfig {
            lang: "eng".to_string(),
            ..Default::default()
        };
        let outcome = scan_receipt(&path, &config).unwrap();
        assert!(outcome.text.trim().is_empty());
        assert!(!outcome.has_logo);
        assert!(outcome.preprocessed);
    }
}

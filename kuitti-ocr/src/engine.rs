//! Tesseract wrapper
//!
//! Holds the initialized Tesseract instance so repeated scans do not pay
//! the language pack load cost each time.

use crate::config::OcrConfig;
use crate::error::{OcrError, OcrResult};
use image::GrayImage;
use leptess::{LepTess, Variable};
use std::io::Cursor;
use tracing::{debug, info, instrument};

/// High-level OCR engine wrapping Tesseract via `leptess`.
pub struct OcrEngine {
    tesseract: LepTess,
    dpi: i32,
}

impl OcrEngine {
    /// Initialize Tesseract with the configured language and options.
    pub fn new(config: &OcrConfig) -> OcrResult<Self> {
        let mut tesseract = LepTess::new(config.tessdata_path.as_deref(), &config.lang)
            .map_err(|e| OcrError::EngineInit(format!("{} (is Tesseract installed?)", e)))?;

        tesseract
            .set_variable(Variable::TesseditPagesegMode, &config.psm.to_string())
            .map_err(|e| OcrError::EngineInit(e.to_string()))?;

        if let Some(whitelist) = &config.char_whitelist {
            tesseract
                .set_variable(Variable::TesseditCharWhitelist, whitelist)
                .map_err(|e| OcrError::EngineInit(e.to_string()))?;
        }

        info!(lang = %config.lang, psm = config.psm, "OCR engine initialized");
        Ok(Self {
            tesseract,
            dpi: config.dpi,
        })
    }

    /// Recognize text in a prepared grayscale image.
    ///
    /// Returns the raw text and the mean word confidence (0-100).
    #[instrument(skip(self, image), fields(w = image.width(), h = image.height()))]
    pub fn recognize(&mut self, image: &GrayImage) -> OcrResult<(String, f32)> {
        // leptess reads encoded image data, not raw pixel buffers
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

        self.tesseract
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        // Resolution hint, must come after set_image
        self.tesseract.set_source_resolution(self.dpi);

        let text = self
            .tesseract
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let confidence = self.tesseract.mean_text_conf() as f32;

        debug!(chars = text.len(), confidence, "recognition finished");
        Ok((text, confidence))
    }
}

use serde::{Deserialize, Serialize};

/// Tunable parameters for a receipt scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language pack(s), e.g. `"fin+eng"`.
    pub lang: String,
    /// Page segmentation mode (6 = uniform block of text, good for receipts).
    pub psm: u8,
    /// Restrict recognition to these characters when set.
    pub char_whitelist: Option<String>,
    /// Source resolution hint passed to Tesseract.
    pub dpi: i32,
    /// Column width used when re-laying out the recognized text.
    pub output_width: usize,
    /// Clean the image up before recognition.
    pub enhance: bool,
    /// Look for a logo-sized region in the scan.
    pub detect_logo: bool,
    /// Override the tessdata directory (default: system install).
    pub tessdata_path: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: "fin+eng".to_string(),
            psm: 6,
            char_whitelist: None,
            dpi: 300,
            output_width: 48,
            enhance: true,
            detect_logo: true,
            tessdata_path: None,
        }
    }
}

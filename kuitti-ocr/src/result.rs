use serde::Serialize;

/// Everything a single receipt scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct OcrOutcome {
    /// Raw recognized text
    pub text: String,
    /// Text re-laid out in receipt form
    pub structured_text: String,
    /// Mean word confidence, 0-100
    pub confidence: f32,
    /// Whether a logo-sized region was found in the scan
    pub has_logo: bool,
    /// Whether the image was enhanced before recognition
    pub preprocessed: bool,
}

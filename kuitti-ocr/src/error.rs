use thiserror::Error;

/// OCR pipeline errors
#[derive(Error, Debug)]
pub enum OcrError {
    /// Tesseract could not be initialized (missing install or language pack)
    #[error("OCR engine unavailable: {0}")]
    EngineInit(String),

    /// Input image could not be read or decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Text recognition failed
    #[error("Recognition failed: {0}")]
    Recognition(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for OCR operations
pub type OcrResult<T> = Result<T, OcrError>;

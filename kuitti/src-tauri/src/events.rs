//! Events emitted to the frontend.
//!
//! Scanning runs in a background worker; the `scan_receipt` command returns
//! as soon as the worker starts and the outcome arrives through these
//! events. The complete event carries a `kuitti_ocr::OcrOutcome`.

use serde::Serialize;

pub const OCR_PROGRESS: &str = "ocr-progress";
pub const OCR_COMPLETE: &str = "ocr-complete";
pub const OCR_ERROR: &str = "ocr-error";

#[derive(Debug, Clone, Serialize)]
pub struct OcrProgressEvent {
    pub stage: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrErrorEvent {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_shape() {
        let event = OcrProgressEvent {
            stage: "recognize",
            percent: 50,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["stage"], "recognize");
        assert_eq!(value["percent"], 50);
    }

    #[test]
    fn test_error_event_shape() {
        let event = OcrErrorEvent {
            code: 4003,
            message: "Text recognition failed".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["code"], 4003);
    }
}

//! Uniform response envelope for Tauri commands.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use kuitti_ocr::OcrError;
use kuitti_printer::PrintError;

use crate::models::SettingsError;
use crate::utils::logo::LogoError;

use super::error_codes::ErrorCode;

/// Envelope every command returns to the frontend.
///
/// `code` 0 means success; any other value is an [`ErrorCode`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            code: Some(0),
            message: "success".to_string(),
            data: Some(data),
            details: None,
        }
    }

    pub fn error_with_code(code: ErrorCode, message: String) -> Self {
        ApiResponse {
            code: Some(code.code()),
            message,
            data: None,
            details: None,
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value);
        self
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        ApiResponse {
            code: Some(0),
            message: "success".to_string(),
            data: None,
            details: None,
        }
    }
}

pub fn print_error_to_code(e: &PrintError) -> ErrorCode {
    match e {
        PrintError::Offline(_) => ErrorCode::PrinterNotAvailable,
        PrintError::Timeout(_) => ErrorCode::PrintTimeout,
        PrintError::InvalidConfig(_) => ErrorCode::PrinterConfigInvalid,
        PrintError::Connection(_) | PrintError::Io(_) => ErrorCode::PrintFailed,
    }
}

pub fn settings_error_to_code(e: &SettingsError) -> ErrorCode {
    match e {
        SettingsError::OutOfRange { .. }
        | SettingsError::ZeroPort
        | SettingsError::MissingAddress => ErrorCode::SettingsOutOfRange,
        SettingsError::Io(_) | SettingsError::Parse(_) => ErrorCode::SettingsLoadFailed,
    }
}

pub fn logo_error_to_code(e: &LogoError) -> ErrorCode {
    match e {
        LogoError::NotFound(_) => ErrorCode::LogoNotFound,
        LogoError::UnsupportedExtension(_) => ErrorCode::InvalidRequest,
        LogoError::Image(_) | LogoError::Io(_) => ErrorCode::LogoConversionFailed,
    }
}

pub fn ocr_error_to_code(e: &OcrError) -> ErrorCode {
    match e {
        OcrError::EngineInit(_) => ErrorCode::OcrEngineMissing,
        OcrError::Image(_) => ErrorCode::OcrImageUnreadable,
        OcrError::Recognition(_) | OcrError::Io(_) => ErrorCode::OcrFailed,
    }
}

/// Error response for a settings failure, carrying the offending field when
/// the value was out of range.
pub fn from_settings_error<T: Serialize>(e: &SettingsError) -> ApiResponse<T> {
    let response = ApiResponse::error_with_code(settings_error_to_code(e), e.to_string());
    match e {
        SettingsError::OutOfRange { field, min, max } => response
            .with_detail("field", Value::from(*field))
            .with_detail("min", Value::from(*min))
            .with_detail("max", Value::from(*max)),
        _ => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let response = ApiResponse::success(42u32);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], 0);
        assert_eq!(value["message"], "success");
        assert_eq!(value["data"], 42);
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_ok_omits_data() {
        let value = serde_json::to_value(ApiResponse::<()>::ok()).unwrap();
        assert_eq!(value["code"], 0);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_error_shape() {
        let response = ApiResponse::<()>::error_with_code(
            ErrorCode::PrinterNotAvailable,
            "no printer at /dev/usb/lp0".to_string(),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], 1001);
        assert_eq!(value["message"], "no printer at /dev/usb/lp0");
    }

    #[test]
    fn test_print_error_mapping() {
        assert_eq!(
            print_error_to_code(&PrintError::Offline("lp0".to_string())),
            ErrorCode::PrinterNotAvailable
        );
        assert_eq!(
            print_error_to_code(&PrintError::Timeout("5s".to_string())),
            ErrorCode::PrintTimeout
        );
        assert_eq!(
            print_error_to_code(&PrintError::Connection("refused".to_string())),
            ErrorCode::PrintFailed
        );
    }

    #[test]
    fn test_settings_out_of_range_details() {
        let e = SettingsError::OutOfRange {
            field: "receipt.width",
            min: 32,
            max: 80,
        };
        let response: ApiResponse<()> = from_settings_error(&e);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], 3003);
        assert_eq!(value["details"]["field"], "receipt.width");
        assert_eq!(value["details"]["min"], 32);
        assert_eq!(value["details"]["max"], 80);
    }
}

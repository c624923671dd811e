//! Stable numeric error codes shared with the frontend.
//!
//! Code ranges by category:
//! - 0-999: general
//! - 1000-1999: printer
//! - 2000-2999: company profiles and logos
//! - 3000-3999: settings
//! - 4000-4999: receipt scanning

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    /// Operation completed
    Success = 0,
    /// Unclassified failure
    Unknown = 1,
    /// Input failed validation
    ValidationFailed = 2,
    /// Requested resource does not exist
    NotFound = 3,
    /// Request was malformed
    InvalidRequest = 5,
    /// Numeric value outside the allowed range
    ValueOutOfRange = 8,

    /// Printer device not reachable
    PrinterNotAvailable = 1001,
    /// Job was sent but printing failed
    PrintFailed = 1002,
    /// Printer configuration is incomplete or invalid
    PrinterConfigInvalid = 1003,
    /// Printer did not respond in time
    PrintTimeout = 1004,

    /// No company profile with the given name
    CompanyNotFound = 2001,
    /// Profile file could not be parsed
    ProfileParseFailed = 2002,
    /// Logo file does not exist
    LogoNotFound = 2003,
    /// Image could not be converted to a logo
    LogoConversionFailed = 2004,

    /// Settings file could not be read
    SettingsLoadFailed = 3001,
    /// Settings file could not be written
    SettingsSaveFailed = 3002,
    /// Settings value outside the allowed range
    SettingsOutOfRange = 3003,

    /// OCR engine or language data missing
    OcrEngineMissing = 4001,
    /// Scan image could not be opened
    OcrImageUnreadable = 4002,
    /// Text recognition failed
    OcrFailed = 4003,
    /// A scan is already in progress
    OcrBusy = 4004,
}

impl ErrorCode {
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value out of range",

            ErrorCode::PrinterNotAvailable => "Printer not available",
            ErrorCode::PrintFailed => "Printing failed",
            ErrorCode::PrinterConfigInvalid => "Printer configuration invalid",
            ErrorCode::PrintTimeout => "Printer timed out",

            ErrorCode::CompanyNotFound => "Company profile not found",
            ErrorCode::ProfileParseFailed => "Company profile could not be parsed",
            ErrorCode::LogoNotFound => "Logo file not found",
            ErrorCode::LogoConversionFailed => "Logo conversion failed",

            ErrorCode::SettingsLoadFailed => "Settings could not be loaded",
            ErrorCode::SettingsSaveFailed => "Settings could not be saved",
            ErrorCode::SettingsOutOfRange => "Settings value out of range",

            ErrorCode::OcrEngineMissing => "OCR engine not installed",
            ErrorCode::OcrImageUnreadable => "Scan image could not be read",
            ErrorCode::OcrFailed => "Text recognition failed",
            ErrorCode::OcrBusy => "A scan is already running",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::PrinterNotAvailable),
            1002 => Ok(ErrorCode::PrintFailed),
            1003 => Ok(ErrorCode::PrinterConfigInvalid),
            1004 => Ok(ErrorCode::PrintTimeout),

            2001 => Ok(ErrorCode::CompanyNotFound),
            2002 => Ok(ErrorCode::ProfileParseFailed),
            2003 => Ok(ErrorCode::LogoNotFound),
            2004 => Ok(ErrorCode::LogoConversionFailed),

            3001 => Ok(ErrorCode::SettingsLoadFailed),
            3002 => Ok(ErrorCode::SettingsSaveFailed),
            3003 => Ok(ErrorCode::SettingsOutOfRange),

            4001 => Ok(ErrorCode::OcrEngineMissing),
            4002 => Ok(ErrorCode::OcrImageUnreadable),
            4003 => Ok(ErrorCode::OcrFailed),
            4004 => Ok(ErrorCode::OcrBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::PrinterNotAvailable.code(), 1001);
        assert_eq!(ErrorCode::CompanyNotFound.code(), 2001);
        assert_eq!(ErrorCode::SettingsSaveFailed.code(), 3002);
        assert_eq!(ErrorCode::OcrBusy.code(), 4004);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::PrintFailed.is_success());
    }

    #[test]
    fn test_try_from_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::PrintTimeout,
            ErrorCode::LogoConversionFailed,
            ErrorCode::OcrEngineMissing,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
    }

    #[test]
    fn test_try_from_invalid() {
        let err = ErrorCode::try_from(9999).unwrap_err();
        assert_eq!(err.0, 9999);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::PrintFailed).unwrap();
        assert_eq!(json, "1002");
        let back: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(back, ErrorCode::PrintFailed);
    }
}

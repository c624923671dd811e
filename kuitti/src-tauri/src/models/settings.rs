//! Application settings with JSON persistence.
//!
//! Settings are stored as one `settings.json` under the app data directory.
//! Every field carries a serde default, so partial files from older versions
//! merge cleanly with current defaults instead of failing to parse.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::receipt::Language;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("Printer port cannot be 0")]
    ZeroPort,
    #[error("Network printing requires an IP address")]
    MissingAddress,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Printer transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Usb,
    Network,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterSettings {
    #[serde(default)]
    pub connection: ConnectionType,
    #[serde(default = "default_device_path")]
    pub device_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_device_path() -> String {
    kuitti_printer::UsbPrinter::DEFAULT_DEVICE.to_string()
}

fn default_port() -> u16 {
    9100
}

impl Default for PrinterSettings {
    fn default() -> Self {
        PrinterSettings {
            connection: ConnectionType::Usb,
            device_path: default_device_path(),
            ip_address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "super::default_currency")]
    pub currency: String,
}

fn default_company() -> String {
    "Harjun Raskaskone Oy".to_string()
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings {
            company: default_company(),
            language: Language::Fi,
            currency: super::default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSettings {
    /// Printable width in characters, 32 to 80
    #[serde(default = "default_width")]
    pub width: usize,
    /// Blank lines fed after the receipt body
    #[serde(default = "default_feed_lines")]
    pub feed_lines: u8,
    #[serde(default = "default_true")]
    pub cut_paper: bool,
    #[serde(default = "default_true")]
    pub bold_header: bool,
    #[serde(default)]
    pub double_width_total: bool,
}

fn default_width() -> usize {
    42
}

fn default_feed_lines() -> u8 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        ReceiptSettings {
            width: default_width(),
            feed_lines: default_feed_lines(),
            cut_paper: true,
            bold_header: true,
            double_width_total: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoSettings {
    #[serde(default = "default_logo_width")]
    pub max_width: u32,
    #[serde(default = "default_logo_height")]
    pub max_height: u32,
}

fn default_logo_width() -> u32 {
    48
}

fn default_logo_height() -> u32 {
    20
}

impl Default for LogoSettings {
    fn default() -> Self {
        LogoSettings {
            max_width: default_logo_width(),
            max_height: default_logo_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_window_width() -> u32 {
    1200
}

fn default_window_height() -> u32 {
    800
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub printer: PrinterSettings,
    #[serde(default)]
    pub defaults: DefaultSettings,
    #[serde(default)]
    pub receipt: ReceiptSettings,
    #[serde(default)]
    pub logo: LogoSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Check bounds before accepting an update or a print job.
    pub fn validate(&self) -> Result<(), SettingsError> {
        // 1. Receipt geometry
        if !(32..=80).contains(&self.receipt.width) {
            return Err(SettingsError::OutOfRange {
                field: "receipt.width",
                min: 32,
                max: 80,
            });
        }
        if self.receipt.feed_lines > 10 {
            return Err(SettingsError::OutOfRange {
                field: "receipt.feed_lines",
                min: 0,
                max: 10,
            });
        }

        // 2. Logo bounds
        if !(20..=80).contains(&self.logo.max_width) {
            return Err(SettingsError::OutOfRange {
                field: "logo.max_width",
                min: 20,
                max: 80,
            });
        }
        if !(5..=30).contains(&self.logo.max_height) {
            return Err(SettingsError::OutOfRange {
                field: "logo.max_height",
                min: 5,
                max: 30,
            });
        }

        // 3. Printer target
        if self.printer.port == 0 {
            return Err(SettingsError::ZeroPort);
        }
        if self.printer.connection == ConnectionType::Network
            && self
                .printer
                .ip_address
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err(SettingsError::MissingAddress);
        }

        Ok(())
    }

    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<AppSettings, SettingsError> {
        let raw = fs::read_to_string(path)?;
        let settings: AppSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> AppSettings {
        if !path.exists() {
            return AppSettings::default();
        }
        match AppSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings from {}: {e}", path.display());
                AppSettings::default()
            }
        }
    }

    /// Persist settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.printer.connection, ConnectionType::Usb);
        assert_eq!(settings.printer.device_path, "/dev/usb/lp0");
        assert_eq!(settings.printer.port, 9100);
        assert_eq!(settings.defaults.company, "Harjun Raskaskone Oy");
        assert_eq!(settings.defaults.language, Language::Fi);
        assert_eq!(settings.defaults.currency, "EUR");
        assert_eq!(settings.receipt.width, 42);
        assert_eq!(settings.receipt.feed_lines, 3);
        assert!(settings.receipt.cut_paper);
        assert!(settings.receipt.bold_header);
        assert!(!settings.receipt.double_width_total);
        assert_eq!(settings.logo.max_width, 48);
        assert_eq!(settings.logo.max_height, 20);
        assert_eq!(settings.ui.window_width, 1200);
        assert_eq!(settings.ui.window_height, 800);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_merges_with_defaults() {
        let json = r#"{
            "printer": { "connection": "network", "ip_address": "192.168.1.50" },
            "receipt": { "width": 48 }
        }"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.printer.connection, ConnectionType::Network);
        assert_eq!(settings.printer.ip_address.as_deref(), Some("192.168.1.50"));
        assert_eq!(settings.printer.port, 9100);
        assert_eq!(settings.receipt.width, 48);
        assert_eq!(settings.receipt.feed_lines, 3);
        assert_eq!(settings.defaults.company, "Harjun Raskaskone Oy");
    }

    #[test]
    fn test_validate_bounds() {
        let mut settings = AppSettings::default();
        settings.receipt.width = 31;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange {
                field: "receipt.width",
                ..
            })
        ));

        let mut settings = AppSettings::default();
        settings.receipt.feed_lines = 11;
        assert!(settings.validate().is_err());

        let mut settings = AppSettings::default();
        settings.logo.max_width = 10;
        assert!(settings.validate().is_err());

        let mut settings = AppSettings::default();
        settings.logo.max_height = 31;
        assert!(settings.validate().is_err());

        let mut settings = AppSettings::default();
        settings.printer.port = 0;
        assert!(matches!(settings.validate(), Err(SettingsError::ZeroPort)));
    }

    #[test]
    fn test_network_requires_address() {
        let mut settings = AppSettings::default();
        settings.printer.connection = ConnectionType::Network;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingAddress)
        ));

        settings.printer.ip_address = Some("  ".to_string());
        assert!(settings.validate().is_err());

        settings.printer.ip_address = Some("10.0.0.5".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let mut settings = AppSettings::default();
        settings.receipt.width = 56;
        settings.defaults.company = "Oulu Marketplace".to_string();
        settings.save(&path).unwrap();

        let loaded = AppSettings::load(&path).unwrap();
        assert_eq!(loaded.receipt.width, 56);
        assert_eq!(loaded.defaults.company, "Oulu Marketplace");
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let settings = AppSettings::load_or_default(&path);
        assert_eq!(settings.receipt.width, 42);
    }
}

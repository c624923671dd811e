//! Data model for receipts, company profiles and application settings.

pub mod company;
pub mod receipt;
pub mod settings;

pub use company::CompanyProfile;
pub use receipt::{
    Language, PaymentDetails, PaymentMethod, ReceiptData, ReceiptError, ReceiptItem, VatLine,
};
pub use settings::{
    AppSettings, ConnectionType, LogoSettings, PrinterSettings, ReceiptSettings, SettingsError,
};

pub(crate) fn default_currency() -> String {
    "EUR".to_string()
}

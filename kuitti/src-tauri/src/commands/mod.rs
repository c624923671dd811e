//! Tauri command handlers, grouped by surface.

pub mod locale;
pub mod logos;
pub mod ocr;
pub mod printer;
pub mod profiles;
pub mod receipts;
pub mod settings;

pub use locale::*;
pub use logos::*;
pub use ocr::*;
pub use printer::*;
pub use profiles::*;
pub use receipts::*;
pub use settings::*;

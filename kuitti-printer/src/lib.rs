//! # kuitti-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 (Epson WPC1252) encoding for Nordic receipt text
//! - Network printing (TCP port 9100)
//! - USB character-device printing
//! - Image/logo processing
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Receipt layout and localization → kuitti app
//!
//! ## Example
//!
//! ```ignore
//! use kuitti_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(42);
//! builder.center();
//! builder.double_size();
//! builder.line("KUITTI");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line_lr("YHTEENSÄ:", "12.40 EUR");
//! builder.cut();
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{column_width, convert_to_cp1252, pad_columns, truncate_columns};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, EscPosTextBuilder};
pub use printer::{CapturePrinter, NetworkPrinter, Printer, UsbPrinter};

#[cfg(feature = "image")]
pub use escpos::process_logo;

//! Receipt preview and printing commands.

use std::sync::Arc;

use serde::Serialize;
use tauri::State;
use tracing::{info, warn};

use crate::core::response::print_error_to_code;
use crate::core::{ApiResponse, AppPaths, AppState, ErrorCode};
use crate::models::{CompanyProfile, LogoSettings, ReceiptData};
use crate::utils::logo::{self, Logo};
use crate::utils::printing;
use crate::utils::receipt_renderer::{ReceiptRenderer, RenderOptions};

/// Preview payload: the rendered text block plus display totals.
#[derive(Debug, Serialize)]
pub struct PreviewData {
    pub text: String,
    pub subtotal: String,
    pub total_vat: String,
    pub total: String,
    pub width: usize,
}

impl PreviewData {
    fn new(receipt: &ReceiptData, text: String, width: usize) -> PreviewData {
        PreviewData {
            text,
            subtotal: format!("{:.2}", receipt.subtotal()),
            total_vat: format!("{:.2}", receipt.total_vat()),
            total: format!("{:.2}", receipt.total()),
            width,
        }
    }
}

/// Resolve the company logo into what each output needs: ASCII art goes
/// into the rendered body, images become a raster block for the printer.
/// A broken logo is logged and skipped, it never blocks the receipt.
fn resolve_logos(
    company: &CompanyProfile,
    paths: &AppPaths,
    caps: &LogoSettings,
) -> (Option<String>, Option<Vec<u8>>) {
    match logo::resolve(company, &paths.logos_dir()) {
        Some(Logo::Ascii(path)) => match logo::load_ascii(&path, caps.max_width, caps.max_height) {
            Ok(text) if !text.trim().is_empty() => (Some(text), None),
            Ok(_) => (None, None),
            Err(e) => {
                warn!("Failed to load logo {}: {e}", path.display());
                (None, None)
            }
        },
        Some(Logo::Raster(path)) => {
            let raster = kuitti_printer::process_logo(&path.display().to_string());
            if raster.is_none() {
                warn!("Failed to rasterize logo {}", path.display());
            }
            (None, raster)
        }
        None => (None, None),
    }
}

#[tauri::command]
pub async fn preview_receipt(
    state: State<'_, Arc<AppState>>,
    receipt: ReceiptData,
) -> Result<ApiResponse<PreviewData>, String> {
    if let Err(e) = receipt.validate() {
        return Ok(ApiResponse::error_with_code(
            ErrorCode::ValidationFailed,
            e.to_string(),
        ));
    }
    let settings = state.settings.read().await;
    let (ascii_logo, _) = resolve_logos(&receipt.company, &state.paths, &settings.logo);
    let options = RenderOptions::preview(&settings.receipt);
    let text = ReceiptRenderer::new(&receipt, ascii_logo.as_deref(), options).render();
    Ok(ApiResponse::success(PreviewData::new(
        &receipt,
        text,
        settings.receipt.width,
    )))
}

#[tauri::command]
pub async fn print_receipt(
    state: State<'_, Arc<AppState>>,
    receipt: ReceiptData,
) -> Result<ApiResponse<()>, String> {
    if let Err(e) = receipt.validate() {
        return Ok(ApiResponse::error_with_code(
            ErrorCode::ValidationFailed,
            e.to_string(),
        ));
    }
    let settings = state.settings.read().await.clone();
    let (ascii_logo, raster_logo) = resolve_logos(&receipt.company, &state.paths, &settings.logo);
    let options = RenderOptions::print(&settings.receipt);
    let body = ReceiptRenderer::new(&receipt, ascii_logo.as_deref(), options).render();

    match printing::print_body(&body, raster_logo.as_deref(), &settings).await {
        Ok(()) => {
            info!(
                "Receipt printed: {} items, total {:.2} {}",
                receipt.items.len(),
                receipt.total(),
                receipt.currency
            );
            Ok(ApiResponse::ok())
        }
        Err(e) => Ok(ApiResponse::error_with_code(
            print_error_to_code(&e),
            e.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::tests::sample_company;
    use crate::models::{PaymentMethod, ReceiptItem};
    use chrono::Local;
    use rust_decimal::Decimal;

    fn receipt() -> ReceiptData {
        ReceiptData {
            company: sample_company(),
            items: vec![ReceiptItem {
                name: "Maito".to_string(),
                quantity: 2,
                unit_price: Decimal::new(119, 2),
                vat_rate: Decimal::from(14),
            }],
            customer_name: None,
            reference_number: None,
            invoice_number: None,
            date_time: Local::now(),
            payment_method: PaymentMethod::Cash,
            language: Default::default(),
            currency: "EUR".to_string(),
            payment_details: None,
            custom_footer: None,
        }
    }

    #[test]
    fn test_preview_data_totals() {
        let r = receipt();
        let data = PreviewData::new(&r, "text".to_string(), 42);
        assert_eq!(data.subtotal, "2.38");
        assert_eq!(data.total_vat, "0.33");
        assert_eq!(data.total, "2.71");
        assert_eq!(data.width, 42);
    }

    #[test]
    fn test_resolve_logos_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        paths.ensure_dirs().unwrap();
        std::fs::write(paths.logos_dir().join("testi_oy.txt"), "###\n###").unwrap();

        let caps = LogoSettings::default();
        let (ascii, raster) = resolve_logos(&sample_company(), &paths, &caps);
        assert_eq!(ascii.as_deref(), Some("###\n###"));
        assert!(raster.is_none());
    }

    #[test]
    fn test_resolve_logos_none() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        paths.ensure_dirs().unwrap();

        let caps = LogoSettings::default();
        let (ascii, raster) = resolve_logos(&sample_company(), &paths, &caps);
        assert!(ascii.is_none());
        assert!(raster.is_none());
    }

    #[test]
    fn test_resolve_logos_blank_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        paths.ensure_dirs().unwrap();
        std::fs::write(paths.logos_dir().join("testi_oy.txt"), "  \n  ").unwrap();

        let caps = LogoSettings::default();
        let (ascii, _) = resolve_logos(&sample_company(), &paths, &caps);
        assert!(ascii.is_none());
    }
}

//! Printer commands.

use std::sync::Arc;

use tauri::State;
use tracing::info;

use crate::core::response::print_error_to_code;
use crate::core::{ApiResponse, AppState};
use crate::utils::printing;

/// Print the self-test page on the configured printer.
#[tauri::command]
pub async fn test_print(state: State<'_, Arc<AppState>>) -> Result<ApiResponse<()>, String> {
    let settings = state.settings.read().await.clone();
    let body = printing::test_page(&settings.receipt);
    match printing::print_body(&body, None, &settings).await {
        Ok(()) => {
            info!("Test page printed");
            Ok(ApiResponse::ok())
        }
        Err(e) => Ok(ApiResponse::error_with_code(
            print_error_to_code(&e),
            e.to_string(),
        )),
    }
}

/// Check whether the configured printer is reachable without printing.
#[tauri::command]
pub async fn probe_printer(state: State<'_, Arc<AppState>>) -> Result<ApiResponse<bool>, String> {
    let settings = state.settings.read().await;
    match printing::probe(&settings.printer).await {
        Ok(online) => Ok(ApiResponse::success(online)),
        Err(e) => Ok(ApiResponse::error_with_code(
            print_error_to_code(&e),
            e.to_string(),
        )),
    }
}

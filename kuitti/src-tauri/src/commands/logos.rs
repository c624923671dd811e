//! Logo editor commands.

use std::path::Path;
use std::sync::Arc;

use tauri::State;

use crate::core::response::logo_error_to_code;
use crate::core::{ApiResponse, AppState};
use crate::utils::logo;

/// Convert an image file to ASCII art for the logo editor.
///
/// Defaults to the configured maximum logo width when none is given.
#[tauri::command]
pub async fn convert_logo(
    state: State<'_, Arc<AppState>>,
    path: String,
    width: Option<u32>,
) -> Result<ApiResponse<String>, String> {
    let width = match width {
        Some(w) => w,
        None => state.settings.read().await.logo.max_width,
    };
    match logo::image_to_ascii(Path::new(&path), width) {
        Ok(art) => Ok(ApiResponse::success(art)),
        Err(e) => Ok(ApiResponse::error_with_code(
            logo_error_to_code(&e),
            e.to_string(),
        )),
    }
}

//! Settings commands.

use std::sync::Arc;

use tauri::State;
use tracing::info;

use crate::core::response::from_settings_error;
use crate::core::{ApiResponse, AppState, ErrorCode};
use crate::models::AppSettings;

#[tauri::command]
pub async fn get_settings(
    state: State<'_, Arc<AppState>>,
) -> Result<ApiResponse<AppSettings>, String> {
    let settings = state.settings.read().await;
    Ok(ApiResponse::success(settings.clone()))
}

/// Validate, persist and swap in new settings. The only mutation path.
#[tauri::command]
pub async fn update_settings(
    state: State<'_, Arc<AppState>>,
    settings: AppSettings,
) -> Result<ApiResponse<AppSettings>, String> {
    if let Err(e) = settings.validate() {
        return Ok(from_settings_error(&e));
    }
    if let Err(e) = settings.save(&state.paths.settings_file()) {
        return Ok(ApiResponse::error_with_code(
            ErrorCode::SettingsSaveFailed,
            e.to_string(),
        ));
    }
    let mut current = state.settings.write().await;
    *current = settings;
    info!("Settings updated and saved");
    Ok(ApiResponse::success(current.clone()))
}

//! Company profile commands.

use std::sync::Arc;

use tauri::State;

use crate::core::{ApiResponse, AppState, ErrorCode};
use crate::models::CompanyProfile;

#[tauri::command]
pub async fn list_companies(
    state: State<'_, Arc<AppState>>,
) -> Result<ApiResponse<Vec<String>>, String> {
    Ok(ApiResponse::success(state.profiles.names()))
}

#[tauri::command]
pub async fn get_company(
    state: State<'_, Arc<AppState>>,
    name: String,
) -> Result<ApiResponse<CompanyProfile>, String> {
    match state.profiles.get(&name) {
        Some(profile) => Ok(ApiResponse::success(profile.clone())),
        None => Ok(ApiResponse::error_with_code(
            ErrorCode::CompanyNotFound,
            format!("No company profile named '{name}'"),
        )),
    }
}

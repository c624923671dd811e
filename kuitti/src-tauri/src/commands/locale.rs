//! Localization commands.

use std::collections::HashMap;

use crate::core::ApiResponse;
use crate::i18n;
use crate::models::Language;

#[tauri::command]
pub async fn get_translations(
    language: Language,
) -> Result<ApiResponse<HashMap<String, String>>, String> {
    Ok(ApiResponse::success(i18n::translations(language)))
}

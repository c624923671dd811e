//! Receipt scanning command.
//!
//! Recognition is CPU-bound and can take seconds, so the command only
//! starts a blocking worker and returns. The worker reports through the
//! events in [`crate::events`] and the busy flag keeps it single-flight.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tauri::{AppHandle, Emitter, State};
use tracing::{debug, error, info, warn};

use kuitti_ocr::{OcrConfig, OcrEngine, OcrError, OcrOutcome, detect_logo, prepare, reflow};

use crate::core::response::ocr_error_to_code;
use crate::core::{ApiResponse, AppState, ErrorCode};
use crate::events::{self, OcrErrorEvent, OcrProgressEvent};

#[tauri::command]
pub async fn scan_receipt(
    app_handle: AppHandle,
    state: State<'_, Arc<AppState>>,
    path: String,
) -> Result<ApiResponse<()>, String> {
    if state.ocr_busy.swap(true, Ordering::SeqCst) {
        return Ok(ApiResponse::error_with_code(
            ErrorCode::OcrBusy,
            ErrorCode::OcrBusy.message().to_string(),
        ));
    }

    let config = {
        let settings = state.settings.read().await;
        OcrConfig {
            output_width: settings.receipt.width,
            ..OcrConfig::default()
        }
    };
    let state = Arc::clone(state.inner());
    info!("Starting scan of {path}");

    tauri::async_runtime::spawn_blocking(move || {
        match run_scan(&app_handle, &path, &config, &state.paths.scans_dir()) {
            Ok(outcome) => {
                info!(
                    confidence = outcome.confidence,
                    "Scan finished: {} characters",
                    outcome.text.len()
                );
                let _ = app_handle.emit(events::OCR_COMPLETE, &outcome);
            }
            Err(e) => {
                error!("Scan of {path} failed: {e}");
                let _ = app_handle.emit(
                    events::OCR_ERROR,
                    &OcrErrorEvent {
                        code: ocr_error_to_code(&e).code(),
                        message: e.to_string(),
                    },
                );
            }
        }
        state.ocr_busy.store(false, Ordering::SeqCst);
    });

    Ok(ApiResponse::ok())
}

/// The scan pipeline with progress events between the stages.
fn run_scan(
    app: &AppHandle,
    path: &str,
    config: &OcrConfig,
    scans_dir: &Path,
) -> Result<OcrOutcome, OcrError> {
    emit_progress(app, "load", 10);
    let image = image::open(path)?;

    emit_progress(app, "preprocess", 30);
    let gray = if config.enhance {
        let gray = prepare(&image);
        save_preprocessed(path, &gray, scans_dir);
        gray
    } else {
        image.to_luma8()
    };
    let has_logo = config.detect_logo && detect_logo(&gray);

    emit_progress(app, "recognize", 50);
    let mut engine = OcrEngine::new(config)?;
    let (text, confidence) = engine.recognize(&gray)?;

    let structured_text = reflow(&text, config.output_width);
    emit_progress(app, "reflow", 100);

    Ok(OcrOutcome {
        text,
        structured_text,
        confidence,
        has_logo,
        preprocessed: config.enhance,
    })
}

/// Keep a copy of what recognition actually saw, for troubleshooting.
/// Saving is best effort and never fails the scan.
fn save_preprocessed(source: &str, gray: &image::GrayImage, scans_dir: &Path) {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    let target = scans_dir.join(format!("{stem}_enhanced.png"));
    match gray.save(&target) {
        Ok(()) => debug!("Preprocessed image saved to {}", target.display()),
        Err(e) => warn!("Could not save preprocessed image: {e}"),
    }
}

fn emit_progress(app: &AppHandle, stage: &'static str, percent: u8) {
    let _ = app.emit(events::OCR_PROGRESS, &OcrProgressEvent { stage, percent });
}

//! Kuitti application library.
//!
//! Wires the Tauri shell together: logging, panic hook, application state
//! and the command handlers.

pub mod commands;
pub mod core;
pub mod events;
pub mod i18n;
pub mod models;
pub mod profiles;
pub mod utils;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tauri::Manager;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::core::AppState;

/// Timestamps in local time, receipts live in local time too.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Holds the non-blocking writer guard for the lifetime of the app;
/// dropping it would stop file logging.
struct LogGuard(#[allow(dead_code)] WorkerGuard);

fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let file_appender = rolling::daily(log_dir, "kuitti.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("info,tao=error,kuitti=debug")
        } else {
            EnvFilter::new("warn,tao=error")
        }
    });

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_timer(LocalTimer);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_timer(LocalTimer);

    let _ = tracing_log::LogTracer::init();
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        eprintln!("panic: {info}\n{backtrace}");
        tracing::error!(target: "panic", "{info}\n{backtrace}");
    }));
}

fn resolve_data_dir(app: &tauri::App) -> tauri::Result<PathBuf> {
    if let Ok(dir) = std::env::var("KUITTI_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    app.path().app_data_dir()
}

fn apply_window_size(app: &tauri::App, state: &AppState) {
    let Ok(settings) = state.settings.try_read() else {
        return;
    };
    let size = tauri::LogicalSize::new(
        settings.ui.window_width as f64,
        settings.ui.window_height as f64,
    );
    if let Some(window) = app.get_webview_window("main") {
        if let Err(e) = window.set_size(size) {
            warn!("Failed to apply saved window size: {e}");
        }
    }
}

pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let data_dir = resolve_data_dir(app)?;
            let log_dir = data_dir.join("logs");
            std::fs::create_dir_all(&log_dir)?;
            app.manage(LogGuard(init_tracing(&log_dir)));
            install_panic_hook();

            let state = Arc::new(AppState::bootstrap(&data_dir)?);
            apply_window_size(app, &state);
            app.manage(state);
            info!("Kuitti started, data dir {}", data_dir.display());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Settings
            commands::get_settings,
            commands::update_settings,
            // Companies
            commands::list_companies,
            commands::get_company,
            // Localization
            commands::get_translations,
            // Receipts
            commands::preview_receipt,
            commands::print_receipt,
            // Printer
            commands::test_print,
            commands::probe_printer,
            // Logos
            commands::convert_logo,
            // Scanning
            commands::scan_receipt,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

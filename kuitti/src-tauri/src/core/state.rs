//! Shared application state managed by Tauri.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::AppSettings;
use crate::profiles::ProfileStore;

use super::paths::AppPaths;

pub struct AppState {
    pub paths: AppPaths,
    pub settings: RwLock<AppSettings>,
    pub profiles: ProfileStore,
    /// Set while a scan worker is running, only one scan at a time
    pub ocr_busy: AtomicBool,
}

impl AppState {
    /// Create the data directory layout and load settings and profiles.
    pub fn bootstrap(base: impl Into<PathBuf>) -> std::io::Result<AppState> {
        let paths = AppPaths::new(base);
        paths.ensure_dirs()?;

        let settings = AppSettings::load_or_default(&paths.settings_file());
        let profiles = ProfileStore::load(&paths.profiles_dir());
        info!(
            "State ready: {} company profiles, data dir {}",
            profiles.len(),
            paths.base().display()
        );

        Ok(AppState {
            paths,
            settings: RwLock::new(settings),
            profiles,
            ocr_busy: AtomicBool::new(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_bootstrap_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::bootstrap(dir.path()).unwrap();
        assert!(state.paths.profiles_dir().is_dir());
        assert!(state.paths.logs_dir().is_dir());
        assert_eq!(state.profiles.len(), 5);
        assert!(!state.ocr_busy.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_settings_default_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::bootstrap(dir.path()).unwrap();
        let settings = state.settings.read().await;
        assert_eq!(settings.receipt.width, 42);
        assert_eq!(settings.defaults.company, "Harjun Raskaskone Oy");
    }
}

//! Filesystem layout under the app data directory.
//!
//! ```text
//! <data_dir>/
//! ├── settings.json      application settings
//! ├── profiles/          user company profiles (.json / .yaml)
//! ├── logos/             ASCII logos (.txt) and raster logos (.png)
//! ├── scans/             preprocessed scan images
//! └── logs/              daily rotated log files
//! ```

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppPaths {
    base: PathBuf,
}

impl AppPaths {
    pub fn new(base: impl Into<PathBuf>) -> AppPaths {
        AppPaths { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base.join("settings.json")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.base.join("profiles")
    }

    pub fn logos_dir(&self) -> PathBuf {
        self.base.join("logos")
    }

    pub fn scans_dir(&self) -> PathBuf {
        self.base.join("scans")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }

    /// Create every directory the app writes into.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.profiles_dir())?;
        std::fs::create_dir_all(self.logos_dir())?;
        std::fs::create_dir_all(self.scans_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = AppPaths::new("/data/kuitti");
        assert_eq!(paths.settings_file(), PathBuf::from("/data/kuitti/settings.json"));
        assert_eq!(paths.profiles_dir(), PathBuf::from("/data/kuitti/profiles"));
        assert_eq!(paths.logos_dir(), PathBuf::from("/data/kuitti/logos"));
        assert_eq!(paths.scans_dir(), PathBuf::from("/data/kuitti/scans"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/data/kuitti/logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        paths.ensure_dirs().unwrap();
        assert!(paths.profiles_dir().is_dir());
        assert!(paths.logos_dir().is_dir());
        assert!(paths.scans_dir().is_dir());
        assert!(paths.logs_dir().is_dir());
    }
}

//! Company profile store.
//!
//! Five builtin profiles ship with the application. User profiles are JSON
//! or YAML files in the profiles directory; a user file whose `name` matches
//! a builtin replaces it. A file that fails to parse is skipped with a
//! warning so one broken profile never blocks startup.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CompanyProfile, Language, PaymentMethod};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported profile extension: {0}")]
    UnsupportedExtension(String),
}

pub struct ProfileStore {
    profiles: HashMap<String, CompanyProfile>,
}

impl ProfileStore {
    /// Store with only the builtin profiles.
    pub fn builtin() -> ProfileStore {
        let mut profiles = HashMap::new();
        for profile in builtin_profiles() {
            profiles.insert(profile.name.clone(), profile);
        }
        ProfileStore { profiles }
    }

    /// Builtin profiles plus everything parseable under `profiles_dir`.
    pub fn load(profiles_dir: &Path) -> ProfileStore {
        let mut store = ProfileStore::builtin();
        let entries = match std::fs::read_dir(profiles_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No profile directory at {}: {e}", profiles_dir.display());
                return store;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match load_file(&path) {
                Ok(profile) => {
                    debug!("Loaded profile '{}' from {}", profile.name, path.display());
                    store.profiles.insert(profile.name.clone(), profile);
                }
                Err(ProfileError::UnsupportedExtension(_)) => {}
                Err(e) => {
                    warn!("Skipping profile {}: {e}", path.display());
                }
            }
        }
        store
    }

    pub fn get(&self, name: &str) -> Option<&CompanyProfile> {
        self.profiles.get(name)
    }

    /// Profile names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Parse one profile file by extension.
pub fn load_file(path: &Path) -> Result<CompanyProfile, ProfileError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let raw = std::fs::read_to_string(path)?;
    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&raw)?),
        other => Err(ProfileError::UnsupportedExtension(other.to_string())),
    }
}

fn builtin_profiles() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile {
            name: "Harjun Raskaskone Oy".to_string(),
            address: "Teollisuustie 42".to_string(),
            postal_code: "33100".to_string(),
            city: "Tampere".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI12345678".to_string(),
            phone: Some("+358 3 1234 5678".to_string()),
            email: Some("info@harjunraskaskone.fi".to_string()),
            website: Some("www.harjunraskaskone.fi".to_string()),
            default_language: Language::Fi,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("Takuu 12kk - Huolto ja varaosat".to_string()),
            default_footer_en: Some("12 months warranty - Service and spare parts".to_string()),
            logo_file: Some("harjun_raskaskone.txt".to_string()),
        },
        CompanyProfile {
            name: "Helsinki eBike Service Oy".to_string(),
            address: "Pyöräkatu 15".to_string(),
            postal_code: "00100".to_string(),
            city: "Helsinki".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI23456789".to_string(),
            phone: Some("+358 9 8765 4321".to_string()),
            email: Some("service@helsinkiebike.fi".to_string()),
            website: Some("www.helsinkiebike.fi".to_string()),
            default_language: Language::Fi,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("Sähköpyörien asiantuntija - Tervetuloa uudelleen!".to_string()),
            default_footer_en: Some("E-Bike specialist - Welcome back!".to_string()),
            logo_file: Some("helsinki_ebike.txt".to_string()),
        },
        CompanyProfile {
            name: "JugiSystems".to_string(),
            address: "Kyberpolku 7".to_string(),
            postal_code: "02150".to_string(),
            city: "Espoo".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI34567890".to_string(),
            phone: Some("+358 50 123 4567".to_string()),
            email: Some("info@jugisystems.fi".to_string()),
            website: Some("www.jugisystems.fi".to_string()),
            default_language: Language::En,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("IT-ratkaisut yrityksille - 24/7 tuki".to_string()),
            default_footer_en: Some("IT solutions for businesses - 24/7 support".to_string()),
            logo_file: Some("jugisystems.txt".to_string()),
        },
        CompanyProfile {
            name: "Lähikauppa Mäkelä".to_string(),
            address: "Kauppatie 3".to_string(),
            postal_code: "00200".to_string(),
            city: "Helsinki".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI45678901".to_string(),
            phone: Some("+358 9 1111 2222".to_string()),
            email: Some("makela@lahikauppa.fi".to_string()),
            website: None,
            default_language: Language::Fi,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("Kiitos ostoksista! Tervetuloa uudelleen!".to_string()),
            default_footer_en: Some("Thank you for shopping! Welcome back!".to_string()),
            logo_file: None,
        },
        CompanyProfile {
            name: "Oulu Marketplace".to_string(),
            address: "Markettikatu 21".to_string(),
            postal_code: "90100".to_string(),
            city: "Oulu".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI56789012".to_string(),
            phone: Some("+358 8 3333 4444".to_string()),
            email: Some("info@oulumarketplace.fi".to_string()),
            website: None,
            default_language: Language::Fi,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("Avoinna ma-pe 8-20, la 10-18".to_string()),
            default_footer_en: Some("Open Mon-Fri 8-20, Sat 10-18".to_string()),
            logo_file: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_store() {
        let store = ProfileStore::builtin();
        assert_eq!(store.len(), 5);
        let names = store.names();
        assert_eq!(
            names,
            vec![
                "Harjun Raskaskone Oy",
                "Helsinki eBike Service Oy",
                "JugiSystems",
                "Lähikauppa Mäkelä",
                "Oulu Marketplace",
            ]
        );
        let harjun = store.get("Harjun Raskaskone Oy").unwrap();
        assert_eq!(harjun.vat_id, "FI12345678");
        assert_eq!(harjun.logo_file.as_deref(), Some("harjun_raskaskone.txt"));
        let jugi = store.get("JugiSystems").unwrap();
        assert_eq!(jugi.default_language, Language::En);
    }

    #[test]
    fn test_missing_directory_yields_builtins() {
        let store = ProfileStore::load(Path::new("/nonexistent/profiles"));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_user_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "name": "Harjun Raskaskone Oy",
            "address": "Uusi osoite 1",
            "postal_code": "33200",
            "city": "Tampere",
            "vat_id": "FI12345678"
        }"#;
        std::fs::write(dir.path().join("harjun.json"), json).unwrap();

        let store = ProfileStore::load(dir.path());
        assert_eq!(store.len(), 5);
        let harjun = store.get("Harjun Raskaskone Oy").unwrap();
        assert_eq!(harjun.address, "Uusi osoite 1");
    }

    #[test]
    fn test_loads_yaml_profile() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = concat!(
            "name: Kahvila Aurora\n",
            "address: Satamakatu 9\n",
            "postal_code: \"20100\"\n",
            "city: Turku\n",
            "vat_id: FI67890123\n",
        );
        std::fs::write(dir.path().join("aurora.yaml"), yaml).unwrap();

        let store = ProfileStore::load(dir.path());
        assert_eq!(store.len(), 6);
        assert_eq!(store.get("Kahvila Aurora").unwrap().city, "Turku");
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a profile").unwrap();

        let store = ProfileStore::load(dir.path());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, "x").unwrap();
        assert!(matches!(
            load_file(&path),
            Err(ProfileError::UnsupportedExtension(ext)) if ext == "png"
        ));
    }
}

//! Company profile used in receipt headers.

use serde::{Deserialize, Serialize};

use super::receipt::{Language, PaymentMethod};

fn default_country() -> String {
    "Finland".to_string()
}

/// Seller identity printed at the top of every receipt.
///
/// Profiles are either built in or loaded from JSON/YAML files in the
/// profiles directory; user files override builtins with the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub vat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "super::default_currency")]
    pub default_currency: String,
    #[serde(default = "PaymentMethod::all")]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_footer_fi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_footer_en: Option<String>,
    /// Logo file name under the logos directory, `.txt` or `.png`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<String>,
}

impl CompanyProfile {
    /// Footer text for the given receipt language, if the profile has one.
    pub fn default_footer(&self, language: Language) -> Option<&str> {
        match language {
            Language::Fi => self.default_footer_fi.as_deref(),
            Language::En => self.default_footer_en.as_deref(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_company() -> CompanyProfile {
        CompanyProfile {
            name: "Testi Oy".to_string(),
            address: "Testikatu 1".to_string(),
            postal_code: "00100".to_string(),
            city: "Helsinki".to_string(),
            country: "Finland".to_string(),
            vat_id: "FI99999999".to_string(),
            phone: Some("+358 9 000 0000".to_string()),
            email: Some("testi@testi.fi".to_string()),
            website: None,
            default_language: Language::Fi,
            default_currency: "EUR".to_string(),
            payment_methods: PaymentMethod::all(),
            default_footer_fi: Some("Tervetuloa uudelleen!".to_string()),
            default_footer_en: Some("Welcome back!".to_string()),
            logo_file: None,
        }
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let json = r#"{
            "name": "Kauppa Ky",
            "address": "Kauppakatu 2",
            "postal_code": "33100",
            "city": "Tampere",
            "vat_id": "FI11111111"
        }"#;
        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.country, "Finland");
        assert_eq!(profile.default_currency, "EUR");
        assert_eq!(profile.default_language, Language::Fi);
        assert_eq!(profile.payment_methods, PaymentMethod::all());
        assert!(profile.phone.is_none());
        assert!(profile.logo_file.is_none());
    }

    #[test]
    fn test_yaml_round_trip() {
        let profile = sample_company();
        let yaml = serde_yaml::to_string(&profile).unwrap();
        let back: CompanyProfile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.name, profile.name);
        assert_eq!(back.vat_id, profile.vat_id);
        assert_eq!(back.default_footer_fi, profile.default_footer_fi);
    }

    #[test]
    fn test_footer_per_language() {
        let profile = sample_company();
        assert_eq!(profile.default_footer(Language::Fi), Some("Tervetuloa uudelleen!"));
        assert_eq!(profile.default_footer(Language::En), Some("Welcome back!"));

        let mut bare = sample_company();
        bare.default_footer_en = None;
        assert_eq!(bare.default_footer(Language::En), None);
    }

    #[test]
    fn test_none_fields_skipped_in_json() {
        let mut profile = sample_company();
        profile.phone = None;
        profile.website = None;
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("phone").is_none());
        assert!(value.get("website").is_none());
        assert_eq!(value["email"], "testi@testi.fi");
    }
}

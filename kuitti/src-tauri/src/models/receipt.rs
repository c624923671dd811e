//! Receipt data types and VAT arithmetic.
//!
//! All monetary values are `Decimal` internally; line amounts are rounded to
//! two places (half away from zero) as they are computed, so the printed
//! breakdown always sums to the printed total.

use chrono::{DateTime, Local};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CompanyProfile;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Finnish VAT rate buckets (percent)
pub const VAT_RATES: [u32; 4] = [0, 10, 14, 24];

/// Maximum allowed unit price per item
const MAX_UNIT_PRICE: u32 = 1_000_000;
/// Maximum allowed quantity per item
const MAX_QUANTITY: u32 = 9999;

fn default_vat_rate() -> Decimal {
    Decimal::from(24)
}

/// Receipt validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("Receipt has no items")]
    NoItems,
    #[error("Item {index}: name is empty")]
    EmptyName { index: usize },
    #[error("Item {index}: quantity must be at least 1")]
    ZeroQuantity { index: usize },
    #[error("Item {index}: quantity exceeds {MAX_QUANTITY}")]
    QuantityTooLarge { index: usize },
    #[error("Item {index}: unit price cannot be negative")]
    NegativePrice { index: usize },
    #[error("Item {index}: unit price exceeds {MAX_UNIT_PRICE}")]
    PriceTooLarge { index: usize },
    #[error("Item {index}: unsupported VAT rate {rate}")]
    UnknownVatRate { index: usize, rate: Decimal },
}

/// Receipt language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "FI")]
    Fi,
    #[serde(rename = "EN")]
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fi => "FI",
            Language::En => "EN",
        }
    }
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Mobile,
    Bank,
}

impl PaymentMethod {
    /// All methods, in the order they appear in selection lists.
    pub fn all() -> Vec<PaymentMethod> {
        vec![
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::Mobile,
            PaymentMethod::Bank,
        ]
    }

    /// Printable name for the receipt footer.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (PaymentMethod::Cash, Language::Fi) => "Käteinen",
            (PaymentMethod::Cash, Language::En) => "Cash",
            (PaymentMethod::Card, Language::Fi) => "Kortti",
            (PaymentMethod::Card, Language::En) => "Card",
            (PaymentMethod::Mobile, _) => "MobilePay",
            (PaymentMethod::Bank, Language::Fi) => "Pankkisiirto",
            (PaymentMethod::Bank, Language::En) => "Bank transfer",
        }
    }
}

/// Card terminal slip details, printed verbatim under the payment method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_masked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

impl PaymentDetails {
    /// Present fields as (label, value) pairs in slip order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mapping: [(&'static str, &Option<String>); 9] = [
            ("Card", &self.card_type),
            ("PAN", &self.pan_masked),
            ("Auth", &self.auth_code),
            ("AID", &self.aid),
            ("App", &self.app_label),
            ("TVR", &self.tvr),
            ("TSI", &self.tsi),
            ("TransID", &self.transaction_id),
            ("Terminal", &self.terminal_id),
        ];
        mapping
            .iter()
            .filter_map(|(label, value)| value.as_deref().map(|v| (*label, v)))
            .collect()
    }
}

/// One receipt line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// VAT percent, one of [`VAT_RATES`]
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
}

impl ReceiptItem {
    /// Line net: unit price times quantity, rounded to cents.
    pub fn net(&self) -> Decimal {
        (self.unit_price * Decimal::from(self.quantity))
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    /// VAT added on top of the net amount.
    pub fn vat_amount(&self) -> Decimal {
        (self.net() * self.vat_rate / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Line gross: net plus VAT.
    pub fn total(&self) -> Decimal {
        self.net() + self.vat_amount()
    }
}

/// One occupied VAT bucket in a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatLine {
    pub rate: Decimal,
    pub net: Decimal,
    pub vat: Decimal,
}

/// Everything needed to render and print one receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    pub company: CompanyProfile,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default = "Local::now")]
    pub date_time: DateTime<Local>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "super::default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_footer: Option<String>,
}

impl ReceiptData {
    /// Sum of line nets.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(ReceiptItem::net).sum()
    }

    /// Sum of line VAT amounts.
    pub fn total_vat(&self) -> Decimal {
        self.items.iter().map(ReceiptItem::vat_amount).sum()
    }

    /// Receipt total: subtotal plus VAT.
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.total_vat()
    }

    /// Per-rate (net, vat) buckets in ascending rate order.
    pub fn vat_breakdown(&self) -> Vec<VatLine> {
        let mut buckets: std::collections::BTreeMap<Decimal, (Decimal, Decimal)> =
            std::collections::BTreeMap::new();
        for item in &self.items {
            let entry = buckets.entry(item.vat_rate.normalize()).or_default();
            entry.0 += item.net();
            entry.1 += item.vat_amount();
        }
        buckets
            .into_iter()
            .map(|(rate, (net, vat))| VatLine { rate, net, vat })
            .collect()
    }

    /// Validate before rendering or printing.
    pub fn validate(&self) -> Result<(), ReceiptError> {
        // 1. At least one item
        if self.items.is_empty() {
            return Err(ReceiptError::NoItems);
        }

        for (index, item) in self.items.iter().enumerate() {
            // 2. Name must not be blank
            if item.name.trim().is_empty() {
                return Err(ReceiptError::EmptyName { index });
            }

            // 3. Quantity within 1..=MAX_QUANTITY
            if item.quantity == 0 {
                return Err(ReceiptError::ZeroQuantity { index });
            }
            if item.quantity > MAX_QUANTITY {
                return Err(ReceiptError::QuantityTooLarge { index });
            }

            // 4. Price non-negative and bounded
            if item.unit_price < Decimal::ZERO {
                return Err(ReceiptError::NegativePrice { index });
            }
            if item.unit_price > Decimal::from(MAX_UNIT_PRICE) {
                return Err(ReceiptError::PriceTooLarge { index });
            }

            // 5. VAT rate must be a known bucket
            if !VAT_RATES.iter().any(|r| Decimal::from(*r) == item.vat_rate) {
                return Err(ReceiptError::UnknownVatRate {
                    index,
                    rate: item.vat_rate,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::tests::sample_company;

    fn item(name: &str, quantity: u32, unit_price: Decimal, vat_rate: u32) -> ReceiptItem {
        ReceiptItem {
            name: name.to_string(),
            quantity,
            unit_price,
            vat_rate: Decimal::from(vat_rate),
        }
    }

    fn receipt(items: Vec<ReceiptItem>) -> ReceiptData {
        ReceiptData {
            company: sample_company(),
            items,
            customer_name: None,
            reference_number: None,
            invoice_number: None,
            date_time: Local::now(),
            payment_method: PaymentMethod::Cash,
            language: Language::Fi,
            currency: "EUR".to_string(),
            payment_details: None,
            custom_footer: None,
        }
    }

    #[test]
    fn test_line_amounts() {
        let line = item("Moottoriöljy 5L", 2, Decimal::new(1250, 2), 24);
        assert_eq!(line.net(), Decimal::new(2500, 2));
        assert_eq!(line.vat_amount(), Decimal::new(600, 2));
        assert_eq!(line.total(), Decimal::new(3100, 2));
    }

    #[test]
    fn test_vat_rounds_half_away_from_zero() {
        // 3 x 1.35 = 4.05 net, 24% VAT = 0.972 -> 0.97
        let line = item("Suodatin", 3, Decimal::new(135, 2), 24);
        assert_eq!(line.net(), Decimal::new(405, 2));
        assert_eq!(line.vat_amount(), Decimal::new(97, 2));
        // 1 x 1.25 at 10% = 0.125 -> rounds up to 0.13
        let line = item("Kahvi", 1, Decimal::new(125, 2), 10);
        assert_eq!(line.vat_amount(), Decimal::new(13, 2));
    }

    #[test]
    fn test_totals_sum_over_items() {
        let r = receipt(vec![
            item("Leipä", 2, Decimal::new(250, 2), 14),
            item("Maito", 1, Decimal::new(119, 2), 14),
            item("Paristot", 1, Decimal::new(599, 2), 24),
        ]);
        assert_eq!(r.subtotal(), Decimal::new(1218, 2));
        assert_eq!(r.total_vat(), Decimal::new(231, 2));
        assert_eq!(r.total(), r.subtotal() + r.total_vat());
    }

    #[test]
    fn test_vat_breakdown_ascending_and_disjoint() {
        let r = receipt(vec![
            item("Paristot", 1, Decimal::new(599, 2), 24),
            item("Leipä", 2, Decimal::new(250, 2), 14),
            item("Maito", 1, Decimal::new(119, 2), 14),
        ]);
        let breakdown = r.vat_breakdown();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].rate, Decimal::from(14));
        assert_eq!(breakdown[1].rate, Decimal::from(24));
        let net_sum: Decimal = breakdown.iter().map(|b| b.net).sum();
        let vat_sum: Decimal = breakdown.iter().map(|b| b.vat).sum();
        assert_eq!(net_sum, r.subtotal());
        assert_eq!(vat_sum, r.total_vat());
    }

    #[test]
    fn test_validate_rejects_bad_items() {
        let r = receipt(vec![]);
        assert_eq!(r.validate(), Err(ReceiptError::NoItems));

        let r = receipt(vec![item("  ", 1, Decimal::ONE, 24)]);
        assert_eq!(r.validate(), Err(ReceiptError::EmptyName { index: 0 }));

        let r = receipt(vec![item("Maito", 0, Decimal::ONE, 24)]);
        assert_eq!(r.validate(), Err(ReceiptError::ZeroQuantity { index: 0 }));

        let r = receipt(vec![item("Maito", 1, Decimal::new(-100, 2), 24)]);
        assert_eq!(r.validate(), Err(ReceiptError::NegativePrice { index: 0 }));

        let r = receipt(vec![item("Maito", 1, Decimal::ONE, 19)]);
        assert!(matches!(
            r.validate(),
            Err(ReceiptError::UnknownVatRate { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_accepts_zero_rate() {
        let r = receipt(vec![item("Sanomalehti", 1, Decimal::new(300, 2), 0)]);
        assert!(r.validate().is_ok());
        assert_eq!(r.total_vat(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::json!({
            "company": serde_json::to_value(sample_company()).unwrap(),
            "items": [{ "name": "Maito", "quantity": 2, "unit_price": 1.19 }],
            "payment_method": "card",
            "language": "EN"
        });
        let r: ReceiptData = serde_json::from_value(json).unwrap();
        assert_eq!(r.items[0].vat_rate, Decimal::from(24));
        assert_eq!(r.payment_method, PaymentMethod::Card);
        assert_eq!(r.language, Language::En);
        assert_eq!(r.currency, "EUR");

        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["payment_method"], "card");
        assert_eq!(back["language"], "EN");
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(Language::Fi), "Käteinen");
        assert_eq!(PaymentMethod::Bank.label(Language::En), "Bank transfer");
        assert_eq!(PaymentMethod::Mobile.label(Language::Fi), "MobilePay");
    }

    #[test]
    fn test_payment_details_field_order() {
        let details = PaymentDetails {
            card_type: Some("Visa Debit".to_string()),
            auth_code: Some("123456".to_string()),
            terminal_id: Some("T01".to_string()),
            ..Default::default()
        };
        let fields = details.fields();
        assert_eq!(
            fields,
            vec![
                ("Card", "Visa Debit"),
                ("Auth", "123456"),
                ("Terminal", "T01"),
            ]
        );
    }
}

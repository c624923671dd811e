//! UI string tables for Finnish and English.
//!
//! The frontend fetches the whole table for the active language once and
//! looks keys up locally. Unknown keys fall back to the key itself so a
//! missing translation never blanks a label.

use std::collections::HashMap;

use crate::models::Language;

static FI: &[(&str, &str)] = &[
    ("app_title", "Kuitti - Kuitin tulostus"),
    ("company", "Yritys"),
    ("payment_method", "Maksutapa"),
    ("language", "Kieli"),
    ("customer_name", "Asiakkaan nimi"),
    ("reference", "Viite"),
    ("invoice_number", "Laskun numero"),
    ("date_time", "Päivämäärä ja aika"),
    ("preview", "Esikatselu"),
    ("print", "Tulosta kuitti"),
    ("test_print", "Testaa tulostin"),
    ("settings", "Asetukset"),
    ("logo_editor", "Logo-editori"),
    ("scan_receipt", "Skannaa kuitti"),
    ("scanning", "Skannataan..."),
    ("scan_complete", "Skannaus valmis"),
    ("scan_error", "Skannaus epäonnistui"),
    ("add_item", "Lisää rivi"),
    ("remove_item", "Poista rivi"),
    ("product", "Tuote"),
    ("quantity", "Määrä"),
    ("unit_price", "Yks. hinta"),
    ("vat_rate", "ALV-%"),
    ("total", "Yhteensä"),
    ("subtotal", "Välisumma"),
    ("total_vat", "ALV yhteensä"),
    ("grand_total", "Yhteensä"),
    ("cash", "Käteinen"),
    ("card", "Kortti"),
    ("mobilepay", "MobilePay"),
    ("bank_transfer", "Pankkisiirto"),
    ("settings_title", "Asetukset"),
    ("printer_settings", "Tulostimen asetukset"),
    ("connection_type", "Yhteystyyppi"),
    ("usb", "USB"),
    ("network", "Verkko"),
    ("device_path", "Laitepolku"),
    ("ip_address", "IP-osoite"),
    ("port", "Portti"),
    ("test_connection", "Testaa yhteys"),
    ("default_company", "Oletusyritys"),
    ("default_language", "Oletuskieli"),
    ("save", "Tallenna"),
    ("cancel", "Peruuta"),
    ("logo_editor_title", "Logo-editori"),
    ("logo_text", "Logo (ASCII-taide)"),
    ("logo_preview", "Esikatselu"),
    ("load_logo", "Lataa logo"),
    ("save_logo", "Tallenna logo"),
    ("clear_logo", "Tyhjennä"),
    ("import_png_logo", "Tuo PNG-logo"),
    ("print_success", "Kuitti tulostettu onnistuneesti"),
    ("print_error", "Virhe tulostuksessa"),
    ("test_success", "Testitulostus onnistui"),
    ("test_error", "Testitulostus epäonnistui"),
    ("connection_success", "Yhteys muodostettu"),
    ("connection_error", "Yhteys epäonnistui"),
    ("settings_saved", "Asetukset tallennettu"),
    ("logo_saved", "Logo tallennettu"),
    ("no_items", "Lisää vähintään yksi tuote"),
];

static EN: &[(&str, &str)] = &[
    ("app_title", "Kuitti - Receipt Printing"),
    ("company", "Company"),
    ("payment_method", "Payment method"),
    ("language", "Language"),
    ("customer_name", "Customer name"),
    ("reference", "Reference"),
    ("invoice_number", "Invoice number"),
    ("date_time", "Date and time"),
    ("preview", "Preview"),
    ("print", "Print receipt"),
    ("test_print", "Test printer"),
    ("settings", "Settings"),
    ("logo_editor", "Logo editor"),
    ("scan_receipt", "Scan receipt"),
    ("scanning", "Scanning..."),
    ("scan_complete", "Scan complete"),
    ("scan_error", "Scan failed"),
    ("add_item", "Add item"),
    ("remove_item", "Remove item"),
    ("product", "Product"),
    ("quantity", "Quantity"),
    ("unit_price", "Unit price"),
    ("vat_rate", "VAT %"),
    ("total", "Total"),
    ("subtotal", "Subtotal"),
    ("total_vat", "Total VAT"),
    ("grand_total", "Grand total"),
    ("cash", "Cash"),
    ("card", "Card"),
    ("mobilepay", "MobilePay"),
    ("bank_transfer", "Bank transfer"),
    ("settings_title", "Settings"),
    ("printer_settings", "Printer settings"),
    ("connection_type", "Connection type"),
    ("usb", "USB"),
    ("network", "Network"),
    ("device_path", "Device path"),
    ("ip_address", "IP address"),
    ("port", "Port"),
    ("test_connection", "Test connection"),
    ("default_company", "Default company"),
    ("default_language", "Default language"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("logo_editor_title", "Logo editor"),
    ("logo_text", "Logo (ASCII art)"),
    ("logo_preview", "Preview"),
    ("load_logo", "Load logo"),
    ("save_logo", "Save logo"),
    ("clear_logo", "Clear"),
    ("import_png_logo", "Import PNG logo"),
    ("print_success", "Receipt printed successfully"),
    ("print_error", "Print error"),
    ("test_success", "Test print succeeded"),
    ("test_error", "Test print failed"),
    ("connection_success", "Connection established"),
    ("connection_error", "Connection failed"),
    ("settings_saved", "Settings saved"),
    ("logo_saved", "Logo saved"),
    ("no_items", "Add at least one product"),
];

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Fi => FI,
        Language::En => EN,
    }
}

/// Look up one key, falling back to the key itself.
pub fn tr<'a>(language: Language, key: &'a str) -> &'a str {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

/// Full table for one language, keyed for the frontend.
pub fn translations(language: Language) -> HashMap<String, String> {
    table(language)
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

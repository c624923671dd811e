//! Receipt layout engine.
//!
//! Renders a [`ReceiptData`] into fixed-width text for a thermal printer.
//! The same renderer produces the on-screen preview (plain mode) and the
//! print job body (styled mode with inline ESC/POS codes); layout is done
//! with spaces in both modes so the two line up column for column.

use kuitti_printer::{EscPosTextBuilder, column_width, pad_columns};
use rust_decimal::prelude::*;

use crate::models::{Language, ReceiptData, ReceiptSettings};

/// Rendering mode derived from the receipt settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub styled: bool,
    pub bold_header: bool,
    pub double_width_total: bool,
}

impl RenderOptions {
    /// Plain text for the preview pane.
    pub fn preview(settings: &ReceiptSettings) -> RenderOptions {
        RenderOptions {
            width: settings.width,
            styled: false,
            bold_header: false,
            double_width_total: false,
        }
    }

    /// Styled text for the printer.
    pub fn print(settings: &ReceiptSettings) -> RenderOptions {
        RenderOptions {
            width: settings.width,
            styled: true,
            bold_header: settings.bold_header,
            double_width_total: settings.double_width_total,
        }
    }
}

/// Fixed label strings per receipt language.
struct Labels {
    phone: &'static str,
    vat_id: &'static str,
    date: &'static str,
    invoice: &'static str,
    reference: &'static str,
    customer: &'static str,
    col_product: &'static str,
    col_qty: &'static str,
    col_price: &'static str,
    col_total: &'static str,
    vat: &'static str,
    subtotal: &'static str,
    total: &'static str,
    payment: &'static str,
    default_footer: &'static str,
}

impl Labels {
    fn for_language(language: Language) -> Labels {
        match language {
            Language::Fi => Labels {
                phone: "Puh:",
                vat_id: "Y-tunnus:",
                date: "Pvm:",
                invoice: "Lasku nro:",
                reference: "Viite:",
                customer: "Asiakas:",
                col_product: "Tuote",
                col_qty: "Kpl",
                col_price: "Hinta",
                col_total: "Yht",
                vat: "ALV",
                subtotal: "Välisumma:",
                total: "YHTEENSÄ:",
                payment: "Maksutapa:",
                default_footer: "Kiitos käynnistä!",
            },
            Language::En => Labels {
                phone: "Tel:",
                vat_id: "VAT ID:",
                date: "Date:",
                invoice: "Invoice no:",
                reference: "Reference:",
                customer: "Customer:",
                col_product: "Product",
                col_qty: "Qty",
                col_price: "Price",
                col_total: "Tot",
                vat: "VAT",
                subtotal: "Subtotal:",
                total: "TOTAL:",
                payment: "Payment method:",
                default_footer: "Thank you for your visit!",
            },
        }
    }
}

pub struct ReceiptRenderer<'a> {
    receipt: &'a ReceiptData,
    /// Resolved ASCII logo, already capped to the configured bounds
    logo: Option<&'a str>,
    options: RenderOptions,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(
        receipt: &'a ReceiptData,
        logo: Option<&'a str>,
        options: RenderOptions,
    ) -> ReceiptRenderer<'a> {
        ReceiptRenderer {
            receipt,
            logo,
            options,
        }
    }

    pub fn render(&self) -> String {
        let r = self.receipt;
        let labels = Labels::for_language(r.language);
        let mut b = if self.options.styled {
            EscPosTextBuilder::new(self.options.width)
        } else {
            EscPosTextBuilder::plain(self.options.width)
        };

        // ── Logo ──
        if let Some(logo) = self.logo {
            for line in logo.lines() {
                b.text_center(line);
            }
            b.blank_line();
        }

        // ── Header ──
        self.company_name(&mut b);
        b.text_center(&r.company.address);
        b.text_center(&format!("{} {}", r.company.postal_code, r.company.city));
        if let Some(phone) = &r.company.phone {
            b.text_center(&format!("{} {}", labels.phone, phone));
        }
        if let Some(email) = &r.company.email {
            b.text_center(email);
        }
        b.text_center(&format!("{} {}", labels.vat_id, r.company.vat_id));

        // ── Receipt info ──
        b.eq_sep();
        b.pair(
            labels.date,
            &r.date_time.format("%d.%m.%Y %H:%M").to_string(),
        );
        if let Some(invoice) = &r.invoice_number {
            b.pair(labels.invoice, invoice);
        }
        if let Some(reference) = &r.reference_number {
            b.pair(labels.reference, reference);
        }
        if let Some(customer) = &r.customer_name {
            b.pair(labels.customer, customer);
        }

        // ── Items ──
        b.eq_sep();
        b.write_line(&self.item_row(
            labels.col_product,
            labels.col_qty,
            labels.col_price,
            labels.col_total,
        ));
        b.dash_sep();
        for item in &r.items {
            let unit = item
                .unit_price
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            b.write_line(&self.item_row(
                &item.name,
                &item.quantity.to_string(),
                &format!("{unit:.2}"),
                &format!("{:.2}", item.total()),
            ));
            b.write_line(&format!("  ({} {}%)", labels.vat, item.vat_rate.normalize()));
        }

        // ── Totals ──
        b.eq_sep();
        b.pair(labels.subtotal, &amount(r.subtotal(), &r.currency));
        for line in r.vat_breakdown() {
            b.pair(
                &format!("{} {}%:", labels.vat, line.rate),
                &amount(line.vat, &r.currency),
            );
        }
        b.dash_sep();
        self.total_line(&mut b, &labels);

        // ── Footer ──
        b.eq_sep();
        b.pair(labels.payment, r.payment_method.label(r.language));
        if let Some(details) = &r.payment_details {
            for (label, value) in details.fields() {
                b.pair(&format!("{label}:"), value);
            }
        }
        b.blank_line();
        let footer = r
            .custom_footer
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                r.company
                    .default_footer(r.language)
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or(labels.default_footer);
        for line in footer.lines() {
            b.text_center(line);
        }

        b.finalize()
    }

    /// Company name, optionally bold and double size when printing.
    ///
    /// Double-size glyphs occupy two columns each, so the styled line is
    /// composed at half width and the printer doubles it back out. Names
    /// wider than half the paper stay normal size.
    fn company_name(&self, b: &mut EscPosTextBuilder) {
        let name = &self.receipt.company.name;
        if !self.options.styled || !self.options.bold_header {
            b.text_center(name);
            return;
        }
        let half = self.options.width / 2;
        b.bold_on();
        if column_width(name) <= half {
            b.size_double();
            b.write_line(&center_at(name, half));
            b.size_reset();
        } else {
            b.text_center(name);
        }
        b.bold_off();
    }

    /// One item line: name, quantity, unit price, line total.
    ///
    /// Column widths are 5/8/9 for the numeric columns; the name takes the
    /// rest and is truncated to fit.
    fn item_row(&self, name: &str, qty: &str, price: &str, total: &str) -> String {
        let name_w = self.options.width.saturating_sub(22);
        let mut row = pad_columns(name, name_w, false);
        row.push_str(&pad_columns(qty, 5, true));
        row.push_str(&pad_columns(price, 8, true));
        row.push_str(&pad_columns(total, 9, true));
        row
    }

    fn total_line(&self, b: &mut EscPosTextBuilder, labels: &Labels) {
        let total = amount(self.receipt.total(), &self.receipt.currency);
        if !self.options.styled {
            b.pair(labels.total, &total);
            return;
        }
        b.bold_on();
        if self.options.double_width_total {
            let half = self.options.width / 2;
            b.size_double_width();
            b.write_line(&pair_at(labels.total, &total, half));
            b.size_reset();
        } else {
            b.pair(labels.total, &total);
        }
        b.bold_off();
    }
}

fn amount(value: Decimal, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

fn center_at(s: &str, width: usize) -> String {
    let w = column_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat((width - w) / 2), s)
}

fn pair_at(left: &str, right: &str, width: usize) -> String {
    let lw = column_width(left);
    let rw = column_width(right);
    if lw + rw >= width {
        return format!("{left} {right}");
    }
    format!("{left}{}{right}", " ".repeat(width - lw - rw))
}

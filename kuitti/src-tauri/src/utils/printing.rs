//! Print job assembly and dispatch.
//!
//! A job is the rendered receipt body wrapped in printer control: an
//! optional raster logo up front, then the body, then feed and cut. The
//! body goes through Windows-1252 conversion; raster bytes are binary and
//! must stay out of that conversion, so the logo prefix is built separately
//! with [`EscPosBuilder::build_raw`].

use chrono::Local;
use tracing::{info, instrument};

use kuitti_printer::{
    EscPosBuilder, EscPosTextBuilder, NetworkPrinter, PrintError, PrintResult, Printer, UsbPrinter,
};

use crate::models::{AppSettings, ConnectionType, PrinterSettings, ReceiptSettings};

/// Assemble a complete ESC/POS job from a rendered receipt body.
pub fn build_job(
    body: &str,
    raster_logo: Option<&[u8]>,
    settings: &ReceiptSettings,
) -> PrintResult<Vec<u8>> {
    if !(32..=80).contains(&settings.width) {
        return Err(PrintError::InvalidConfig(format!(
            "Receipt width {} outside 32-80",
            settings.width
        )));
    }

    let mut job = Vec::new();
    if let Some(raster) = raster_logo {
        let mut prefix = EscPosBuilder::new(settings.width);
        prefix.raw(raster);
        // The raster block leaves the printer center-aligned
        prefix.left();
        prefix.newline();
        job.extend(prefix.build_raw());
    }

    let mut b = EscPosBuilder::new(settings.width);
    b.text(body);
    if settings.cut_paper {
        b.cut_feed(settings.feed_lines);
    } else {
        b.feed(settings.feed_lines);
    }
    job.extend(b.build());
    Ok(job)
}

/// Send a finished job to the configured printer.
#[instrument(skip(job, printer), fields(connection = ?printer.connection, bytes = job.len()))]
pub async fn send(job: &[u8], printer: &PrinterSettings) -> PrintResult<()> {
    match printer.connection {
        ConnectionType::Usb => {
            let device = UsbPrinter::new(&printer.device_path);
            device.print(job).await
        }
        ConnectionType::Network => {
            let device = network_printer(printer)?;
            device.print(job).await
        }
    }
}

/// Check whether the configured printer is reachable.
pub async fn probe(printer: &PrinterSettings) -> PrintResult<bool> {
    match printer.connection {
        ConnectionType::Usb => Ok(UsbPrinter::new(&printer.device_path).is_online().await),
        ConnectionType::Network => Ok(network_printer(printer)?.is_online().await),
    }
}

fn network_printer(printer: &PrinterSettings) -> PrintResult<NetworkPrinter> {
    let host = printer
        .ip_address
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            PrintError::InvalidConfig("Network printing requires an IP address".to_string())
        })?;
    NetworkPrinter::new(host, printer.port)
}

/// Build a job from body text and send it.
pub async fn print_body(
    body: &str,
    raster_logo: Option<&[u8]>,
    settings: &AppSettings,
) -> PrintResult<()> {
    let job = build_job(body, raster_logo, &settings.receipt)?;
    info!("Sending {} byte job", job.len());
    send(&job, &settings.printer).await
}

/// Self-test page: title, column ruler, Nordic characters and the date.
pub fn test_page(settings: &ReceiptSettings) -> String {
    let mut b = EscPosTextBuilder::new(settings.width);
    b.bold_on();
    b.text_center("KUITTI TESTISIVU");
    b.bold_off();
    b.eq_sep();
    let ruler: String = "1234567890".chars().cycle().take(settings.width).collect();
    b.write_line(&ruler);
    b.write_line("ÄÖÅ äöå €");
    b.pair("Pvm:", &Local::now().format("%d.%m.%Y %H:%M").to_string());
    b.eq_sep();
    b.text_center("Tulostin toimii");
    b.finalize()
}

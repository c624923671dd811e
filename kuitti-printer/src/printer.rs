//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - Network printers (TCP port 9100)
//! - USB printers (raw character device, e.g. /dev/usb/lp0)
//! - Capture printer (collects jobs in memory, for tests and dry runs)

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    ///
    /// The port must be non-zero; raw printing is usually on 9100.
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        if port == 0 {
            return Err(PrintError::InvalidConfig("Port must be 1-65535".to_string()));
        }
        let addr_str = format!("{}:{}", host, port);
        let addr = addr_str
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr_str)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
        if addr.port() == 0 {
            return Err(PrintError::InvalidConfig("Port must be 1-65535".to_string()));
        }

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected, sending {} bytes", data.len());

        let mut stream = stream;
        stream.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        stream.flush().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// USB printer (raw character device)
///
/// Writes ESC/POS data straight to the usblp device node that the kernel
/// creates for a plugged-in printer (usually `/dev/usb/lp0`). Tested with
/// the Epson TM-T70II (USB ID 04b8:0202).
#[derive(Debug, Clone)]
pub struct UsbPrinter {
    device: PathBuf,
    timeout: Duration,
}

impl UsbPrinter {
    /// Default usblp device node on Linux
    pub const DEFAULT_DEVICE: &'static str = "/dev/usb/lp0";

    /// Create a printer for a specific device node
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set write timeout
    ///
    /// A jammed or out-of-paper printer can stall the device write
    /// indefinitely, so jobs are bounded by this timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the device node path
    pub fn device(&self) -> &Path {
        &self.device
    }

    async fn write_device(&self, data: &[u8]) -> PrintResult<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(&self.device)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    PrintError::Offline(self.device.display().to_string())
                }
                _ => PrintError::Connection(format!("{}: {}", self.device.display(), e)),
            })?;

        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }
}

impl Default for UsbPrinter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEVICE)
    }
}

impl Printer for UsbPrinter {
    #[instrument(skip(data), fields(device = %self.device.display(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Opening USB device");

        tokio::time::timeout(self.timeout, self.write_device(data))
            .await
            .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.device.display())))??;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(device = %self.device.display()))]
    async fn is_online(&self) -> bool {
        // The device node only exists while a printer is plugged in.
        match tokio::fs::metadata(&self.device).await {
            Ok(_) => {
                info!("Printer online");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}

/// In-memory printer that captures print jobs instead of sending them
///
/// Used as a test double and as the adapter behind "dry run" printing,
/// where the rendered bytes should be inspected rather than printed.
#[derive(Debug, Clone, Default)]
pub struct CapturePrinter {
    jobs: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl CapturePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of captured jobs
    pub fn job_count(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or(0)
    }

    /// Get a copy of the most recent job
    pub fn last_job(&self) -> Option<Vec<u8>> {
        self.jobs
            .lock()
            .ok()
            .and_then(|jobs| jobs.last().cloned())
    }

    /// Take all captured jobs, leaving the buffer empty
    pub fn take_jobs(&self) -> Vec<Vec<u8>> {
        self.jobs
            .lock()
            .map(|mut jobs| std::mem::take(&mut *jobs))
            .unwrap_or_default()
    }
}

impl Printer for CapturePrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| PrintError::Connection("Capture buffer poisoned".to_string()))?;
        jobs.push(data.to_vec());
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_printer_new() {
        let printer = NetworkPrinter::new("192.168.1.100", 9100).unwrap();
        assert_eq!(printer.addr().port(), 9100);
    }

    #[test]
    fn test_network_printer_from_addr() {
        let printer = NetworkPrinter::from_addr("192.168.1.100:9100").unwrap();
        assert_eq!(printer.addr().port(), 9100);
    }

    #[test]
    fn test_invalid_addr() {
        let result = NetworkPrinter::from_addr("invalid");
        assert!(result.is_err());
    }

    #[test]
    fn test_port_zero_rejected() {
        assert!(NetworkPrinter::new("192.168.1.100", 0).is_err());
        assert!(NetworkPrinter::from_addr("192.168.1.100:0").is_err());
    }

    #[tokio::test]
    async fn test_usb_printer_missing_device() {
        let printer = UsbPrinter::new("/nonexistent/usb/lp99");
        assert!(!printer.is_online().await);

        let result = printer.print(b"test").await;
        assert!(matches!(result, Err(PrintError::Offline(_))));
    }

    #[tokio::test]
    async fn test_usb_printer_writes_to_device() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let printer = UsbPrinter::new(file.path());

        assert!(printer.is_online().await);
        printer.print(&[0x1B, 0x40, b'o', b'k']).await.unwrap();

        let written = std::fs::read(file.path()).unwrap();
        assert_eq!(written, vec![0x1B, 0x40, b'o', b'k']);
    }

    #[tokio::test]
    async fn test_capture_printer_collects_jobs() {
        let printer = CapturePrinter::new();
        assert!(printer.is_online().await);
        assert_eq!(printer.job_count(), 0);

        printer.print(b"first").await.unwrap();
        printer.print(b"second").await.unwrap();

        assert_eq!(printer.job_count(), 2);
        assert_eq!(printer.last_job(), Some(b"second".to_vec()));

        let jobs = printer.take_jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(printer.job_count(), 0);
    }
}

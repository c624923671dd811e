//! Company logo handling.
//!
//! Logos live in the logos directory in two forms: `.txt` files holding
//! ASCII art rendered into the receipt text, and image files printed as
//! ESC/POS raster graphics. Images can also be converted to ASCII art for
//! the logo editor.

use std::path::{Path, PathBuf};

use image::GenericImageView;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::debug;

use crate::models::CompanyProfile;

/// Brightness ramp from dark to light
pub const ASCII_CHARSET: &[u8] = b"@%#*+=-:. ";

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Logo file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A resolved logo file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logo {
    /// ASCII art, embedded into the receipt text
    Ascii(PathBuf),
    /// Image, printed as raster graphics
    Raster(PathBuf),
}

/// Convert an image file to ASCII art of the given character width.
///
/// The height is derived from the image aspect ratio, halved because
/// monospace cells are roughly twice as tall as they are wide.
pub fn image_to_ascii(path: &Path, width: u32) -> Result<String, LogoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(LogoError::UnsupportedExtension(ext));
    }
    if !path.exists() {
        return Err(LogoError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path)?;
    let (w, h) = img.dimensions();
    let aspect = h as f32 / w.max(1) as f32;
    let target_height = ((aspect * width as f32 * 0.5) as u32).max(1);
    let gray = img
        .resize_exact(width, target_height, FilterType::Triangle)
        .to_luma8();
    debug!("Converted {} to {width}x{target_height} ASCII", path.display());

    let scale = (ASCII_CHARSET.len() - 1) as f32 / 255.0;
    let mut out = String::with_capacity((width as usize + 1) * target_height as usize);
    for y in 0..target_height {
        for x in 0..width {
            let value = gray.get_pixel(x, y)[0];
            out.push(ASCII_CHARSET[(value as f32 * scale) as usize] as char);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Derive the logo file stem from a company name.
///
/// Lowercases and replaces everything that is not alphanumeric with an
/// underscore; Finnish letters count as alphanumeric and are kept.
pub fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Find the logo for a company.
///
/// An explicit `logo_file` wins when it exists. Otherwise the sanitized
/// company name is tried with a `.png` and then a `.txt` extension.
pub fn resolve(profile: &CompanyProfile, logos_dir: &Path) -> Option<Logo> {
    if let Some(file) = &profile.logo_file {
        let path = logos_dir.join(file);
        if path.is_file() {
            let logo = if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                Logo::Ascii(path)
            } else {
                Logo::Raster(path)
            };
            return Some(logo);
        }
        debug!("Configured logo {file} missing, trying derived names");
    }

    let stem = sanitize_name(&profile.name);
    let png = logos_dir.join(format!("{stem}.png"));
    if png.is_file() {
        return Some(Logo::Raster(png));
    }
    let txt = logos_dir.join(format!("{stem}.txt"));
    if txt.is_file() {
        return Some(Logo::Ascii(txt));
    }
    None
}

/// Read an ASCII logo, capped to the configured width and height.
pub fn load_ascii(path: &Path, max_width: u32, max_height: u32) -> Result<String, LogoError> {
    let raw = std::fs::read_to_string(path)?;
    let capped: Vec<String> = raw
        .lines()
        .take(max_height as usize)
        .map(|line| line.chars().take(max_width as usize).collect())
        .collect();
    Ok(capped.join("\n"))
}

//! Image cleanup for receipt scans
//!
//! Phone photos of receipts come with sensor noise, shadows and uneven
//! lighting. Recognition quality improves a lot when the image is reduced
//! to clean black text on white before Tesseract sees it.

use crate::error::OcrResult;
use image::{DynamicImage, GrayImage};
use imageproc::contours::{self, BorderType};
use imageproc::contrast;
use imageproc::distance_transform::Norm;
use imageproc::edges;
use imageproc::filter;
use imageproc::morphology;
use imageproc::point::Point;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Clean up a receipt photo for recognition
///
/// Steps: grayscale, median denoise, histogram equalization,
/// adaptive threshold (11px neighborhood), morphological close.
pub fn prepare(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let denoised = filter::median_filter(&gray, 1, 1);
    let equalized = contrast::equalize_histogram(&denoised);
    let binary = contrast::adaptive_threshold(&equalized, 5);
    let cleaned = morphology::close(&binary, Norm::LInf, 1);
    debug!("image preprocessing completed");
    cleaned
}

/// Detect whether the scan contains a logo block
///
/// A printed logo shows up as one large connected region. This runs edge
/// detection and looks for an outer contour covering at least 5% of the
/// image area.
#[instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn detect_logo(image: &GrayImage) -> bool {
    let edge_map = edges::canny(image, 50.0, 150.0);
    let found = contours::find_contours::<i32>(&edge_map);

    let min_area = (image.width() as f64 * image.height() as f64) * 0.05;
    for contour in &found {
        if contour.border_type != BorderType::Outer {
            continue;
        }
        if polygon_area(&contour.points) > min_area {
            info!("logo region detected");
            return true;
        }
    }
    false
}

/// Shoelace area of a closed contour
fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        sum += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    sum.abs() as f64 / 2.0
}

/// Enhance a receipt image and save the result
///
/// With no explicit output path the result lands next to the original as
/// `<stem>_enhanced.<ext>`.
#[instrument]
pub fn enhance_to_file(input: &Path, output: Option<&Path>) -> OcrResult<PathBuf> {
    info!(path = %input.display(), "enhancing image");

    let image = image::open(input)?;
    let enhanced = prepare(&image);

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => {
            let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("scan");
            let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("png");
            input.with_file_name(format!("{}_enhanced.{}", stem, ext))
        }
    };

    enhanced.save(&output)?;
    info!(path = %output.display(), "enhanced image saved");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    fn receipt_like_image() -> DynamicImage {
        // White page with a dark band of "text"
        let mut img = RgbImage::from_pixel(120, 160, Rgb([235u8, 235, 235]));
        for y in 60..70 {
            for x in 10..110 {
                img.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn prepare_keeps_dimensions_and_binarizes() {
        let img = receipt_like_image();
        let prepared = prepare(&img);
        assert_eq!(prepared.dimensions(), (120, 160));
        assert!(prepared.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn detect_logo_ignores_blank_page() {
        let blank = GrayImage::from_pixel(100, 100, Luma([255u8]));
        assert!(!detect_logo(&blank));
    }

    #[test]
    fn detect_logo_finds_large_block() {
        // 60x60 block in a 100x100 page is well past the 5% cutoff
        let mut img = GrayImage::from_pixel(100, 100, Luma([255u8]));
        for y in 20..80 {
            for x in 20..80 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        assert!(detect_logo(&img));
    }

    #[test]
    fn detect_logo_ignores_small_speck() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([255u8]));
        for y in 48..52 {
            for x in 48..52 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        assert!(!detect_logo(&img));
    }

    #[test]
    fn enhance_to_file_names_output_after_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("kuitti.png");
        receipt_like_image().save(&input).unwrap();

        let output = enhance_to_file(&input, None).unwrap();
        assert_eq!(output, dir.path().join("kuitti_enhanced.png"));
        assert!(output.exists());
    }

    #[test]
    fn enhance_to_file_honors_explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.png");
        receipt_like_image().save(&input).unwrap();

        let target = dir.path().join("cleaned.png");
        let output = enhance_to_file(&input, Some(&target)).unwrap();
        assert_eq!(output, target);
        assert!(target.exists());
    }

    #[test]
    fn enhance_to_file_missing_input_is_an_error() {
        let result = enhance_to_file(Path::new("/nonexistent/scan.png"), None);
        assert!(result.is_err());
    }
}

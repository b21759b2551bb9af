// converter.rs
pub mod discovery;
pub mod image_processing;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;

use crate::utils::{get_memory_usage, Logger};
use image_processing::QUALITY;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{0}")]
    Decode(#[from] image::ImageError),
    #[error("{0}")]
    Encode(String),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct ConversionStats {
    pub original_size: u64,
    pub webp_size: u64,
}

impl ConversionStats {
    pub fn savings_percent(&self) -> f64 {
        (self.original_size as f64 - self.webp_size as f64) / self.original_size as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub total: usize,
    pub converted: usize,
}

pub fn run(dir: &Path) -> io::Result<ConversionSummary> {
    let log_messages = Arc::new(Mutex::new(Vec::new()));
    let logger = Logger::new(log_messages);
    logger.log(format!("Scanning {} for PNG files", dir.display()));
    logger.log(get_memory_usage());

    let png_files = discovery::find_png_files(dir)?;

    if png_files.is_empty() {
        println!("⚠️  No PNG files found in {}", dir.display());
        return Ok(ConversionSummary {
            total: 0,
            converted: 0,
        });
    }

    println!("🔄 Found {} PNG files to convert\n", png_files.len());
    logger.log(format!("Total files to process: {}", png_files.len()));

    let start_time = Instant::now();
    let mut converted = 0;
    for png_file in &png_files {
        let webp_file = png_file.with_extension("webp");
        if image_processing::convert_one(png_file, &webp_file, QUALITY, &logger) {
            converted += 1;
        }
    }

    println!(
        "\n✨ Conversion complete: {}/{} files converted",
        converted,
        png_files.len()
    );

    let webp_files = discovery::find_webp_files(dir)?;
    println!("\n📁 WebP files created:");
    for webp_file in &webp_files {
        if let Some(name) = webp_file.file_name() {
            println!("   - {}", name.to_string_lossy());
        }
    }

    logger.log(format!(
        "Conversion run finished in {:?}",
        start_time.elapsed()
    ));
    logger.log(get_memory_usage());

    Ok(ConversionSummary {
        total: png_files.len(),
        converted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::Path;

    fn write_gradient_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(path).expect("failed to write fixture");
    }

    #[test]
    fn empty_directory_converts_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");

        let summary = run(dir.path()).expect("run failed");

        assert_eq!(
            summary,
            ConversionSummary {
                total: 0,
                converted: 0
            }
        );
        assert!(discovery::find_webp_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn summary_counts_successes_and_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_gradient_png(&dir.path().join("logo.png"), 32, 32);
        write_gradient_png(&dir.path().join("banner.png"), 48, 16);
        fs::write(dir.path().join("broken.png"), []).expect("fixture");

        let summary = run(dir.path()).expect("run failed");

        assert_eq!(summary.total, 3);
        assert_eq!(summary.converted, 2);
        assert!(dir.path().join("logo.webp").exists());
        assert!(dir.path().join("banner.webp").exists());
        assert!(!dir.path().join("broken.webp").exists());
    }

    #[test]
    fn outputs_share_base_name_and_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_gradient_png(&dir.path().join("logo.png"), 16, 16);

        run(dir.path()).expect("run failed");

        let webp_files = discovery::find_webp_files(dir.path()).unwrap();
        assert_eq!(webp_files, vec![dir.path().join("logo.webp")]);
    }

    #[test]
    fn savings_percent_for_halved_output() {
        let stats = ConversionStats {
            original_size: 10_000,
            webp_size: 5_000,
        };
        assert_eq!(stats.savings_percent(), 50.0);
    }
}

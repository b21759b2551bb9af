// image_processing.rs
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use image::io::Reader as ImageReader;
use image::DynamicImage;
use webp::{Encoder, WebPConfig};

use crate::converter::{ConversionError, ConversionStats};
use crate::utils::{measure_time, Logger};

pub const QUALITY: f32 = 90.0;
pub const COMPRESSION_METHOD: i32 = 6;

/// Converts a single file, printing either the size report or an error line.
/// Any failure is absorbed here; the caller only learns success or failure.
pub fn convert_one(input_path: &Path, output_path: &Path, quality: f32, logger: &Logger) -> bool {
    logger.log(format!("Processing file: {}", input_path.display()));
    match try_convert(input_path, output_path, quality, logger) {
        Ok(stats) => {
            print_report(input_path, output_path, &stats);
            true
        }
        Err(e) => {
            println!("❌ Failed to convert {}: {}", input_path.display(), e);
            false
        }
    }
}

fn try_convert(
    input_path: &Path,
    output_path: &Path,
    quality: f32,
    logger: &Logger,
) -> Result<ConversionStats, ConversionError> {
    let (decoded, load_duration) = measure_time(|| load_image(input_path));
    logger.log(format!(
        "Loading {} took {:?}",
        input_path.display(),
        load_duration
    ));
    let image = decoded?;

    let (encoded, encode_duration) = measure_time(|| encode_to_webp(&image, quality));
    logger.log(format!("Encoding to WebP took {:?}", encode_duration));
    let webp_data = encoded?;

    let (saved, save_duration) = measure_time(|| save_webp(&webp_data, output_path));
    logger.log(format!(
        "Saving {} took {:?}",
        output_path.display(),
        save_duration
    ));
    saved?;

    let original_size = fs::metadata(input_path)?.len();
    let webp_size = fs::metadata(output_path)?.len();
    Ok(ConversionStats {
        original_size,
        webp_size,
    })
}

fn load_image(path: &Path) -> Result<DynamicImage, ConversionError> {
    let image = ImageReader::open(path)?.decode()?;
    Ok(image)
}

fn encode_to_webp(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, ConversionError> {
    let mut config = WebPConfig::new()
        .map_err(|_| ConversionError::Encode("invalid encoder configuration".to_string()))?;
    config.quality = quality;
    config.method = COMPRESSION_METHOD;

    // The encoder takes 8-bit RGB or RGBA input; anything else PNG allows
    // (grayscale, 16-bit) is widened first. Alpha sources keep their channel.
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height()).encode_advanced(&config)
    } else {
        let rgb = image.to_rgb8();
        Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height()).encode_advanced(&config)
    };

    let webp = encoded.map_err(|e| ConversionError::Encode(format!("{:?}", e)))?;
    Ok(webp.to_vec())
}

fn save_webp(webp_data: &[u8], output_path: &Path) -> Result<(), ConversionError> {
    let mut file = File::create(output_path)?;
    file.write_all(webp_data)?;
    Ok(())
}

fn print_report(input_path: &Path, output_path: &Path, stats: &ConversionStats) {
    println!("✅ {} → {}", basename(input_path), basename(output_path));
    println!("   Original size: {:.2} KB", kib(stats.original_size));
    println!("   WebP size: {:.2} KB", kib(stats.webp_size));
    println!("   Savings: {:.1}%\n", stats.savings_percent());
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

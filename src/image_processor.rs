//! # Image Processing Module
//!
//! Questo modulo gestisce il ridimensionamento e la ricompressione delle
//! immagini interamente in-process con la crate `image`.
//!
//! ## Responsabilità:
//! - Decodifica dell'immagine sorgente (JPEG/PNG)
//! - Calcolo delle dimensioni target proporzionali (mai upscale)
//! - Resampling Lanczos3 solo quando le dimensioni cambiano davvero
//! - Ricodifica con qualità configurabile (JPEG) o compressione massima (PNG)
//! - Carry-over dei metadata EXIF sull'output tramite exiftool
//! - Rimozione del sorgente dopo un salvataggio verificato
//!
//! ## Calcolo dimensioni:
//! - `image_width = 0`: mantiene la larghezza originale (solo ricompressione)
//! - `image_width > larghezza originale`: clamp alla larghezza originale
//! - altezza: `round(nuova_larghezza * altezza / larghezza)`
//!
//! ## Pipeline:
//! 1. Decodifica con `image::open`
//! 2. Resize Lanczos3 (se necessario)
//! 3. Encoding su file con qualità configurata
//! 4. EXIF carry-over best-effort (exiftool, mai fatale)
//! 5. Summary line human-readable a INFO
//! 6. Rimozione del sorgente (solo con delete flag, solo dopo il save)
//!
//! Il lavoro di codec è CPU-bound e gira dentro `spawn_blocking` per non
//! bloccare il runtime.

use crate::config::Config;
use crate::error::ConvertError;
use crate::file_manager::FileManager;
use crate::platform::ExternalTool;
use crate::utils::to_string_vec;
use anyhow::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::GenericImageView;
use std::io::Write;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Handles image resizing and re-encoding
pub struct ImageProcessor {
    config: Config,
}

impl ImageProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compute output dimensions for a proportional resize.
    ///
    /// A `new_width` of 0 keeps the original width (re-encode only), and a
    /// `new_width` larger than the original is clamped so the image is
    /// never upscaled. The height follows the aspect ratio, rounded.
    pub fn target_dimensions(width: u32, height: u32, new_width: u32) -> (u32, u32) {
        let new_width = if new_width == 0 || new_width > width {
            width
        } else {
            new_width
        };

        let new_height = ((new_width as f64 * height as f64) / width as f64).round() as u32;

        (new_width, new_height)
    }

    /// Convert a single image, writing the result to `output_path`.
    ///
    /// Returns the size in bytes of the converted file. The source is
    /// removed only when the delete flag is set and the save succeeded.
    pub async fn convert(&self, input_path: &Path, output_path: &Path) -> Result<u64> {
        let original_size = FileManager::file_size(input_path).await?;

        let input = input_path.to_path_buf();
        let output = output_path.to_path_buf();
        let target_width = self.config.image_width;
        let quality = self.config.image_quality;

        // Codec work is CPU-bound, keep it off the async runtime
        let ((width, height), (new_width, new_height)) =
            tokio::task::spawn_blocking(move || {
                Self::resize_and_encode(&input, &output, target_width, quality)
            })
            .await??;

        // Output is on disk at this point, metadata carry-over is best-effort
        self.preserve_metadata(input_path, output_path).await;

        let new_size = FileManager::file_size(output_path).await?;

        info!(
            "From {}x{} to {}x{}. Optimized from {} to {}. Original file: {}",
            width,
            height,
            new_width,
            new_height,
            FileManager::format_size(original_size),
            FileManager::format_size(new_size),
            input_path.file_name().unwrap_or_default().to_string_lossy()
        );

        if self.config.delete_original {
            FileManager::remove_original(input_path).await?;
        }

        Ok(new_size)
    }

    /// Blocking part of the pipeline: decode, resample, encode.
    ///
    /// Returns the original and the converted dimensions.
    fn resize_and_encode(
        input: &Path,
        output: &Path,
        target_width: u32,
        quality: u8,
    ) -> Result<((u32, u32), (u32, u32))> {
        let img = image::open(input)?;
        let (width, height) = img.dimensions();

        let (new_width, new_height) = Self::target_dimensions(width, height, target_width);

        let resized = if (new_width, new_height) != (width, height) {
            img.resize_exact(new_width, new_height, FilterType::Lanczos3)
        } else {
            img
        };

        let ext = input
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        let file = std::fs::File::create(output)?;
        let mut writer = std::io::BufWriter::new(file);

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
                resized.write_with_encoder(encoder)?;
            }
            Some("png") => {
                // PNG has no quality knob, best compression plus adaptive
                // filtering is the strongest lossless setting
                let encoder = PngEncoder::new_with_quality(
                    &mut writer,
                    CompressionType::Best,
                    PngFilterType::Adaptive,
                );
                resized.write_with_encoder(encoder)?;
            }
            _ => {
                return Err(ConvertError::UnsupportedFormat(format!(
                    "not an image: {}",
                    input.display()
                ))
                .into())
            }
        }

        writer.flush()?;

        Ok(((width, height), (new_width, new_height)))
    }

    /// Carry EXIF tags from the source image onto the converted output.
    ///
    /// Sources without EXIF and systems without exiftool degrade to a log
    /// line; the converted file is already written at this point and a
    /// metadata problem never fails the conversion.
    async fn preserve_metadata(&self, source: &Path, target: &Path) {
        let exiftool_cmd = match ExternalTool::Exiftool.command_name() {
            Ok(cmd) => cmd,
            Err(e) => {
                debug!("Skipping EXIF carry-over: {}", e);
                return;
            }
        };

        let source_str = source.to_string_lossy().to_string();
        let target_str = target.to_string_lossy().to_string();
        let args = to_string_vec([
            "-tagsFromFile",
            source_str.as_str(),
            "-EXIF:all",
            "-overwrite_original",
            target_str.as_str(),
        ]);

        match Command::new(exiftool_cmd).args(&args).output().await {
            Ok(output) if output.status.success() => {
                debug!("EXIF metadata carried over to {}", target.display());
            }
            Ok(output) => {
                warn!(
                    "Failed to preserve EXIF metadata for {}: {}",
                    source.display(),
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            Err(e) => {
                debug!(
                    "exiftool not runnable ({}), EXIF not carried over for {}",
                    e,
                    target.display()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_target_dimensions_proportional() {
        assert_eq!(ImageProcessor::target_dimensions(800, 600, 400), (400, 300));
        assert_eq!(ImageProcessor::target_dimensions(1000, 750, 333), (333, 250));
        // Rounding, not truncation
        assert_eq!(ImageProcessor::target_dimensions(3, 2, 2), (2, 1));
        assert_eq!(ImageProcessor::target_dimensions(640, 427, 100), (100, 67));
    }

    #[test]
    fn test_target_dimensions_zero_keeps_original() {
        assert_eq!(ImageProcessor::target_dimensions(800, 600, 0), (800, 600));
    }

    #[test]
    fn test_target_dimensions_never_upscales() {
        assert_eq!(ImageProcessor::target_dimensions(800, 600, 1600), (800, 600));
        assert_eq!(ImageProcessor::target_dimensions(800, 600, 800), (800, 600));
    }

    #[tokio::test]
    async fn test_convert_resizes_png() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "a.png", 800, 600);
        let output = FileManager::converted_path(&input);

        let processor = ImageProcessor::new(Config {
            image_width: 400,
            image_quality: 70,
            ..Default::default()
        });

        processor.convert(&input, &output).await.unwrap();

        let converted = image::open(&output).unwrap();
        assert_eq!(converted.dimensions(), (400, 300));
        // Without the delete flag the source stays
        assert!(input.exists());
    }

    #[tokio::test]
    async fn test_convert_jpeg_quality_reencode_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("b.jpg");
        RgbImage::from_pixel(120, 80, image::Rgb([200, 10, 10]))
            .save(&path)
            .unwrap();
        let output = FileManager::converted_path(&path);

        // width 0: re-encode at the configured quality, same dimensions
        let processor = ImageProcessor::new(Config {
            image_width: 0,
            image_quality: 40,
            ..Default::default()
        });

        processor.convert(&path, &output).await.unwrap();

        let converted = image::open(&output).unwrap();
        assert_eq!(converted.dimensions(), (120, 80));
    }

    #[tokio::test]
    async fn test_convert_deletes_original_after_success() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_test_png(temp_dir.path(), "c.png", 64, 64);
        let output = FileManager::converted_path(&input);

        let processor = ImageProcessor::new(Config {
            delete_original: true,
            image_width: 32,
            ..Default::default()
        });

        processor.convert(&input, &output).await.unwrap();

        assert!(output.exists());
        assert!(!input.exists());
    }

    #[tokio::test]
    async fn test_convert_corrupt_image_fails_and_keeps_original() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.png");
        tokio::fs::write(&input, b"not a png at all").await.unwrap();
        let output = FileManager::converted_path(&input);

        let processor = ImageProcessor::new(Config {
            delete_original: true,
            ..Default::default()
        });

        assert!(processor.convert(&input, &output).await.is_err());
        // No verified output, the delete flag must not fire
        assert!(input.exists());
    }
}

//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery di media.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva di file media in directory
//! - Determinazione formato file (immagine vs video) per estensione
//! - Naming dei file convertiti tramite il marker `_CONVERTED`
//! - Formattazione human-readable delle dimensioni (base decimale)
//!
//! ## Formati supportati:
//! - **Immagini**: JPG, JPEG, PNG
//! - **Video**: MP4, MOV, MKV
//!
//! ## Naming dei file convertiti:
//! Un file convertito è un sibling del sorgente il cui nome è lo stem
//! originale più il tag `_CONVERTED` più l'estensione originale
//! (`photo.jpg` -> `photo_CONVERTED.jpg`). La sua esistenza è l'unico
//! marker di idempotenza: nessun checksum, nessun file di stato.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Filename tag appended to the stem of every converted file.
pub const CONVERTED_TAG: &str = "_CONVERTED";

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Get the size in bytes of a file
    pub async fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path).await?;
        Ok(metadata.len())
    }

    /// Find all supported media files in a directory
    pub fn find_media_files(media_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(media_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_supported_format(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Check if a file format is supported
    pub fn is_supported_format(path: &Path) -> bool {
        Self::is_image(path) || Self::is_video(path)
    }

    /// Check if a file is an image
    pub fn is_image(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "jpg" | "jpeg" | "png")
        } else {
            false
        }
    }

    /// Check if a file is a video
    pub fn is_video(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "mp4" | "mov" | "mkv")
        } else {
            false
        }
    }

    /// Check if a filename already carries the converted marker.
    ///
    /// Files produced by a previous run match this and are never dispatched
    /// again, even though their extension is in the allowed set.
    pub fn is_already_converted(path: &Path) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().contains(CONVERTED_TAG))
            .unwrap_or(false)
    }

    /// Sibling path where the converted copy of `path` is written.
    ///
    /// The original extension is preserved as-is, case included, so the
    /// container/encoder stays the one implied by the source name.
    pub fn converted_path(path: &Path) -> PathBuf {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = match path.extension() {
            Some(ext) => format!("{}{}.{}", stem, CONVERTED_TAG, ext.to_string_lossy()),
            None => format!("{}{}", stem, CONVERTED_TAG),
        };
        path.with_file_name(file_name)
    }

    /// Remove a source file after its conversion was verified.
    ///
    /// Removal is permanent, not a trash operation; callers invoke this
    /// only once the converted output is known to exist.
    pub async fn remove_original(path: &Path) -> Result<()> {
        fs::remove_file(path).await?;
        tracing::debug!("Removed original file: {}", path.display());
        Ok(())
    }

    /// Get human-readable file size (decimal base, two decimals)
    pub fn format_size(size: u64) -> String {
        const BASE: f64 = 1000.0;
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

        let mut value = size as f64;
        let mut unit_index = 0;

        while value >= BASE && unit_index < UNITS.len() - 1 {
            value /= BASE;
            unit_index += 1;
        }

        format!("{:.2}{}", value, UNITS[unit_index])
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_boundaries() {
        assert_eq!(FileManager::format_size(0), "0.00B");
        assert_eq!(FileManager::format_size(999), "999.00B");
        assert_eq!(FileManager::format_size(1000), "1.00KB");
        assert_eq!(FileManager::format_size(999_999), "1000.00KB");
        assert_eq!(FileManager::format_size(1_000_000), "1.00MB");
        assert_eq!(FileManager::format_size(1_000_000_000), "1.00GB");
        assert_eq!(FileManager::format_size(1_000_000_000_000), "1.00TB");
        assert_eq!(FileManager::format_size(1_000_000_000_000_000), "1.00PB");
    }

    #[test]
    fn test_format_size_unit_escalation_is_monotonic() {
        // Crossing each power-of-1000 boundary switches to the next unit
        let units = ["B", "KB", "MB", "GB", "TB", "PB"];
        for (i, unit) in units.iter().enumerate() {
            let at_boundary = 1000u64.pow(i as u32);
            assert!(
                FileManager::format_size(at_boundary).ends_with(unit),
                "{} should format with {}",
                at_boundary,
                unit
            );
        }
    }

    #[test]
    fn test_classification_by_extension() {
        assert!(FileManager::is_image(Path::new("/a/photo.jpg")));
        assert!(FileManager::is_image(Path::new("/a/photo.JPEG")));
        assert!(FileManager::is_image(Path::new("photo.png")));
        assert!(!FileManager::is_image(Path::new("clip.mp4")));

        assert!(FileManager::is_video(Path::new("clip.mp4")));
        assert!(FileManager::is_video(Path::new("clip.MOV")));
        assert!(FileManager::is_video(Path::new("clip.mkv")));
        assert!(!FileManager::is_video(Path::new("photo.jpg")));

        assert!(!FileManager::is_supported_format(Path::new("notes.txt")));
        assert!(!FileManager::is_supported_format(Path::new("no_extension")));
        assert!(!FileManager::is_supported_format(Path::new("anim.gif")));
    }

    #[test]
    fn test_converted_path_naming() {
        assert_eq!(
            FileManager::converted_path(Path::new("/media/photo.jpg")),
            PathBuf::from("/media/photo_CONVERTED.jpg")
        );
        // Extension case is preserved
        assert_eq!(
            FileManager::converted_path(Path::new("/media/CLIP.MP4")),
            PathBuf::from("/media/CLIP_CONVERTED.MP4")
        );
    }

    #[test]
    fn test_converted_marker_detection() {
        assert!(FileManager::is_already_converted(Path::new(
            "/media/photo_CONVERTED.jpg"
        )));
        // Marker anywhere in the stem counts, outputs of outputs included
        assert!(FileManager::is_already_converted(Path::new(
            "a_CONVERTED_copy.png"
        )));
        assert!(!FileManager::is_already_converted(Path::new(
            "/media/photo.jpg"
        )));
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(1000, 500), 50.0);
        assert_eq!(FileManager::calculate_reduction(0, 500), 0.0);
    }
}

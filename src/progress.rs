//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di conversione.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche di conversione (immagini, video, skipped)
//! - Calcolo byte risparmiati e percentuale di riduzione
//! - Report finale con statistiche aggregate
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:02:15] [====================>-------------------] 75/150 (50%) photo.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a conversion run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Set a custom message without incrementing
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for conversion results
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub files_processed: usize,
    pub images_converted: usize,
    pub videos_converted: usize,
    pub files_skipped: usize,
    pub total_original_size: u64,
    pub total_converted_size: u64,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, original_size: u64, converted_size: u64) {
        self.files_processed += 1;
        self.images_converted += 1;
        self.total_original_size += original_size;
        self.total_converted_size += converted_size;
    }

    pub fn add_video(&mut self, original_size: u64, converted_size: u64) {
        self.files_processed += 1;
        self.videos_converted += 1;
        self.total_original_size += original_size;
        self.total_converted_size += converted_size;
    }

    pub fn add_skipped(&mut self) {
        self.files_processed += 1;
        self.files_skipped += 1;
    }

    pub fn total_bytes_saved(&self) -> u64 {
        self.total_original_size
            .saturating_sub(self.total_converted_size)
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved() as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Images: {} | Videos: {} | Skipped: {} | Total saved: {} ({:.2}%)",
            self.files_processed,
            self.images_converted,
            self.videos_converted,
            self.files_skipped,
            crate::file_manager::FileManager::format_size(self.total_bytes_saved()),
            self.overall_reduction_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulation() {
        let mut stats = ConversionStats::new();
        stats.add_image(1000, 400);
        stats.add_video(10_000, 6_000);
        stats.add_skipped();

        assert_eq!(stats.files_processed, 3);
        assert_eq!(stats.images_converted, 1);
        assert_eq!(stats.videos_converted, 1);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.total_bytes_saved(), 4_600);
    }

    #[test]
    fn test_reduction_percent() {
        let mut stats = ConversionStats::new();
        assert_eq!(stats.overall_reduction_percent(), 0.0);

        stats.add_image(1000, 500);
        assert!((stats.overall_reduction_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_converted_larger_than_original_saturates() {
        let mut stats = ConversionStats::new();
        // Low-entropy sources can grow on re-encode, savings clamp at zero
        stats.add_image(100, 250);
        assert_eq!(stats.total_bytes_saved(), 0);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = ConversionStats::new();
        stats.add_image(1000, 500);
        let summary = stats.format_summary();
        assert!(summary.contains("Images: 1"));
        assert!(summary.contains("500.00B"));
    }
}

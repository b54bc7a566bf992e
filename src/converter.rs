//! # Media Converter Orchestrator
//!
//! Orchestratore principale: cammina l'albero di directory, classifica i
//! file per estensione e li instrada verso il processore corretto.
//!
//! ## Responsabilità:
//! - Validazione della root (deve essere una directory)
//! - Discovery ricorsiva dei file media supportati
//! - Skip dei file già marcati `_CONVERTED` e degli output già esistenti
//! - Dispatch sequenziale a `ImageProcessor` / `VideoProcessor`
//! - Check delle dipendenze esterne prima di iniziare
//! - Progress bar e statistiche aggregate
//!
//! ## Regole di skip (in ordine):
//! 1. Estensione non supportata: il file non entra nemmeno nella lista
//! 2. Stem contenente il marker: output di run precedenti, mai riprocessati
//! 3. Output già esistente: idempotenza tra run, nessun overwrite
//!
//! ## Modello di esecuzione:
//! Un singolo passaggio lineare, un file alla volta. Ogni conversione
//! blocca il walk fino al completamento; il primo errore interrompe
//! l'intero run (nessun isolamento per-file).

use crate::{
    config::Config,
    error::ConvertError,
    file_manager::FileManager,
    image_processor::ImageProcessor,
    platform::ExternalTool,
    progress::{ConversionStats, ProgressManager},
    video_processor::VideoProcessor,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Walks a folder tree and converts every supported media file
pub struct MediaConverter {
    config: Config,
    root: PathBuf,
    image_processor: ImageProcessor,
    video_processor: VideoProcessor,
}

impl MediaConverter {
    /// Create a converter rooted at `root`.
    ///
    /// Fails fast when the config is invalid or `root` is not a directory.
    pub fn new(root: &Path, config: Config) -> Result<Self> {
        config.validate()?;

        if !root.is_dir() {
            return Err(ConvertError::Validation("Path is not a directory.".to_string()).into());
        }

        Ok(Self {
            config: config.clone(),
            root: root.to_path_buf(),
            image_processor: ImageProcessor::new(config.clone()),
            video_processor: VideoProcessor::new(config),
        })
    }

    /// Run the conversion pass over the whole tree
    pub async fn run(&self) -> Result<ConversionStats> {
        let start_time = std::time::Instant::now();

        let files = FileManager::find_media_files(&self.root)?;

        info!("Starting media conversion in: {}", self.root.display());
        self.log_configuration(&files);

        self.check_dependencies(&files).await?;

        if files.is_empty() {
            info!("No media files found to process");
            return Ok(ConversionStats::new());
        }

        let progress = ProgressManager::new(files.len() as u64);
        let mut stats = ConversionStats::new();

        // One file at a time, each conversion blocks the walk until done
        for file_path in &files {
            self.process_file(file_path, &progress, &mut stats).await?;
        }

        progress.finish(&stats.format_summary());
        self.log_final_stats(&stats, start_time.elapsed().as_secs_f64());

        Ok(stats)
    }

    /// Process a single candidate: apply the skip rules, then dispatch
    async fn process_file(
        &self,
        file_path: &Path,
        progress: &ProgressManager,
        stats: &mut ConversionStats,
    ) -> Result<()> {
        let file_name = file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        // Outputs of previous runs match the allowed extensions again, the
        // marker keeps them out
        if FileManager::is_already_converted(file_path) {
            debug!("Skipping already converted file: {}", file_path.display());
            stats.add_skipped();
            progress.update(&format!("⏩ {}", file_name));
            return Ok(());
        }

        let output_path = FileManager::converted_path(file_path);

        // An existing output is the sole idempotence marker, never overwrite
        if output_path.exists() {
            debug!(
                "Skipping {}, output already exists: {}",
                file_path.display(),
                output_path.display()
            );
            stats.add_skipped();
            progress.update(&format!("⏩ {}", file_name));
            return Ok(());
        }

        let original_size = FileManager::file_size(file_path).await?;
        progress.set_message(&file_name);

        if FileManager::is_video(file_path) {
            let converted_size = self
                .video_processor
                .convert(file_path, &output_path)
                .await?;
            stats.add_video(original_size, converted_size);
        } else {
            let converted_size = self
                .image_processor
                .convert(file_path, &output_path)
                .await?;
            stats.add_image(original_size, converted_size);
        }

        progress.update(&format!("✅ {}", file_name));
        Ok(())
    }

    /// Verify external tools before touching any file.
    ///
    /// ffmpeg is mandatory as soon as one video candidate exists; a missing
    /// exiftool only costs the EXIF carry-over and is worth a single warning.
    async fn check_dependencies(&self, files: &[PathBuf]) -> Result<()> {
        if files.iter().any(|f| FileManager::is_video(f)) {
            VideoProcessor::check_dependencies().await?;
        }

        if files.iter().any(|f| FileManager::is_image(f))
            && !ExternalTool::Exiftool.is_available().await
        {
            warn!("exiftool not found, EXIF metadata will not be carried over");
        }

        Ok(())
    }

    fn log_configuration(&self, files: &[PathBuf]) {
        if self.config.image_width == 0 {
            info!(
                "Image mode: re-encode only (quality: {})",
                self.config.image_quality
            );
        } else {
            info!(
                "Image mode: resize to {}px wide (quality: {})",
                self.config.image_width, self.config.image_quality
            );
        }

        info!("Video mode: compress with CRF {}", self.config.video_crf);

        if self.config.delete_original {
            info!("Originals are removed after each verified conversion");
        }

        info!("Found {} media files to process", files.len());
    }

    fn log_final_stats(&self, stats: &ConversionStats, duration: f64) {
        info!("=== Conversion Complete ===");
        info!("Files processed: {}", stats.files_processed);
        info!("Images converted: {}", stats.images_converted);
        info!("Videos converted: {}", stats.videos_converted);
        info!("Files skipped: {}", stats.files_skipped);
        info!(
            "Bytes saved: {}",
            FileManager::format_size(stats.total_bytes_saved())
        );
        info!(
            "Average reduction: {:.2}%",
            stats.overall_reduction_percent()
        );
        info!("Elapsed: {:.1}s", duration);
    }
}

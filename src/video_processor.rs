//! # Video Processing Module
//!
//! Questo modulo gestisce la conversione dei video tramite ffmpeg.
//!
//! ## Responsabilità:
//! - Costruzione della command line ffmpeg (profilo encoder fisso)
//! - Esecuzione del processo esterno con cattura di stdout/stderr
//! - Verifica dell'exit status e dell'output prodotto
//! - Pubblicazione dell'output solo dopo la verifica
//! - Rimozione del sorgente solo dopo una conversione verificata
//!
//! ## Profilo encoder (fisso):
//! - Codec video: libx264
//! - Preset: ultrafast
//! - CRF: configurabile (0-51, default 23)
//! - Codec audio: AAC a 320k
//! - Threads: 0 (tutti i core)
//! - Flags: +faststart (container streaming-friendly)
//!
//! ## Controllo qualità (CRF):
//! - 0-17: Visualmente lossless (file grandi)
//! - 18-23: Alta qualità (raccomandato)
//! - 24-28: Buona qualità (file più piccoli)
//! - 29+: Qualità in calo rapido
//!
//! ## Pipeline:
//! 1. `ffmpeg_args` valida il sorgente e produce l'argument list
//! 2. ffmpeg codifica su un file temporaneo con l'estensione dell'output
//! 3. Exit status non-zero -> errore `Ffmpeg` con lo stderr catturato
//! 4. Output vuoto -> errore (ffmpeg a volte lascia file troncati)
//! 5. Copia del temporaneo sul path finale, poi eventuale delete del sorgente

use crate::config::Config;
use crate::error::ConvertError;
use crate::file_manager::FileManager;
use crate::platform::ExternalTool;
use crate::utils::to_string_vec;
use anyhow::Result;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, info};

/// Build the ffmpeg argument list for one conversion.
///
/// Pure construction apart from the input existence check: the profile is
/// fixed, only the CRF varies, and the list always ends with the
/// destination path. The invocation name itself comes from
/// [`ExternalTool::Ffmpeg`], this is arguments only (no shell string).
pub fn ffmpeg_args(input: &Path, output: &Path, video_crf: u8) -> Result<Vec<String>> {
    if !input.is_file() {
        return Err(ConvertError::Validation(format!(
            "File \"{}\" does not exist",
            input.display()
        ))
        .into());
    }

    let input_str = input.to_string_lossy().to_string();
    let output_str = output.to_string_lossy().to_string();
    let crf_str = video_crf.to_string();

    Ok(to_string_vec([
        "-y",
        "-i",
        input_str.as_str(),
        "-c:v",
        "libx264",
        "-preset:v",
        "ultrafast",
        "-crf",
        crf_str.as_str(),
        "-c:a",
        "aac",
        "-b:a",
        "320k",
        "-threads",
        "0",
        "-movflags",
        "+faststart",
        output_str.as_str(),
    ]))
}

/// Handles video conversion through ffmpeg
pub struct VideoProcessor {
    config: Config,
}

impl VideoProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Convert a single video, writing the result to `output_path`.
    ///
    /// The encode goes to a temporary file first; the final output only
    /// appears once ffmpeg exited successfully and produced a non-empty
    /// result, and the source is removed only after that. Returns the size
    /// in bytes of the converted file.
    pub async fn convert(&self, input_path: &Path, output_path: &Path) -> Result<u64> {
        let ffmpeg_cmd = ExternalTool::Ffmpeg.command_name()?;

        // Stage into a temp file carrying the output extension so ffmpeg
        // picks the right container
        let suffix = match output_path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy()),
            None => String::new(),
        };
        let temp_file = NamedTempFile::with_suffix(suffix)?;
        let temp_path = temp_file.path().to_path_buf();

        let args = ffmpeg_args(input_path, &temp_path, self.config.video_crf)?;

        debug!(
            "🎬 Compressing video: {} (CRF: {})",
            input_path.file_name().unwrap_or_default().to_string_lossy(),
            self.config.video_crf
        );

        let start_time = std::time::Instant::now();

        let output = Command::new(ffmpeg_cmd)
            .args(&args)
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to execute {}: {}", ffmpeg_cmd, e))?;

        let duration = start_time.elapsed();

        if !output.status.success() {
            return Err(ConvertError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).to_string(),
            )
            .into());
        }

        // A zero exit is not enough, ffmpeg can still leave nothing behind
        let converted_size = tokio::fs::metadata(&temp_path).await?.len();
        if converted_size == 0 {
            return Err(ConvertError::Ffmpeg(format!(
                "ffmpeg produced an empty output for {}",
                input_path.display()
            ))
            .into());
        }

        tokio::fs::copy(&temp_path, output_path).await?;

        info!(
            "✅ Video conversion completed in {:.1}s: {}",
            duration.as_secs_f64(),
            output_path.file_name().unwrap_or_default().to_string_lossy()
        );

        if self.config.delete_original {
            FileManager::remove_original(input_path).await?;
        }

        Ok(converted_size)
    }

    /// Check that ffmpeg is available before starting a run with videos
    pub async fn check_dependencies() -> Result<()> {
        if !ExternalTool::Ffmpeg.is_available().await {
            return Err(ConvertError::MissingDependency(
                "ffmpeg is required for video conversion".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ffmpeg_args_profile() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("b.mp4");
        tokio::fs::write(&input, b"fake video bytes").await.unwrap();
        let output = temp_dir.path().join("b_CONVERTED.mp4");

        let args = ffmpeg_args(&input, &output, 23).unwrap();

        // CRF value travels right behind its flag
        let crf_pos = args.iter().position(|a| a == "-crf").unwrap();
        assert_eq!(args[crf_pos + 1], "23");

        // Fixed profile bits
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"ultrafast".to_string()));
        assert!(args.contains(&"320k".to_string()));
        assert!(args.contains(&"+faststart".to_string()));

        // The destination path is always last
        assert_eq!(args.last().unwrap(), &output.to_string_lossy().to_string());
    }

    #[tokio::test]
    async fn test_ffmpeg_args_crf_varies() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("b.mkv");
        tokio::fs::write(&input, b"fake").await.unwrap();
        let output = temp_dir.path().join("b_CONVERTED.mkv");

        for crf in [0u8, 17, 28, 51] {
            let args = ffmpeg_args(&input, &output, crf).unwrap();
            let crf_pos = args.iter().position(|a| a == "-crf").unwrap();
            assert_eq!(args[crf_pos + 1], crf.to_string());
        }
    }

    #[test]
    fn test_ffmpeg_args_rejects_missing_input() {
        let result = ffmpeg_args(
            Path::new("/definitely/not/there.mp4"),
            Path::new("/tmp/out.mp4"),
            23,
        );
        assert!(result.is_err());
    }
}

//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di conversione
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `delete_original`: Rimuove il file sorgente dopo una conversione
//!   verificata (default: false)
//! - `image_width`: Larghezza target per le immagini, 0 = mantieni la
//!   larghezza originale (default: 0)
//! - `image_quality`: Qualità di ricodifica immagini (1-100, default: 70)
//! - `video_crf`: CRF video (0-51, default: 23, più basso = migliore qualità)
//!
//! ## Validazione:
//! - Controlla che image_quality sia 1-100
//! - Controlla che video_crf sia 0-51

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remove the source file after its conversion succeeded
    pub delete_original: bool,
    /// Target image width in pixels (0 = keep original width)
    pub image_width: u32,
    /// Image re-encode quality (1-100)
    pub image_quality: u8,
    /// Video CRF value (0-51, lower = better quality)
    pub video_crf: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delete_original: false,
            image_width: 0,
            image_quality: 70,
            video_crf: 23,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.image_quality == 0 || self.image_quality > 100 {
            return Err(anyhow::anyhow!("Image quality must be between 1 and 100"));
        }

        if self.video_crf > 51 {
            return Err(anyhow::anyhow!("Video CRF must be between 0 and 51"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

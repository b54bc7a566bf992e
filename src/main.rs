//! # Folder Media Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione degli input dell'utente
//! - Creazione della configurazione e avvio del converter
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, width, quality, crf, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Carica l'eventuale file di configurazione e applica gli override CLI
//! 4. Istanzia MediaConverter e avvia il passaggio di conversione
//!
//! ## Esempio di utilizzo:
//! ```bash
//! media-converter /path/to/media --width 1200 --quality 70 --crf 23
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use folder_media_converter::{Config, MediaConverter};

#[derive(Parser)]
#[command(name = "media-converter")]
#[command(about = "Produce size-reduced copies of the images and videos in a folder tree")]
struct Args {
    /// Directory containing media files to convert
    media_directory: PathBuf,

    /// Remove each original after its conversion is verified
    #[arg(long)]
    delete_original: bool,

    /// Target image width in pixels (0 = keep original width)
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Image re-encode quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Video CRF value (0-51, lower = better quality)
    #[arg(short, long)]
    crf: Option<u8>,

    /// JSON configuration file (CLI flags override its values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate arguments
    if !args.media_directory.exists() {
        return Err(anyhow::anyhow!(
            "Media directory does not exist: {}",
            args.media_directory.display()
        ));
    }

    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    if args.delete_original {
        config.delete_original = true;
    }
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(quality) = args.quality {
        config.image_quality = quality;
    }
    if let Some(crf) = args.crf {
        config.video_crf = crf;
    }

    let converter = MediaConverter::new(&args.media_directory, config)?;
    converter.run().await?;

    Ok(())
}

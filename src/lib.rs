//! # Folder Media Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `platform`: Risoluzione cross-platform dei tool esterni
//! - `file_manager`: Discovery media, classificazione e naming degli output
//! - `image_processor`: Resize e ricompressione immagini (JPEG/PNG)
//! - `video_processor`: Conversione video via ffmpeg (MP4/MOV/MKV)
//! - `converter`: Orchestratore del walk sequenziale
//! - `progress`: Progress tracking e statistiche
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use folder_media_converter::{Config, MediaConverter};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let converter = MediaConverter::new(std::path::Path::new("/media"), config)?;
//! converter.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod platform;
pub mod progress;
pub mod utils;
pub mod video_processor;

pub use config::Config;
pub use converter::MediaConverter;
pub use error::ConvertError;

//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica/codifica immagini
//! - `Ffmpeg`: Errori del processo esterno ffmpeg (exit code non-zero)
//! - `Metadata`: Errori di preservazione metadata EXIF
//! - `UnsupportedFormat`: Estensione file non supportata
//! - `UnsupportedPlatform`: Piattaforma senza mapping per i tool esterni
//! - `MissingDependency`: Tool esterno mancante (ffmpeg)
//! - `Validation`: Errori di validazione input (config, path)

/// Custom error types for media conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    #[error("Metadata preservation error: {0}")]
    Metadata(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported platform: {0} (no external tool mapping)")]
    UnsupportedPlatform(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

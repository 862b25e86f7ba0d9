//! Diarization and alignment error types

use thiserror::Error;

/// Diarization-related errors
#[derive(Error, Debug)]
pub enum DiarizationError {
    /// Model loading failed
    #[error("Failed to load model: {0}")]
    ModelLoadFailed(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Diarization failed
    #[error("Diarization failed: {0}")]
    DiarizationFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alignment errors
#[derive(Error, Debug)]
pub enum AlignError {
    /// No speaker turns to attribute against
    #[error("No speakers detected in audio")]
    NoSpeakersDetected,
}

//! ASR error types

use thiserror::Error;

use diarist_core::audio::AudioError;

/// ASR-related errors
#[derive(Error, Debug)]
pub enum AsrError {
    /// Model loading failed
    #[error("Failed to load model: {0}")]
    ModelLoadFailed(String),

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// File not found
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Audio decode error
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

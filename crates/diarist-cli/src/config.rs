//! Pipeline configuration and fail-fast validation

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Audio input missing
    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    /// Model file missing
    #[error("Model file not found: {0}")]
    ModelNotFound(String),
}

/// Validated pipeline configuration.
///
/// Every path the pipeline touches is named here and checked before any
/// model is loaded.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input WAV file
    pub audio: PathBuf,
    /// whisper.cpp GGML model
    pub whisper_model: PathBuf,
    /// pyannote segmentation ONNX model
    pub segmentation_model: PathBuf,
    /// Speaker embedding ONNX model
    pub embedding_model: PathBuf,
}

impl PipelineConfig {
    /// Fail fast on any missing input
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.audio.exists() {
            return Err(ConfigError::AudioNotFound(self.audio.display().to_string()));
        }

        for model in [
            &self.whisper_model,
            &self.segmentation_model,
            &self.embedding_model,
        ] {
            if !model.exists() {
                return Err(ConfigError::ModelNotFound(model.display().to_string()));
            }
        }

        Ok(())
    }
}

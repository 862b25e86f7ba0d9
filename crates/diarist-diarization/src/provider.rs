//! Speaker diarization backend using pyannote-rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use diarist_core::{DiarizationResult, SpeakerSegment};

use crate::error::DiarizationError;

/// Cosine-similarity floor for matching a segment to a known speaker
const SIMILARITY_THRESHOLD: f32 = 0.6;

/// Diarization options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiarizationOptions {
    /// Maximum number of speakers (None = unbounded)
    pub max_speakers: Option<u32>,
}

/// Speaker diarization capability
#[trait_variant::make(Diarizer: Send)]
pub trait LocalDiarizer {
    /// Partition an audio file into labelled speaker turns
    async fn diarize(
        &self,
        audio_path: &Path,
        options: &DiarizationOptions,
    ) -> Result<DiarizationResult, DiarizationError>;
}

/// pyannote diarization backend (ONNX segmentation + speaker embeddings)
pub struct PyannoteDiarizer {
    segmentation_model: PathBuf,
    embedding_model: PathBuf,
}

impl PyannoteDiarizer {
    /// Create a backend from the two ONNX model paths.
    ///
    /// The files are validated here; pyannote-rs builds its inference
    /// sessions per run.
    pub fn new(segmentation_model: &Path, embedding_model: &Path) -> Result<Self, DiarizationError> {
        for path in [segmentation_model, embedding_model] {
            if !path.exists() {
                return Err(DiarizationError::FileNotFound(path.display().to_string()));
            }
        }

        Ok(Self {
            segmentation_model: segmentation_model.to_path_buf(),
            embedding_model: embedding_model.to_path_buf(),
        })
    }
}

impl Diarizer for PyannoteDiarizer {
    async fn diarize(
        &self,
        audio_path: &Path,
        options: &DiarizationOptions,
    ) -> Result<DiarizationResult, DiarizationError> {
        if !audio_path.exists() {
            return Err(DiarizationError::FileNotFound(
                audio_path.display().to_string(),
            ));
        }

        info!("Starting diarization: {}", audio_path.display());
        debug!("Options: {:?}", options);

        let audio_path = audio_path.to_path_buf();
        let segmentation_path = self.segmentation_model.clone();
        let embedding_path = self.embedding_model.clone();
        let options = options.clone();

        let result = tokio::task::spawn_blocking(move || {
            run_diarization(&audio_path, &segmentation_path, &embedding_path, &options)
        })
        .await
        .map_err(|e| DiarizationError::DiarizationFailed(e.to_string()))??;

        info!(
            "Diarization completed: {} speakers, {} turns",
            result.num_speakers,
            result.segments.len()
        );

        Ok(result)
    }
}

fn run_diarization(
    audio_path: &Path,
    segmentation_path: &Path,
    embedding_path: &Path,
    options: &DiarizationOptions,
) -> Result<DiarizationResult, DiarizationError> {
    use pyannote_rs::{get_segments, read_wav, EmbeddingExtractor};

    let (samples, sample_rate) = read_wav(audio_path)
        .map_err(|e| DiarizationError::DiarizationFailed(format!("Failed to read audio: {}", e)))?;

    let segment_iter = get_segments(&samples, sample_rate, segmentation_path).map_err(|e| {
        DiarizationError::ModelLoadFailed(format!("Failed to load segmentation model: {}", e))
    })?;

    let mut voiced = Vec::new();
    for segment in segment_iter {
        match segment {
            Ok(s) => voiced.push(s),
            Err(e) => debug!("Skipping segment: {}", e),
        }
    }

    let mut extractor = EmbeddingExtractor::new(embedding_path).map_err(|e| {
        DiarizationError::ModelLoadFailed(format!("Failed to load embedding model: {}", e))
    })?;

    let mut turns = Vec::new();
    let mut speakers: Vec<(String, Vec<f32>)> = Vec::new();

    for segment in &voiced {
        let embedding: Vec<f32> = extractor
            .compute(&segment.samples)
            .map_err(|e| {
                DiarizationError::DiarizationFailed(format!("Failed to compute embedding: {}", e))
            })?
            .collect();

        let speaker = assign_speaker(&embedding, &mut speakers, options.max_speakers);

        turns.push(SpeakerSegment {
            start: segment.start,
            end: segment.end,
            speaker,
        });
    }

    let duration = turns.iter().map(|t| t.end).fold(0.0f64, f64::max);

    Ok(DiarizationResult {
        segments: turns,
        num_speakers: speakers.len(),
        duration,
    })
}

/// Assign an embedding to the closest known speaker, or mint a new label.
///
/// Labels follow the pyannote convention: "SPEAKER_00", "SPEAKER_01", ... in
/// order of first appearance. With `max_speakers` reached, the best match is
/// taken even below the similarity threshold.
fn assign_speaker(
    embedding: &[f32],
    speakers: &mut Vec<(String, Vec<f32>)>,
    max_speakers: Option<u32>,
) -> String {
    let best = speakers
        .iter()
        .enumerate()
        .map(|(i, (_, e))| (i, cosine_similarity(embedding, e)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((idx, similarity)) = best {
        if similarity > SIMILARITY_THRESHOLD {
            return speakers[idx].0.clone();
        }

        if let Some(max) = max_speakers {
            if speakers.len() >= max as usize {
                return speakers[idx].0.clone();
            }
        }
    }

    let label = format!("SPEAKER_{:02}", speakers.len());
    speakers.push((label.clone(), embedding.to_vec()));
    label
}

/// Cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

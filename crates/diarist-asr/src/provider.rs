//! Whisper transcription backend using whisper-rs

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use diarist_core::{audio, Segment, TranscriptResult, WordSegment};

use crate::error::AsrError;
use crate::languages::Language;

/// whisper.cpp reports segment and token timestamps in centisecond ticks.
pub const TICKS_PER_SECOND: f64 = 100.0;

/// Sample rate whisper models expect
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Convert whisper timestamp ticks to seconds.
///
/// The only place the tick resolution appears; downstream consumers see
/// seconds exclusively.
fn ticks_to_secs(ticks: i64) -> f64 {
    ticks as f64 / TICKS_PER_SECOND
}

/// Transcription options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionOptions {
    /// Language code (e.g., "en")
    pub language: String,
    /// Include word-level timestamps
    pub word_timestamps: bool,
    /// Number of decoding threads (0 = whisper default)
    pub threads: u32,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            word_timestamps: true,
            threads: 4,
        }
    }
}

/// Speech-to-text capability
#[trait_variant::make(Transcriber: Send)]
pub trait LocalTranscriber {
    /// Transcribe an audio file into timestamped, seconds-based segments
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<TranscriptResult, AsrError>;
}

/// Whisper ASR backend
pub struct WhisperTranscriber {
    context: Arc<Mutex<WhisperContext>>,
}

impl WhisperTranscriber {
    /// Load a whisper.cpp GGML model from disk
    pub async fn load(model_path: &Path) -> Result<Self, AsrError> {
        if !model_path.exists() {
            return Err(AsrError::FileNotFound(model_path.display().to_string()));
        }

        info!("Loading whisper model from {}", model_path.display());

        let path = model_path.to_path_buf();
        let context = tokio::task::spawn_blocking(move || {
            let params = WhisperContextParameters::default();
            WhisperContext::new_with_params(&path.to_string_lossy(), params)
        })
        .await
        .map_err(|e| AsrError::ModelLoadFailed(e.to_string()))?
        .map_err(|e| AsrError::ModelLoadFailed(e.to_string()))?;

        info!("Whisper model loaded");

        Ok(Self {
            context: Arc::new(Mutex::new(context)),
        })
    }
}

impl Transcriber for WhisperTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<TranscriptResult, AsrError> {
        if !Language::is_supported(&options.language) {
            return Err(AsrError::UnsupportedLanguage(options.language.clone()));
        }

        if !audio_path.exists() {
            return Err(AsrError::FileNotFound(audio_path.display().to_string()));
        }

        info!("Starting transcription: {}", audio_path.display());
        debug!("Options: {:?}", options);

        // Decode off the runtime; whisper wants 16 kHz mono f32
        let path = audio_path.to_path_buf();
        let audio_data =
            tokio::task::spawn_blocking(move || audio::read_wav_mono(&path, WHISPER_SAMPLE_RATE))
                .await
                .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))??;

        let total_duration = audio_data.duration();
        let whisper_lang = Language::to_whisper_code(&options.language);
        let options = options.clone();
        let context = self.context.clone();

        let result = tokio::task::spawn_blocking(move || {
            let ctx = context.blocking_lock();

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_language(Some(whisper_lang));
            params.set_token_timestamps(options.word_timestamps);
            params.set_print_progress(false);
            params.set_print_realtime(false);

            if options.threads > 0 {
                params.set_n_threads(options.threads as i32);
            }

            let mut state = ctx
                .create_state()
                .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

            state
                .full(params, &audio_data.samples)
                .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

            let num_segments = state
                .full_n_segments()
                .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

            let mut segments = Vec::new();

            for i in 0..num_segments {
                let text = state
                    .full_get_segment_text(i)
                    .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

                let start = ticks_to_secs(
                    state
                        .full_get_segment_t0(i)
                        .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?,
                );

                let end = ticks_to_secs(
                    state
                        .full_get_segment_t1(i)
                        .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?,
                );

                let words = if options.word_timestamps {
                    let num_tokens = state
                        .full_n_tokens(i)
                        .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

                    let mut word_segments = Vec::new();
                    for j in 0..num_tokens {
                        let token_text = state
                            .full_get_token_text(i, j)
                            .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

                        let token_data = state
                            .full_get_token_data(i, j)
                            .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))?;

                        // Skip special tokens
                        if token_text.starts_with('<') && token_text.ends_with('>') {
                            continue;
                        }

                        word_segments.push(WordSegment {
                            word: token_text.trim().to_string(),
                            start: ticks_to_secs(token_data.t0),
                            end: ticks_to_secs(token_data.t1),
                            probability: token_data.p as f64,
                        });
                    }
                    word_segments
                } else {
                    Vec::new()
                };

                let clean_text = clean_whisper_text(&text);
                if !clean_text.is_empty() {
                    segments.push(Segment {
                        text: clean_text,
                        start,
                        end,
                        words,
                    });
                }
            }

            Ok::<_, AsrError>(TranscriptResult {
                segments,
                language: options.language,
                duration: total_duration,
            })
        })
        .await
        .map_err(|e| AsrError::TranscriptionFailed(e.to_string()))??;

        info!("Transcription completed: {} segments", result.segments.len());
        Ok(result)
    }
}

/// Clean Whisper output text by removing special tokens
fn clean_whisper_text(text: &str) -> String {
    // Remove <|...|> style tokens
    let re = regex::Regex::new(r"<\|[^|]+\|>").unwrap();
    re.replace_all(text, "").trim().to_string()
}

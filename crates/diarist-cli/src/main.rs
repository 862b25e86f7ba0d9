//! diarist - speaker-attributed transcription for audio files
//!
//! Transcribes a WAV file with whisper.cpp, diarizes it with pyannote ONNX
//! models, aligns the two by time overlap and prints one
//! `start-end SPEAKER text` line per segment.

mod config;
mod pipeline;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use diarist_asr::{TranscriptionOptions, WhisperTranscriber};
use diarist_core::audio;
use diarist_diarization::{coalesce, DiarizationOptions, OverlapAligner, PyannoteDiarizer};

use crate::config::PipelineConfig;

/// Gap under which consecutive same-speaker segments are merged
const COALESCE_MAX_GAP_SECS: f64 = 1.0;

#[derive(Parser)]
#[command(name = "diarist")]
#[command(about = "Speaker-attributed transcription for audio files", long_about = None)]
struct Cli {
    /// Input WAV file
    audio: PathBuf,

    /// Path to the whisper.cpp GGML model
    #[arg(long, env = "DIARIST_WHISPER_MODEL")]
    whisper_model: PathBuf,

    /// Path to the pyannote segmentation ONNX model
    #[arg(long, env = "DIARIST_SEGMENTATION_MODEL")]
    segmentation_model: PathBuf,

    /// Path to the speaker embedding ONNX model
    #[arg(long, env = "DIARIST_EMBEDDING_MODEL")]
    embedding_model: PathBuf,

    /// Transcription language
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Whisper decoding threads
    #[arg(long, default_value_t = 4)]
    threads: u32,

    /// Cap the number of detected speakers
    #[arg(long)]
    max_speakers: Option<u32>,

    /// Merge consecutive segments from the same speaker
    #[arg(long)]
    coalesce: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        use clap::error::ErrorKind;

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                std::process::exit(0);
            }
            // Wrong arguments exit 1 with usage on stderr
            _ => {
                eprint!("{err}");
                std::process::exit(1);
            }
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-consumable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = parse_args();

    let config = PipelineConfig {
        audio: cli.audio,
        whisper_model: cli.whisper_model,
        segmentation_model: cli.segmentation_model,
        embedding_model: cli.embedding_model,
    };
    config.validate()?;

    let audio_info = audio::probe(&config.audio)?;
    info!(
        "Input: {:.1}s, {} Hz, {} channel(s)",
        audio_info.duration, audio_info.sample_rate, audio_info.channels
    );

    let asr_options = TranscriptionOptions {
        language: cli.language,
        word_timestamps: true,
        threads: cli.threads,
    };
    let diarization_options = DiarizationOptions {
        max_speakers: cli.max_speakers,
    };

    let transcriber = WhisperTranscriber::load(&config.whisper_model)
        .await
        .context("Failed to load whisper model")?;
    let diarizer = PyannoteDiarizer::new(&config.segmentation_model, &config.embedding_model)
        .context("Failed to prepare diarization models")?;

    let mut segments = pipeline::run(
        &config.audio,
        &transcriber,
        &diarizer,
        &OverlapAligner,
        &asr_options,
        &diarization_options,
    )
    .await?;

    if cli.coalesce {
        segments = coalesce(segments, COALESCE_MAX_GAP_SECS);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => pipeline::write_text(&mut out, &segments)?,
        OutputFormat::Json => pipeline::write_json(&mut out, &segments)?,
    }

    Ok(())
}

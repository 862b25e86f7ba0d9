//! ASR (Automatic Speech Recognition) module using whisper-rs
//!
//! Provides the `Transcriber` capability and a whisper.cpp backed
//! implementation producing timestamped, seconds-based segments.

pub mod error;
pub mod languages;
pub mod provider;

pub use error::AsrError;
pub use languages::{Language, SUPPORTED_LANGUAGES};
pub use provider::{
    Transcriber, TranscriptionOptions, WhisperTranscriber, TICKS_PER_SECOND, WHISPER_SAMPLE_RATE,
};

// Re-export types from diarist-core
pub use diarist_core::{Segment, TranscriptResult, WordSegment};

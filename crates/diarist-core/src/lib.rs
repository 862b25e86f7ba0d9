//! diarist-core - shared data model for speaker-attributed transcription
//!
//! Holds the segment types flowing between the transcriber, the diarizer
//! and the aligner, plus WAV loading.

pub mod audio;
pub mod types;

pub use types::*;

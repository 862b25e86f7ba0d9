//! Shared type definitions

use serde::{Deserialize, Serialize};

/// Word-level timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSegment {
    /// Word text
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Token probability (0.0 - 1.0)
    pub probability: f64,
}

/// Sentence-level transcript segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Text content
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word-level timestamps (empty unless requested)
    pub words: Vec<WordSegment>,
}

/// Transcription result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Transcript segments in decode order
    pub segments: Vec<Segment>,
    /// Language code
    pub language: String,
    /// Audio duration in seconds
    pub duration: f64,
}

/// One speaker turn from diarization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Speaker label (e.g. "SPEAKER_00")
    pub speaker: String,
}

impl SpeakerSegment {
    /// Duration of this turn in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Diarization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationResult {
    /// Speaker turns in chronological order
    pub segments: Vec<SpeakerSegment>,
    /// Number of distinct speakers detected
    pub num_speakers: usize,
    /// Audio duration covered by turns, in seconds
    pub duration: f64,
}

/// A transcript segment attributed to a speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Speaker label
    pub speaker: String,
    /// Text content
    pub text: String,
}

/// Audio file information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    /// File path
    pub path: String,
    /// Duration in seconds
    pub duration: f64,
    /// Sample rate
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Bit depth
    pub bits_per_sample: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_segment_duration() {
        let turn = SpeakerSegment {
            start: 1.0,
            end: 3.5,
            speaker: "SPEAKER_00".to_string(),
        };
        assert!((turn.duration() - 2.5).abs() < 0.001);
    }
}

//! Speaker diarization and alignment module using pyannote-rs
//!
//! Provides the `Diarizer` capability (who spoke when) backed by ONNX
//! segmentation and speaker-embedding models, and the `Aligner` capability
//! that attributes transcript segments to speaker turns by time overlap.

pub mod align;
pub mod error;
pub mod provider;

pub use align::{coalesce, Aligner, OverlapAligner};
pub use error::{AlignError, DiarizationError};
pub use provider::{DiarizationOptions, Diarizer, PyannoteDiarizer};

// Re-export types from diarist-core
pub use diarist_core::{DiarizationResult, SpeakerSegment};

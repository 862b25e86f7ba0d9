//! Align transcript segments with speaker turns

use std::collections::BTreeMap;

use diarist_core::{AttributedSegment, DiarizationResult, SpeakerSegment, TranscriptResult};

use crate::error::AlignError;

/// Transcript/diarization alignment capability
pub trait Aligner {
    /// Attribute each transcript segment to a speaker.
    ///
    /// Output order is the transcript segment order; implementations must
    /// not sort or reorder.
    fn align(
        &self,
        transcript: &TranscriptResult,
        diarization: &DiarizationResult,
    ) -> Result<Vec<AttributedSegment>, AlignError>;
}

/// Attributes each transcript segment to the speaker whose turns overlap it
/// the most, falling back to the nearest turn when nothing overlaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAligner;

impl Aligner for OverlapAligner {
    fn align(
        &self,
        transcript: &TranscriptResult,
        diarization: &DiarizationResult,
    ) -> Result<Vec<AttributedSegment>, AlignError> {
        if diarization.segments.is_empty() {
            return Err(AlignError::NoSpeakersDetected);
        }

        Ok(transcript
            .segments
            .iter()
            .map(|segment| AttributedSegment {
                start: segment.start,
                end: segment.end,
                speaker: dominant_speaker(segment.start, segment.end, &diarization.segments),
                text: segment.text.clone(),
            })
            .collect())
    }
}

/// Speaker with the largest total overlap against `[start, end]`, or the
/// turn whose midpoint is nearest when no turn overlaps.
fn dominant_speaker(start: f64, end: f64, turns: &[SpeakerSegment]) -> String {
    // BTreeMap so equal overlaps tie-break deterministically by label
    let mut overlap: BTreeMap<&str, f64> = BTreeMap::new();
    for turn in turns {
        let shared = turn.end.min(end) - turn.start.max(start);
        if shared > 0.0 {
            *overlap.entry(turn.speaker.as_str()).or_insert(0.0) += shared;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (speaker, total) in overlap {
        match best {
            Some((_, t)) if total <= t => {}
            _ => best = Some((speaker, total)),
        }
    }

    if let Some((speaker, _)) = best {
        return speaker.to_string();
    }

    nearest_turn(start, end, turns).speaker.clone()
}

fn nearest_turn(start: f64, end: f64, turns: &[SpeakerSegment]) -> &SpeakerSegment {
    let mid = (start + end) / 2.0;
    let mut nearest = &turns[0];
    let mut nearest_dist = f64::INFINITY;

    for turn in turns {
        let dist = ((turn.start + turn.end) / 2.0 - mid).abs();
        if dist < nearest_dist {
            nearest = turn;
            nearest_dist = dist;
        }
    }

    nearest
}

/// Merge consecutive segments attributed to the same speaker when the gap
/// between them is under `max_gap` seconds.
pub fn coalesce(segments: Vec<AttributedSegment>, max_gap: f64) -> Vec<AttributedSegment> {
    let mut merged: Vec<AttributedSegment> = Vec::new();

    for segment in segments {
        if let Some(last) = merged.last_mut() {
            if last.speaker == segment.speaker && (segment.start - last.end) < max_gap {
                last.text = format!("{} {}", last.text, segment.text);
                last.end = segment.end;
                continue;
            }
        }
        merged.push(segment);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use diarist_core::Segment;

    fn transcript(segments: &[(f64, f64, &str)]) -> TranscriptResult {
        TranscriptResult {
            segments: segments
                .iter()
                .map(|&(start, end, text)| Segment {
                    text: text.to_string(),
                    start,
                    end,
                    words: vec![],
                })
                .collect(),
            language: "en".to_string(),
            duration: segments.last().map(|s| s.1).unwrap_or(0.0),
        }
    }

    fn diarization(turns: &[(f64, f64, &str)]) -> DiarizationResult {
        let speakers: std::collections::BTreeSet<_> =
            turns.iter().map(|&(_, _, s)| s).collect();
        DiarizationResult {
            segments: turns
                .iter()
                .map(|&(start, end, speaker)| SpeakerSegment {
                    start,
                    end,
                    speaker: speaker.to_string(),
                })
                .collect(),
            num_speakers: speakers.len(),
            duration: turns.iter().map(|t| t.1).fold(0.0, f64::max),
        }
    }

    #[test]
    fn test_align_assigns_overlapping_speaker() {
        let result = OverlapAligner
            .align(
                &transcript(&[(0.0, 2.0, "Hello"), (3.0, 5.0, "World")]),
                &diarization(&[(0.0, 2.5, "SPEAKER_00"), (2.5, 5.0, "SPEAKER_01")]),
            )
            .unwrap();

        assert_eq!(result[0].speaker, "SPEAKER_00");
        assert_eq!(result[1].speaker, "SPEAKER_01");
    }

    #[test]
    fn test_align_picks_largest_total_overlap() {
        // Segment 1.0-4.0 overlaps SPEAKER_00 for 1s and SPEAKER_01 for 2s
        let result = OverlapAligner
            .align(
                &transcript(&[(1.0, 4.0, "mixed")]),
                &diarization(&[(0.0, 2.0, "SPEAKER_00"), (2.0, 4.0, "SPEAKER_01")]),
            )
            .unwrap();

        assert_eq!(result[0].speaker, "SPEAKER_01");
    }

    #[test]
    fn test_align_sums_split_turns() {
        // SPEAKER_00 overlaps in two short turns totalling more than
        // SPEAKER_01's single turn
        let result = OverlapAligner
            .align(
                &transcript(&[(0.0, 5.0, "split")]),
                &diarization(&[
                    (0.0, 1.5, "SPEAKER_00"),
                    (1.5, 3.0, "SPEAKER_01"),
                    (3.0, 5.0, "SPEAKER_00"),
                ]),
            )
            .unwrap();

        assert_eq!(result[0].speaker, "SPEAKER_00");
    }

    #[test]
    fn test_align_falls_back_to_nearest_turn() {
        let result = OverlapAligner
            .align(
                &transcript(&[(10.0, 11.0, "late")]),
                &diarization(&[(0.0, 1.0, "SPEAKER_00"), (8.0, 9.0, "SPEAKER_01")]),
            )
            .unwrap();

        assert_eq!(result[0].speaker, "SPEAKER_01");
    }

    #[test]
    fn test_align_rejects_empty_diarization() {
        let result = OverlapAligner.align(
            &transcript(&[(0.0, 1.0, "hello")]),
            &diarization(&[]),
        );

        assert!(matches!(result, Err(AlignError::NoSpeakersDetected)));
    }

    #[test]
    fn test_align_preserves_transcript_order() {
        let result = OverlapAligner
            .align(
                &transcript(&[(3.0, 4.0, "second"), (0.0, 1.0, "first")]),
                &diarization(&[(0.0, 5.0, "SPEAKER_00")]),
            )
            .unwrap();

        assert_eq!(result[0].text, "second");
        assert_eq!(result[1].text, "first");
    }

    #[test]
    fn test_coalesce_merges_same_speaker() {
        let segments = vec![
            AttributedSegment {
                start: 0.0,
                end: 2.0,
                speaker: "SPEAKER_00".to_string(),
                text: "Hello".to_string(),
            },
            AttributedSegment {
                start: 2.5,
                end: 4.0,
                speaker: "SPEAKER_00".to_string(),
                text: "there".to_string(),
            },
        ];

        let merged = coalesce(segments, 1.0);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Hello there");
        assert_eq!(merged[0].end, 4.0);
    }

    #[test]
    fn test_coalesce_keeps_speaker_changes() {
        let segments = vec![
            AttributedSegment {
                start: 0.0,
                end: 2.0,
                speaker: "SPEAKER_00".to_string(),
                text: "Hello".to_string(),
            },
            AttributedSegment {
                start: 2.1,
                end: 4.0,
                speaker: "SPEAKER_01".to_string(),
                text: "Hi".to_string(),
            },
        ];

        assert_eq!(coalesce(segments, 1.0).len(), 2);
    }

    #[test]
    fn test_coalesce_keeps_distant_segments() {
        let segments = vec![
            AttributedSegment {
                start: 0.0,
                end: 2.0,
                speaker: "SPEAKER_00".to_string(),
                text: "Hello".to_string(),
            },
            AttributedSegment {
                start: 5.0,
                end: 6.0,
                speaker: "SPEAKER_00".to_string(),
                text: "again".to_string(),
            },
        ];

        assert_eq!(coalesce(segments, 1.0).len(), 2);
    }
}

//! Sequential transcribe → diarize → align pipeline

use std::io::Write;
use std::path::Path;

use tracing::info;

use diarist_asr::{Transcriber, TranscriptionOptions};
use diarist_core::AttributedSegment;
use diarist_diarization::{Aligner, DiarizationOptions, Diarizer};

/// Run the pipeline over one audio file.
///
/// Steps are strictly sequential; the first collaborator failure aborts the
/// run before any output is produced.
pub async fn run<T, D, A>(
    audio: &Path,
    transcriber: &T,
    diarizer: &D,
    aligner: &A,
    asr_options: &TranscriptionOptions,
    diarization_options: &DiarizationOptions,
) -> anyhow::Result<Vec<AttributedSegment>>
where
    T: Transcriber,
    D: Diarizer,
    A: Aligner,
{
    let transcript = transcriber.transcribe(audio, asr_options).await?;
    info!(
        "Transcript: {} segments over {:.1}s",
        transcript.segments.len(),
        transcript.duration
    );

    let diarization = diarizer.diarize(audio, diarization_options).await?;
    info!("Diarization: {} speakers", diarization.num_speakers);

    Ok(aligner.align(&transcript, &diarization)?)
}

/// Write one `start-end speaker text` line per segment, in pipeline order
pub fn write_text<W: Write>(out: &mut W, segments: &[AttributedSegment]) -> std::io::Result<()> {
    for segment in segments {
        writeln!(
            out,
            "{:.2}-{:.2} {} {}",
            segment.start, segment.end, segment.speaker, segment.text
        )?;
    }
    Ok(())
}

/// Write the attributed transcript as pretty-printed JSON
pub fn write_json<W: Write>(out: &mut W, segments: &[AttributedSegment]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, segments)?;
    writeln!(out)?;
    Ok(())
}

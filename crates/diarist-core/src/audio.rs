//! WAV loading and sample-rate conversion

use std::path::Path;

use hound::{SampleFormat, WavReader};
use thiserror::Error;
use tracing::debug;

use crate::AudioInfo;

/// Audio loading errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// WAV decode error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Mono audio sample data
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Samples (mono, f32)
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Read WAV header information without decoding the sample data
pub fn probe<P: AsRef<Path>>(path: P) -> Result<AudioInfo, AudioError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let duration = reader.duration() as f64 / spec.sample_rate as f64;

    Ok(AudioInfo {
        path: path.display().to_string(),
        duration,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
    })
}

/// Read a WAV file as mono f32 samples at `target_rate`.
///
/// Stereo input is downmixed by channel averaging; other channel counts are
/// rejected. Resampling is linear interpolation.
pub fn read_wav_mono<P: AsRef<Path>>(path: P, target_rate: u32) -> Result<AudioData, AudioError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    debug!(
        "Decoding WAV: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .filter_map(|s| s.ok())
            .collect(),
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .filter_map(|s| s.ok())
                .map(|s| s as f32 / max_val)
                .collect()
        }
    };

    let mono = downmix(samples, spec.channels)?;

    let samples = if spec.sample_rate == target_rate {
        mono
    } else {
        resample_linear(&mono, spec.sample_rate, target_rate)
    };

    Ok(AudioData {
        samples,
        sample_rate: target_rate,
    })
}

/// Collapse interleaved samples to mono
fn downmix(samples: Vec<f32>, channels: u16) -> Result<Vec<f32>, AudioError> {
    match channels {
        1 => Ok(samples),
        2 => Ok(samples
            .chunks(2)
            .map(|c| (c[0] + c.get(1).copied().unwrap_or(0.0)) / 2.0)
            .collect()),
        n => Err(AudioError::UnsupportedFormat(format!("{} channels", n))),
    }
}

/// Linear-interpolation resampler
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = to_rate as f64 / from_rate as f64;
    let new_len = (samples.len() as f64 * ratio) as usize;
    let mut out = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src = i as f64 / ratio;
        let idx = src.floor() as usize;
        let frac = (src - idx as f64) as f32;

        let s0 = samples.get(idx).copied().unwrap_or(0.0);
        let s1 = samples.get(idx + 1).copied().unwrap_or(s0);
        out.push(s0 + (s1 - s0) * frac);
    }

    out
}

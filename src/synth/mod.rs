//! Waveform synthesis: a melodic voice and a drum layer mixed into one mono
//! buffer, then normalized.
//!
//! All randomness comes from the RNG the caller passes in. Seed a
//! `ChaCha8Rng` per song for reproducible renders; concurrent renders should
//! each own their generator.

pub mod buffer;
pub mod drums;
pub mod envelope;
pub mod melody;
pub mod oscillator;

pub use buffer::SampleBuffer;

use log::debug;
use rand::Rng;
use std::fmt;

use crate::idea::SongIdea;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Peak magnitude after normalization.
pub const NORMALIZED_PEAK: f32 = 0.95;

/// Errors from waveform synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    /// Tempo of zero would make every beat infinitely long.
    ZeroTempo,
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::ZeroTempo => write!(f, "cannot synthesize at 0 BPM"),
        }
    }
}

impl std::error::Error for SynthError {}

/// Seconds per beat at `bpm`.
pub fn beat_duration(bpm: u32) -> f64 {
    60.0 / bpm as f64
}

/// Buffer length for `bars` bars of 4/4 at `bpm`.
pub fn total_samples(bpm: u32, bars: u32) -> usize {
    let bar_duration = 4.0 * beat_duration(bpm);
    let total_duration = bar_duration * bars as f64;
    (total_duration * SAMPLE_RATE as f64).floor() as usize
}

/// Render `bars` bars of `idea` to a normalized mono buffer at [`SAMPLE_RATE`].
///
/// Only the idea's tempo shapes the audio. Genre and instruments are logged
/// and otherwise ignored: every genre gets the same melody and drum kit, and
/// genre-specific patterns live on the score path ([`crate::score::build_score`]).
pub fn synthesize<R: Rng + ?Sized>(
    idea: &SongIdea,
    bars: u32,
    rng: &mut R,
) -> Result<SampleBuffer, SynthError> {
    debug!("synthesizing {idea}");
    synthesize_at(idea.bpm(), bars, rng)
}

/// Render `bars` bars at `bpm`. Zero bars yields an empty buffer.
pub fn synthesize_at<R: Rng + ?Sized>(
    bpm: u32,
    bars: u32,
    rng: &mut R,
) -> Result<SampleBuffer, SynthError> {
    if bpm == 0 {
        return Err(SynthError::ZeroTempo);
    }

    let beat_secs = beat_duration(bpm);
    let mut buffer = SampleBuffer::silent(total_samples(bpm, bars), SAMPLE_RATE);

    let notes = melody::render_melody(&mut buffer, beat_secs, rng);
    drums::render_drums(&mut buffer, beat_secs, bars, rng);

    let peak = buffer.peak();
    buffer.normalize(NORMALIZED_PEAK);

    debug!(
        "{} samples, {notes} melody notes, pre-normalize peak {peak:.3}",
        buffer.len()
    );
    Ok(buffer)
}

//! Melodic layer: random diatonic sine notes on a sixteenth-note grid.

use rand::Rng;

use super::buffer::SampleBuffer;
use super::envelope::SlotEnvelope;
use super::oscillator::{midi_to_freq, sine};

/// C major, one octave up from middle C.
pub const SCALE: [u8; 7] = [60, 62, 64, 65, 67, 69, 71];

/// Chance that a slot holds a note rather than a rest.
pub const NOTE_PROBABILITY: f64 = 0.7;

/// Octave transpositions a note may take, in semitones.
pub const OCTAVE_SHIFTS: [u8; 3] = [0, 12, 24];

const AMPLITUDE: f64 = 0.1;

/// Pick the next slot's pitch, or `None` for a rest.
///
/// Draws, in order: note-or-rest, scale degree, octave.
pub fn pick_pitch<R: Rng + ?Sized>(rng: &mut R) -> Option<u8> {
    if !rng.gen_bool(NOTE_PROBABILITY) {
        return None;
    }
    let degree = SCALE[rng.gen_range(0..SCALE.len())];
    let shift = OCTAVE_SHIFTS[rng.gen_range(0..OCTAVE_SHIFTS.len())];
    Some(degree + shift)
}

/// Mix the melody into `buffer`, one slot per quarter of a beat.
///
/// The last slot is cut short at the end of the buffer. Returns the number of
/// notes written.
pub fn render_melody<R: Rng + ?Sized>(
    buffer: &mut SampleBuffer,
    beat_secs: f64,
    rng: &mut R,
) -> usize {
    let sample_rate = buffer.sample_rate() as f64;
    let slot_len = (sample_rate * beat_secs / 4.0) as usize;
    if slot_len == 0 {
        return 0;
    }

    let envelope = SlotEnvelope::MELODY;
    let mut notes = 0;
    let mut start = 0;
    while start < buffer.len() {
        if let Some(pitch) = pick_pitch(rng) {
            let freq = midi_to_freq(pitch);
            for i in 0..slot_len {
                let t = i as f64 / sample_rate;
                let env = envelope.amplitude(i as f64 / slot_len as f64);
                let value = sine(freq * t) * AMPLITUDE * env;
                if !buffer.mix(start + i, value as f32) {
                    break;
                }
            }
            notes += 1;
        }
        start += slot_len;
    }
    notes
}

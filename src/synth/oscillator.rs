//! Oscillator primitives.

use std::f64::consts::PI;

/// Sine at `phase` cycles (1.0 = one full period).
#[inline]
pub fn sine(phase: f64) -> f64 {
    (phase * 2.0 * PI).sin()
}

/// Convert a MIDI note number to frequency in Hz.
///
/// Standard tuning: A4 (MIDI 69) = 440 Hz.
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0f64.powf((note as f64 - 69.0) / 12.0)
}

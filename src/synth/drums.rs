//! Percussive layer: synthetic kick, snare and hi-hat mixed in place.
//!
//! Noise-based voices draw from the caller's RNG, so a seeded generator gives
//! a repeatable kit.

use rand::Rng;

use super::buffer::SampleBuffer;
use super::envelope::exp_decay;
use super::oscillator::sine;

/// Beats per bar for the drum grid.
pub const BEATS_PER_BAR: u32 = 4;

/// Kick drum: sine whose frequency falls with its own `exp(-10t)` envelope,
/// starting at 150 Hz.
pub fn mix_kick(buffer: &mut SampleBuffer, start: usize, len: usize) {
    let sample_rate = buffer.sample_rate() as f64;
    let mut phase = 0.0_f64;
    for i in 0..len {
        let t = i as f64 / sample_rate;
        let env = exp_decay(t, 10.0);
        phase += 150.0 * env / sample_rate;
        if !buffer.mix(start + i, (sine(phase) * env * 0.3) as f32) {
            break;
        }
    }
}

/// Decaying white noise burst.
fn mix_noise<R: Rng + ?Sized>(
    buffer: &mut SampleBuffer,
    start: usize,
    len: usize,
    rate: f64,
    amplitude: f64,
    rng: &mut R,
) {
    let sample_rate = buffer.sample_rate() as f64;
    for i in 0..len {
        let t = i as f64 / sample_rate;
        let noise: f64 = rng.gen_range(-1.0..1.0);
        if !buffer.mix(start + i, (noise * exp_decay(t, rate) * amplitude) as f32) {
            break;
        }
    }
}

/// Snare drum: white noise under an `exp(-15t)` decay.
pub fn mix_snare<R: Rng + ?Sized>(buffer: &mut SampleBuffer, start: usize, len: usize, rng: &mut R) {
    mix_noise(buffer, start, len, 15.0, 0.2, rng);
}

/// Hi-hat: white noise under an `exp(-20t)` decay.
pub fn mix_hihat<R: Rng + ?Sized>(buffer: &mut SampleBuffer, start: usize, len: usize, rng: &mut R) {
    mix_noise(buffer, start, len, 20.0, 0.15, rng);
}

/// Lay down `bars` bars of the fixed kit pattern.
///
/// Per bar: kick on beats 1 and 3 for half a beat, snare on beats 2 and 4 for
/// 30% of a beat, hi-hat on every eighth for 10% of the eighth.
pub fn render_drums<R: Rng + ?Sized>(
    buffer: &mut SampleBuffer,
    beat_secs: f64,
    bars: u32,
    rng: &mut R,
) {
    let beat_len = beat_secs * buffer.sample_rate() as f64;
    let eighth_len = beat_len / 2.0;
    let kick_len = (beat_len * 0.5) as usize;
    let snare_len = (beat_len * 0.3) as usize;
    let hat_len = (eighth_len * 0.1) as usize;

    for bar in 0..bars {
        for beat in 0..BEATS_PER_BAR {
            let beat_index = (bar * BEATS_PER_BAR + beat) as f64;
            let beat_start = (beat_index * beat_len) as usize;

            if beat % 2 == 0 {
                mix_kick(buffer, beat_start, kick_len);
            } else {
                mix_snare(buffer, beat_start, snare_len, rng);
            }

            for sub in 0..2 {
                let hat_start = ((beat_index + sub as f64 * 0.5) * beat_len) as usize;
                mix_hihat(buffer, hat_start, hat_len, rng);
            }
        }
    }
}

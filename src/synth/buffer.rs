//! Mono accumulation buffer shared by every layer of a render.

/// A fixed-length mono sample buffer at a known sample rate.
///
/// Layers mix into it additively; writes past the end are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// A zeroed buffer of `len` samples.
    pub fn silent(len: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; len],
            sample_rate,
        }
    }

    /// Wrap existing samples.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Add `value` to the sample at `index`.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range.
    #[inline]
    pub fn mix(&mut self, index: usize, value: f32) -> bool {
        match self.samples.get_mut(index) {
            Some(sample) => {
                *sample += value;
                true
            }
            None => false,
        }
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Scale the buffer so its peak magnitude equals `target`.
    ///
    /// A silent buffer is left untouched.
    pub fn normalize(&mut self, target: f32) {
        let peak = self.peak();
        if peak > 0.0 {
            let gain = target / peak;
            for sample in self.samples.iter_mut() {
                *sample *= gain;
            }
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

//! Amplitude envelopes for melodic notes and drum hits.

/// Linear attack/release envelope over a fixed-length note slot.
///
/// `attack` and `release` are fractions of the slot (0.0–1.0). Between them the
/// envelope holds at full level.
#[derive(Debug, Clone, Copy)]
pub struct SlotEnvelope {
    pub attack: f64,
    pub release: f64,
}

impl SlotEnvelope {
    /// 10% attack, 20% release.
    pub const MELODY: SlotEnvelope = SlotEnvelope {
        attack: 0.1,
        release: 0.2,
    };

    /// Amplitude at `position` through the slot, where 0.0 is the first sample
    /// and 1.0 the end.
    pub fn amplitude(&self, position: f64) -> f64 {
        if !(0.0..=1.0).contains(&position) {
            return 0.0;
        }

        let release_start = 1.0 - self.release;
        if position < self.attack {
            position / self.attack
        } else if position > release_start {
            if self.release <= 0.0 {
                1.0
            } else {
                (1.0 - position) / self.release
            }
        } else {
            1.0
        }
    }
}

/// Exponential decay `exp(-rate * t)` for `t` in seconds.
#[inline]
pub fn exp_decay(t: f64, rate: f64) -> f64 {
    (-rate * t).exp()
}

//! Symbolic scores: note events, the pattern builder and the MIDI file encoder.

pub mod builder;
pub mod container;
pub mod vlq;

pub use builder::{build_score, Pattern};
pub use container::{encode_score, TICKS_PER_QUARTER};
pub use vlq::{decode_vlq, encode_vlq};

use std::fmt;

/// Errors from score encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// A delta or duration does not fit in a four-byte VLQ.
    VlqOverflow(u64),
    /// Input ended before a VLQ terminator byte.
    TruncatedVlq,
    /// Four continuation bytes in a row: longer than any valid VLQ.
    OverlongVlq,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::VlqOverflow(v) => {
                write!(f, "value {v} does not fit in a variable-length quantity")
            }
            ScoreError::TruncatedVlq => write!(f, "truncated variable-length quantity"),
            ScoreError::OverlongVlq => {
                write!(f, "variable-length quantity is too long (over 4 bytes)")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

/// One note on the score grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub start_tick: u32,
    /// MIDI pitch, 0–127.
    pub pitch: u8,
    /// MIDI velocity, 0–127.
    pub velocity: u8,
    pub duration_tick: u32,
}

impl NoteEvent {
    pub fn new(start_tick: u32, pitch: u8, velocity: u8, duration_tick: u32) -> Self {
        debug_assert!(pitch <= 127 && velocity <= 127);
        debug_assert!(duration_tick > 0);
        Self {
            start_tick,
            pitch,
            velocity,
            duration_tick,
        }
    }

    /// Tick at which the note releases.
    pub fn end_tick(&self) -> u64 {
        self.start_tick as u64 + self.duration_tick as u64
    }
}

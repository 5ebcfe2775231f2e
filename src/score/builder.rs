//! Score builder: genre-conditioned rhythm patterns laid out on a tick grid.
//!
//! The grid uses 24 ticks per beat and 4 beats per bar. Tempo never moves a
//! tick; it only reaches the container as a meta-event.

use log::{debug, warn};

use super::NoteEvent;

/// Ticks per beat on the pattern grid.
pub const GRID_TICKS_PER_BEAT: u32 = 24;

/// Ticks per bar on the pattern grid.
pub const GRID_TICKS_PER_BAR: u32 = GRID_TICKS_PER_BEAT * 4;

const BASS: u8 = 36;
const SNARE: u8 = 38;
const CLOSED_HAT: u8 = 42;
const CHORD: [u8; 3] = [60, 64, 67];

/// Pattern family selected from the genre tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Walking bass with a chord stab every other bar.
    Jazz,
    /// Bass, backbeat snare and straight eighth hi-hats.
    Backbeat,
}

impl Pattern {
    /// `"jazz"` (any case) selects [`Pattern::Jazz`]; everything else is [`Pattern::Backbeat`].
    pub fn for_genre(genre: &str) -> Self {
        if genre.eq_ignore_ascii_case("jazz") {
            Pattern::Jazz
        } else {
            Pattern::Backbeat
        }
    }

    fn push_bar(self, bar: u32, origin: u32, events: &mut Vec<NoteEvent>) {
        match self {
            Pattern::Jazz => {
                events.push(NoteEvent::new(origin, BASS + (bar % 5) as u8, 90, 48));
                if bar % 2 == 0 {
                    for &pitch in &CHORD {
                        events.push(NoteEvent::new(origin + 24, pitch, 70, 12));
                    }
                }
            }
            Pattern::Backbeat => {
                for offset in [0, 48] {
                    events.push(NoteEvent::new(origin + offset, BASS, 100, 48));
                }
                for offset in [24, 72] {
                    events.push(NoteEvent::new(origin + offset, SNARE, 80, 12));
                }
                for j in 0..8 {
                    events.push(NoteEvent::new(origin + j * 12, CLOSED_HAT, 60, 6));
                }
            }
        }
    }
}

/// First tick of `bar`, or `None` when the bar does not fit on a u32 grid.
fn bar_origin(bar: u32) -> Option<u32> {
    bar.checked_mul(GRID_TICKS_PER_BAR)
        .filter(|origin| origin.checked_add(GRID_TICKS_PER_BAR - 1).is_some())
}

/// Build the note events for `bars` bars of `genre`.
///
/// Events come back sorted by start tick; events sharing a tick keep the order
/// the pattern writes them in. `bpm` is accepted for symmetry with the encoder
/// and does not affect the result. Bars past the end of the u32 tick range are
/// dropped with a warning.
pub fn build_score(genre: &str, bpm: u32, bars: u32) -> Vec<NoteEvent> {
    let pattern = Pattern::for_genre(genre);
    let mut events = Vec::new();
    for bar in 0..bars {
        let Some(origin) = bar_origin(bar) else {
            warn!("tick grid ends at bar {bar}; dropping the remaining {} bars", bars - bar);
            break;
        };
        pattern.push_bar(bar, origin, &mut events);
    }
    events.sort_by_key(|e| e.start_tick);
    debug!(
        "built {} events for {bars} bars of {genre} ({pattern:?}, {bpm} BPM)",
        events.len()
    );
    events
}

//! Standard MIDI file encoder: format 1, a tempo/meter track plus a note track.

use log::{debug, trace};

use super::vlq::write_vlq;
use super::{NoteEvent, ScoreError};

/// Tick resolution declared in the header chunk.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Microseconds per quarter note at 120 BPM.
///
/// Written for every score whatever tempo the caller asks for.
pub const TEMPO_120_BPM: [u8; 3] = [0x07, 0xA1, 0x20];

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

/// 4/4, 24 clocks per metronome click, 8 thirty-seconds per quarter.
const TIME_SIGNATURE: [u8; 8] = [0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08];
const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

fn tempo_track() -> Vec<u8> {
    let mut track = Vec::with_capacity(19);
    track.extend_from_slice(&TIME_SIGNATURE);
    track.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03]);
    track.extend_from_slice(&TEMPO_120_BPM);
    track.extend_from_slice(&END_OF_TRACK);
    track
}

/// Serialize `events` in slice order as note-on/note-off pairs.
///
/// Each note-on delta is measured from the end of the previous note. A note
/// that starts before the previous one ended gets a delta of 0.
fn note_track(events: &[NoteEvent]) -> Result<Vec<u8>, ScoreError> {
    let mut track = Vec::with_capacity(events.len() * 8 + END_OF_TRACK.len());
    let mut last_end: u64 = 0;

    for event in events {
        let start = event.start_tick as u64;
        let delta = match start.checked_sub(last_end) {
            Some(delta) => delta,
            None => {
                trace!(
                    "note {} at tick {} overlaps previous end {}, delta clamped to 0",
                    event.pitch,
                    start,
                    last_end
                );
                0
            }
        };
        let delta = u32::try_from(delta).map_err(|_| ScoreError::VlqOverflow(delta))?;

        write_vlq(&mut track, delta)?;
        track.extend_from_slice(&[NOTE_ON, event.pitch & 0x7F, event.velocity & 0x7F]);
        write_vlq(&mut track, event.duration_tick)?;
        track.extend_from_slice(&[NOTE_OFF, event.pitch & 0x7F, 0x00]);

        last_end = event.end_tick();
    }

    track.extend_from_slice(&END_OF_TRACK);
    Ok(track)
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], body: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(body);
}

/// Encode a complete two-track score.
///
/// `bpm` is only reported; the tempo meta-event is always [`TEMPO_120_BPM`].
pub fn encode_score(events: &[NoteEvent], bpm: u32) -> Result<Vec<u8>, ScoreError> {
    let tempo = tempo_track();
    let notes = note_track(events)?;

    let mut out = Vec::with_capacity(14 + 8 + tempo.len() + 8 + notes.len());
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // format 1
    out.extend_from_slice(&2u16.to_be_bytes()); // 2 tracks
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());
    push_chunk(&mut out, b"MTrk", &tempo);
    push_chunk(&mut out, b"MTrk", &notes);

    debug!(
        "encoded {} notes into {} score bytes (requested {bpm} BPM)",
        events.len(),
        out.len()
    );
    Ok(out)
}

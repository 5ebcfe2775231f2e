//! Score pipeline integration tests: builder → MIDI encoder → chunk structure.
//!
//! The encoded files are walked chunk by chunk and their note tracks decoded
//! back into note-on/note-off pairs.

use songsmith::score::{build_score, decode_vlq, encode_score, NoteEvent};

/// A parsed chunk: tag and body.
struct Chunk<'a> {
    tag: &'a [u8],
    declared_len: usize,
    body: &'a [u8],
}

fn chunks(bytes: &[u8]) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let tag = &bytes[pos..pos + 4];
        let declared_len = u32::from_be_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let start = pos + 8;
        let end = (start + declared_len).min(bytes.len());
        out.push(Chunk {
            tag,
            declared_len,
            body: &bytes[start..end],
        });
        pos = start + declared_len;
    }
    out
}

/// Decode a note track into (delta, status, pitch, velocity) tuples, stopping
/// at the end-of-track marker.
fn decode_track(body: &[u8]) -> Vec<(u32, u8, u8, u8)> {
    let mut events = Vec::new();
    let mut pos = 0;
    loop {
        let (delta, used) = decode_vlq(&body[pos..]).expect("valid delta");
        pos += used;
        let status = body[pos];
        if status == 0xFF {
            assert_eq!(&body[pos..], &[0xFF, 0x2F, 0x00], "end-of-track must close the track");
            return events;
        }
        events.push((delta, status, body[pos + 1], body[pos + 2]));
        pos += 3;
    }
}

fn encode(genre: &str, bars: u32) -> Vec<u8> {
    let events = build_score(genre, 120, bars);
    encode_score(&events, 120).expect("encode failed")
}

#[test]
fn declared_lengths_match_bodies() {
    for genre in ["jazz", "pop", "metal"] {
        for bars in [0, 1, 4, 33] {
            let bytes = encode(genre, bars);
            let chunks = chunks(&bytes);
            assert_eq!(chunks.len(), 3, "{genre}/{bars}: header + 2 tracks");
            assert_eq!(chunks[0].tag, b"MThd");
            for chunk in &chunks[1..] {
                assert_eq!(chunk.tag, b"MTrk");
                assert_eq!(chunk.declared_len, chunk.body.len());
                assert!(chunk.body.ends_with(&[0x00, 0xFF, 0x2F, 0x00]));
            }
            let total: usize = chunks.iter().map(|c| 8 + c.declared_len).sum();
            assert_eq!(total, bytes.len());
        }
    }
}

#[test]
fn header_declares_format_1_two_tracks_480_ppq() {
    let bytes = encode("pop", 2);
    let header = &chunks(&bytes)[0];
    assert_eq!(header.declared_len, 6);
    assert_eq!(header.body, &[0, 1, 0, 2, 0x01, 0xE0]);
}

#[test]
fn tempo_is_fixed_at_120_bpm() {
    let slow = encode_score(&build_score("pop", 60, 1), 60).unwrap();
    let fast = encode_score(&build_score("pop", 200, 1), 200).unwrap();
    assert_eq!(slow, fast);

    let tempo_track = chunks(&slow)[1].body.to_vec();
    let tempo_pos = tempo_track
        .windows(3)
        .position(|w| w == [0xFF, 0x51, 0x03])
        .expect("tempo meta-event present");
    assert_eq!(&tempo_track[tempo_pos + 3..tempo_pos + 6], &[0x07, 0xA1, 0x20]);
}

#[test]
fn jazz_bar_decodes_to_bass_and_chord() {
    let bytes = encode("jazz", 1);
    let track = decode_track(chunks(&bytes)[2].body);
    assert_eq!(
        track,
        vec![
            (0, 0x90, 36, 90),
            (48, 0x80, 36, 0),
            // chord starts at 24, before the bass ended at 48: delta clamps to 0
            (0, 0x90, 60, 70),
            (12, 0x80, 60, 0),
            (0, 0x90, 64, 70),
            (12, 0x80, 64, 0),
            (0, 0x90, 67, 70),
            (12, 0x80, 67, 0),
        ]
    );
}

#[test]
fn every_note_on_has_matching_note_off() {
    let events = build_score("pop", 120, 8);
    let bytes = encode_score(&events, 120).unwrap();
    let track = decode_track(chunks(&bytes)[2].body);
    assert_eq!(track.len(), events.len() * 2);
    for (pair, event) in track.chunks(2).zip(&events) {
        assert_eq!(pair[0].1, 0x90);
        assert_eq!(pair[0].2, event.pitch);
        assert_eq!(pair[0].3, event.velocity);
        assert_eq!(pair[1], (event.duration_tick, 0x80, event.pitch, 0));
    }
}

#[test]
fn deltas_measured_from_previous_note_end() {
    let events = vec![
        NoteEvent::new(0, 60, 100, 10),
        NoteEvent::new(30, 62, 100, 10),
        NoteEvent::new(1000, 64, 100, 10),
    ];
    let bytes = encode_score(&events, 120).unwrap();
    let track = decode_track(chunks(&bytes)[2].body);
    let on_deltas: Vec<u32> = track.iter().step_by(2).map(|e| e.0).collect();
    assert_eq!(on_deltas, vec![0, 20, 960]);
}

#[test]
fn unsorted_input_is_tolerated() {
    let events = vec![NoteEvent::new(500, 60, 100, 10), NoteEvent::new(100, 62, 100, 10)];
    let bytes = encode_score(&events, 120).unwrap();
    let track = decode_track(chunks(&bytes)[2].body);
    assert_eq!(track[0].0, 500);
    assert_eq!(track[2].0, 0);
}

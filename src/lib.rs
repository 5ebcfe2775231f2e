//! Songsmith: procedural song sketches rendered to MIDI scores and WAV audio.
//!
//! A [`idea::SongIdea`] feeds two independent paths: the score builder and
//! MIDI encoder in [`score`], and the waveform synthesizer in [`synth`]
//! followed by the WAV encoder in [`pcm`]. [`render`] writes both to disk.

pub mod config;
pub mod idea;
pub mod pcm;
pub mod render;
pub mod score;
pub mod synth;

//! Song ideas: the parameter tuple that drives one synthesis run.

pub mod stats;

pub use stats::{generate_idea, FrequencyStats};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest song an idea may ask for, in bars.
pub const MAX_BARS: u32 = 10_000;

/// Errors raised while building or loading a [`SongIdea`].
#[derive(Debug)]
pub enum IdeaError {
    /// The instrument list was empty.
    NoInstruments,
    /// Tempo must be at least 1 BPM.
    ZeroTempo,
    /// A song needs at least one bar.
    ZeroBars,
    /// More bars than [`MAX_BARS`].
    TooManyBars(u32),
    /// Frequency statistics had nothing with a positive weight to pick from.
    EmptyStats(&'static str),
    /// YAML decoding failed.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for IdeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdeaError::NoInstruments => write!(f, "song idea needs at least one instrument"),
            IdeaError::ZeroTempo => write!(f, "tempo must be greater than zero"),
            IdeaError::ZeroBars => write!(f, "bar count must be greater than zero"),
            IdeaError::TooManyBars(n) => write!(f, "{n} bars is more than the {MAX_BARS} allowed"),
            IdeaError::EmptyStats(what) => write!(f, "no weighted {what} to choose from"),
            IdeaError::Yaml(e) => write!(f, "invalid song idea: {e}"),
        }
    }
}

impl std::error::Error for IdeaError {}

impl From<serde_yaml::Error> for IdeaError {
    fn from(e: serde_yaml::Error) -> Self {
        IdeaError::Yaml(e)
    }
}

/// On-disk shape of a song idea, validated into a [`SongIdea`].
#[derive(Debug, Deserialize)]
struct IdeaFile {
    genre: String,
    instruments: Vec<String>,
    bpm: u32,
    #[serde(default = "default_bars")]
    bars: u32,
}

fn default_bars() -> u32 {
    4
}

/// Immutable synthesis input: genre tag, instruments, tempo and length.
///
/// The instrument list is descriptive only; neither synthesis path reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongIdea {
    genre: String,
    instruments: Vec<String>,
    bpm: u32,
    bars: u32,
}

impl SongIdea {
    /// Build a validated idea.
    pub fn new(
        genre: impl Into<String>,
        instruments: Vec<String>,
        bpm: u32,
        bars: u32,
    ) -> Result<Self, IdeaError> {
        if instruments.is_empty() {
            return Err(IdeaError::NoInstruments);
        }
        if bpm == 0 {
            return Err(IdeaError::ZeroTempo);
        }
        if bars == 0 {
            return Err(IdeaError::ZeroBars);
        }
        if bars > MAX_BARS {
            return Err(IdeaError::TooManyBars(bars));
        }
        Ok(Self {
            genre: genre.into(),
            instruments,
            bpm,
            bars,
        })
    }

    /// Parse and validate an idea from YAML. `bars` defaults to 4 when omitted.
    pub fn from_yaml(source: &str) -> Result<Self, IdeaError> {
        let file: IdeaFile = serde_yaml::from_str(source)?;
        Self::new(file.genre, file.instruments, file.bpm, file.bars)
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn bars(&self) -> u32 {
        self.bars
    }
}

impl fmt::Display for SongIdea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} BPM, {} bars ({})",
            self.genre,
            self.bpm,
            self.bars,
            self.instruments.join(", ")
        )
    }
}

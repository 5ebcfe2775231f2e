//! Frequency statistics: weighted genre/instrument/tempo picks for new ideas.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{IdeaError, SongIdea};

/// Tempo used when the statistics carry no observed tempos.
pub const FALLBACK_BPM: u32 = 120;

/// Most instruments a generated idea will list.
pub const MAX_INSTRUMENTS: usize = 3;

/// How often each genre, instrument and tempo was observed in a corpus.
///
/// Maps are ordered so that a seeded generator yields the same idea every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyStats {
    #[serde(default)]
    pub genres: BTreeMap<String, u32>,
    #[serde(default)]
    pub instruments: BTreeMap<String, u32>,
    #[serde(default)]
    pub tempos: Vec<u32>,
}

impl FrequencyStats {
    pub fn from_yaml(source: &str) -> Result<Self, IdeaError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Entries with a positive count, in map order.
fn weighted(counts: &BTreeMap<String, u32>) -> Vec<(&str, u32)> {
    counts
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(name, &count)| (name.as_str(), count))
        .collect()
}

/// Draw a song idea from `stats`.
///
/// Genre is weighted by count, instruments are 1..=3 distinct draws weighted by
/// count, tempo is uniform over the observed tempos.
pub fn generate_idea<R: Rng + ?Sized>(
    stats: &FrequencyStats,
    bars: u32,
    rng: &mut R,
) -> Result<SongIdea, IdeaError> {
    let genres = weighted(&stats.genres);
    let genre_dist = WeightedIndex::new(genres.iter().map(|(_, w)| *w))
        .map_err(|_| IdeaError::EmptyStats("genres"))?;
    let genre = genres[genre_dist.sample(rng)].0;

    let mut pool = weighted(&stats.instruments);
    if pool.is_empty() {
        return Err(IdeaError::EmptyStats("instruments"));
    }
    let wanted = rng.gen_range(1..=MAX_INSTRUMENTS.min(pool.len()));
    let mut instruments = Vec::with_capacity(wanted);
    while instruments.len() < wanted {
        let dist = WeightedIndex::new(pool.iter().map(|(_, w)| *w))
            .map_err(|_| IdeaError::EmptyStats("instruments"))?;
        let (name, _) = pool.remove(dist.sample(rng));
        instruments.push(name.to_string());
    }

    let bpm = stats
        .tempos
        .iter()
        .copied()
        .filter(|&bpm| bpm > 0)
        .collect::<Vec<_>>()
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_BPM);

    SongIdea::new(genre, instruments, bpm, bars)
}

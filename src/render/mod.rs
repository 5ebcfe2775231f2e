//! Render a song idea to `.mid` and `.wav` files on disk.
//!
//! This is the only layer that touches the filesystem. I/O failures come back
//! as [`RenderError::Io`], separate from synthesis or encoding failures.

use log::info;
use rand::Rng;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::idea::SongIdea;
use crate::pcm::write_pcm;
use crate::score::{build_score, encode_score, ScoreError};
use crate::synth::{synthesize, SynthError};

/// Which artifacts to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Score,
    Audio,
    Both,
}

impl OutputFormat {
    fn wants_score(self) -> bool {
        matches!(self, OutputFormat::Score | OutputFormat::Both)
    }

    fn wants_audio(self) -> bool {
        matches!(self, OutputFormat::Audio | OutputFormat::Both)
    }
}

/// Errors from rendering a song to disk.
#[derive(Debug)]
pub enum RenderError {
    /// Creating or writing an output file failed.
    Io { path: PathBuf, source: io::Error },
    Synth(SynthError),
    Score(ScoreError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            RenderError::Synth(e) => write!(f, "synthesis failed: {e}"),
            RenderError::Score(e) => write!(f, "score encoding failed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io { source, .. } => Some(source),
            RenderError::Synth(e) => Some(e),
            RenderError::Score(e) => Some(e),
        }
    }
}

impl From<SynthError> for RenderError {
    fn from(e: SynthError) -> Self {
        RenderError::Synth(e)
    }
}

impl From<ScoreError> for RenderError {
    fn from(e: ScoreError) -> Self {
        RenderError::Score(e)
    }
}

/// Paths of the files a render produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFiles {
    pub score: Option<PathBuf>,
    pub audio: Option<PathBuf>,
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> RenderError + '_ {
    move |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write the score for `idea` to `path`.
pub fn write_score_file(idea: &SongIdea, path: &Path) -> Result<(), RenderError> {
    let events = build_score(idea.genre(), idea.bpm(), idea.bars());
    let bytes = encode_score(&events, idea.bpm())?;
    fs::write(path, bytes).map_err(io_err(path))
}

/// Synthesize `idea` and stream the WAV to `path`.
pub fn write_audio_file<R: Rng + ?Sized>(
    idea: &SongIdea,
    path: &Path,
    rng: &mut R,
) -> Result<(), RenderError> {
    let buffer = synthesize(idea, idea.bars(), rng)?;
    let file = File::create(path).map_err(io_err(path))?;
    let mut writer = BufWriter::new(file);
    write_pcm(&mut writer, buffer.samples(), buffer.sample_rate()).map_err(io_err(path))?;
    writer.flush().map_err(io_err(path))
}

/// Render `idea` into `dir` as `<stem>.mid` and/or `<stem>.wav`.
///
/// Creates `dir` if needed. The score is written before audio synthesis
/// starts, so a synthesis failure can leave a lone `.mid` behind.
pub fn render_song<R: Rng + ?Sized>(
    idea: &SongIdea,
    dir: &Path,
    stem: &str,
    format: OutputFormat,
    rng: &mut R,
) -> Result<RenderedFiles, RenderError> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let mut rendered = RenderedFiles::default();

    if format.wants_score() {
        let path = dir.join(format!("{stem}.mid"));
        write_score_file(idea, &path)?;
        info!("wrote score {}", path.display());
        rendered.score = Some(path);
    }

    if format.wants_audio() {
        let path = dir.join(format!("{stem}.wav"));
        write_audio_file(idea, &path, rng)?;
        info!("wrote audio {}", path.display());
        rendered.audio = Some(path);
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn idea() -> SongIdea {
        SongIdea::new("pop", vec!["drums".into()], 120, 1).unwrap()
    }

    #[test]
    fn both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let files = render_song(&idea(), dir.path(), "demo", OutputFormat::Both, &mut rng).unwrap();

        let score = files.score.unwrap();
        let audio = files.audio.unwrap();
        assert_eq!(score, dir.path().join("demo.mid"));
        assert_eq!(audio, dir.path().join("demo.wav"));
        assert_eq!(&fs::read(&score).unwrap()[0..4], b"MThd");
        // 1 bar at 120 BPM = 88200 samples.
        assert_eq!(fs::metadata(&audio).unwrap().len(), 44 + 88200 * 2);
    }

    #[test]
    fn score_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let files = render_song(&idea(), dir.path(), "s", OutputFormat::Score, &mut rng).unwrap();
        assert!(files.score.is_some());
        assert!(files.audio.is_none());
        assert!(!dir.path().join("s.wav").exists());
    }

    #[test]
    fn audio_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let files = render_song(&idea(), dir.path(), "a", OutputFormat::Audio, &mut rng).unwrap();
        assert!(files.score.is_none());
        assert!(files.audio.is_some());
    }

    #[test]
    fn creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("songs");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        render_song(&idea(), &nested, "x", OutputFormat::Score, &mut rng).unwrap();
        assert!(nested.join("x.mid").exists());
    }

    #[test]
    fn io_failure_is_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a dir").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = render_song(&idea(), &blocker, "x", OutputFormat::Both, &mut rng).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}

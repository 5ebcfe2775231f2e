//! songsmith: render a procedural song sketch to MIDI and WAV.

use clap::{Parser, ValueEnum};
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process;

use songsmith::config::SongsmithConfig;
use songsmith::idea::{generate_idea, FrequencyStats, SongIdea};
use songsmith::render::{render_song, OutputFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Score,
    Audio,
    Both,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Score => OutputFormat::Score,
            Format::Audio => OutputFormat::Audio,
            Format::Both => OutputFormat::Both,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "songsmith", version)]
#[command(about = "Compose a short procedural piece as a MIDI score and WAV audio", long_about = None)]
struct Args {
    /// Genre tag ("jazz" selects the walking-bass pattern)
    #[arg(long, default_value = "pop")]
    genre: String,

    /// Instrument name (repeatable)
    #[arg(long = "instrument", value_name = "NAME", default_value = "piano")]
    instruments: Vec<String>,

    /// Tempo in BPM [default: from config, else 120]
    #[arg(long)]
    bpm: Option<u32>,

    /// Number of 4/4 bars [default: from config, else 4]
    #[arg(long)]
    bars: Option<u32>,

    /// RNG seed for reproducible audio
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory [default: from config, else .]
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Output file stem
    #[arg(long, default_value = "song")]
    name: String,

    /// Load the song idea from a YAML file instead of flags
    #[arg(long, value_name = "FILE", conflicts_with = "stats")]
    idea: Option<PathBuf>,

    /// Generate the song idea from YAML frequency statistics
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,

    /// Which files to write
    #[arg(long, value_enum, default_value = "both")]
    format: Format,

    /// Verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn resolve_idea(
    args: &Args,
    config: &SongsmithConfig,
    rng: &mut ChaCha8Rng,
) -> Result<SongIdea, Box<dyn std::error::Error>> {
    let bars = args.bars.unwrap_or(config.default_bars);

    if let Some(path) = &args.idea {
        let source = std::fs::read_to_string(path)?;
        return Ok(SongIdea::from_yaml(&source)?);
    }

    if let Some(path) = &args.stats {
        let source = std::fs::read_to_string(path)?;
        let stats = FrequencyStats::from_yaml(&source)?;
        return Ok(generate_idea(&stats, bars, rng)?);
    }

    Ok(SongIdea::new(
        args.genre.clone(),
        args.instruments.clone(),
        args.bpm.unwrap_or(config.default_bpm),
        bars,
    )?)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = SongsmithConfig::load();

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => {
            info!("seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let idea = resolve_idea(&args, &config, &mut rng)?;
    info!("composing {idea}");

    let out_dir = args.out_dir.clone().unwrap_or(config.output_dir);
    let files = render_song(&idea, &out_dir, &args.name, args.format.into(), &mut rng)?;

    for path in files.score.iter().chain(files.audio.iter()) {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialize logging: {e}");
    }

    if let Err(e) = run(args) {
        error!("{e}");
        process::exit(1);
    }
}

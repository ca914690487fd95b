//! File-based rendering command.

use super::common::{parse_key_val, print_levels};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use vocosync_config::{NoteCue, Session, TimingMode, parse_param_value};
use vocosync_io::{OfflineRenderer, ScheduledNote, WavSpec, read_wav_planar, write_wav_planar};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Session file (TOML)
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Note cue, samples or seconds (e.g., "0:69", "1.5s:72"); repeatable
    #[arg(short, long = "note", value_name = "TIME:NOTE")]
    notes: Vec<NoteCue>,

    /// Effect parameters (e.g., "mix=50", "transpose=-12", "output=-3dB")
    #[arg(long, value_parser = parse_key_val)]
    param: Vec<(String, String)>,

    /// Resting MIDI note before the first cue
    #[arg(long)]
    default_note: Option<u8>,

    /// Processing block size
    #[arg(long)]
    block_size: Option<usize>,

    /// Where cues take effect inside a block (block or sample)
    #[arg(long)]
    timing: Option<TimingMode>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let session = build_session(&args)?;

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav_planar(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let frames = channels.first().map_or(0, Vec::len);
    let sample_rate = spec.sample_rate;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        channels.len(),
        sample_rate,
        frames as f64 / f64::from(sample_rate)
    );
    if session.sample_rate != sample_rate {
        tracing::debug!(
            session = session.sample_rate,
            file = sample_rate,
            "using the input file's sample rate"
        );
    }

    let schedule: Vec<ScheduledNote> = session
        .schedule(sample_rate)
        .into_iter()
        .map(|(at, note)| ScheduledNote::new(at, note))
        .collect();
    println!(
        "Session '{}': {} note(s), block {}, {} timing",
        session.name,
        schedule.len(),
        session.block_size,
        session.timing
    );

    let input_mono = channels.first().cloned().unwrap_or_default();
    let mut renderer = OfflineRenderer::new(session.build_vocoder(sample_rate as f32), session.block_size)
        .with_timing(session.event_timing())
        .with_schedule(schedule);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    renderer.render_with_progress(&mut channels, sample_rate as f32, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    println!("\nStats:");
    print_levels("Input:", &input_mono);
    print_levels("Output:", channels.first().map_or(&[][..], Vec::as_slice));

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    println!("\nWriting {}...", args.output.display());
    write_wav_planar(&args.output, &channels, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

/// Session file (or defaults) with the command-line overrides applied.
fn build_session(args: &ProcessArgs) -> anyhow::Result<Session> {
    let mut session = match &args.session {
        Some(path) => {
            let session = Session::load(path)?;
            println!("Loading session: {}", session.name);
            session
        }
        None => Session::default(),
    };

    if let Some(note) = args.default_note {
        session.default_note = note;
    }
    if let Some(block_size) = args.block_size {
        session.block_size = block_size;
    }
    if let Some(timing) = args.timing {
        session.timing = timing;
    }
    session.notes.extend(args.notes.iter().copied());

    for (key, value) in &args.param {
        let parsed = parse_param_value(value)
            .ok_or_else(|| anyhow::anyhow!("Invalid value for '{}': '{}'", key, value))?;
        session.params.set(key, parsed)?;
    }

    session.validate()?;
    Ok(session)
}

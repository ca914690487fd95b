//! WAV metadata command.

use super::common::print_levels;
use clap::Args;
use std::path::PathBuf;
use vocosync_io::{WavFormat, read_wav_info, read_wav_planar};

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Also load the samples and print per-channel levels
    #[arg(long)]
    levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let encoding = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("{}", args.file.display());
    println!("  Encoding:    {} {}-bit", encoding, info.bits_per_sample);
    println!("  Channels:    {}", info.channels);
    println!("  Sample Rate: {} Hz", info.sample_rate);
    println!(
        "  Length:      {} frames, {:.3}s",
        info.num_frames, info.duration_secs
    );

    if args.levels {
        let (channels, _) = read_wav_planar(&args.file)?;
        println!();
        for (i, channel) in channels.iter().enumerate() {
            print_levels(&format!("Ch {}:", i + 1), channel);
        }
    }

    Ok(())
}

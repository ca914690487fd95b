//! Shared CLI helpers used across multiple commands.

use std::path::Path;
use vocosync_core::{linear_to_db, peak, rms};
use vocosync_io::{WavSpec, write_wav};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        ));
    };
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Print RMS and peak of `samples` in dB under `label`.
pub fn print_levels(label: &str, samples: &[f32]) {
    println!(
        "  {label:7} RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(samples)),
        linear_to_db(peak(samples))
    );
}

/// Write a mono 32-bit float WAV and report it.
pub fn write_mono(output: &Path, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(output, samples, spec)?;
    println!("Wrote {} samples to {}", samples.len(), output.display());
    Ok(())
}

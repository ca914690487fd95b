//! Test signal generation command.

use super::common::write_mono;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a single impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "44100")]
        length: usize,

        /// Sample index of the impulse
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "220.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate a periodic impulse train, a crude glottal source
    Pulses {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Pulse rate in Hz
        #[arg(long, default_value = "110.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Pulse amplitude
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Impulse {
            output,
            length,
            offset,
            sample_rate,
            amplitude,
        } => {
            println!("Generating impulse...");
            if offset >= length {
                anyhow::bail!("Impulse offset {} is past the end ({} samples)", offset, length);
            }
            let mut samples = vec![0.0; length];
            samples[offset] = amplitude;
            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating {:.1} Hz tone...", freq);
            let samples = tone(freq, duration, sample_rate, amplitude);
            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Pulses {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating {:.1} Hz pulse train...", freq);
            if freq.is_nan() || freq <= 0.0 {
                anyhow::bail!("Pulse rate must be positive");
            }
            let samples = pulse_train(freq, duration, sample_rate, amplitude);
            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Silence {
            output,
            duration,
            sample_rate,
        } => {
            println!("Generating silence...");
            let samples = vec![0.0; frames_for(duration, sample_rate)];
            write_mono(&output, &samples, sample_rate)?;
        }
    }

    Ok(())
}

fn frames_for(duration: f32, sample_rate: u32) -> usize {
    (f64::from(duration.max(0.0)) * f64::from(sample_rate)) as usize
}

fn tone(freq: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let step = f64::from(freq) / f64::from(sample_rate);
    (0..frames_for(duration, sample_rate))
        .map(|i| (core::f64::consts::TAU * step * i as f64).sin() as f32 * amplitude)
        .collect()
}

/// One sample of `amplitude` each time the pulse phase wraps, the first at 0.
fn pulse_train(freq: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let step = f64::from(freq) / f64::from(sample_rate);
    let mut phase = 1.0;
    (0..frames_for(duration, sample_rate))
        .map(|_| {
            let out = if phase >= 1.0 {
                phase -= 1.0;
                amplitude
            } else {
                0.0
            };
            phase += step;
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_train_spacing() {
        let pulses = pulse_train(64.0, 0.0625, 8192, 1.0);
        let hits: Vec<usize> = pulses
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s != 0.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![0, 128, 256, 384]);
    }

    #[test]
    fn test_tone_length_and_level() {
        let t = tone(100.0, 0.5, 8000, 0.25);
        assert_eq!(t.len(), 4000);
        assert!(t.iter().all(|s| s.abs() <= 0.25));
        assert_eq!(t[0], 0.0);
    }
}

//! Audio file I/O and offline rendering for vocosync.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_planar`], [`read_wav`], [`write_wav`],
//!   [`write_wav_planar`] and [`read_wav_info`]
//! - **Offline rendering**: [`OfflineRenderer`] drives a
//!   [`Vocoder`](vocosync_effects::Vocoder) block by block with a timed note
//!   schedule, the way a plugin host would
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vocosync_effects::Vocoder;
//! use vocosync_io::{OfflineRenderer, ScheduledNote, read_wav_planar, write_wav_planar};
//!
//! let (mut channels, spec) = read_wav_planar("voice.wav")?;
//! let mut renderer = OfflineRenderer::new(Vocoder::new(spec.sample_rate as f32), 512)
//!     .with_schedule(vec![ScheduledNote::new(0, 57), ScheduledNote::new(44100, 60)]);
//! renderer.render(&mut channels, spec.sample_rate as f32)?;
//! write_wav_planar("robot.wav", &channels, spec)?;
//! # Ok::<(), vocosync_io::Error>(())
//! ```

mod renderer;
mod wav;

pub use renderer::{OfflineRenderer, ScheduledNote};
pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_planar, write_wav,
    write_wav_planar,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Planar buffers disagree in count or length.
    #[error("Channel mismatch: expected {expected}, found {found}")]
    ChannelMismatch {
        /// Expected channel count or frame length.
        expected: usize,
        /// What was supplied.
        found: usize,
    },

    /// Bit depth other than 16, 24 or 32.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Vocosync Effects - pitch-synchronous autocorrelation resynthesis
//!
//! - [`ResynthKernel`] - The bare per-sample core: leaky autocorrelation,
//!   phase-wrap trigger, windowed overlap-add into a 256-slot ring
//! - [`Vocoder`] - The host-facing effect: mix, transpose and output level
//!   parameters, note-event pitch hints, planar channel broadcast
//!
//! ## Example
//!
//! ```rust
//! use vocosync_core::{EventTiming, NoteEvent, ParameterInfo};
//! use vocosync_effects::Vocoder;
//!
//! let mut vocoder = Vocoder::new(44100.0);
//! vocoder.set_param(1, 12.0); // transpose up an octave
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! left[0] = 1.0;
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! vocoder.process_planar(&mut channels, &[NoteEvent::note_on(0, 57)], EventTiming::BlockStart);
//! assert_eq!(left, right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod kernel;
pub mod vocoder;

pub use kernel::{DEFAULT_NOTE, DEFAULT_SAMPLE_RATE, MAX_NOTE, ResynthKernel, note_increment};
pub use vocoder::{TRANSPOSE_RANGE, Vocoder};

//! Vocosync Core - DSP primitives for pitch-synchronous resynthesis
//!
//! Building blocks for a resynthesizer that tracks a signal's short-term
//! autocorrelation and re-emits it as a periodic, windowed pulse train locked
//! to an externally supplied pitch. Everything here is fixed-size and
//! allocation-free.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe per-sample processing trait
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Discoverable parameters
//! - [`SmoothedParam`] - Zipper-free parameter changes
//!
//! ## Resynthesis Primitives
//!
//! - [`Ring256`] - 256-slot circular buffer indexed by a wrapping `u8`
//! - [`LeakyAutocorrelator`] - Exponentially weighted autocorrelation, lags 0..128
//! - [`PhaseAccumulator`] - Wrapping 32-bit phase used as a pitch-period trigger
//! - [`HannWindow`] - Precomputed 256-point window
//! - [`overlap_add_grain`] - Normalized, windowed grain written into a ring
//!
//! ## Events
//!
//! - [`MidiMessage`], [`NoteEvent`], [`EventTiming`] - Pitch hints inside a block
//!
//! ## Utilities
//!
//! - [`db_to_linear`], [`linear_to_db`], [`wet_dry_mix`], [`midi_to_freq`]
//! - [`gain`] - Output level parameter contract
//!
//! # no_std Support
//!
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! vocosync-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use vocosync_core::{HannWindow, LeakyAutocorrelator, PhaseAccumulator, Ring256, overlap_add_grain, phase_increment};
//!
//! let window = HannWindow::new();
//! let mut x = Ring256::new();
//! let mut y = Ring256::new();
//! let mut acf = LeakyAutocorrelator::new();
//! let mut osc = PhaseAccumulator::new(phase_increment(220.0, 44100.0));
//! let mut pos: u8 = 0;
//!
//! for n in 0..1024 {
//!     x[pos] = if n % 200 == 0 { 1.0 } else { 0.0 };
//!     acf.update(&x, pos);
//!     if osc.advance() {
//!         overlap_add_grain(&mut y, pos, acf.lags(), &window);
//!     }
//!     let _out = y.take(pos);
//!     pos = pos.wrapping_add(1);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod autocorr;
pub mod effect;
pub mod gain;
pub mod grain;
pub mod math;
pub mod midi;
pub mod param;
pub mod param_info;
pub mod phase;
pub mod ring;
pub mod window;

pub use autocorr::{BLEND, DECAY, LAG_COUNT, LeakyAutocorrelator};
pub use effect::Effect;
pub use grain::{GRAIN_EPSILON, GRAIN_LEN, grain_scale, overlap_add_grain};
pub use math::{db_to_linear, linear_to_db, midi_to_freq, peak, rms, wet_dry_mix};
pub use midi::{EventTiming, MidiMessage, NoteEvent};
pub use param::{STANDARD_SMOOTHING_MS, SmoothedParam};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use phase::{PhaseAccumulator, phase_increment};
pub use ring::{RING_LEN, Ring256};
pub use window::{HannWindow, WINDOW_LEN};

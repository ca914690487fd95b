//! Math helpers for the signal path.
//!
//! All functions are allocation-free and `no_std`; transcendental functions go
//! through `libm` so results match across targets.
//!
//! - [`db_to_linear`] / [`linear_to_db`]: level conversions
//! - [`wet_dry_mix`]: dry/wet crossfade, exact at both endpoints
//! - [`midi_to_freq`]: equal-tempered note frequency
//! - [`rms`] / [`peak`]: buffer level statistics

use libm::{expf, logf, pow};

/// Convert decibels to linear gain. `db_to_linear(0.0)` is exactly `1.0`.
///
/// ```rust
/// use vocosync_core::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Inputs below `1e-10` are floored.
///
/// ```rust
/// use vocosync_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-6);
/// assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Crossfade between dry and wet signals.
///
/// Evaluated as `dry * (1 - mix) + wet * mix`, so `mix == 1.0` returns `wet`
/// and `mix == 0.0` returns `dry` without rounding residue.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Frequency in Hz of a (possibly fractional) MIDI note, A4 = note 69 = 440 Hz.
///
/// Computed in `f64`.
///
/// ```rust
/// use vocosync_core::midi_to_freq;
///
/// assert_eq!(midi_to_freq(69.0), 440.0);
/// assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-9);
/// ```
#[inline]
pub fn midi_to_freq(note: f64) -> f64 {
    440.0 * pow(2.0, (note - 69.0) / 12.0)
}

/// Root-mean-square level of a buffer. Empty buffers are silent.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    libm::sqrt(sum / samples.len() as f64) as f32
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, &s| acc.max(s.abs()))
}

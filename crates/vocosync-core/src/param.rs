//! Parameter smoothing for zipper-free changes.
//!
//! User-facing controls (mix, output level) must not jump between samples or
//! they produce audible "zipper noise". [`SmoothedParam`] runs a one-pole
//! lowpass toward its target, one step per sample.
//!
//! ## Usage
//!
//! ```rust
//! use vocosync_core::SmoothedParam;
//!
//! let mut level = SmoothedParam::standard(1.0, 48000.0);
//! level.set_target(0.5);
//!
//! for _ in 0..4800 {
//!     let _gain = level.advance();
//! }
//! assert!((level.get() - 0.5).abs() < 1e-3);
//! ```

use libm::expf;

/// Smoothing time used by every vocosync effect parameter.
pub const STANDARD_SMOOTHING_MS: f32 = 10.0;

/// A parameter with built-in exponential smoothing.
///
/// Once `current == target` the value is exactly stable: advancing adds
/// `coeff * 0.0`, so a parameter parked at its default never perturbs the
/// signal path.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    /// 0 = frozen, 1 = instant.
    coeff: f32,
    sample_rate: f32,
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a parameter with smoothing disabled (instant changes).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 44100.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Create a parameter with the standard 10 ms smoothing.
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, STANDARD_SMOOTHING_MS)
    }

    /// Set the value to smooth towards.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Advance by one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// `coeff = 1 - exp(-1 / (tau * sample_rate))` with `tau` in seconds.
    ///
    /// After five time constants the value sits within 0.7 % of the target.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

//! Leaky running autocorrelation over lags 0..128.
//!
//! Every sample, each lag estimate decays and blends in the newest product:
//!
//! ```text
//! R[L] = R[L] * 0.9975 + (0.0025 * x[now]) * x[now - L]
//! ```
//!
//! giving an exponentially weighted estimate with a time constant of about
//! 400 samples. `R[0]` is the running energy; it is a sum of non-negative
//! terms scaled by positive constants, so it never goes negative.
//!
//! ```rust
//! use vocosync_core::{LeakyAutocorrelator, Ring256};
//!
//! let mut history = Ring256::new();
//! let mut acf = LeakyAutocorrelator::new();
//! history[0] = 1.0;
//! acf.update(&history, 0);
//! assert_eq!(acf.energy(), 0.0025);
//! assert_eq!(acf.lags()[1], 0.0);
//! ```

use crate::Ring256;

/// Number of lags tracked.
pub const LAG_COUNT: usize = 128;

/// Per-sample decay of every lag estimate.
pub const DECAY: f32 = 0.9975;

/// Weight of the newest product, `1 - DECAY`.
pub const BLEND: f32 = 0.0025;

/// Exponentially weighted autocorrelation profile.
#[derive(Debug, Clone)]
pub struct LeakyAutocorrelator {
    lags: [f32; LAG_COUNT],
}

impl LeakyAutocorrelator {
    /// All lags zero.
    pub const fn new() -> Self {
        Self {
            lags: [0.0; LAG_COUNT],
        }
    }

    /// Fold in the sample at `history[now]`.
    ///
    /// `history` must already contain the newest sample at `now`; lag `L`
    /// reads `history[now - L]` with 8-bit wraparound.
    #[inline]
    pub fn update(&mut self, history: &Ring256, now: u8) {
        let scaled = BLEND * history[now];
        let mut rd = now;
        for r in &mut self.lags {
            *r = *r * DECAY + scaled * history[rd];
            rd = rd.wrapping_sub(1);
        }
    }

    /// `R[0]`, the running energy estimate.
    #[inline]
    pub fn energy(&self) -> f32 {
        self.lags[0]
    }

    /// The full profile, lag 0 first.
    #[inline]
    pub fn lags(&self) -> &[f32; LAG_COUNT] {
        &self.lags
    }

    /// Zero every lag.
    pub fn clear(&mut self) {
        self.lags.fill(0.0);
    }
}

impl Default for LeakyAutocorrelator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_reads_wrap_below_zero() {
        let mut history = Ring256::new();
        history[255] = 2.0;
        history[0] = 1.0;
        let mut acf = LeakyAutocorrelator::new();
        acf.update(&history, 0);
        assert_eq!(acf.lags()[0], BLEND);
        assert_eq!(acf.lags()[1], BLEND * 2.0);
        assert_eq!(acf.lags()[2], 0.0);
    }

    #[test]
    fn decays_geometrically_on_silence() {
        let mut history = Ring256::new();
        history[0] = 1.0;
        let mut acf = LeakyAutocorrelator::new();
        acf.update(&history, 0);
        history[1] = 0.0;
        acf.update(&history, 1);
        assert_eq!(acf.energy(), BLEND * DECAY);
    }

    #[test]
    fn dc_input_converges_to_square() {
        let mut history = Ring256::new();
        let mut acf = LeakyAutocorrelator::new();
        let mut pos: u8 = 0;
        for _ in 0..20_000 {
            history[pos] = 0.5;
            acf.update(&history, pos);
            pos = pos.wrapping_add(1);
        }
        for &r in acf.lags() {
            assert!((r - 0.25).abs() < 1e-3, "got {r}");
        }
    }

    #[test]
    fn clear_resets_profile() {
        let mut history = Ring256::new();
        history[3] = 1.0;
        let mut acf = LeakyAutocorrelator::new();
        acf.update(&history, 3);
        acf.clear();
        assert!(acf.lags().iter().all(|&r| r == 0.0));
    }
}

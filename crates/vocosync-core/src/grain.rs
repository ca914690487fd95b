//! Windowed overlap-add of one autocorrelation grain.
//!
//! A grain is the autocorrelation profile mirrored into a symmetric pulse:
//! the high lags reversed (127 down to 1) under the rising half of the Hann
//! window, then lags 0 to 127 under the falling half. The whole grain is
//! scaled by `1 / sqrt(R[0] + 2^-10)` so its level follows the input's
//! normalized spectrum rather than its loudness.
//!
//! Writing starts at the anchor slot:
//!
//! ```text
//! slot anchor + (k - 1)   += R[128 - k] * w[k]       * scale,  k = 1..128
//! slot anchor + 127 + k   += R[k]       * w[k + 128] * scale,  k = 0..128
//! ```
//!
//! 255 slots in total, so a grain never wraps onto its own first slot. The
//! peak (`R[0] * w[128]`) lands 127 slots after the anchor. Grains are added,
//! never assigned, so consecutive grains superpose.

use crate::autocorr::LAG_COUNT;
use crate::{HannWindow, Ring256};
use libm::sqrtf;

/// Energy floor added under the square root, `2^-10`.
pub const GRAIN_EPSILON: f32 = 1.0 / 1024.0;

/// Number of slots one grain touches.
pub const GRAIN_LEN: usize = 2 * LAG_COUNT - 1;

/// Gain normalization for a profile with energy `r0`.
///
/// Finite for every `r0 >= 0`; at silence it is `32.0`.
#[inline]
pub fn grain_scale(r0: f32) -> f32 {
    1.0 / sqrtf(r0 + GRAIN_EPSILON)
}

/// Add one grain built from `profile` into `out`, starting at `anchor`.
#[inline]
pub fn overlap_add_grain(
    out: &mut Ring256,
    anchor: u8,
    profile: &[f32; LAG_COUNT],
    window: &HannWindow,
) {
    let scale = grain_scale(profile[0]);
    let mut wy = anchor;
    for k in 1..LAG_COUNT {
        out[wy] += profile[LAG_COUNT - k] * window.get(k) * scale;
        wy = wy.wrapping_add(1);
    }
    for k in 0..LAG_COUNT {
        out[wy] += profile[k] * window.get(k + LAG_COUNT) * scale;
        wy = wy.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_profile(r0: f32) -> [f32; LAG_COUNT] {
        let mut p = [0.0; LAG_COUNT];
        p[0] = r0;
        p
    }

    #[test]
    fn silence_scale_is_32() {
        assert_eq!(grain_scale(0.0), 32.0);
    }

    #[test]
    fn impulse_profile_lands_on_peak_slot() {
        let window = HannWindow::new();
        let mut out = Ring256::new();
        let r0 = 0.01;
        overlap_add_grain(&mut out, 10, &impulse_profile(r0), &window);

        let expected = r0 * window.get(128) * grain_scale(r0);
        assert_eq!(out[10 + 127], expected);
        let nonzero = out.as_slice().iter().filter(|&&s| s != 0.0).count();
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn grain_spans_255_slots_and_skips_one() {
        let window = HannWindow::new();
        let mut out = Ring256::new();
        let profile = [1.0; LAG_COUNT];
        overlap_add_grain(&mut out, 200, &profile, &window);

        // The slot just before the anchor is never written.
        assert_eq!(out[199], 0.0);
        // w[0] is never read, so the anchor slot carries w[1].
        assert!(out[200] > 0.0);
        // Last forward term uses w[255], wrapping to 200 + 254 = 198.
        assert!(out[198] > 0.0);
    }

    #[test]
    fn reversed_lags_fill_slots_from_the_anchor_forward() {
        let window = HannWindow::new();
        let anchor = 250u8;
        let scale = grain_scale(0.0);

        for lag in 1..LAG_COUNT {
            let mut profile = [0.0; LAG_COUNT];
            profile[lag] = 1.0;
            let mut out = Ring256::new();
            overlap_add_grain(&mut out, anchor, &profile, &window);

            // Rising half: lag L at anchor + (127 - L), weight w[128 - L].
            let rising = anchor.wrapping_add((LAG_COUNT - 1 - lag) as u8);
            assert_eq!(out[rising], window.get(LAG_COUNT - lag) * scale, "lag {lag}");
            // Falling half: lag L at anchor + 127 + L, weight w[128 + L].
            let falling = anchor.wrapping_add((LAG_COUNT - 1 + lag) as u8);
            assert_eq!(out[falling], window.get(LAG_COUNT + lag) * scale, "lag {lag}");
            // Nothing lands behind the anchor.
            assert_eq!(out[anchor.wrapping_sub(1)], 0.0);
        }
    }

    #[test]
    fn grains_superpose() {
        let window = HannWindow::new();
        let mut a = [0.0; LAG_COUNT];
        let mut b = [0.0; LAG_COUNT];
        for i in 0..LAG_COUNT {
            a[i] = 0.02 * (i as f32 * 0.1).cos();
            b[i] = 0.01 * (i as f32 * 0.37).sin();
        }
        a[0] = 0.02;
        b[0] = 0.01;

        let mut both = Ring256::new();
        overlap_add_grain(&mut both, 0, &a, &window);
        overlap_add_grain(&mut both, 64, &b, &window);

        let mut only_a = Ring256::new();
        overlap_add_grain(&mut only_a, 0, &a, &window);
        let mut only_b = Ring256::new();
        overlap_add_grain(&mut only_b, 64, &b, &window);

        for i in 0..=255u8 {
            let sum = only_a[i] + only_b[i];
            assert!((both[i] - sum).abs() <= 1e-6 * (1.0 + sum.abs()));
        }
    }
}

//! Wrapping 32-bit phase accumulator used as a periodic trigger.
//!
//! The full `u32` range is one cycle. Each sample adds `increment`; the sample
//! on which the addition overflows is a trigger. With an increment of
//! `freq * 2^32 / sample_rate` that is one trigger per period, with the
//! fractional remainder carried in the phase so long-run timing stays exact.
//!
//! ```rust
//! use vocosync_core::PhaseAccumulator;
//!
//! // 2^30 per sample: one trigger every 4 samples.
//! let mut osc = PhaseAccumulator::new(1 << 30);
//! let fired: Vec<bool> = (0..8).map(|_| osc.advance()).collect();
//! assert_eq!(fired, [false, false, false, true, false, false, false, true]);
//! ```

/// One full cycle, `2^32`.
const CYCLE: f64 = 4_294_967_296.0;

/// Per-sample increment for `freq_hz` at `sample_rate`.
///
/// Computed in `f64`, truncated toward zero and clamped to `[1, u32::MAX]`:
/// the increment is never zero, and frequencies at or above the sample rate
/// saturate instead of aliasing. The result can differ from an all-`f32`
/// evaluation by a few LSB (440 Hz at 44.1 kHz gives 42852281 here, 42852280
/// in `f32`).
///
/// ```rust
/// use vocosync_core::phase_increment;
///
/// assert_eq!(phase_increment(44100.0 / 64.0, 44100.0), 1 << 26);
/// assert_eq!(phase_increment(0.0, 44100.0), 1);
/// assert_eq!(phase_increment(1.0e9, 44100.0), u32::MAX);
/// ```
pub fn phase_increment(freq_hz: f64, sample_rate: f64) -> u32 {
    let delta = freq_hz * CYCLE / sample_rate;
    if delta.is_nan() || delta < 1.0 {
        1
    } else if delta >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        delta as u32
    }
}

/// Wrapping phase plus its per-sample increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAccumulator {
    phase: u32,
    increment: u32,
}

impl PhaseAccumulator {
    /// Phase 0 with the given increment (0 is raised to 1).
    pub const fn new(increment: u32) -> Self {
        Self {
            phase: 0,
            increment: if increment == 0 { 1 } else { increment },
        }
    }

    /// Advance one sample; `true` when the phase wrapped.
    #[inline]
    pub fn advance(&mut self) -> bool {
        let (next, wrapped) = self.phase.overflowing_add(self.increment);
        self.phase = next;
        wrapped
    }

    /// Replace the increment. Phase continues from where it is.
    #[inline]
    pub fn set_increment(&mut self, increment: u32) {
        self.increment = increment.max(1);
    }

    /// Current increment.
    #[inline]
    pub fn increment(&self) -> u32 {
        self.increment
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Return the phase to 0, keeping the increment.
    pub fn reset(&mut self) {
        self.phase = 0;
    }
}

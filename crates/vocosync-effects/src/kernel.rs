//! Per-sample resynthesis kernel.
//!
//! One state record, four cooperating parts:
//!
//! 1. **Trigger**: a wrapping 32-bit phase advanced by a pitch-derived
//!    increment; each overflow starts one grain.
//! 2. **Analysis**: a leaky autocorrelation of the input over lags 0..128.
//! 3. **Synthesis**: on each trigger, a normalized, Hann-windowed copy of the
//!    autocorrelation profile is overlap-added into the output ring.
//! 4. **I/O**: input history and output accumulator, 256 slots each, sharing
//!    one `u8` cursor.
//!
//! Per sample, in order: store input at the cursor, update the
//! autocorrelation, advance the phase, add a grain anchored at the cursor if
//! the phase wrapped, read and clear the output slot at the cursor, advance
//! the cursor.
//!
//! The kernel knows nothing about parameters or events; see
//! [`Vocoder`](crate::Vocoder) for the host-facing wrapper.

use vocosync_core::{
    Effect, HannWindow, LAG_COUNT, LeakyAutocorrelator, PhaseAccumulator, Ring256, midi_to_freq,
    overlap_add_grain, phase_increment,
};

/// Pitch used until the first hint and after every reset (A3, 220 Hz).
pub const DEFAULT_NOTE: u8 = 57;

/// Sample rate assumed by [`ResynthKernel::default`].
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Highest accepted MIDI note.
pub const MAX_NOTE: u8 = 127;

/// Phase increment for MIDI `note` at `sample_rate`.
///
/// ```rust
/// use vocosync_effects::note_increment;
///
/// assert_eq!(note_increment(69, 44100.0), 42_852_281);
/// ```
pub fn note_increment(note: u8, sample_rate: f32) -> u32 {
    phase_increment(midi_to_freq(f64::from(note)), f64::from(sample_rate))
}

/// Bare resynthesis core: no parameters, no smoothing, no events.
///
/// # Example
///
/// ```rust
/// use vocosync_core::Effect;
/// use vocosync_effects::ResynthKernel;
///
/// let mut kernel = ResynthKernel::new(44100.0);
/// kernel.set_pitch_hint(69);
/// let out: Vec<f32> = (0..512).map(|n| kernel.process(if n == 0 { 1.0 } else { 0.0 })).collect();
/// assert!(out.iter().any(|&s| s != 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ResynthKernel {
    input: Ring256,
    output: Ring256,
    acf: LeakyAutocorrelator,
    osc: PhaseAccumulator,
    window: HannWindow,
    pos: u8,
    sample_rate: f32,
    default_note: u8,
    triggers: u64,
}

impl ResynthKernel {
    /// Kernel at `sample_rate` with the default pitch.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_default_note(sample_rate, DEFAULT_NOTE)
    }

    /// Kernel at `sample_rate` whose resting pitch is `default_note`.
    pub fn with_default_note(sample_rate: f32, default_note: u8) -> Self {
        let sample_rate = if valid_rate(sample_rate) {
            sample_rate
        } else {
            DEFAULT_SAMPLE_RATE
        };
        let default_note = default_note.min(MAX_NOTE);
        Self {
            input: Ring256::new(),
            output: Ring256::new(),
            acf: LeakyAutocorrelator::new(),
            osc: PhaseAccumulator::new(note_increment(default_note, sample_rate)),
            window: HannWindow::new(),
            pos: 0,
            sample_rate,
            default_note,
            triggers: 0,
        }
    }

    /// Retune to MIDI `note` (clamped to 127), effective from the next sample.
    ///
    /// The phase is left alone, so the next trigger comes when the running
    /// phase wraps at the new rate.
    #[inline]
    pub fn set_pitch_hint(&mut self, note: u8) {
        self.osc
            .set_increment(note_increment(note.min(MAX_NOTE), self.sample_rate));
    }

    /// Change the resting pitch. Takes effect at the next reset.
    pub fn set_default_note(&mut self, note: u8) {
        self.default_note = note.min(MAX_NOTE);
        #[cfg(feature = "tracing")]
        tracing::debug!("kernel: default note {}", self.default_note);
    }

    /// Resting pitch.
    pub fn default_note(&self) -> u8 {
        self.default_note
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current per-sample phase increment.
    pub fn phase_increment(&self) -> u32 {
        self.osc.increment()
    }

    /// Current autocorrelation estimate, lag 0 first.
    pub fn autocorrelation(&self) -> &[f32; LAG_COUNT] {
        self.acf.lags()
    }

    /// Shared ring cursor.
    pub fn position(&self) -> u8 {
        self.pos
    }

    /// Grains synthesized since the last reset.
    pub fn trigger_count(&self) -> u64 {
        self.triggers
    }
}

impl Default for ResynthKernel {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl Effect for ResynthKernel {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let pos = self.pos;
        self.input[pos] = input;
        self.acf.update(&self.input, pos);
        if self.osc.advance() {
            overlap_add_grain(&mut self.output, pos, self.acf.lags(), &self.window);
            self.triggers += 1;
        }
        let out = self.output.take(pos);
        self.pos = pos.wrapping_add(1);
        out
    }

    /// Changes the rate and resets. Non-positive or non-finite rates keep the
    /// previous rate (and trip a debug assertion).
    fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(
            valid_rate(sample_rate),
            "sample rate must be positive and finite, got {sample_rate}"
        );
        if valid_rate(sample_rate) {
            self.sample_rate = sample_rate;
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.acf.clear();
        self.pos = 0;
        self.osc = PhaseAccumulator::new(note_increment(self.default_note, self.sample_rate));
        self.triggers = 0;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "kernel reset: {} Hz, note {}, increment {}",
            self.sample_rate,
            self.default_note,
            self.osc.increment()
        );
    }
}

fn valid_rate(sample_rate: f32) -> bool {
    sample_rate.is_finite() && sample_rate > 0.0
}

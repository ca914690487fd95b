//! Integration tests for vocosync-core primitives.
//!
//! Drives the ring, autocorrelator, phase trigger and grain writer together
//! the way the resynthesis loop does, and checks signal-level behaviour:
//! trigger pacing, periodic autocorrelation profiles, impulse grains and decay
//! on silence.

use vocosync_core::{
    GRAIN_EPSILON, HannWindow, LAG_COUNT, LeakyAutocorrelator, PhaseAccumulator, Ring256,
    SmoothedParam, grain_scale, midi_to_freq, overlap_add_grain, phase_increment,
};

const SAMPLE_RATE: f64 = 44100.0;

/// Minimal loop over the primitives, one call per sample.
struct Loop {
    x: Ring256,
    y: Ring256,
    acf: LeakyAutocorrelator,
    osc: PhaseAccumulator,
    window: HannWindow,
    pos: u8,
    triggers: Vec<usize>,
    n: usize,
}

impl Loop {
    fn new(increment: u32) -> Self {
        Self {
            x: Ring256::new(),
            y: Ring256::new(),
            acf: LeakyAutocorrelator::new(),
            osc: PhaseAccumulator::new(increment),
            window: HannWindow::new(),
            pos: 0,
            triggers: Vec::new(),
            n: 0,
        }
    }

    fn step(&mut self, input: f32) -> f32 {
        self.x[self.pos] = input;
        self.acf.update(&self.x, self.pos);
        if self.osc.advance() {
            overlap_add_grain(&mut self.y, self.pos, self.acf.lags(), &self.window);
            self.triggers.push(self.n);
        }
        let out = self.y.take(self.pos);
        self.pos = self.pos.wrapping_add(1);
        self.n += 1;
        out
    }
}

// ============================================================================
// Trigger pacing
// ============================================================================

#[test]
fn exact_period_fires_once_every_64_samples() {
    let inc = phase_increment(SAMPLE_RATE / 64.0, SAMPLE_RATE);
    assert_eq!(inc, 1 << 26);
    let mut lp = Loop::new(inc);
    for _ in 0..64 * 50 {
        lp.step(0.0);
    }
    assert_eq!(lp.triggers.len(), 50);
    for pair in lp.triggers.windows(2) {
        assert_eq!(pair[1] - pair[0], 64);
    }
}

#[test]
fn fractional_period_stays_within_one_sample() {
    // 220 Hz at 44.1 kHz is 200.45 samples per period.
    let inc = phase_increment(midi_to_freq(57.0), SAMPLE_RATE);
    let mut lp = Loop::new(inc);
    for _ in 0..44100 {
        lp.step(0.0);
    }
    assert!((219..=221).contains(&lp.triggers.len()));
    for pair in lp.triggers.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap == 200 || gap == 201, "gap {gap}");
    }
}

// ============================================================================
// Autocorrelation profile
// ============================================================================

#[test]
fn periodic_input_gives_periodic_profile() {
    let period = 32;
    let mut lp = Loop::new(phase_increment(440.0, SAMPLE_RATE));
    for n in 0..20_000 {
        let phase = (n % period) as f32 / period as f32;
        let s = libm::sinf(core::f32::consts::TAU * phase) * 0.5;
        lp.step(s);
    }
    let r = lp.acf.lags();
    for lag in 0..LAG_COUNT - period {
        assert!(
            (r[lag] - r[lag + period]).abs() < 1e-4,
            "lag {lag}: {} vs {}",
            r[lag],
            r[lag + period]
        );
    }
    // Half a period away the sine is anti-correlated.
    assert!(r[period / 2] < 0.0);
    assert!(r[0] > 0.0);
}

#[test]
fn energy_never_negative_for_mixed_signal() {
    let mut lp = Loop::new(phase_increment(330.0, SAMPLE_RATE));
    for n in 0..5000 {
        let s = if n % 3 == 0 { -0.9 } else { 0.4 };
        lp.step(s);
        assert!(lp.acf.energy() >= 0.0);
    }
}

// ============================================================================
// Impulse grain
// ============================================================================

#[test]
fn impulse_produces_single_normalized_peak_after_first_trigger() {
    // A4 at 44.1 kHz first triggers at sample 100; the grain peak sits 127
    // slots after the anchor.
    let mut lp = Loop::new(phase_increment(440.0, SAMPLE_RATE));
    let mut out = Vec::new();
    out.push(lp.step(1.0));
    for _ in 1..300 {
        out.push(lp.step(0.0));
    }
    assert_eq!(lp.triggers[0], 100);

    // Only lag 0 ever saw a non-zero product.
    let mut r0 = 0.0025_f32;
    for _ in 0..100 {
        r0 *= 0.9975;
    }
    let expected = r0 * 1.0 * grain_scale(r0);
    assert!(
        (out[227] - expected).abs() < 1e-6,
        "got {}, expected {expected}",
        out[227]
    );
    for (i, &s) in out.iter().enumerate().take(227) {
        assert_eq!(s, 0.0, "early output at {i}");
    }
}

// ============================================================================
// Silence
// ============================================================================

#[test]
fn silence_stays_silent() {
    let mut lp = Loop::new(phase_increment(220.0, SAMPLE_RATE));
    for _ in 0..2000 {
        assert_eq!(lp.step(0.0), 0.0);
    }
    // Triggers fired, but the epsilon alone writes nothing audible.
    assert!(!lp.triggers.is_empty());
    assert_eq!(grain_scale(0.0), 1.0 / libm::sqrtf(GRAIN_EPSILON));
}

#[test]
fn output_decays_after_signal_stops() {
    let mut lp = Loop::new(phase_increment(220.0, SAMPLE_RATE));
    for n in 0..4000 {
        lp.step(if n % 100 == 0 { 1.0 } else { 0.0 });
    }
    for _ in 0..20_000 {
        lp.step(0.0);
    }
    let tail: f32 = (0..512).map(|_| lp.step(0.0).abs()).fold(0.0, f32::max);
    assert!(tail < 1e-6, "tail {tail}");
    assert!(lp.acf.energy() < 1e-12);
}

// ============================================================================
// Smoothing
// ============================================================================

#[test]
fn standard_smoothing_settles_in_50ms() {
    let mut p = SmoothedParam::standard(0.0, 44100.0);
    p.set_target(1.0);
    for _ in 0..2205 {
        p.advance();
    }
    assert!((p.get() - 1.0).abs() < 0.01);
}

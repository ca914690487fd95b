//! Property-based tests for the resynthesis effect.
//!
//! Finite output under random input, hints and parameters; determinism; and
//! block-size independence of the per-sample core.

use proptest::prelude::*;
use vocosync_core::{Effect, EventTiming, NoteEvent, ParameterInfo};
use vocosync_effects::{ResynthKernel, Vocoder};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any finite input, pitch and parameter setting produces finite output
    /// and a non-negative energy estimate.
    #[test]
    fn output_always_finite(
        input in prop::collection::vec(-2.0f32..=2.0f32, 64..2048),
        note in 0u8..=127,
        mix in 0.0f32..=100.0,
        transpose in -24.0f32..=24.0,
        output_db in -20.0f32..=20.0,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
    ) {
        let mut vocoder = Vocoder::new(sample_rate);
        vocoder.set_param(0, mix);
        vocoder.set_param(1, transpose);
        vocoder.set_param(2, output_db);
        vocoder.set_pitch_hint(note);
        for &x in &input {
            let y = vocoder.process(x);
            prop_assert!(y.is_finite(), "non-finite output {} for input {}", y, x);
        }
        prop_assert!(vocoder.autocorrelation()[0] >= 0.0);
        prop_assert!(vocoder.autocorrelation().iter().all(|r| r.is_finite()));
    }

    /// Splitting the same signal into different block sizes does not change
    /// the output when hints apply at block start of the first block.
    #[test]
    fn block_size_independent(
        input in prop::collection::vec(-1.0f32..=1.0f32, 256..1024),
        block_a in 1usize..64,
        block_b in 64usize..300,
        note in 30u8..100,
    ) {
        let render = |block: usize| {
            let mut vocoder = Vocoder::new(44100.0);
            let mut out = input.clone();
            for (i, chunk) in out.chunks_mut(block).enumerate() {
                let events = if i == 0 { vec![NoteEvent::note_on(0, note)] } else { Vec::new() };
                vocoder.process_block_with_events(chunk, &events, EventTiming::BlockStart);
            }
            out
        };
        prop_assert_eq!(render(block_a), render(block_b));
    }

    /// Two kernels fed the same input and hints agree bit for bit.
    #[test]
    fn kernels_deterministic(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..1024),
        notes in prop::collection::vec(0u8..=127, 1..8),
    ) {
        let mut a = ResynthKernel::new(48000.0);
        let mut b = ResynthKernel::new(48000.0);
        let stride = input.len() / notes.len() + 1;
        for (n, &x) in input.iter().enumerate() {
            if n % stride == 0 {
                let note = notes[n / stride];
                a.set_pitch_hint(note);
                b.set_pitch_hint(note);
            }
            prop_assert_eq!(a.process(x).to_bits(), b.process(x).to_bits());
        }
    }
}

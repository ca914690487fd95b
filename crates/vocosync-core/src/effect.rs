//! Core Effect trait.
//!
//! The [`Effect`] trait is the processing contract every vocosync processor
//! implements: a stateful object fed one sample (or one block) at a time by a
//! host-integration layer.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. The resynthesizer only
//!   reads channel 0; broadcasting to further channels happens above this
//!   trait (see `Vocoder::process_planar` in `vocosync-effects`).
//!
//! - **Object-safe**: `dyn Effect` works for hosts that pick processors at
//!   runtime; generic dispatch is preferred in the audio path.
//!
//! - **No allocations**: Every method is callable from a real-time audio
//!   callback.

/// Core trait for all audio processors.
///
/// # Example
///
/// ```rust
/// use vocosync_core::Effect;
///
/// struct Invert;
///
/// impl Effect for Invert {
///     fn process(&mut self, input: f32) -> f32 {
///         -input
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut fx = Invert;
/// assert_eq!(fx.process(0.25), -0.25);
/// ```
pub trait Effect {
    /// Process a single sample.
    ///
    /// Advances all internal state by exactly one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Processors recalculate every sample-rate-dependent quantity here. For
    /// the resynthesizer this is a full state reset.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears buffers and accumulators without touching user parameters.
    fn reset(&mut self);
}

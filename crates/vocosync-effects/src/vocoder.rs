//! Host-facing resynthesis effect.
//!
//! [`Vocoder`] wraps a [`ResynthKernel`] with the things a host needs around
//! it: user parameters, pitch hints delivered as note events inside a block,
//! and broadcast of the processed channel to every output channel.
//!
//! At default parameter values (100 % wet, 0 st, 0 dB) the output is
//! bit-identical to the bare kernel.

use crate::kernel::{MAX_NOTE, ResynthKernel};
use vocosync_core::{
    Effect, EventTiming, LAG_COUNT, NoteEvent, ParamDescriptor, ParamId, ParameterInfo,
    SmoothedParam, gain, wet_dry_mix,
};

/// Semitone range of the transpose parameter.
pub const TRANSPOSE_RANGE: f32 = 24.0;

const PARAM_MIX: usize = 0;
const PARAM_TRANSPOSE: usize = 1;
const PARAM_OUTPUT: usize = 2;

/// Pitch-synchronous autocorrelation resynthesizer.
///
/// ## Parameters
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Mix | 0–100 % | 100 % |
/// | 1 | Transpose | −24–24 st | 0 st |
/// | 2 | Output | −20–20 dB | 0 dB |
///
/// Mix and output level are smoothed over 10 ms. Transpose is added to every
/// pitch hint and applies at once, retuning the last hint if there was one.
///
/// # Example
///
/// ```rust
/// use vocosync_core::{Effect, EventTiming, NoteEvent};
/// use vocosync_effects::Vocoder;
///
/// let mut vocoder = Vocoder::new(48000.0);
/// let mut block = [0.0f32; 256];
/// block[0] = 1.0;
/// vocoder.process_block_with_events(&mut block, &[NoteEvent::note_on(0, 69)], EventTiming::BlockStart);
/// assert!(block.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Vocoder {
    kernel: ResynthKernel,
    mix: SmoothedParam,
    output_level: SmoothedParam,
    transpose: i8,
    last_note: Option<u8>,
    max_block_size: usize,
}

impl Vocoder {
    /// Create the effect at `sample_rate` with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let kernel = ResynthKernel::new(sample_rate);
        let sample_rate = kernel.sample_rate();
        Self {
            kernel,
            mix: SmoothedParam::standard(1.0, sample_rate),
            output_level: gain::output_level_param(sample_rate),
            transpose: 0,
            last_note: None,
            max_block_size: 0,
        }
    }

    /// Host preparation: new sample rate and maximum block size. Full reset.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.max_block_size = max_block_size;
        self.set_sample_rate(sample_rate);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "vocoder prepared: {} Hz, max block {}",
            self.kernel.sample_rate(),
            max_block_size
        );
    }

    /// Largest block announced by the last [`prepare`](Self::prepare), 0 if never prepared.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Apply a pitch hint for MIDI `note`, shifted by the transpose amount.
    pub fn set_pitch_hint(&mut self, note: u8) {
        let note = note.min(MAX_NOTE);
        self.last_note = Some(note);
        self.kernel.set_pitch_hint(self.transposed(note));
    }

    /// Resting pitch applied on every reset.
    pub fn set_default_note(&mut self, note: u8) {
        self.kernel.set_default_note(note);
    }

    /// Resting pitch.
    pub fn default_note(&self) -> u8 {
        self.kernel.default_note()
    }

    /// Last pitch hint received since the last reset, before transposition.
    pub fn last_note(&self) -> Option<u8> {
        self.last_note
    }

    /// Set dry/wet mix, `0.0..=1.0`.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.0, 1.0));
    }

    /// Mix target, `0.0..=1.0`.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    /// Set transpose in whole semitones, clamped to ±24.
    pub fn set_transpose(&mut self, semitones: i8) {
        self.transpose = semitones.clamp(-24, 24);
        if let Some(note) = self.last_note {
            self.kernel.set_pitch_hint(self.transposed(note));
        }
    }

    /// Transpose in semitones.
    pub fn transpose(&self) -> i8 {
        self.transpose
    }

    /// Set output level in dB, clamped to ±20.
    pub fn set_output_db(&mut self, db: f32) {
        gain::set_output_level_db(&mut self.output_level, db);
    }

    /// Output level in dB.
    pub fn output_db(&self) -> f32 {
        gain::output_level_db(&self.output_level)
    }

    /// The wrapped kernel.
    pub fn kernel(&self) -> &ResynthKernel {
        &self.kernel
    }

    /// Current autocorrelation estimate.
    pub fn autocorrelation(&self) -> &[f32; LAG_COUNT] {
        self.kernel.autocorrelation()
    }

    /// Current phase increment.
    pub fn phase_increment(&self) -> u32 {
        self.kernel.phase_increment()
    }

    /// Process `buffer` in place, applying the note-ons in `events`.
    ///
    /// With [`EventTiming::BlockStart`] every hint applies before the first
    /// sample and the last one wins. With [`EventTiming::SampleAccurate`] each
    /// hint applies before the sample at its offset; events are expected in
    /// block order, and an event earlier than one already applied takes
    /// effect where it is reached. Note-offs and other messages are ignored.
    pub fn process_block_with_events(
        &mut self,
        buffer: &mut [f32],
        events: &[NoteEvent],
        timing: EventTiming,
    ) {
        match timing {
            EventTiming::BlockStart => {
                self.apply_events(events);
                self.process_block_inplace(buffer);
            }
            EventTiming::SampleAccurate => {
                let mut start = 0;
                for event in events {
                    let at = event.offset.clamp(start, buffer.len());
                    self.process_block_inplace(&mut buffer[start..at]);
                    start = at;
                    if let Some(note) = event.message.pitch_hint() {
                        self.set_pitch_hint(note);
                    }
                }
                self.process_block_inplace(&mut buffer[start..]);
            }
        }
    }

    /// Process planar audio: channel 0 in place, then copied to every other
    /// channel. Channels shorter than channel 0 receive a prefix.
    pub fn process_planar(
        &mut self,
        channels: &mut [&mut [f32]],
        events: &[NoteEvent],
        timing: EventTiming,
    ) {
        let Some((first, rest)) = channels.split_first_mut() else {
            self.apply_events(events);
            return;
        };
        self.process_block_with_events(first, events, timing);
        for channel in rest {
            let n = channel.len().min(first.len());
            channel[..n].copy_from_slice(&first[..n]);
        }
    }

    fn apply_events(&mut self, events: &[NoteEvent]) {
        for event in events {
            if let Some(note) = event.message.pitch_hint() {
                self.set_pitch_hint(note);
            }
        }
    }

    fn transposed(&self, note: u8) -> u8 {
        (i16::from(note) + i16::from(self.transpose)).clamp(0, i16::from(MAX_NOTE)) as u8
    }

    /// Wrapper state only; the kernel resets itself.
    fn settle_controls(&mut self) {
        self.mix.snap_to_target();
        self.output_level.snap_to_target();
        self.last_note = None;
    }
}

impl Default for Vocoder {
    fn default() -> Self {
        Self::new(crate::kernel::DEFAULT_SAMPLE_RATE)
    }
}

impl Effect for Vocoder {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let wet = self.kernel.process(input);
        let mix = self.mix.advance();
        let level = self.output_level.advance();
        wet_dry_mix(input, wet, mix) * level
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.kernel.set_sample_rate(sample_rate);
        let sample_rate = self.kernel.sample_rate();
        self.mix.set_sample_rate(sample_rate);
        self.output_level.set_sample_rate(sample_rate);
        self.settle_controls();
    }

    fn reset(&mut self) {
        self.kernel.reset();
        self.settle_controls();
    }
}

impl ParameterInfo for Vocoder {
    fn param_count(&self) -> usize {
        3
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            PARAM_MIX => Some(ParamDescriptor::mix().with_id(ParamId(2000), "voc_mix")),
            PARAM_TRANSPOSE => Some(
                ParamDescriptor::semitones(
                    "Transpose",
                    "Transp",
                    -TRANSPOSE_RANGE,
                    TRANSPOSE_RANGE,
                    0.0,
                )
                .with_id(ParamId(2001), "voc_transpose"),
            ),
            PARAM_OUTPUT => Some(gain::output_param_descriptor().with_id(ParamId(2002), "voc_output")),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            PARAM_MIX => self.mix.target() * 100.0,
            PARAM_TRANSPOSE => f32::from(self.transpose),
            PARAM_OUTPUT => self.output_db(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        if value.is_nan() {
            return;
        }
        let value = desc.sanitize(value);
        match index {
            PARAM_MIX => self.set_mix(value / 100.0),
            PARAM_TRANSPOSE => self.set_transpose(value as i8),
            PARAM_OUTPUT => self.set_output_db(value),
            _ => {}
        }
    }
}

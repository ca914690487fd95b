//! Offline block renderer.
//!
//! Drives a [`Vocoder`] over whole buffers in fixed-size blocks, turning an
//! absolute-time note schedule into per-block [`NoteEvent`] slices exactly as
//! a plugin host would deliver them. All allocation happens before the block
//! loop.

use crate::{Error, Result};
use vocosync_core::{Effect, EventTiming, NoteEvent};
use vocosync_effects::Vocoder;

/// A note-on at an absolute sample position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledNote {
    /// Frame index from the start of the render.
    pub at_sample: usize,
    /// MIDI note number.
    pub note: u8,
}

impl ScheduledNote {
    /// Note-on for `note` at frame `at_sample`.
    pub const fn new(at_sample: usize, note: u8) -> Self {
        Self { at_sample, note }
    }
}

/// Block-by-block driver for a [`Vocoder`].
#[derive(Debug, Clone)]
pub struct OfflineRenderer {
    vocoder: Vocoder,
    block_size: usize,
    timing: EventTiming,
    schedule: Vec<ScheduledNote>,
}

impl OfflineRenderer {
    /// Renderer with the given effect and host block size (0 is raised to 1).
    pub fn new(vocoder: Vocoder, block_size: usize) -> Self {
        Self {
            vocoder,
            block_size: block_size.max(1),
            timing: EventTiming::default(),
            schedule: Vec::new(),
        }
    }

    /// Set where in a block note events take effect.
    pub fn with_timing(mut self, timing: EventTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the note schedule. Notes are ordered by time; ties keep their
    /// given order, so the later one wins.
    pub fn with_schedule(mut self, mut schedule: Vec<ScheduledNote>) -> Self {
        schedule.sort_by_key(|n| n.at_sample);
        self.schedule = schedule;
        self
    }

    /// Host block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Event timing mode.
    pub fn timing(&self) -> EventTiming {
        self.timing
    }

    /// The sorted schedule.
    pub fn schedule(&self) -> &[ScheduledNote] {
        &self.schedule
    }

    /// The effect.
    pub fn vocoder(&self) -> &Vocoder {
        &self.vocoder
    }

    /// The effect, for parameter changes between renders.
    pub fn vocoder_mut(&mut self) -> &mut Vocoder {
        &mut self.vocoder
    }

    /// Render planar `channels` in place at `sample_rate`.
    ///
    /// Channel 0 goes through the effect; every other channel receives a copy
    /// of the result. All channels must have the same length.
    pub fn render(&mut self, channels: &mut [Vec<f32>], sample_rate: f32) -> Result<()> {
        self.render_with_progress(channels, sample_rate, |_| {})
    }

    /// [`render`](Self::render), calling `progress(frames_done)` after every
    /// block.
    pub fn render_with_progress<F>(
        &mut self,
        channels: &mut [Vec<f32>],
        sample_rate: f32,
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(usize),
    {
        let Some((first, rest)) = channels.split_first_mut() else {
            return Err(Error::ChannelMismatch {
                expected: 1,
                found: 0,
            });
        };
        let frames = first.len();
        if let Some(bad) = rest.iter().find(|c| c.len() != frames) {
            return Err(Error::ChannelMismatch {
                expected: frames,
                found: bad.len(),
            });
        }

        self.vocoder.prepare(sample_rate, self.block_size);
        tracing::info!(
            frames,
            channels = rest.len() + 1,
            sample_rate,
            block_size = self.block_size,
            notes = self.schedule.len(),
            "render start"
        );

        let mut events: Vec<NoteEvent> = Vec::with_capacity(self.schedule.len());
        let mut next = 0;
        let mut start = 0;
        while start < frames {
            let end = (start + self.block_size).min(frames);

            events.clear();
            while let Some(cue) = self.schedule.get(next)
                && cue.at_sample < end
            {
                tracing::debug!(at = cue.at_sample, note = cue.note, "note on");
                events.push(NoteEvent::note_on(cue.at_sample - start, cue.note));
                next += 1;
            }

            let block = &mut first[start..end];
            self.vocoder
                .process_block_with_events(block, &events, self.timing);
            for channel in rest.iter_mut() {
                channel[start..end].copy_from_slice(&first[start..end]);
            }

            start = end;
            progress(start);
        }

        if next < self.schedule.len() {
            tracing::debug!(
                skipped = self.schedule.len() - next,
                "notes scheduled past the end of the input"
            );
        }
        tracing::info!(frames, "render finished");
        Ok(())
    }

    /// Render a mono buffer, returning the processed copy.
    pub fn render_mono(&mut self, input: &[f32], sample_rate: f32) -> Result<Vec<f32>> {
        let mut channels = vec![input.to_vec()];
        self.render(&mut channels, sample_rate)?;
        Ok(channels.swap_remove(0))
    }

    /// Reset the effect's DSP state without touching its parameters.
    pub fn reset(&mut self) {
        self.vocoder.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_zero_is_raised() {
        let r = OfflineRenderer::new(Vocoder::new(44100.0), 0);
        assert_eq!(r.block_size(), 1);
    }

    #[test]
    fn test_schedule_sorted_stably() {
        let r = OfflineRenderer::new(Vocoder::new(44100.0), 64).with_schedule(vec![
            ScheduledNote::new(100, 60),
            ScheduledNote::new(0, 50),
            ScheduledNote::new(100, 62),
        ]);
        assert_eq!(
            r.schedule(),
            &[
                ScheduledNote::new(0, 50),
                ScheduledNote::new(100, 60),
                ScheduledNote::new(100, 62)
            ]
        );
    }

    #[test]
    fn test_empty_channel_list_rejected() {
        let mut r = OfflineRenderer::new(Vocoder::new(44100.0), 64);
        let mut channels: Vec<Vec<f32>> = Vec::new();
        assert!(matches!(
            r.render(&mut channels, 44100.0),
            Err(Error::ChannelMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_ragged_channels_rejected() {
        let mut r = OfflineRenderer::new(Vocoder::new(44100.0), 64);
        let mut channels = vec![vec![0.0; 10], vec![0.0; 11]];
        assert!(matches!(
            r.render(&mut channels, 44100.0),
            Err(Error::ChannelMismatch {
                expected: 10,
                found: 11
            })
        ));
    }

    #[test]
    fn test_progress_reaches_end() {
        let mut r = OfflineRenderer::new(Vocoder::new(44100.0), 100);
        let mut channels = vec![vec![0.0; 250]];
        let mut seen = Vec::new();
        r.render_with_progress(&mut channels, 44100.0, |done| seen.push(done))
            .unwrap();
        assert_eq!(seen, vec![100, 200, 250]);
    }

    #[test]
    fn test_last_scheduled_note_sticks() {
        let mut r = OfflineRenderer::new(Vocoder::new(44100.0), 32)
            .with_schedule(vec![ScheduledNote::new(5, 60), ScheduledNote::new(70, 72)]);
        r.render_mono(&[0.0; 128], 44100.0).unwrap();
        assert_eq!(r.vocoder().last_note(), Some(72));
    }
}

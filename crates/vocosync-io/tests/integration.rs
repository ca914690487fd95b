//! Integration tests for vocosync-io WAV I/O and offline rendering.

use tempfile::NamedTempFile;
use vocosync_core::{Effect, EventTiming, NoteEvent};
use vocosync_effects::Vocoder;
use vocosync_io::{
    OfflineRenderer, ScheduledNote, WavSpec, read_wav, read_wav_planar, write_wav,
    write_wav_planar,
};

fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Sawtooth-ish voice stand-in with a clear period.
fn buzz(num_samples: usize, period: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (i % period) as f32 / period as f32 - 0.5)
        .collect()
}

// ---------------------------------------------------------------------------
// WAV roundtrips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_mono_f32() {
    for sr in [22050, 44100, 48000, 96000] {
        let samples = sine_wave(sr, 440.0, sr as usize / 10);
        let spec = WavSpec {
            channels: 1,
            sample_rate: sr,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, sr);
        assert_eq!(loaded, samples, "f32 WAV must be lossless at {sr} Hz");
    }
}

#[test]
fn wav_roundtrip_24bit_precision() {
    let samples = sine_wave(48000, 1000.0, 4800);
    let spec = WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 24,
    };
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();

    let (loaded, _) = read_wav(file.path()).unwrap();
    for (a, b) in samples.iter().zip(&loaded) {
        assert!((a - b).abs() < 1e-6, "24-bit mismatch: {a} vs {b}");
    }
}

// ---------------------------------------------------------------------------
// Renderer against direct processing
// ---------------------------------------------------------------------------

#[test]
fn render_without_schedule_matches_direct_processing() {
    let sr = 44100.0;
    let input = buzz(3000, 190);

    let mut direct = Vocoder::new(sr);
    let mut expected = vec![0.0; input.len()];
    direct.process_block(&input, &mut expected);

    let mut renderer = OfflineRenderer::new(Vocoder::new(sr), 128);
    let rendered = renderer.render_mono(&input, sr).unwrap();

    assert_eq!(rendered, expected);
}

#[test]
fn render_block_start_matches_host_delivery() {
    let sr = 44100.0;
    let block = 64;
    let input = buzz(1000, 150);
    let schedule = vec![ScheduledNote::new(0, 57), ScheduledNote::new(100, 69)];

    // Host view: note at 100 lands in block [64, 128) with offset 36.
    let mut direct = Vocoder::new(sr);
    let mut expected = input.clone();
    for (i, chunk) in expected.chunks_mut(block).enumerate() {
        let events: Vec<NoteEvent> = match i {
            0 => vec![NoteEvent::note_on(0, 57)],
            1 => vec![NoteEvent::note_on(36, 69)],
            _ => Vec::new(),
        };
        direct.process_block_with_events(chunk, &events, EventTiming::BlockStart);
    }

    let mut renderer = OfflineRenderer::new(Vocoder::new(sr), block)
        .with_timing(EventTiming::BlockStart)
        .with_schedule(schedule);
    let rendered = renderer.render_mono(&input, sr).unwrap();

    assert_eq!(rendered, expected);
}

#[test]
fn render_sample_accurate_is_block_size_independent() {
    let sr = 48000.0;
    let input = buzz(2048, 120);
    let schedule = vec![
        ScheduledNote::new(0, 50),
        ScheduledNote::new(333, 62),
        ScheduledNote::new(1500, 45),
    ];

    let mut direct = Vocoder::new(sr);
    let mut expected = input.clone();
    let events = [
        NoteEvent::note_on(0, 50),
        NoteEvent::note_on(333, 62),
        NoteEvent::note_on(1500, 45),
    ];
    direct.process_block_with_events(&mut expected, &events, EventTiming::SampleAccurate);

    for block in [1, 17, 64, 512, 4096] {
        let mut renderer = OfflineRenderer::new(Vocoder::new(sr), block)
            .with_timing(EventTiming::SampleAccurate)
            .with_schedule(schedule.clone());
        let rendered = renderer.render_mono(&input, sr).unwrap();
        assert_eq!(rendered, expected, "block size {block}");
    }
}

#[test]
fn render_copies_channel_zero_to_all_channels() {
    let sr = 44100.0;
    let left = buzz(700, 100);
    let right = sine_wave(44100, 300.0, 700);
    let mut channels = vec![left.clone(), right, vec![0.5; 700]];

    let mut renderer = OfflineRenderer::new(Vocoder::new(sr), 256)
        .with_schedule(vec![ScheduledNote::new(0, 60)]);
    renderer.render(&mut channels, sr).unwrap();

    let mono = OfflineRenderer::new(Vocoder::new(sr), 256)
        .with_schedule(vec![ScheduledNote::new(0, 60)])
        .render_mono(&left, sr)
        .unwrap();

    for channel in &channels {
        assert_eq!(channel, &mono);
    }
}

#[test]
fn render_twice_is_deterministic() {
    let sr = 44100.0;
    let input = buzz(1500, 90);
    let mut renderer = OfflineRenderer::new(Vocoder::new(sr), 100)
        .with_schedule(vec![ScheduledNote::new(10, 64), ScheduledNote::new(900, 52)]);

    let first = renderer.render_mono(&input, sr).unwrap();
    let second = renderer.render_mono(&input, sr).unwrap();
    assert_eq!(first, second, "prepare must fully reset the effect");
}

#[test]
fn render_keeps_parameters_across_renders() {
    let sr = 44100.0;
    let input = buzz(500, 80);
    let mut renderer = OfflineRenderer::new(Vocoder::new(sr), 64);
    renderer.vocoder_mut().set_mix(0.0);

    let out = renderer.render_mono(&input, sr).unwrap();
    assert_eq!(out, input, "mix 0 is a pass-through");
}

// ---------------------------------------------------------------------------
// File pipeline
// ---------------------------------------------------------------------------

#[test]
fn wav_to_wav_pipeline() {
    let sr = 44100;
    let voice = buzz(4410, 200);
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let input_file = NamedTempFile::new().unwrap();
    write_wav_planar(input_file.path(), &[voice.clone(), voice.clone()], spec).unwrap();

    let (mut channels, loaded_spec) = read_wav_planar(input_file.path()).unwrap();
    let mut renderer = OfflineRenderer::new(Vocoder::new(loaded_spec.sample_rate as f32), 512)
        .with_schedule(vec![ScheduledNote::new(0, 57)]);
    renderer
        .render(&mut channels, loaded_spec.sample_rate as f32)
        .unwrap();

    let output_file = NamedTempFile::new().unwrap();
    write_wav_planar(output_file.path(), &channels, loaded_spec).unwrap();

    let (reloaded, reloaded_spec) = read_wav_planar(output_file.path()).unwrap();
    assert_eq!(reloaded_spec, spec);
    assert_eq!(reloaded, channels);
    assert!(reloaded[0].iter().all(|s| s.is_finite()));
    assert!(
        reloaded[0].iter().any(|&s| s != 0.0),
        "a periodic input must produce output"
    );
}

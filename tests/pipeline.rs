//! End-to-end checks of the processing pipeline against an independent WAV reader

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use tempobass::processing::{BassEnhancer, Resampler};
use tempobass::{process, SampleBuffer, TempoBassError, WavEncoder};

fn read_back(wav: &[u8]) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

fn ramp(frames: usize, channels: usize) -> SampleBuffer {
    let data: Vec<Vec<f32>> = (0..channels)
        .map(|c| {
            (0..frames)
                .map(|i| ((i as f32 / frames as f32) * 1.8 - 0.9) * if c % 2 == 0 { 1.0 } else { -1.0 })
                .collect()
        })
        .collect();
    SampleBuffer::from_channels(22050, data).unwrap()
}

#[test]
fn identity_output_matches_input_within_quantization() {
    let input = ramp(1000, 2);
    let wav = process(input.clone(), 1.0, 0.0).unwrap();
    let (spec, samples) = read_back(&wav);

    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);
    assert_eq!(samples.len(), 2000);

    for (frame, pair) in samples.chunks_exact(2).enumerate() {
        for (c, &s) in pair.iter().enumerate() {
            let original = input.channel(c)[frame];
            assert!((s as f32 / 32767.0 - original).abs() <= 1.0 / 32767.0 + 1e-7);
        }
    }
}

#[test]
fn double_speed_keeps_every_other_frame() {
    let input = SampleBuffer::mono(44100, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
    let output = Resampler::resample(input, 2.0).unwrap();
    assert_eq!(output.channel(0).to_vec(), vec![0.1, 0.3]);
}

#[test]
fn single_full_scale_frame_layout() {
    let buffer = SampleBuffer::mono(44100, vec![1.0]).unwrap();
    let wav = WavEncoder::encode(&buffer).unwrap();

    assert_eq!(wav.len(), 46);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 44100);
    assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), 0x7FFF);

    let (_, samples) = read_back(&wav);
    assert_eq!(samples, vec![32767]);
}

#[test]
fn processed_output_decodes_with_expected_length() {
    for &(tempo, bass) in &[(0.75, 5.0), (1.25, 0.0), (2.0, 15.0), (0.25, 10.0)] {
        let input = ramp(4410, 2);
        let wav = process(input, tempo, bass).unwrap();
        let (spec, samples) = read_back(&wav);

        let expected_frames = (4410.0f64 / tempo).floor() as usize;
        assert_eq!(spec.channels, 2);
        assert_eq!(samples.len(), expected_frames * 2, "tempo {}", tempo);
    }
}

#[test]
fn stages_compose_in_order() {
    let input = ramp(300, 1);
    let manual = BassEnhancer::boost_bass(Resampler::resample(input.clone(), 0.5).unwrap(), 8.0);
    assert_eq!(process(input, 0.5, 8.0).unwrap(), WavEncoder::encode(&manual).unwrap());
}

#[test]
fn non_positive_tempo_is_rejected() {
    for &tempo in &[0.0, -0.5] {
        let result = process(ramp(10, 1), tempo, 3.0);
        assert!(matches!(result, Err(TempoBassError::InvalidParameter { .. })));
    }
}

#[test]
fn vanishing_tempo_fails_instead_of_allocating() {
    let result = process(ramp(10, 1), 1e-300, 0.0);
    assert!(matches!(result, Err(TempoBassError::ProcessingFailed { .. })));
}

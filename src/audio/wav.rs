//! Canonical 16-bit PCM WAV encoding

use crate::audio::SampleBuffer;
use crate::error::{TempoBassError, Result};

pub const HEADER_SIZE: usize = 44;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const PCM_FORMAT_TAG: u16 = 1;
const FMT_CHUNK_SIZE: u32 = 16;

/// Largest data chunk whose RIFF size (`36 + data_size`) still fits a u32.
pub const MAX_DATA_SIZE: u64 = (u32::MAX - 36) as u64;

/// Full-scale value used to map [-1.0, 1.0] onto signed 16-bit samples.
pub const PCM16_SCALE: f32 = 32767.0;

/// Header fields of a canonical PCM WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub data_size: u32,
}

impl WavHeader {
    pub fn for_buffer(buffer: &SampleBuffer) -> Result<Self> {
        let channels = u16::try_from(buffer.channel_count()).map_err(|_| {
            TempoBassError::processing(format!("{} channels do not fit a WAV header", buffer.channel_count()))
        })?;

        let block_align = channels.checked_mul(BYTES_PER_SAMPLE).ok_or_else(|| {
            TempoBassError::processing(format!("{} channels overflow the WAV block alignment", channels))
        })?;

        let sample_rate = buffer.sample_rate();
        let byte_rate = sample_rate.checked_mul(block_align as u32).ok_or_else(|| {
            TempoBassError::processing(format!(
                "{} Hz x {} channels overflows the WAV byte rate", sample_rate, channels
            ))
        })?;

        let data_size = (buffer.frame_count() as u64) * block_align as u64;
        if data_size > MAX_DATA_SIZE {
            return Err(TempoBassError::processing(format!(
                "{} data bytes exceed the WAV size limit", data_size
            )));
        }

        Ok(Self {
            channels,
            sample_rate,
            byte_rate,
            block_align,
            data_size: data_size as u32,
        })
    }

    pub fn riff_size(&self) -> u32 {
        36 + self.data_size
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];

        // RIFF chunk
        header[0..4].copy_from_slice(b"RIFF");
        header[4..8].copy_from_slice(&self.riff_size().to_le_bytes());
        header[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        header[20..22].copy_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
        header[22..24].copy_from_slice(&self.channels.to_le_bytes());
        header[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        header[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        header[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        header[36..40].copy_from_slice(b"data");
        header[40..44].copy_from_slice(&self.data_size.to_le_bytes());

        header
    }
}

/// Convert one float sample to PCM16: clamp, scale, truncate toward zero.
#[inline]
pub fn sample_to_i16(sample: f32) -> i16 {
    // NaN survives clamp; the cast maps it to 0
    (sample.clamp(-1.0, 1.0) * PCM16_SCALE) as i16
}

/// Serializes sample buffers into WAV byte sequences.
pub struct WavEncoder;

impl WavEncoder {
    /// Encode a buffer as a 44-byte header followed by interleaved PCM16 frames.
    pub fn encode(buffer: &SampleBuffer) -> Result<Vec<u8>> {
        let header = WavHeader::for_buffer(buffer)?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + header.data_size as usize);
        bytes.extend_from_slice(&header.to_bytes());

        // Columns of the (channels, frames) matrix are frames, in channel order
        for frame in buffer.samples().columns() {
            for &sample in frame.iter() {
                bytes.extend_from_slice(&sample_to_i16(sample).to_le_bytes());
            }
        }

        log::debug!(
            "Encoded {} frames x {} channels at {} Hz into {} bytes",
            buffer.frame_count(), header.channels, header.sample_rate, bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    #[test]
    fn test_single_frame_full_scale() {
        let buffer = SampleBuffer::mono(44100, vec![1.0]).unwrap();
        let wav = WavEncoder::encode(&buffer).unwrap();

        assert_eq!(wav.len(), 46);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 38);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 44100);
        assert_eq!(u32_at(&wav, 28), 88200);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 2);
        assert_eq!(&wav[44..46], &[0xFF, 0x7F]);
    }

    #[test]
    fn test_stereo_interleaving() {
        let buffer = SampleBuffer::from_channels(
            48000,
            vec![vec![0.5, -0.5], vec![-1.0, 0.25]],
        ).unwrap();
        let wav = WavEncoder::encode(&buffer).unwrap();

        assert_eq!(wav.len(), HEADER_SIZE + 8);
        assert_eq!(u32_at(&wav, 28), 48000 * 4);
        assert_eq!(u16_at(&wav, 32), 4);

        let samples: Vec<i16> = wav[HEADER_SIZE..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(samples, vec![16383, -32767, -16383, 8191]);
    }

    #[test]
    fn test_sample_conversion_clamps_and_truncates() {
        assert_eq!(sample_to_i16(2.0), 32767);
        assert_eq!(sample_to_i16(-3.0), -32767);
        assert_eq!(sample_to_i16(0.0), 0);
        assert_eq!(sample_to_i16(0.00002), 0);
        assert_eq!(sample_to_i16(-0.00002), 0);
        assert_eq!(sample_to_i16(f32::NAN), 0);
    }

    #[test]
    fn test_empty_buffer_is_header_only() {
        let buffer = SampleBuffer::from_channels(22050, vec![vec![], vec![]]).unwrap();
        let wav = WavEncoder::encode(&buffer).unwrap();
        assert_eq!(wav.len(), HEADER_SIZE);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
        assert_eq!(u16_at(&wav, 22), 2);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let buffer = SampleBuffer::mono(8000, vec![0.1, -0.7, 0.33, 0.999]).unwrap();
        assert_eq!(WavEncoder::encode(&buffer).unwrap(), WavEncoder::encode(&buffer).unwrap());
    }

    #[test]
    fn test_byte_rate_overflow_rejected() {
        let buffer = SampleBuffer::mono(3_000_000_000, vec![0.5]).unwrap();
        let result = WavEncoder::encode(&buffer);
        assert!(matches!(result, Err(TempoBassError::ProcessingFailed { .. })));
    }

    #[test]
    fn test_block_align_overflow_rejected() {
        let buffer = SampleBuffer::silent(8000, 40_000, 0).unwrap();
        let result = WavEncoder::encode(&buffer);
        assert!(matches!(result, Err(TempoBassError::ProcessingFailed { .. })));
    }

    #[test]
    fn test_header_fields_at_limits() {
        let buffer = SampleBuffer::silent(u32::MAX / 2, 1, 0).unwrap();
        let header = WavHeader::for_buffer(&buffer).unwrap();
        assert_eq!(header.block_align, 2);
        assert_eq!(header.byte_rate, (u32::MAX / 2) * 2);
    }
}

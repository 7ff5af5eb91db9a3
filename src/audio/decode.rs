//! WAV decoding and artifact file IO

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use hound::{SampleFormat, WavReader};
use crate::audio::{SampleBuffer, wav::PCM16_SCALE};
use crate::error::{TempoBassError, Result};

/// Decode WAV bytes into a sample buffer.
pub fn decode_wav(bytes: &[u8]) -> Result<SampleBuffer> {
    let reader = WavReader::new(std::io::Cursor::new(bytes))
        .map_err(|e| TempoBassError::decode(format!("Cannot create WAV reader: {}", e)))?;
    decode_reader(reader)
}

/// Read and decode a WAV file from disk.
pub fn read_wav_file<P: AsRef<Path>>(path: P) -> Result<SampleBuffer> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| TempoBassError::decode(format!("Cannot open audio file {}: {}", path.display(), e)))?;

    let reader = WavReader::new(BufReader::new(file))
        .map_err(|e| TempoBassError::decode(format!("Cannot create WAV reader for {}: {}", path.display(), e)))?;

    let buffer = decode_reader(reader)?;
    log::info!(
        "Decoded {}: {:.2}s, {}Hz, {}ch",
        path.display(), buffer.duration(), buffer.sample_rate(), buffer.channel_count()
    );
    Ok(buffer)
}

/// Write encoded bytes to disk, creating parent directories.
pub fn write_wav_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TempoBassError::io(format!("Cannot create output directory: {}", e)))?;
        }
    }

    std::fs::write(path, bytes)
        .map_err(|e| TempoBassError::io(format!("Cannot write output file {}: {}", path.display(), e)))?;

    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn decode_reader<R: Read>(mut reader: WavReader<R>) -> Result<SampleBuffer> {
    let spec = reader.spec();

    if spec.sample_rate == 0 {
        return Err(TempoBassError::decode("Invalid sample rate"));
    }
    if spec.channels == 0 {
        return Err(TempoBassError::decode("WAV declares zero channels"));
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| TempoBassError::decode(format!("Failed to read sample: {}", e)))?,
        (SampleFormat::Int, bits @ 1..=32) => {
            // 16-bit inverts the encoder's scale exactly
            let scale = if bits == 16 { PCM16_SCALE } else { (1u64 << (bits - 1)) as f32 };
            reader.samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| TempoBassError::decode(format!("Failed to read sample: {}", e)))?
        }
        (format, bits) => {
            return Err(TempoBassError::decode(format!(
                "Unsupported sample format: {:?} at {} bits", format, bits
            )));
        }
    };

    SampleBuffer::from_interleaved(spec.sample_rate, spec.channels as usize, &samples)
        .map_err(|e| TempoBassError::decode(format!("Inconsistent sample data: {}", e)))
}

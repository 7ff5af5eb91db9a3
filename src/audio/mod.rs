//! Audio Module
//!
//! Sample buffers, canonical PCM16 WAV encoding, and WAV decoding for callers
//! that start from a file.

pub mod buffer;
pub mod decode;
pub mod wav;

pub use buffer::SampleBuffer;
pub use decode::{decode_wav, read_wav_file, write_wav_file};
pub use wav::{WavEncoder, WavHeader};

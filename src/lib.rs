//! tempobass - Offline Tempo and Bass Processing
//!
//! Takes a decoded multi-channel sample buffer, changes its playback speed,
//! boosts the bass and encodes the result as a 16-bit PCM WAV byte buffer.

pub mod audio;
pub mod config;
pub mod error;
pub mod processing;
pub mod utils;

pub use audio::{SampleBuffer, WavEncoder};
pub use config::{Config, Args, DEFAULT_OUTPUT_FILENAME, OUTPUT_MIME_TYPE};
pub use error::{TempoBassError, Result};
pub use processing::{process, process_with_progress, Pipeline, ProcessingParams, Stage, StageEvent};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn init_logging(verbose: bool) {
    unsafe {
        std::env::set_var("RUST_LOG", if verbose { "debug" } else { "info" });
    }
    env_logger::Builder::from_env("RUST_LOG")
        .try_init()
        .ok();
}

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}

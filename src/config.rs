//! Configuration management for tempo and bass processing

use crate::error::{TempoBassError, Result};
use crate::processing::{ProcessingParams, TempoPreset, BassPreset, params::validate_ranges};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suggested name for the processed artifact.
pub const DEFAULT_OUTPUT_FILENAME: &str = "processed_audio.wav";
/// MIME type of the processed artifact.
pub const OUTPUT_MIME_TYPE: &str = "audio/wav";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub audio: AudioConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub tempo_factor: f64,
    pub bass_boost_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub threads: usize,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.wav"),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            audio: AudioConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            tempo_factor: 1.0,
            bass_boost_db: 0.0,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn params(&self) -> ProcessingParams {
        ProcessingParams::new(self.audio.tempo_factor, self.audio.bass_boost_db)
    }

    pub fn tempo_factor(&self) -> f64 {
        self.audio.tempo_factor
    }

    pub fn bass_boost_db(&self) -> f64 {
        self.audio.bass_boost_db
    }

    pub fn threads(&self) -> usize {
        self.runtime.threads
    }

    pub fn verbose(&self) -> bool {
        self.runtime.verbose
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "tempobass", about = "Slow down, speed up and bass boost WAV audio", version, author)]
pub struct Args {
    #[arg(short = 'i', long = "input", help = "Input audio file path (WAV format)")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long = "output", help = "Output audio file path [default: processed_audio.wav]")]
    pub output: Option<PathBuf>,

    #[arg(short = 't', long = "tempo", help = "Playback speed factor (0.25 - 2.5)")]
    pub tempo: Option<f64>,

    #[arg(short = 'b', long = "bass", help = "Bass boost in dB (0 - 15)")]
    pub bass: Option<f64>,

    #[arg(long = "tempo-preset", value_enum, help = "Tempo preset, overridden by --tempo")]
    pub tempo_preset: Option<TempoPreset>,

    #[arg(long = "bass-preset", value_enum, help = "Bass preset, overridden by --bass")]
    pub bass_preset: Option<BassPreset>,

    #[arg(long = "threads", help = "Worker thread count")]
    pub threads: Option<usize>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(long = "write-config", help = "Write a default config file to this path and exit")]
    pub write_config: Option<PathBuf>,

    #[arg(long = "test-only", help = "Run test mode only, do not process audio files")]
    pub test_only: bool,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        // Config file first, then command line overrides
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        if let Some(input) = args.input {
            config.input_path = input;
        }
        if let Some(output) = args.output {
            config.output_path = output;
        }

        if let Some(tempo) = args.tempo.or(args.tempo_preset.map(TempoPreset::factor)) {
            config.audio.tempo_factor = tempo;
        }
        if let Some(bass) = args.bass.or(args.bass_preset.map(BassPreset::boost_db)) {
            config.audio.bass_boost_db = bass;
        }

        if let Some(threads) = args.threads {
            config.runtime.threads = threads;
        }
        config.runtime.verbose |= args.verbose;

        config.validate()?;
        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TempoBassError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TempoBassError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        self.params().validate()
            .map_err(|e| TempoBassError::config(e.to_string()))?;

        let range_errors = validate_ranges(&self.params());
        if !range_errors.is_empty() {
            return Err(TempoBassError::config(range_errors.join("; ")));
        }

        if self.runtime.threads == 0 {
            return Err(TempoBassError::config("Thread count must be greater than 0"));
        }
        if self.runtime.threads > num_cpus::get() * 2 {
            return Err(TempoBassError::config("Thread count cannot exceed 2x logical CPU cores"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TempoBassError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TempoBassError::config(format!("Failed to write config file: {}", e)))
    }

    /// Create default config file
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tempobass"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tempo_factor(), 1.0);
        assert_eq!(config.bass_boost_db(), 0.0);
        assert_eq!(config.output_path, PathBuf::from("processed_audio.wav"));
        assert!(config.threads() > 0);
        assert!(config.params().is_identity());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.audio.tempo_factor = 0.0;
        assert!(config.validate().is_err());
        config.audio.tempo_factor = 3.0;
        assert!(config.validate().is_err());
        config.audio.tempo_factor = 1.25;

        config.audio.bass_boost_db = 16.0;
        assert!(config.validate().is_err());
        config.audio.bass_boost_db = 5.0;

        config.runtime.threads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.audio.tempo_factor = 0.8;
        config.audio.bass_boost_db = 7.0;

        assert!(config.save_to_file(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "[audio]\nbass_boost_db = 4.0\n").unwrap();

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.bass_boost_db(), 4.0);
        assert_eq!(loaded.tempo_factor(), 1.0);
    }

    #[test]
    fn test_args_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[audio]\ntempo_factor = 0.5\nbass_boost_db = 10.0\n").unwrap();

        let path = config_path.to_str().unwrap();
        let config = Config::from_args_and_config(args(&["-c", path, "--tempo", "1.5"])).unwrap();
        assert_eq!(config.tempo_factor(), 1.5);
        assert_eq!(config.bass_boost_db(), 10.0);
    }

    #[test]
    fn test_presets_and_explicit_values() {
        let config = Config::from_args_and_config(args(&["--tempo-preset", "slowed", "--bass-preset", "ultra"])).unwrap();
        assert_eq!(config.tempo_factor(), 0.75);
        assert_eq!(config.bass_boost_db(), 10.0);

        let config = Config::from_args_and_config(args(&["--tempo-preset", "sped-up", "-t", "0.9"])).unwrap();
        assert_eq!(config.tempo_factor(), 0.9);
    }

    #[test]
    fn test_out_of_range_args_rejected() {
        let result = Config::from_args_and_config(args(&["--bass", "40"]));
        assert!(matches!(result, Err(TempoBassError::Config { .. })));
    }
}

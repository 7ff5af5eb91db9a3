//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TempoBassError {
    #[error("Decode failed: {message}")]
    DecodeFailed { message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Processing failed: {message}")]
    ProcessingFailed { message: String },

    #[error("Processing cancelled")]
    Cancelled,

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl TempoBassError {
    pub fn decode<S: Into<String>>(msg: S) -> Self { Self::DecodeFailed { message: msg.into() } }
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self { Self::InvalidParameter { message: msg.into() } }
    pub fn processing<S: Into<String>>(msg: S) -> Self { Self::ProcessingFailed { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, TempoBassError>;

impl From<std::io::Error> for TempoBassError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

impl From<hound::Error> for TempoBassError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Self::io(e.to_string()),
            other => Self::decode(format!("WAV: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = TempoBassError::invalid_parameter("tempo must be positive");
        assert_eq!(e.to_string(), "Invalid parameter: tempo must be positive");
        assert_eq!(TempoBassError::Cancelled.to_string(), "Processing cancelled");
    }

    #[test]
    fn test_hound_error_maps_to_decode() {
        let e: TempoBassError = hound::Error::FormatError("no RIFF tag found").into();
        assert!(matches!(e, TempoBassError::DecodeFailed { .. }));
    }
}

//! Audio Processing Pipeline

pub mod bass;
pub mod params;
pub mod pipeline;
pub mod tempo;

pub use bass::{BassEnhancer, db_to_gain};
pub use params::{ProcessingParams, TempoPreset, BassPreset};
pub use pipeline::{
    Pipeline, ProcessingOutput, ProcessingReport, Stage, StageEvent,
    ProgressObserver, NoProgress, CancelToken, process, process_with_progress,
};
pub use tempo::Resampler;

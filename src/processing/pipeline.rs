//! Processing pipeline: tempo -> bass -> WAV

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use crate::audio::{SampleBuffer, WavEncoder};
use crate::error::{TempoBassError, Result};
use super::{BassEnhancer, ProcessingParams, Resampler};

/// Named steps reported to the caller, always in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Init,
    Tempo,
    Bass,
    Finalize,
    Done,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Init => "Initializing processing...",
            Stage::Tempo => "Applying tempo changes...",
            Stage::Bass => "Enhancing bass frequencies...",
            Stage::Finalize => "Finalizing audio...",
            Stage::Done => "Processing complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    /// False when the stage is skipped because its parameter is the identity.
    pub applied: bool,
}

pub trait ProgressObserver {
    fn on_stage(&mut self, event: StageEvent);
}

impl<F: FnMut(StageEvent)> ProgressObserver for F {
    fn on_stage(&mut self, event: StageEvent) {
        self(event)
    }
}

/// Observer that discards every event.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_stage(&mut self, _event: StageEvent) {}
}

/// Shared flag checked between stages.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ProcessingOutput {
    pub wav: Vec<u8>,
    pub report: ProcessingReport,
}

#[derive(Debug, Clone)]
pub struct ProcessingReport {
    pub params: ProcessingParams,
    pub sample_rate: u32,
    pub channels: usize,
    pub input_frames: usize,
    pub output_frames: usize,
    pub input_duration_seconds: f64,
    pub output_duration_seconds: f64,
    pub stage_timings: Vec<(Stage, Duration)>,
    pub processing_time: Duration,
    pub real_time_factor: f64,
    pub clipped_samples: usize,
    pub encoded_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    params: ProcessingParams,
    cancel: Option<CancelToken>,
}

impl Pipeline {
    pub fn new(params: ProcessingParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, cancel: None })
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn params(&self) -> &ProcessingParams {
        &self.params
    }

    /// Run every stage on `decoded` and return the encoded WAV with a report.
    pub fn run(&self, decoded: SampleBuffer, observer: &mut dyn ProgressObserver) -> Result<ProcessingOutput> {
        let start = Instant::now();
        let mut timings = Vec::with_capacity(3);

        let sample_rate = decoded.sample_rate();
        let channels = decoded.channel_count();
        let input_frames = decoded.frame_count();
        let input_duration = decoded.duration();

        log::debug!("{}", Stage::Init.label());
        observer.on_stage(StageEvent { stage: Stage::Init, applied: true });
        self.check_cancelled()?;

        let changes_tempo = self.params.changes_tempo();
        observer.on_stage(StageEvent { stage: Stage::Tempo, applied: changes_tempo });
        let buffer = if changes_tempo {
            let t = Instant::now();
            let out = Resampler::resample(decoded, self.params.tempo_factor)
                .map_err(|e| TempoBassError::processing(format!("Tempo stage: {}", e)))?;
            timings.push((Stage::Tempo, t.elapsed()));
            log::info!("Tempo x{}: {} -> {} frames", self.params.tempo_factor, input_frames, out.frame_count());
            out
        } else {
            log::info!("Tempo unchanged, skipping");
            decoded
        };
        self.check_cancelled()?;

        let boosts_bass = self.params.boosts_bass();
        observer.on_stage(StageEvent { stage: Stage::Bass, applied: boosts_bass });
        let buffer = if boosts_bass {
            let t = Instant::now();
            let out = BassEnhancer::boost_bass(buffer, self.params.bass_boost_db);
            timings.push((Stage::Bass, t.elapsed()));
            log::info!("Bass boost +{} dB applied", self.params.bass_boost_db);
            out
        } else {
            log::info!("Bass boost off, skipping");
            buffer
        };
        self.check_cancelled()?;

        observer.on_stage(StageEvent { stage: Stage::Finalize, applied: true });
        let clipped_samples = buffer.count_out_of_range();
        if clipped_samples > 0 {
            log::warn!("{} samples outside [-1.0, 1.0] will be clipped", clipped_samples);
        }
        let t = Instant::now();
        let wav = WavEncoder::encode(&buffer)?;
        timings.push((Stage::Finalize, t.elapsed()));

        observer.on_stage(StageEvent { stage: Stage::Done, applied: true });

        let processing_time = start.elapsed();
        let real_time_factor = if input_duration > 0.0 {
            processing_time.as_secs_f64() / input_duration
        } else {
            0.0
        };

        let report = ProcessingReport {
            params: self.params,
            sample_rate,
            channels,
            input_frames,
            output_frames: buffer.frame_count(),
            input_duration_seconds: input_duration,
            output_duration_seconds: buffer.duration(),
            stage_timings: timings,
            processing_time,
            real_time_factor,
            clipped_samples,
            encoded_bytes: wav.len(),
        };
        log::debug!("{}: {} bytes in {:.3}s", Stage::Done.label(), wav.len(), processing_time.as_secs_f64());

        Ok(ProcessingOutput { wav, report })
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => {
                log::info!("Processing cancelled between stages");
                Err(TempoBassError::Cancelled)
            }
            _ => Ok(()),
        }
    }
}

/// One-shot processing: validate, transform and encode.
pub fn process(decoded: SampleBuffer, tempo_factor: f64, bass_boost_db: f64) -> Result<Vec<u8>> {
    process_with_progress(decoded, tempo_factor, bass_boost_db, &mut NoProgress)
}

pub fn process_with_progress(
    decoded: SampleBuffer,
    tempo_factor: f64,
    bass_boost_db: f64,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<u8>> {
    let pipeline = Pipeline::new(ProcessingParams::new(tempo_factor, bass_boost_db))?;
    Ok(pipeline.run(decoded, observer)?.wav)
}

//! Processing parameters, presets and caller-facing guidance

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::error::{TempoBassError, Result};

/// Range accepted by the interactive front end for the tempo factor.
pub const TEMPO_RANGE: (f64, f64) = (0.25, 2.5);
/// Range accepted by the interactive front end for the bass boost, in dB.
pub const BASS_RANGE_DB: (f64, f64) = (0.0, 15.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingParams {
    pub tempo_factor: f64,
    pub bass_boost_db: f64,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            tempo_factor: 1.0,
            bass_boost_db: 0.0,
        }
    }
}

impl ProcessingParams {
    pub fn new(tempo_factor: f64, bass_boost_db: f64) -> Self {
        Self { tempo_factor, bass_boost_db }
    }

    /// Check the preconditions of the processing stages.
    pub fn validate(&self) -> Result<()> {
        if !self.tempo_factor.is_finite() || self.tempo_factor <= 0.0 {
            return Err(TempoBassError::invalid_parameter(format!(
                "Tempo factor must be positive and finite, got {}", self.tempo_factor
            )));
        }
        if !self.bass_boost_db.is_finite() || self.bass_boost_db < 0.0 {
            return Err(TempoBassError::invalid_parameter(format!(
                "Bass boost must be a non-negative number of dB, got {}", self.bass_boost_db
            )));
        }
        Ok(())
    }

    pub fn changes_tempo(&self) -> bool {
        self.tempo_factor != 1.0
    }

    pub fn boosts_bass(&self) -> bool {
        self.bass_boost_db > 0.0
    }

    pub fn is_identity(&self) -> bool {
        !self.changes_tempo() && !self.boosts_bass()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TempoPreset {
    Slowed,
    Normal,
    SpedUp,
}

impl TempoPreset {
    pub fn factor(self) -> f64 {
        match self {
            TempoPreset::Slowed => 0.75,
            TempoPreset::Normal => 1.0,
            TempoPreset::SpedUp => 1.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BassPreset {
    Clean,
    Boosted,
    Ultra,
}

impl BassPreset {
    pub fn boost_db(self) -> f64 {
        match self {
            BassPreset::Clean => 0.0,
            BassPreset::Boosted => 5.0,
            BassPreset::Ultra => 10.0,
        }
    }
}

/// Messages for values outside the front end's slider ranges.
pub fn validate_ranges(params: &ProcessingParams) -> Vec<String> {
    let mut errors = Vec::new();

    if !(TEMPO_RANGE.0..=TEMPO_RANGE.1).contains(&params.tempo_factor) {
        errors.push(format!("Tempo factor must be between {} and {}", TEMPO_RANGE.0, TEMPO_RANGE.1));
    }
    if !(BASS_RANGE_DB.0..=BASS_RANGE_DB.1).contains(&params.bass_boost_db) {
        errors.push(format!("Bass boost must be between {} and {} dB", BASS_RANGE_DB.0, BASS_RANGE_DB.1));
    }

    errors
}

/// Advice about settings that tend to produce artefacts.
pub fn recommendations(params: &ProcessingParams) -> Vec<String> {
    let mut tips = Vec::new();
    let (tempo, bass) = (params.tempo_factor, params.bass_boost_db);

    if tempo < 0.5 {
        tips.push("Very slow tempo may result in artifacts. Consider using 0.5x or higher.".to_string());
    }
    if tempo > 1.5 {
        tips.push("Very fast tempo may cause quality degradation. Consider using 1.5x or lower.".to_string());
    }
    if bass > 10.0 {
        tips.push("High bass boost may cause distortion. Consider using 10 dB or lower.".to_string());
    }
    if tempo < 1.0 && bass > 5.0 {
        tips.push("Slowed tracks with bass boost give the popular 'slowed + reverb' sound.".to_string());
    }

    tips
}

pub fn describe_tempo(tempo: f64) -> &'static str {
    if tempo == 1.0 {
        "Original"
    } else if tempo < 0.6 {
        "Super Slowed"
    } else if tempo < 1.0 {
        "Slowed"
    } else if tempo <= 1.3 {
        "Sped Up"
    } else {
        "Super Fast"
    }
}

pub fn describe_bass(db: f64) -> &'static str {
    if db == 0.0 {
        "Original"
    } else if db <= 3.0 {
        "Light Boost"
    } else if db <= 7.0 {
        "Medium Boost"
    } else if db <= 10.0 {
        "Heavy Boost"
    } else {
        "Ultra Boost"
    }
}

/// Rough wall-clock estimate for a source file of `size_mb` megabytes.
pub fn estimate_processing_seconds(size_mb: f64, params: &ProcessingParams) -> f64 {
    let mut secs = size_mb * 0.5;
    if params.changes_tempo() {
        secs *= 1.5;
    }
    if params.boosts_bass() {
        secs *= 1.1;
    }
    secs.max(2.0)
}

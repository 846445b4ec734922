use serde::{Deserialize, Serialize};

use crate::ssml::SsmlDocument;

/// Input for one synthesis call: exactly one of plain text or markup.
#[derive(Debug, Clone)]
pub enum SynthesisInput {
    Text(String),
    Ssml(SsmlDocument),
}

/// Voice selection for TTS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    pub language_code: String,
    pub name: String,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            language_code: "ja-JP".to_string(),
            name: "ja-JP-Wavenet-D".to_string(),
        }
    }
}

/// Global rate/pitch tuning applied to one synthesis request. Neutral values
/// are omitted from the wire request so the engine defaults apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioTuning {
    /// Speaking-rate multiplier, 1.0 = unchanged
    pub speaking_rate: f64,
    /// Pitch offset in semitones, 0.0 = unchanged
    pub pitch: f64,
}

impl AudioTuning {
    pub fn neutral() -> Self {
        Self {
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }

    pub fn new(speaking_rate: f64, pitch: f64) -> Self {
        Self {
            speaking_rate,
            pitch,
        }
    }
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self::neutral()
    }
}

use anyhow::Result;
use async_trait::async_trait;

use super::types::{AudioTuning, SynthesisInput, Voice};

/// Trait for speech-synthesis providers. Errors are the caller's problem:
/// there is no retry or fallback at this seam.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one input to encoded audio bytes
    async fn synthesize(
        &self,
        input: &SynthesisInput,
        voice: &Voice,
        tuning: AudioTuning,
    ) -> Result<Vec<u8>>;
}

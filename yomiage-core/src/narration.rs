//! Fixed four-variant comparison workflow.
//!
//! Variant order and file names are fixed. AI-tagging failures are absorbed
//! inside [`SsmlTagger`]; synthesis failures propagate and end the run at
//! that variant.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::ai::tagger::SsmlTagger;
use crate::ssml::{self, SsmlDocument};
use crate::tts::provider::SpeechSynthesizer;
use crate::tts::types::{AudioTuning, SynthesisInput, Voice};

pub const DEFAULT_FILE: &str = "news_1_default.mp3";
pub const MANUAL_TUNED_FILE: &str = "news_2_manual_tuned.mp3";
pub const AUTO_TAGGED_FILE: &str = "news_3_auto_tagged.mp3";
pub const AI_TUNED_FILE: &str = "news_4_ai_tuned.mp3";

/// Generate all comparison variants of `text` into `out_dir`, overwriting
/// existing files. When `include_ai` is false the AI-tuned variant is skipped.
pub async fn generate_comparison(
    text: &str,
    tagger: &SsmlTagger,
    synthesizer: &dyn SpeechSynthesizer,
    voice: &Voice,
    out_dir: &Path,
    include_ai: bool,
) -> Result<()> {
    info!("Generating default version");
    synthesize_to_file(
        synthesizer,
        &SynthesisInput::Text(text.to_string()),
        voice,
        AudioTuning::neutral(),
        &out_dir.join(DEFAULT_FILE),
    )
    .await?;

    info!("Generating manually tuned version");
    synthesize_to_file(
        synthesizer,
        &SynthesisInput::Ssml(ssml::manual_tune(text)),
        voice,
        AudioTuning::new(0.95, -1.0),
        &out_dir.join(MANUAL_TUNED_FILE),
    )
    .await?;

    info!("Generating rule-tagged version");
    synthesize_to_file(
        synthesizer,
        &SynthesisInput::Ssml(ssml::rule_tag(text)),
        voice,
        AudioTuning::neutral(),
        &out_dir.join(AUTO_TAGGED_FILE),
    )
    .await?;

    if include_ai {
        info!("Generating AI-tuned version");
        let ai_ssml: SsmlDocument = tagger.tag(text).await;
        info!(ssml = %ai_ssml, "AI-generated SSML");
        synthesize_to_file(
            synthesizer,
            &SynthesisInput::Ssml(ai_ssml),
            voice,
            AudioTuning::neutral(),
            &out_dir.join(AI_TUNED_FILE),
        )
        .await?;
    }

    Ok(())
}

async fn synthesize_to_file(
    synthesizer: &dyn SpeechSynthesizer,
    input: &SynthesisInput,
    voice: &Voice,
    tuning: AudioTuning,
    path: &Path,
) -> Result<()> {
    let audio = synthesizer.synthesize(input, voice, tuning).await?;
    tokio::fs::write(path, &audio)
        .await
        .with_context(|| format!("Failed to write {path:?}"))?;
    info!(?path, bytes = audio.len(), "Audio written");
    Ok(())
}

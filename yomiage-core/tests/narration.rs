use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use yomiage_core::ai::mock::{MockBehavior, MockGenerator};
use yomiage_core::ai::tagger::SsmlTagger;
use yomiage_core::narration::{
    self, AI_TUNED_FILE, AUTO_TAGGED_FILE, DEFAULT_FILE, MANUAL_TUNED_FILE,
};
use yomiage_core::tts::provider::SpeechSynthesizer;
use yomiage_core::tts::types::{AudioTuning, SynthesisInput, Voice};

#[derive(Debug, Clone)]
struct RecordedCall {
    input: String,
    is_ssml: bool,
    tuning: AudioTuning,
}

/// Records every synthesis request and optionally fails from the Nth call on.
#[derive(Clone, Default)]
struct RecordingSynthesizer {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    fail_from_call: Option<usize>,
}

impl RecordingSynthesizer {
    fn failing_from(call: usize) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_from_call: Some(call),
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn synthesize(
        &self,
        input: &SynthesisInput,
        _voice: &Voice,
        tuning: AudioTuning,
    ) -> Result<Vec<u8>> {
        let (text, is_ssml) = match input {
            SynthesisInput::Text(text) => (text.clone(), false),
            SynthesisInput::Ssml(doc) => (doc.as_str().to_string(), true),
        };

        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            input: text,
            is_ssml,
            tuning,
        });

        if let Some(fail_from) = self.fail_from_call {
            if calls.len() >= fail_from {
                anyhow::bail!("synthesis backend unavailable");
            }
        }

        Ok(b"fake-mp3".to_vec())
    }
}

const TEXT: &str = "静岡県にある「未来環境研究所」は本日、新素材を発表しました。";

#[tokio::test]
async fn four_variants_in_fixed_order() {
    let out = TempDir::new().unwrap();
    let synthesizer = RecordingSynthesizer::default();
    let generator = MockGenerator::new(MockBehavior::Reply(
        "<speak>モデル出力<break time=\"600ms\"/></speak>".to_string(),
    ));
    let tagger = SsmlTagger::new(Arc::new(generator));

    narration::generate_comparison(
        TEXT,
        &tagger,
        &synthesizer,
        &Voice::default(),
        out.path(),
        true,
    )
    .await
    .unwrap();

    let calls = synthesizer.calls();
    assert_eq!(calls.len(), 4);

    // (a) plain text, neutral
    assert!(!calls[0].is_ssml);
    assert_eq!(calls[0].input, TEXT);
    assert_eq!(calls[0].tuning, AudioTuning::neutral());

    // (b) manual ssml, tuned rate/pitch
    assert!(calls[1].is_ssml);
    assert!(calls[1].input.contains("<break time=\"700ms\"/>"));
    assert_eq!(calls[1].tuning, AudioTuning::new(0.95, -1.0));

    // (c) rule-tagged ssml, neutral
    assert!(calls[2].is_ssml);
    assert!(calls[2].input.contains("<break time=\"600ms\"/>"));
    assert!(calls[2].input.contains("<emphasis level=\"moderate\">"));
    assert_eq!(calls[2].tuning, AudioTuning::neutral());

    // (d) ai ssml, neutral
    assert!(calls[3].is_ssml);
    assert_eq!(
        calls[3].input,
        "<speak>モデル出力<break time=\"600ms\"/></speak>"
    );
    assert_eq!(calls[3].tuning, AudioTuning::neutral());

    for file in [
        DEFAULT_FILE,
        MANUAL_TUNED_FILE,
        AUTO_TAGGED_FILE,
        AI_TUNED_FILE,
    ] {
        let written = std::fs::read(out.path().join(file)).unwrap();
        assert_eq!(written, b"fake-mp3");
    }
}

#[tokio::test]
async fn ai_failure_still_produces_fourth_variant() {
    let out = TempDir::new().unwrap();
    let synthesizer = RecordingSynthesizer::default();
    let tagger = SsmlTagger::new(Arc::new(MockGenerator::new(
        MockBehavior::AlwaysRetryableError,
    )));

    narration::generate_comparison(
        TEXT,
        &tagger,
        &synthesizer,
        &Voice::default(),
        out.path(),
        true,
    )
    .await
    .unwrap();

    let calls = synthesizer.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3].input, format!("<speak>{TEXT}</speak>"));
    assert!(out.path().join(AI_TUNED_FILE).exists());
}

#[tokio::test]
async fn synthesis_failure_stops_the_run() {
    let out = TempDir::new().unwrap();
    let synthesizer = RecordingSynthesizer::failing_from(2);
    let tagger = SsmlTagger::new(Arc::new(MockGenerator::default()));

    let result = narration::generate_comparison(
        TEXT,
        &tagger,
        &synthesizer,
        &Voice::default(),
        out.path(),
        true,
    )
    .await;

    assert!(result.is_err());
    assert!(out.path().join(DEFAULT_FILE).exists());
    assert!(!out.path().join(MANUAL_TUNED_FILE).exists());
    assert!(!out.path().join(AUTO_TAGGED_FILE).exists());
    assert!(!out.path().join(AI_TUNED_FILE).exists());
}

#[tokio::test]
async fn skip_ai_leaves_out_fourth_variant() {
    let out = TempDir::new().unwrap();
    let synthesizer = RecordingSynthesizer::default();
    let generator = MockGenerator::default();
    let tagger = SsmlTagger::new(Arc::new(generator.clone()));

    narration::generate_comparison(
        TEXT,
        &tagger,
        &synthesizer,
        &Voice::default(),
        out.path(),
        false,
    )
    .await
    .unwrap();

    assert_eq!(synthesizer.calls().len(), 3);
    assert_eq!(generator.call_count(), 0);
    assert!(!out.path().join(AI_TUNED_FILE).exists());
}

#[tokio::test]
async fn existing_files_are_overwritten() {
    let out = TempDir::new().unwrap();
    std::fs::write(out.path().join(DEFAULT_FILE), b"stale").unwrap();

    let synthesizer = RecordingSynthesizer::default();
    let tagger = SsmlTagger::new(Arc::new(MockGenerator::default()));

    narration::generate_comparison(
        TEXT,
        &tagger,
        &synthesizer,
        &Voice::default(),
        out.path(),
        false,
    )
    .await
    .unwrap();

    let written = std::fs::read(out.path().join(DEFAULT_FILE)).unwrap();
    assert_eq!(written, b"fake-mp3");
}

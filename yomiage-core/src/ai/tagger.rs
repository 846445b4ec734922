//! AI-driven SSML tagging with defensive degradation.

use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::provider::TextGenerator;
use crate::ssml::SsmlDocument;

/// Tags plain text with SSML by prompting a generative model. Model failures
/// never escape: the tagger degrades to a bare `<speak>` wrapping instead.
pub struct SsmlTagger {
    generator: Arc<dyn TextGenerator>,
}

impl SsmlTagger {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One round-trip to the model. Returns possibly-inferior markup on any
    /// remote failure, never an error. Repeated calls may yield different
    /// markup; that is accepted.
    pub async fn tag(&self, text: &str) -> SsmlDocument {
        let prompt = build_prompt(text);

        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                info!(provider = self.generator.name(), "AI tagging complete");
                SsmlDocument::from_model_output(&reply)
            }
            Err(e) => {
                warn!(
                    provider = self.generator.name(),
                    error = ?e,
                    "AI tagging failed, falling back to untagged markup"
                );
                SsmlDocument::wrap(text)
            }
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"You are an expert in Speech Synthesis Markup Language (SSML) for Japanese news narration.
Your task is to take the following plain Japanese text and convert it into a fully-formed SSML string, ready for a Text-to-Speech engine.
Follow these rules precisely:
1. The entire output must be a single, valid SSML string. Start with `<speak>` and end with `</speak>`.
2. Do NOT include any other text, explanations, or markdown like ```ssml ... ```.
3. Use `<break time="600ms"/>` to create natural pauses after sentences.
4. Use `<emphasis level="moderate">` on important keywords or phrases to make them stand out.
5. Use the `<prosody>` tag to subtly vary the rate and pitch so the speech sounds like a professional news anchor. The goal is a natural, engaging narration, not an over-dramatized one.
Here is the text to convert:
---
{text}
---"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{MockBehavior, MockGenerator};

    #[tokio::test]
    async fn prompt_embeds_input_verbatim() {
        let mock = MockGenerator::new(MockBehavior::Reply("<speak>x</speak>".to_string()));
        let tagger = SsmlTagger::new(Arc::new(mock.clone()));

        tagger.tag("静岡で開発。").await;

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("静岡で開発。"));
        assert!(prompt.contains("<speak>"));
    }

    #[tokio::test]
    async fn model_reply_is_sanitized() {
        let mock = MockGenerator::new(MockBehavior::Reply(
            "```xml\n<speak>こんにちは<break time=\"600ms\"/></speak>\n```".to_string(),
        ));
        let tagger = SsmlTagger::new(Arc::new(mock));

        let doc = tagger.tag("こんにちは").await;
        assert_eq!(
            doc.as_str(),
            "<speak>こんにちは<break time=\"600ms\"/></speak>"
        );
    }

    #[tokio::test]
    async fn retryable_error_degrades_to_bare_wrapping() {
        let mock = MockGenerator::new(MockBehavior::AlwaysRetryableError);
        let tagger = SsmlTagger::new(Arc::new(mock.clone()));

        let doc = tagger.tag("このニュースは架空のものです。").await;
        assert_eq!(doc.as_str(), "<speak>このニュースは架空のものです。</speak>");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn terminal_error_degrades_to_bare_wrapping() {
        let mock = MockGenerator::new(MockBehavior::AlwaysTerminalError);
        let tagger = SsmlTagger::new(Arc::new(mock));

        let doc = tagger.tag("テスト。").await;
        assert_eq!(doc.as_str(), "<speak>テスト。</speak>");
    }
}

//! SSML document type and the rule-based tagger.
//!
//! An [`SsmlDocument`] is always wrapped in exactly one `<speak>` root, and
//! every emphasis span it carries is closed. The tagging functions here are
//! pure; anything involving a model lives in [`crate::ai`].

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const SPEAK_OPEN: &str = "<speak>";
const SPEAK_CLOSE: &str = "</speak>";

/// Pause inserted after each sentence by the rule-based tagger.
pub const SENTENCE_BREAK: &str = r#"<break time="600ms"/>"#;

/// Longer pause used by the manually-tuned variant.
pub const MANUAL_BREAK: &str = r#"<break time="700ms"/>"#;

/// A speech-synthesis markup document wrapped in a single `<speak>` root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmlDocument(String);

impl SsmlDocument {
    /// Wrap plain text in a bare root element, adding no markup.
    pub fn wrap(text: &str) -> Self {
        Self(format!("{SPEAK_OPEN}{text}{SPEAK_CLOSE}"))
    }

    /// Sanitize raw model output into a document: strip markdown code fences
    /// the model may have added despite instructions, then ensure the root
    /// element is present.
    pub fn from_model_output(raw: &str) -> Self {
        let stripped = strip_code_fences(raw.trim());
        if stripped.starts_with(SPEAK_OPEN) && stripped.ends_with(SPEAK_CLOSE) {
            Self(stripped.to_string())
        } else {
            Self::wrap(stripped)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SsmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn emphasis_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("「[^」]+」").expect("emphasis pattern is valid"))
}

/// Rule-based SSML tagging: a fixed pause after every sentence terminator and
/// moderate emphasis on every matched `「…」` pair. Unmatched brackets are left
/// untouched. Deterministic and side-effect free.
pub fn rule_tag(text: &str) -> SsmlDocument {
    let mut tagged = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        tagged.push(ch);
        if matches!(ch, '。' | '！' | '？') {
            tagged.push_str(SENTENCE_BREAK);
        }
    }

    let tagged = emphasis_pattern().replace_all(&tagged, |caps: &regex::Captures| {
        format!(r#"<emphasis level="moderate">{}</emphasis>"#, &caps[0])
    });

    SsmlDocument::wrap(&tagged)
}

/// The manually-authored variant: longer pauses after each sentence, no
/// emphasis. Meant to be synthesized with non-neutral global rate and pitch.
pub fn manual_tune(text: &str) -> SsmlDocument {
    SsmlDocument::wrap(&text.replace('。', &format!("。{MANUAL_BREAK}")))
}

fn strip_code_fences(text: &str) -> &str {
    let mut text = text;
    for prefix in ["```xml", "```ssml", "```"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

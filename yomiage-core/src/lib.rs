pub mod ai;
pub mod auth;
pub mod narration;
pub mod ssml;
pub mod tts;

pub use ai::provider::TextGenerator;
pub use ai::tagger::SsmlTagger;
pub use auth::{ConfigError, Credentials};
pub use ssml::{rule_tag, SsmlDocument};
pub use tts::provider::SpeechSynthesizer;

pub mod error;
pub mod gemini;
pub mod mock;
pub mod provider;
pub mod tagger;

pub use error::AiError;
pub use gemini::GeminiProvider;
pub use provider::TextGenerator;
pub use tagger::SsmlTagger;

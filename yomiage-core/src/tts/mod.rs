pub mod google;
pub mod provider;
pub mod types;

pub use google::GoogleTts;
pub use provider::SpeechSynthesizer;
pub use types::{AudioTuning, SynthesisInput, Voice};

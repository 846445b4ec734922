//! Google Cloud Text-to-Speech implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::provider::SpeechSynthesizer;
use super::types::{AudioTuning, SynthesisInput, Voice};
use crate::auth::Credentials;

const SYNTHESIZE_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Google Cloud text-to-speech provider, MP3 output.
pub struct GoogleTts {
    client: Client,
    credentials: Credentials,
}

impl GoogleTts {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(
        &self,
        input: &SynthesisInput,
        voice: &Voice,
        tuning: AudioTuning,
    ) -> Result<Vec<u8>> {
        let request = SynthesizeRequest::build(input, voice, tuning);

        debug!(voice = %voice.name, "Calling Cloud Text-to-Speech");

        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .header("x-goog-api-key", &self.credentials.api_key)
            .header("x-goog-user-project", &self.credentials.project_id)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Cloud Text-to-Speech")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Cloud Text-to-Speech error {status}: {body}");
        }

        let synthesized: SynthesizeResponse = response
            .json()
            .await
            .context("Failed to parse synthesis response")?;

        STANDARD
            .decode(synthesized.audio_content)
            .context("Failed to decode audio content")
    }
}

// Cloud TTS wire types

#[derive(Debug, Serialize)]
struct SynthesizeRequest {
    input: InputBody,
    voice: VoiceBody,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfigBody,
}

impl SynthesizeRequest {
    fn build(input: &SynthesisInput, voice: &Voice, tuning: AudioTuning) -> Self {
        let input = match input {
            SynthesisInput::Text(text) => InputBody {
                text: Some(text.clone()),
                ssml: None,
            },
            SynthesisInput::Ssml(doc) => InputBody {
                text: None,
                ssml: Some(doc.as_str().to_string()),
            },
        };

        Self {
            input,
            voice: VoiceBody {
                language_code: voice.language_code.clone(),
                name: voice.name.clone(),
            },
            audio_config: AudioConfigBody {
                audio_encoding: "MP3".to_string(),
                speaking_rate: (tuning.speaking_rate != 1.0).then_some(tuning.speaking_rate),
                pitch: (tuning.pitch != 0.0).then_some(tuning.pitch),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct InputBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssml: Option<String>,
}

#[derive(Debug, Serialize)]
struct VoiceBody {
    #[serde(rename = "languageCode")]
    language_code: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct AudioConfigBody {
    #[serde(rename = "audioEncoding")]
    audio_encoding: String,
    #[serde(rename = "speakingRate", skip_serializing_if = "Option::is_none")]
    speaking_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pitch: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

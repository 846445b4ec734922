use anyhow::anyhow;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ai::{error::AiError, provider::TextGenerator};
use crate::auth::Credentials;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub model: String,
    pub region: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            region: "us-central1".to_string(),
        }
    }
}

/// Gemini via the Vertex AI `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    credentials: Credentials,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(credentials: Credentials, config: GeminiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AiError::Terminal(anyhow!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/google/models/{model}:generateContent",
            region = self.config.region,
            project = self.credentials.project_id,
            model = self.config.model,
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.config.model, region = %self.config.region, "Calling Vertex AI");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.credentials.api_key)
            .header("x-goog-user-project", &self.credentials.project_id)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                debug!(?e, "Vertex AI call failed");
                AiError::Retryable(anyhow!("Network error: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Retryable(anyhow!("Failed to read response: {e}")))?;

        if !status.is_success() {
            debug!(?status, %body, "Vertex AI returned error");
            let error = anyhow!("Vertex AI error {status}: {body}");
            return if status.as_u16() == 429 || status.is_server_error() {
                Err(AiError::Retryable(error))
            } else {
                Err(AiError::Terminal(error))
            };
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AiError::Terminal(anyhow!("No candidates in response: {body}")))
    }
}

// Vertex AI generateContent wire types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

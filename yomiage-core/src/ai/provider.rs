use crate::ai::error::AiError;

/// Trait for hosted generative-model providers. One prompt in, one opaque
/// text reply out; callers decide what the reply means.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

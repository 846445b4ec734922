use std::sync::{Arc, Mutex};

use crate::ai::{error::AiError, provider::TextGenerator};

/// Mock behavior for the mock generator
#[derive(Debug, Clone, Default)]
pub enum MockBehavior {
    /// Return an empty reply
    #[default]
    Empty,
    /// Return a canned reply
    Reply(String),
    /// Always return a retryable error
    AlwaysRetryableError,
    /// Always return a terminal error
    AlwaysTerminalError,
}

/// Mock text generator for testing
#[derive(Clone, Default)]
pub struct MockGenerator {
    behavior: Arc<Mutex<MockBehavior>>,
    captured_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            captured_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn call_count(&self) -> usize {
        self.captured_prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.captured_prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.captured_prompts
            .lock()
            .unwrap()
            .push(prompt.to_string());

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Reply(reply) => Ok(reply),
            MockBehavior::AlwaysRetryableError => Err(AiError::Retryable(anyhow::anyhow!(
                "Mock retryable error (always fails)"
            ))),
            MockBehavior::AlwaysTerminalError => Err(AiError::Terminal(anyhow::anyhow!(
                "Mock terminal error (always fails)"
            ))),
        }
    }
}

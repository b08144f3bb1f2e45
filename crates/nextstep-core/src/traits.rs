use async_trait::async_trait;

use crate::types::Category;

/// Delegated query understanding. `Ok(None)` means the service could not decide.
#[async_trait]
pub trait QueryUnderstanding: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Option<Category>>;
}

/// Free-text generation from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

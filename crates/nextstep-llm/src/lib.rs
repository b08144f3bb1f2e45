//! nextstep-llm
//!
//! External text capabilities behind the `TextGenerator` and
//! `QueryUnderstanding` traits: an OpenAI-compatible network client, and the
//! deterministic template used whenever that client is missing, slow or failing.

use std::sync::Arc;

use nextstep_core::config::ServiceSettings;
use nextstep_core::traits::{QueryUnderstanding, TextGenerator};

pub mod client;
pub mod remote;
pub mod synthesizer;
pub mod template;

pub use client::ChatCompletionsClient;
pub use remote::{parse_category, RemoteGenerator, RemoteUnderstanding};
pub use synthesizer::ResponseSynthesizer;
pub use template::{build_prompt, TemplateSynthesizer, NO_MATCH_MESSAGE};

/// API key from the environment variable named in `settings`, if set and non-blank.
pub fn api_key(settings: &ServiceSettings) -> Option<String> {
    std::env::var(&settings.api_key_env).ok().filter(|k| !k.trim().is_empty())
}

fn default_client(settings: &ServiceSettings) -> anyhow::Result<Option<Arc<ChatCompletionsClient>>> {
    if !settings.enabled {
        tracing::info!("external text services disabled by configuration");
        return Ok(None);
    }
    let Some(key) = api_key(settings) else {
        tracing::warn!(env = %settings.api_key_env, "API key not set; replies use the template fallback");
        return Ok(None);
    };
    Ok(Some(Arc::new(ChatCompletionsClient::new(settings, key)?)))
}

/// Network-backed generator when configured, otherwise `None` (template replies).
pub fn get_default_generator(settings: &ServiceSettings) -> anyhow::Result<Option<Arc<dyn TextGenerator>>> {
    Ok(default_client(settings)?
        .map(|client| Arc::new(RemoteGenerator::new(client, settings.max_tokens)) as Arc<dyn TextGenerator>))
}

/// Network-backed classifier delegate when configured, otherwise `None` (keywords only).
pub fn get_default_understanding(settings: &ServiceSettings) -> anyhow::Result<Option<Arc<dyn QueryUnderstanding>>> {
    Ok(default_client(settings)?
        .map(|client| Arc::new(RemoteUnderstanding::new(client)) as Arc<dyn QueryUnderstanding>))
}

use std::sync::Arc;
use std::time::Duration;

use nextstep_core::traits::TextGenerator;
use nextstep_core::types::RankedResource;

use crate::template::{build_prompt, TemplateSynthesizer, NO_MATCH_MESSAGE};

/// Turns ranked resources into the reply text.
///
/// With a generator attached the reply is generated under `timeout` and cut
/// to `max_chars`. Errors, timeouts and blank output fall back to the template.
pub struct ResponseSynthesizer {
    generator: Option<Arc<dyn TextGenerator>>,
    template: TemplateSynthesizer,
    timeout: Duration,
    max_chars: usize,
}

impl ResponseSynthesizer {
    pub fn template_only() -> Self {
        Self { generator: None, template: TemplateSynthesizer, timeout: Duration::from_secs(3), max_chars: 1200 }
    }

    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration, max_chars: usize) -> Self {
        Self { generator, template: TemplateSynthesizer, timeout, max_chars: max_chars.max(1) }
    }

    pub fn has_generator(&self) -> bool { self.generator.is_some() }

    pub async fn synthesize(&self, query: &str, top: &[RankedResource], found: usize) -> String {
        if found == 0 || top.is_empty() {
            return NO_MATCH_MESSAGE.to_string();
        }
        if let Some(generator) = &self.generator {
            let prompt = build_prompt(query, top);
            match tokio::time::timeout(self.timeout, generator.generate(&prompt)).await {
                Ok(Ok(text)) => {
                    let text = truncate_chars(text.trim(), self.max_chars);
                    if !text.is_empty() {
                        return text;
                    }
                    tracing::warn!("text generator returned an empty reply; using template");
                }
                Ok(Err(e)) => tracing::warn!(error = %e, "text generator failed; using template"),
                Err(_) => tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "text generator timed out; using template"),
            }
        }
        self.template.render(query, top, found)
    }
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].trim_end().to_string(),
        None => text.to_string(),
    }
}

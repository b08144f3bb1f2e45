use async_trait::async_trait;
use std::sync::Arc;

use nextstep_core::normalize::normalize;
use nextstep_core::traits::{QueryUnderstanding, TextGenerator};
use nextstep_core::types::Category;

use crate::client::ChatCompletionsClient;

const GENERATOR_SYSTEM: &str = "You are NextStep, a caseworker assistant for community resources. \
Answer only from the resources you are given. Reply in the language of the request. \
Be brief and include names and phone numbers.";

const UNRESOLVED: &str = "unresolved";

/// Response generation over a chat completions endpoint.
pub struct RemoteGenerator {
    client: Arc<ChatCompletionsClient>,
    max_tokens: u32,
}

impl RemoteGenerator {
    pub fn new(client: Arc<ChatCompletionsClient>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }
}

#[async_trait]
impl TextGenerator for RemoteGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.client.complete(GENERATOR_SYSTEM, prompt, self.max_tokens).await
    }
}

/// Category resolution for requests the keyword lexicon cannot place.
pub struct RemoteUnderstanding {
    client: Arc<ChatCompletionsClient>,
    system: String,
}

impl RemoteUnderstanding {
    pub fn new(client: Arc<ChatCompletionsClient>) -> Self {
        let ids: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let system = format!(
            "Classify the help request into one category. Valid ids: {}. \
Reply with the id only, or '{UNRESOLVED}' if none applies.",
            ids.join(", ")
        );
        Self { client, system }
    }
}

#[async_trait]
impl QueryUnderstanding for RemoteUnderstanding {
    async fn classify(&self, text: &str) -> anyhow::Result<Option<Category>> {
        let answer = self.client.complete(&self.system, text, 8).await?;
        let category = parse_category(&answer);
        tracing::debug!(answer = %answer.trim(), category = ?category, "understanding service answered");
        Ok(category)
    }
}

/// Reads a category id out of a free-form service answer.
///
/// An exact id (in any case, with spaces or dashes) wins; otherwise the
/// earliest id mentioned in the answer is taken.
pub fn parse_category(answer: &str) -> Option<Category> {
    let answer = answer.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '`');
    if let Ok(category) = answer.parse::<Category>() {
        return Some(category);
    }
    let text = format!(" {} ", normalize(answer));
    if text.contains(&format!(" {UNRESOLVED} ")) {
        return None;
    }
    Category::ALL
        .iter()
        .filter_map(|c| {
            let id = format!(" {} ", c.as_str().replace('_', " "));
            text.find(&id).map(|pos| (pos, *c))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ids_parse() {
        assert_eq!(parse_category("food"), Some(Category::Food));
        assert_eq!(parse_category(" Mental_Health\n"), Some(Category::MentalHealth));
        assert_eq!(parse_category("\"substance-abuse\""), Some(Category::SubstanceAbuse));
    }

    #[test]
    fn ids_inside_sentences_parse() {
        assert_eq!(parse_category("Category: housing."), Some(Category::Housing));
        assert_eq!(parse_category("It is interpersonal_violence, maybe housing"), Some(Category::InterpersonalViolence));
    }

    #[test]
    fn unresolved_and_noise_give_none() {
        assert_eq!(parse_category("unresolved"), None);
        assert_eq!(parse_category("I cannot tell"), None);
        assert_eq!(parse_category(""), None);
    }
}

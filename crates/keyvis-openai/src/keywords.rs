//! Conversational keyword generation for topics that arrive without any.

use keyvis_core::{Intent, KeywordWithIntent, Topic};
use serde::Deserialize;

use crate::client::OpenAiClient;
use crate::error::OpenAiError;

const GENERATION_PROMPT: &str = "\
Create conversational keywords for SEO by focusing on informational, commercial, and transactional intents based on a given topic. Generate keywords that mimic the conversational style users would employ when interacting with language models, rather than static search engine queries.

- **Informational Intent:** What information a user might seek about the topic
- **Commercial Intent:** What comparisons or evaluations a user might seek when considering a purchase related to the topic.
- **Transactional Intent:** What expressions a user might use when ready to purchase or commit to a transaction related to the topic.

# Steps

1. **Understand the Topic:** Analyze the provided topic to focus your keyword creation on relevant and meaningful conversations.
2. **Identify Intents:**
   - **Informational Intent:** Craft questions or phrases that imply a need for understanding or learning more about the topic.
   - **Commercial Intent:** Develop queries that suggest a user is in the process of comparing options or considering buying.
   - **Transactional Intent:** Formulate keywords that show the user's readiness to make a purchase or complete a transaction.
3. **Generate Conversational Keywords:** Create 1-5 conversational keywords for each of the three intents.

# Notes

- Ensure that each keyword genuinely reflects a natural question or query a user might have.
- Conversational keywords should mimic the natural language and phrasing users might use in conversational interactions with language models. Adjust the complexity and specificity based on the topic's typical audience.
- Queries you make should not be mentioning or specifically about one or more brands/products.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedKeywords {
    #[serde(default)]
    informational_intent_keywords: Vec<String>,
    #[serde(default)]
    commercial_intent_keywords: Vec<String>,
    #[serde(default)]
    transactional_intent_keywords: Vec<String>,
}

fn generation_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "informationalIntentKeywords": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Conversational keywords that have informational intent"
            },
            "commercialIntentKeywords": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Conversational keywords that have commercial intent"
            },
            "transactionalIntentKeywords": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Conversational keywords that have transactional intent"
            }
        },
        "required": [
            "informationalIntentKeywords",
            "commercialIntentKeywords",
            "transactionalIntentKeywords"
        ],
        "additionalProperties": false
    })
}

/// Generate conversational keywords for a topic that has none.
///
/// Topics that already carry keywords are left untouched: keywords and stats
/// round-trip through the client, and regenerating would discard the set the
/// existing history was sampled against.
///
/// # Errors
///
/// Returns [`OpenAiError`] when the generation call or its response parsing
/// fails; the caller surfaces this as a server error for the whole request.
pub async fn generate_keywords_for_topic(
    client: &OpenAiClient,
    model: &str,
    topic: &mut Topic,
) -> Result<(), OpenAiError> {
    if !topic.conversational_keywords.is_empty() {
        return Ok(());
    }

    let user_message = format!(
        "Generate 1-5 conversational keywords for the topic '{}'",
        topic.name
    );

    let generated: GeneratedKeywords = client
        .structured_completion(
            model,
            "conversationalKeywords",
            "Informational, commercial and transactional intented conversational keywords for the given topic",
            &generation_schema(),
            GENERATION_PROMPT,
            &user_message,
        )
        .await?;

    topic.conversational_keywords = flatten_keywords(generated);
    tracing::debug!(
        topic = %topic.name,
        count = topic.conversational_keywords.len(),
        "generated conversational keywords"
    );
    Ok(())
}

/// Flatten the three per-intent lists into one tagged sequence, in intent
/// order: informational, then commercial, then transactional.
fn flatten_keywords(generated: GeneratedKeywords) -> Vec<KeywordWithIntent> {
    let tag = |keywords: Vec<String>, intent: Intent| {
        keywords
            .into_iter()
            .map(move |keyword| KeywordWithIntent { keyword, intent })
    };

    tag(generated.informational_intent_keywords, Intent::Informational)
        .chain(tag(generated.commercial_intent_keywords, Intent::Commercial))
        .chain(tag(
            generated.transactional_intent_keywords,
            Intent::Transactional,
        ))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_tags_each_list_with_its_intent_in_order() {
        let generated = GeneratedKeywords {
            informational_intent_keywords: vec!["what is cold brew".to_string()],
            commercial_intent_keywords: vec!["best cold brew makers compared".to_string()],
            transactional_intent_keywords: vec!["buy cold brew maker online".to_string()],
        };

        let keywords = flatten_keywords(generated);

        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0].intent, Intent::Informational);
        assert_eq!(keywords[1].intent, Intent::Commercial);
        assert_eq!(keywords[2].intent, Intent::Transactional);
        assert_eq!(keywords[0].keyword, "what is cold brew");
    }

    #[test]
    fn flatten_handles_empty_lists() {
        let generated = GeneratedKeywords {
            informational_intent_keywords: Vec::new(),
            commercial_intent_keywords: vec!["compare oat milks".to_string()],
            transactional_intent_keywords: Vec::new(),
        };

        let keywords = flatten_keywords(generated);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].intent, Intent::Commercial);
    }

    #[tokio::test]
    async fn topics_with_existing_keywords_are_not_regenerated() {
        // Unroutable base URL: any request would fail, so success proves the
        // early return happened before any network activity.
        let client = OpenAiClient::with_base_url("test-key", 1, "http://127.0.0.1:9")
            .expect("client construction should not fail");

        let mut topic = Topic {
            name: "matcha".to_string(),
            conversational_keywords: vec![KeywordWithIntent {
                keyword: "is matcha healthy".to_string(),
                intent: Intent::Informational,
            }],
            search_engines: std::collections::HashMap::new(),
        };
        let before = topic.conversational_keywords.clone();

        generate_keywords_for_topic(&client, "gpt-4o", &mut topic)
            .await
            .expect("existing keywords should short-circuit");
        assert_eq!(topic.conversational_keywords, before);
    }
}

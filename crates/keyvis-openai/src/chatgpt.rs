//! ChatGPT search-surface engine.

use std::sync::Arc;

use futures::future::BoxFuture;
use keyvis_visibility::{KeywordVisibility, VisibilityError, VisibilityQuery};
use serde::Deserialize;

use crate::client::OpenAiClient;

const EXTRACTION_PROMPT: &str =
    "Analyze the response from the previous search result and find out the stats the user is looking for";

/// Visibility probe for the ChatGPT search surface.
///
/// One query is two upstream calls: answer the keyword with the hosted
/// web-search tool, then extract structured visibility stats from the
/// free-text answer with a second, schema-constrained completion.
pub struct ChatGptEngine {
    client: Arc<OpenAiClient>,
    search_model: String,
    extraction_model: String,
}

impl ChatGptEngine {
    /// Engine identifier used in per-topic registries.
    pub const ENGINE: &'static str = "ChatGPT";

    #[must_use]
    pub fn new(
        client: Arc<OpenAiClient>,
        search_model: impl Into<String>,
        extraction_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            search_model: search_model.into(),
            extraction_model: extraction_model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractedVisibility {
    has_brand_appeared: bool,
    distinct_brands: i64,
    avg_visibility_position: f64,
}

fn extraction_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "hasBrandAppeared": {
                "type": "boolean",
                "description": "Has the given brand / domain appeared in the given search result"
            },
            "distinctBrands": {
                "type": "integer",
                "description": "Number of distinct brands / domains in the given search result"
            },
            "avgVisibilityPosition": {
                "type": "number",
                "description": "Average visibility position of the given brand / domain in the given search result"
            }
        },
        "required": ["hasBrandAppeared", "distinctBrands", "avgVisibilityPosition"],
        "additionalProperties": false
    })
}

impl VisibilityQuery for ChatGptEngine {
    fn query<'a>(
        &'a self,
        keyword: &'a str,
    ) -> BoxFuture<'a, Result<KeywordVisibility, VisibilityError>> {
        Box::pin(async move {
            let answer = self
                .client
                .respond_with_web_search(&self.search_model, keyword)
                .await
                .map_err(|e| VisibilityError::Search(e.to_string()))?;

            let extracted: ExtractedVisibility = self
                .client
                .structured_completion(
                    &self.extraction_model,
                    "searchEngineStats",
                    "Statistics about the search engine results",
                    &extraction_schema(),
                    EXTRACTION_PROMPT,
                    &answer,
                )
                .await
                .map_err(|e| VisibilityError::Extraction(e.to_string()))?;

            Ok(KeywordVisibility {
                has_brand_appeared: extracted.has_brand_appeared,
                distinct_brands: extracted.distinct_brands,
                avg_visibility_position: extracted.avg_visibility_position,
            })
        })
    }
}

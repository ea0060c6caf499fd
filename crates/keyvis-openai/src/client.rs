//! HTTP client for the OpenAI API.
//!
//! Wraps `reqwest` with bearer auth, timeouts, and typed handling of the two
//! endpoints the pipeline uses: `/responses` with the hosted web-search tool
//! and `/chat/completions` with a strict JSON-schema response format.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::OpenAiError;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, HostedTool, JsonSchemaFormat,
    ResponseFormat, ResponsesRequest, ResponsesResponse, WEB_SEARCH_TOOL,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI REST API.
///
/// Use [`OpenAiClient::new`] for production or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, OpenAiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, OpenAiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("keyvis/0.1 (search-visibility)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Answer `input` with the hosted web-search tool forced on.
    ///
    /// Returns the concatenated output text of the model's answer.
    ///
    /// # Errors
    ///
    /// - [`OpenAiError::Api`] on a non-2xx status.
    /// - [`OpenAiError::EmptyResponse`] when the answer carries no text —
    ///   an unusable answer is never surfaced as a success.
    /// - [`OpenAiError::Http`] / [`OpenAiError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn respond_with_web_search(
        &self,
        model: &str,
        input: &str,
    ) -> Result<String, OpenAiError> {
        let request = ResponsesRequest {
            model,
            input,
            tools: vec![HostedTool {
                kind: WEB_SEARCH_TOOL,
            }],
            tool_choice: HostedTool {
                kind: WEB_SEARCH_TOOL,
            },
        };

        let response: ResponsesResponse = self.post_json("responses", &request).await?;
        let text = response.output_text();
        if text.trim().is_empty() {
            return Err(OpenAiError::EmptyResponse(format!(
                "web search answer for model {model} contained no output text"
            )));
        }
        Ok(text)
    }

    /// One chat completion constrained to a strict JSON schema, deserialized
    /// into `T`.
    ///
    /// # Errors
    ///
    /// - [`OpenAiError::Api`] on a non-2xx status.
    /// - [`OpenAiError::EmptyResponse`] when the completion has no content.
    /// - [`OpenAiError::Deserialize`] when the content does not match `T` —
    ///   a partially-populated payload is an error, not a success.
    pub async fn structured_completion<T: DeserializeOwned>(
        &self,
        model: &str,
        schema_name: &str,
        schema_description: &str,
        schema: &serde_json::Value,
        developer_message: &str,
        user_message: &str,
    ) -> Result<T, OpenAiError> {
        let request = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "developer",
                    content: developer_message,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name,
                    description: schema_description,
                    schema,
                    strict: true,
                },
            },
        };

        let response: ChatCompletionResponse =
            self.post_json("chat/completions", &request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(OpenAiError::EmptyResponse(format!(
                "chat completion for schema {schema_name} returned no content"
            )));
        }

        serde_json::from_str(&content).map_err(|e| OpenAiError::Deserialize {
            context: format!("chat/completions content for schema {schema_name}"),
            source: e,
        })
    }

    /// POST a JSON body, assert a 2xx status, and parse the response body.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, OpenAiError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| OpenAiError::Deserialize {
            context: url,
            source: e,
        })
    }
}

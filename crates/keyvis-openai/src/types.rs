//! Wire types for the two OpenAI endpoints the client speaks.
//!
//! Only the fields the pipeline reads are modeled; everything else in the
//! upstream payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

// --- Responses API (web search) ---

#[derive(Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub tools: Vec<HostedTool>,
    pub tool_choice: HostedTool,
}

/// Hosted tool reference, serialized as `{"type": "..."}`.
#[derive(Serialize)]
pub(crate) struct HostedTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub(crate) const WEB_SEARCH_TOOL: &str = "web_search_preview";

#[derive(Deserialize)]
pub(crate) struct ResponsesResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Deserialize)]
pub(crate) struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Deserialize)]
pub(crate) struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl ResponsesResponse {
    /// Concatenated text of every `output_text` part across message items.
    /// Tool-call items (e.g. the web search invocation) carry no text and
    /// are skipped.
    pub(crate) fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect()
    }
}

// --- Chat Completions API (structured extraction) ---

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
pub(crate) struct JsonSchemaFormat<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schema: &'a serde_json::Value,
    pub strict: bool,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponseMessage {
    #[serde(default)]
    pub content: String,
}

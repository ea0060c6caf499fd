//! OpenAI-backed collaborators for the keyvis pipeline.
//!
//! Wraps the OpenAI Responses API (hosted web-search tool) and Chat
//! Completions API (strict JSON-schema output) behind a typed client, and
//! builds on them for the two jobs the server needs: generating
//! conversational keywords for topics that arrive without any, and probing
//! keyword visibility on the ChatGPT search surface.

pub mod chatgpt;
pub mod client;
pub mod error;
pub mod keywords;
mod types;

pub use chatgpt::ChatGptEngine;
pub use client::OpenAiClient;
pub use error::OpenAiError;
pub use keywords::generate_keywords_for_topic;

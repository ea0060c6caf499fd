use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use keyvis_core::Topic;
use keyvis_openai::{generate_keywords_for_topic, ChatGptEngine};
use keyvis_visibility::{run_topic_visibility, VisibilitySettings};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub results: Vec<Topic>,
}

/// `POST /analyze` — generate missing keywords, then run one visibility
/// aggregation per topic for the ChatGPT engine.
///
/// Topics are processed sequentially; only the per-topic keyword fan-out is
/// concurrent. Keyword generation failures abort the whole request with a
/// server error before any visibility queries run. Individual visibility
/// query failures are logged inside the pipeline and excluded from
/// aggregation; they never change the response status.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::validation(format!("invalid request body: {e}")))?;

    if request.topics.is_empty() {
        return Err(ApiError::validation("no topics provided"));
    }

    tracing::info!(
        request_id = %req_id.0,
        domain = %request.domain,
        topics = request.topics.len(),
        "analyze request received"
    );

    let mut results = request.topics;

    // Generation pass: every topic gets its keyword list before any
    // visibility query runs, so a generation failure aborts cleanly with no
    // partial response.
    for topic in &mut results {
        if let Err(e) =
            generate_keywords_for_topic(&state.openai, &state.config.keyword_model, topic).await
        {
            tracing::error!(topic = %topic.name, error = %e, "keyword generation failed");
            return Err(ApiError::generation(e.to_string()));
        }
    }

    let engine = ChatGptEngine::new(
        Arc::clone(&state.openai),
        state.config.search_model.clone(),
        state.config.extraction_model.clone(),
    );
    let settings = VisibilitySettings::from_config(&state.config);

    for topic in &mut results {
        run_topic_visibility(&engine, topic, ChatGptEngine::ENGINE, &settings).await;
    }

    Ok(Json(AnalyzeResponse { results }))
}

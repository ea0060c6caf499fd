//! Topic, keyword, and per-engine visibility statistics.
//!
//! Field names follow the wire format the dashboard exchanges with the
//! `/analyze` endpoint, so these types serialize directly to the request and
//! response bodies without mapping layers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Search intent a conversational keyword was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Informational,
    Commercial,
    Transactional,
}

/// A conversational keyword tagged with its intent. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordWithIntent {
    pub keyword: String,
    pub intent: Intent,
}

/// One timestamped snapshot of the appearance count, appended per
/// aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Minute-resolution UTC timestamp, `YYYY-MM-DD HH:MM`.
    pub timepoint: String,
    pub appearances: i64,
}

/// Aggregated visibility record for one search engine within one topic.
///
/// The numeric fields reflect only the most recent aggregation run;
/// `history` carries the full append-only series of runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    pub total_appearances: i64,
    pub distinct_brands: i64,
    pub avg_visibility_position: f64,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

/// A named subject with its conversational keywords and per-engine stats.
///
/// `search_engines` maps engine identifiers (e.g. `"ChatGPT"`) to their
/// stats. It is absent on first-run requests and omitted from responses
/// while empty; once populated it round-trips through the client unchanged
/// apart from the engines a run updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "Topic")]
    pub name: String,

    #[serde(rename = "ConversationalKeywords", default)]
    pub conversational_keywords: Vec<KeywordWithIntent>,

    #[serde(
        rename = "searchEngines",
        default,
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub search_engines: HashMap<String, EngineStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Intent::Informational).expect("serialize"),
            "\"informational\""
        );
        let parsed: Intent = serde_json::from_str("\"commercial\"").expect("deserialize");
        assert_eq!(parsed, Intent::Commercial);
    }

    #[test]
    fn topic_uses_wire_field_names() {
        let topic = Topic {
            name: "vegan protein".to_string(),
            conversational_keywords: vec![KeywordWithIntent {
                keyword: "what is vegan protein made of".to_string(),
                intent: Intent::Informational,
            }],
            search_engines: HashMap::new(),
        };

        let json: serde_json::Value =
            serde_json::to_value(&topic).expect("serialize topic");
        assert_eq!(json["Topic"].as_str(), Some("vegan protein"));
        assert_eq!(
            json["ConversationalKeywords"][0]["intent"].as_str(),
            Some("informational")
        );
        // Empty engine maps are omitted entirely, matching the wire format.
        assert!(json.get("searchEngines").is_none());
    }

    #[test]
    fn topic_deserializes_without_optional_fields() {
        let topic: Topic =
            serde_json::from_str(r#"{"Topic": "oat milk"}"#).expect("deserialize");
        assert_eq!(topic.name, "oat milk");
        assert!(topic.conversational_keywords.is_empty());
        assert!(topic.search_engines.is_empty());
    }

    #[test]
    fn engine_stats_round_trip_preserves_history() {
        let raw = r#"{
            "totalAppearances": 3,
            "distinctBrands": 2,
            "avgVisibilityPosition": 1.5,
            "history": [
                {"timepoint": "2025-07-01 09:30", "appearances": 1},
                {"timepoint": "2025-07-02 09:30", "appearances": 3}
            ]
        }"#;

        let stats: EngineStats = serde_json::from_str(raw).expect("deserialize stats");
        assert_eq!(stats.total_appearances, 3);
        assert_eq!(stats.history.len(), 2);

        let json: serde_json::Value = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(json["history"][0]["timepoint"].as_str(), Some("2025-07-01 09:30"));
        assert_eq!(json["avgVisibilityPosition"].as_f64(), Some(1.5));
    }
}

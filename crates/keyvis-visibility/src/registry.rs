//! Per-topic engine registry updates.

use keyvis_core::{EngineStats, HistoryPoint, Topic};

/// Read the prior history for one engine; empty when the engine is absent.
#[must_use]
pub fn prior_history(topic: &Topic, engine: &str) -> Vec<HistoryPoint> {
    topic
        .search_engines
        .get(engine)
        .map(|stats| stats.history.clone())
        .unwrap_or_default()
}

/// Replace one engine's stats record, leaving every other entry untouched.
pub fn update_engine(topic: &mut Topic, engine: &str, stats: EngineStats) {
    topic.search_engines.insert(engine.to_string(), stats);
}

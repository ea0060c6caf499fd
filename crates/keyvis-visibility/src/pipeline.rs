//! Per-topic visibility run orchestration.

use keyvis_core::{EngineStats, Topic};

use crate::fanout::collect_keyword_visibility;
use crate::history::append_sample;
use crate::query::VisibilityQuery;
use crate::registry::{prior_history, update_engine};
use crate::stats::aggregate;
use crate::types::VisibilitySettings;

/// Run one visibility aggregation for `engine` over the topic's keywords.
///
/// 1. Read the engine's prior history from the topic (empty if none).
/// 2. Fan out one bounded concurrent query per keyword and collect the
///    successful results.
/// 3. Reduce the successes into engine-level numbers.
/// 4. Append exactly one history sample carrying the fresh appearance count.
/// 5. Replace the engine's entry in the topic, preserving sibling engines.
///
/// A run with no keywords dispatches nothing, and a run where every query
/// fails reduces to zero-valued numbers; both still append an
/// `appearances = 0` sample, so a completed run is always distinguishable
/// from no run at all.
pub async fn run_topic_visibility<Q>(
    query: &Q,
    topic: &mut Topic,
    engine: &str,
    settings: &VisibilitySettings,
) -> EngineStats
where
    Q: VisibilityQuery + ?Sized,
{
    let results = if topic.conversational_keywords.is_empty() {
        tracing::info!(topic = %topic.name, engine, "topic has no keywords; skipping fan-out");
        Vec::new()
    } else {
        collect_keyword_visibility(query, &topic.conversational_keywords, settings).await
    };

    let snapshot = aggregate(&results);
    let history = append_sample(prior_history(topic, engine), snapshot.total_appearances);

    tracing::info!(
        topic = %topic.name,
        engine,
        keywords = topic.conversational_keywords.len(),
        successes = results.len(),
        total_appearances = snapshot.total_appearances,
        "visibility run complete"
    );

    let stats = EngineStats {
        total_appearances: snapshot.total_appearances,
        distinct_brands: snapshot.distinct_brands,
        avg_visibility_position: snapshot.avg_visibility_position,
        history,
    };
    update_engine(topic, engine, stats.clone());
    stats
}

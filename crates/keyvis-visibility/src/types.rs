use std::time::Duration;

use keyvis_core::AppConfig;

/// Visibility signals returned by one keyword query against one engine.
///
/// Implementations of [`crate::VisibilityQuery`] must populate every field on
/// success; a query that cannot produce all three signals is a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordVisibility {
    /// Whether the tracked brand/domain appeared in the search result.
    pub has_brand_appeared: bool,
    /// Number of distinct brands/domains in the search result.
    pub distinct_brands: i64,
    /// Average position at which the tracked brand was visible.
    pub avg_visibility_position: f64,
}

/// Tuning for one fan-out run.
#[derive(Debug, Clone)]
pub struct VisibilitySettings {
    /// Upper bound on in-flight keyword queries.
    pub max_concurrent: usize,
    /// Per-query deadline; an elapsed timeout counts as that query's failure.
    pub query_timeout: Duration,
}

impl VisibilitySettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_queries,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        }
    }
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            query_timeout: Duration::from_secs(45),
        }
    }
}

/// Reduced per-engine numbers for one aggregation run, before the history
/// sample is attached. Zero-valued when the run had no successful queries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibilitySnapshot {
    pub total_appearances: i64,
    pub distinct_brands: i64,
    pub avg_visibility_position: f64,
}

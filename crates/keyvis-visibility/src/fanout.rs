//! Bounded concurrent fan-out over a topic's keywords.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use keyvis_core::KeywordWithIntent;

use crate::query::VisibilityQuery;
use crate::types::{KeywordVisibility, VisibilitySettings};

/// Run a single keyword query under a timeout, logging and discarding failures.
///
/// Extracted into a named async fn so its returned future is generic over the
/// borrow lifetime; this avoids a higher-ranked-lifetime inference failure that
/// occurs when the same body is written as an inline `async move` closure inside
/// `buffer_unordered`.
async fn query_one<Q>(
    query: &Q,
    keyword: String,
    timeout: Duration,
) -> Option<KeywordVisibility>
where
    Q: VisibilityQuery + ?Sized,
{
    match tokio::time::timeout(timeout, query.query(&keyword)).await {
        Ok(Ok(visibility)) => Some(visibility),
        Ok(Err(e)) => {
            tracing::warn!(keyword = %keyword, error = %e, "visibility query failed");
            None
        }
        Err(_) => {
            tracing::warn!(
                keyword = %keyword,
                timeout_secs = timeout.as_secs(),
                "visibility query timed out"
            );
            None
        }
    }
}

/// Query the engine once per keyword and collect the successful results.
///
/// Dispatches one task per keyword through a `buffer_unordered` stream capped
/// at `settings.max_concurrent`, each wrapped in a per-query timeout. The
/// stream is drained to completion before returning — every task reaches a
/// terminal state; nothing races, and a slow sibling is never cancelled
/// because another task failed.
///
/// Failures and timeouts are logged at `warn` with the keyword attached and
/// excluded from the returned set; they never abort the batch. An empty
/// keyword slice short-circuits without dispatching anything.
pub async fn collect_keyword_visibility<Q>(
    query: &Q,
    keywords: &[KeywordWithIntent],
    settings: &VisibilitySettings,
) -> Vec<KeywordVisibility>
where
    Q: VisibilityQuery + ?Sized,
{
    if keywords.is_empty() {
        return Vec::new();
    }

    let timeout = settings.query_timeout;
    let owned: Vec<String> = keywords.iter().map(|kw| kw.keyword.clone()).collect();
    let tasks = owned.into_iter().map(|kw| query_one(query, kw, timeout));
    let results: Vec<Option<KeywordVisibility>> = stream::iter(tasks)
        .buffer_unordered(settings.max_concurrent.max(1))
        .collect()
        .await;

    let successes: Vec<KeywordVisibility> = results.into_iter().flatten().collect();

    tracing::debug!(
        requested = keywords.len(),
        succeeded = successes.len(),
        "keyword fan-out complete"
    );

    successes
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures::future::BoxFuture;
    use keyvis_core::Intent;

    use super::*;
    use crate::error::VisibilityError;

    /// Stub engine that counts calls, tracks peak concurrency, and fails for
    /// a configured subset of keywords.
    struct ScriptedQuery {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Duration,
        failing: HashSet<&'static str>,
    }

    impl ScriptedQuery {
        fn new(delay: Duration, failing: &[&'static str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                delay,
                failing: failing.iter().copied().collect(),
            }
        }
    }

    impl VisibilityQuery for ScriptedQuery {
        fn query<'a>(
            &'a self,
            keyword: &'a str,
        ) -> BoxFuture<'a, Result<KeywordVisibility, VisibilityError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                if self.failing.contains(keyword) {
                    Err(VisibilityError::Search(format!("upstream error for {keyword}")))
                } else {
                    Ok(KeywordVisibility {
                        has_brand_appeared: true,
                        distinct_brands: 2,
                        avg_visibility_position: 1.0,
                    })
                }
            })
        }
    }

    fn keywords(names: &[&str]) -> Vec<KeywordWithIntent> {
        names
            .iter()
            .map(|n| KeywordWithIntent {
                keyword: (*n).to_string(),
                intent: Intent::Informational,
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_keywords_short_circuits_without_dispatching() {
        let query = ScriptedQuery::new(Duration::ZERO, &[]);
        let results =
            collect_keyword_visibility(&query, &[], &VisibilitySettings::default()).await;

        assert!(results.is_empty());
        assert_eq!(query.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failures_are_excluded_but_do_not_abort_the_batch() {
        let query = ScriptedQuery::new(Duration::ZERO, &["bad one"]);
        let kws = keywords(&["good one", "bad one", "good two"]);
        let results =
            collect_keyword_visibility(&query, &kws, &VisibilitySettings::default()).await;

        assert_eq!(query.calls.load(Ordering::SeqCst), 3, "every keyword dispatched");
        assert_eq!(results.len(), 2, "only successes collected");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrency_stays_within_the_configured_bound() {
        let query = ScriptedQuery::new(Duration::from_millis(20), &[]);
        let kws = keywords(&["k1", "k2", "k3", "k4", "k5", "k6"]);
        let settings = VisibilitySettings {
            max_concurrent: 2,
            ..VisibilitySettings::default()
        };

        let results = collect_keyword_visibility(&query, &kws, &settings).await;

        assert_eq!(results.len(), 6);
        assert!(
            query.max_in_flight.load(Ordering::SeqCst) <= 2,
            "peak in-flight {} exceeded the bound",
            query.max_in_flight.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn timed_out_queries_count_as_failures() {
        let query = ScriptedQuery::new(Duration::from_secs(30), &[]);
        let kws = keywords(&["slow one"]);
        let settings = VisibilitySettings {
            query_timeout: Duration::from_millis(20),
            ..VisibilitySettings::default()
        };

        let results = collect_keyword_visibility(&query, &kws, &settings).await;

        assert!(results.is_empty(), "timed-out query must be excluded");
        assert_eq!(query.calls.load(Ordering::SeqCst), 1);
    }
}

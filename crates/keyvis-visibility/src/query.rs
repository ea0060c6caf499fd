//! Contract for the external visibility-query capability.

use futures::future::BoxFuture;

use crate::error::VisibilityError;
use crate::types::KeywordVisibility;

/// One search engine's keyword-visibility probe.
///
/// The coordinator only depends on this contract: given a keyword, return
/// fully-populated visibility signals or a distinguishable error. Empty or
/// unusable upstream responses must surface as errors, never as
/// partially-populated successes. Implementations are responsible for their
/// own upstream latency; the coordinator additionally enforces a per-query
/// deadline.
pub trait VisibilityQuery: Send + Sync {
    fn query<'a>(
        &'a self,
        keyword: &'a str,
    ) -> BoxFuture<'a, Result<KeywordVisibility, VisibilityError>>;
}

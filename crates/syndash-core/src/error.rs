use thiserror::Error;

/// Errors surfaced by the aggregation core.
///
/// Only mandatory top-level queries produce errors here; individual
/// completion tasks and the connections query degrade instead of failing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A mandatory top-level query failed; no useful dashboard exists
    /// without it.
    #[error("query to /rest/{endpoint} failed: {source}")]
    Query {
        endpoint: &'static str,
        #[source]
        source: syndash_api::Error,
    },
}

impl CoreError {
    pub(crate) fn query(endpoint: &'static str) -> impl FnOnce(syndash_api::Error) -> Self {
        move |source| Self::Query { endpoint, source }
    }
}

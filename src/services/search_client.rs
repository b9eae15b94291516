use std::time::Duration;

use async_trait::async_trait;

use crate::domain::search_result::SearchResult;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request to search provider failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search provider answered with status {0}")]
    Status(u16),
    #[error("search provider blocked the query: {0}")]
    Blocked(&'static str),
    #[error("invalid result selector: {0}")]
    Selector(String),
}

/// A text search provider. Results come back in provider relevance order,
/// at most `max_results` of them.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

//! Collaborator traits for the grab path
//!
//! The grab handler is wired together from these seams: a read-only store of
//! search results, an append-only access log, a blocking origin fetcher and
//! an indexer registry for auxiliary lookups. Implementations are passed in
//! as `Arc<dyn …>` constructor parameters; [`crate::db::Database`] implements
//! the store and log traits.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{NewAccess, NfoResult, SearchResult, SearchResultId};

/// Read-only lookup of previously discovered search results
#[async_trait]
pub trait SearchResultStore: Send + Sync {
    /// Find a search result by its id, or `None` if the reference is
    /// unknown or outdated
    async fn find_by_id(&self, id: SearchResultId) -> Result<Option<SearchResult>>;
}

/// Append-only access history
///
/// The grab path appends exactly one record per resolution attempt against a
/// known search result and never reads its own writes back.
#[async_trait]
pub trait AccessLog: Send + Sync {
    /// Append an access record
    async fn record(&self, access: NewAccess) -> Result<()>;
}

/// Fetches item content from an origin URL
///
/// One attempt per call; any timeout is enforced inside the implementation
/// and surfaces as an ordinary error.
#[async_trait]
pub trait OriginFetcher: Send + Sync {
    /// Fetch the content at `url` as text
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Registry of configured indexers, keyed by name
pub trait IndexerProvider: Send + Sync {
    /// Look up an indexer capability by its configured name
    fn indexer_by_name(&self, name: &str) -> Option<Arc<dyn Indexer>>;
}

/// Capability handle for a single configured indexer
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Retrieve the NFO for an item, identified by the indexer-internal id
    async fn nfo(&self, indexer_guid: &str) -> Result<NfoResult>;
}

//! Database layer for nzb-grab
//!
//! Handles SQLite persistence for search results and the access history.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`results`] — Search result seeding and lookup
//! - [`access_log`] — Access history append and queries
//!
//! [`Database`] implements the [`SearchResultStore`] and [`AccessLog`]
//! collaborator traits consumed by the grab handler.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::{FromRow, sqlite::SqlitePool};

use crate::error::Result;
use crate::store::{AccessLog, SearchResultStore};
use crate::types::{
    AccessEntry, AccessMode, AccessOutcome, AccessSource, NewAccess, SearchResult, SearchResultId,
};

mod access_log;
mod migrations;
mod results;

/// New search result to be inserted into the database
///
/// Inserts come from the search subsystem (and from test fixtures); the grab
/// path itself never writes to the search results table.
#[derive(Debug, Clone)]
pub struct NewSearchResult {
    /// Display title of the item
    pub title: String,
    /// Origin URL where the item's content is hosted
    pub link: String,
    /// Name of the indexer that produced this result
    pub indexer_name: String,
    /// Indexer-internal identifier for the item
    pub indexer_guid: String,
}

/// Access history record from database (raw from SQLite)
#[derive(Debug, Clone, FromRow)]
pub struct AccessRow {
    /// Unique database ID
    pub id: i64,
    /// Search result this access refers to
    pub search_result_id: i64,
    /// Indexer that produced the result
    pub indexer_name: String,
    /// Item title at access time
    pub title: String,
    /// Delivery mode code (0=redirect, 1=proxy)
    pub mode: i32,
    /// Request source code (0=internal, 1=api)
    pub source: i32,
    /// Outcome code (0=unknown, 1=successful, 2=connection error)
    pub outcome: i32,
    /// User name or IP address of the requester
    pub username_or_ip: String,
    /// Error message when the outcome is a failure
    pub error: Option<String>,
    /// Unix timestamp when the access was recorded
    pub created_at: i64,
}

impl From<AccessRow> for AccessEntry {
    fn from(row: AccessRow) -> Self {
        AccessEntry {
            id: row.id,
            search_result_id: SearchResultId(row.search_result_id),
            indexer_name: row.indexer_name,
            title: row.title,
            mode: AccessMode::from_i32(row.mode),
            source: AccessSource::from_i32(row.source),
            outcome: AccessOutcome::from_i32(row.outcome),
            username_or_ip: row.username_or_ip,
            error: row.error,
            recorded_at: Utc
                .timestamp_opt(row.created_at, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Database handle for nzb-grab
pub struct Database {
    pool: SqlitePool,
}

#[async_trait]
impl SearchResultStore for Database {
    async fn find_by_id(&self, id: SearchResultId) -> Result<Option<SearchResult>> {
        self.get_search_result(id).await
    }
}

#[async_trait]
impl AccessLog for Database {
    async fn record(&self, access: NewAccess) -> Result<()> {
        self.insert_access(&access).await.map(|_| ())
    }
}

//! Search result seeding and lookup.

use crate::error::{Error, Result};
use crate::types::{SearchResult, SearchResultId};

use super::{Database, NewSearchResult};

impl Database {
    /// Insert a search result
    ///
    /// Called by the search subsystem when an item is discovered. The grab
    /// path only ever reads search results.
    pub async fn insert_search_result(&self, result: &NewSearchResult) -> Result<SearchResultId> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO search_results (title, link, indexer_name, indexer_guid, first_found)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&result.title)
        .bind(&result.link)
        .bind(&result.indexer_name)
        .bind(&result.indexer_guid)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(SearchResultId(inserted.last_insert_rowid()))
    }

    /// Get a search result by ID
    ///
    /// Returns `None` when the reference is unknown or outdated.
    pub async fn get_search_result(&self, id: SearchResultId) -> Result<Option<SearchResult>> {
        let row = sqlx::query_as::<_, SearchResult>(
            r#"
            SELECT id, title, link, indexer_name, indexer_guid
            FROM search_results
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(row)
    }
}

//! Access history append and queries.
//!
//! The history is append-only from the grab path's perspective: one record
//! per resolution attempt, never mutated afterwards. Queries exist for
//! embedding history/stats views.

use crate::error::{Error, Result};
use crate::types::{AccessEntry, AccessOutcome, NewAccess};

use super::{AccessRow, Database};

impl Database {
    /// Append an access record to the history
    pub async fn insert_access(&self, access: &NewAccess) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO access_history (
                search_result_id, indexer_name, title, mode, source,
                outcome, username_or_ip, error, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(access.search_result_id)
        .bind(&access.indexer_name)
        .bind(&access.title)
        .bind(access.mode.to_i32())
        .bind(access.source.to_i32())
        .bind(access.outcome.to_i32())
        .bind(&access.username_or_ip)
        .bind(&access.error)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(result.last_insert_rowid())
    }

    /// Query the access history with pagination and optional outcome filter
    ///
    /// Returns entries ordered newest first. Use limit and offset for
    /// pagination.
    pub async fn query_access_history(
        &self,
        outcome_filter: Option<AccessOutcome>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<AccessEntry>> {
        let query = if let Some(outcome) = outcome_filter {
            sqlx::query_as::<_, AccessRow>(
                r#"
                SELECT id, search_result_id, indexer_name, title, mode, source,
                       outcome, username_or_ip, error, created_at
                FROM access_history
                WHERE outcome = ?
                ORDER BY created_at DESC, id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(outcome.to_i32())
            .bind(limit as i64)
            .bind(offset as i64)
        } else {
            sqlx::query_as::<_, AccessRow>(
                r#"
                SELECT id, search_result_id, indexer_name, title, mode, source,
                       outcome, username_or_ip, error, created_at
                FROM access_history
                ORDER BY created_at DESC, id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(limit as i64)
            .bind(offset as i64)
        };

        let rows = query.fetch_all(&self.pool).await.map_err(Error::Sqlx)?;

        Ok(rows.into_iter().map(AccessEntry::from).collect())
    }

    /// Count access history entries (optionally filtered by outcome)
    pub async fn count_access_history(
        &self,
        outcome_filter: Option<AccessOutcome>,
    ) -> Result<i64> {
        let count = if let Some(outcome) = outcome_filter {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_history WHERE outcome = ?")
                .bind(outcome.to_i32())
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Sqlx)?
        } else {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_history")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Sqlx)?
        };

        Ok(count)
    }

    /// Query all access records for one search result, oldest first
    pub async fn access_history_for_result(
        &self,
        search_result_id: crate::types::SearchResultId,
    ) -> Result<Vec<AccessEntry>> {
        let rows = sqlx::query_as::<_, AccessRow>(
            r#"
            SELECT id, search_result_id, indexer_name, title, mode, source,
                   outcome, username_or_ip, error, created_at
            FROM access_history
            WHERE search_result_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(search_result_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(rows.into_iter().map(AccessEntry::from).collect())
    }
}

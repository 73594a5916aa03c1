//! Grab handling — resolving search results into redirects or proxied content
//!
//! [`GrabHandler`] is the central piece of the grab path. Given a search
//! result reference it looks the item up, either redirects the caller to the
//! indexer's origin URL or fetches the content through the configured
//! [`OriginFetcher`], and appends one access record per attempt against a
//! known item. [`GrabHandler::grab_to_zip`] (in [`bundle`]) drives it over a
//! batch of references and packages the survivors into a ZIP.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::store::{AccessLog, IndexerProvider, OriginFetcher, SearchResultStore};
use crate::types::{
    AccessMode, AccessOutcome, AccessSource, GrabResult, NewAccess, NfoResult, SearchResult,
    SearchResultId,
};

pub mod bundle;

/// Resolves search result references into download results
///
/// Wired together from explicit collaborator handles; holds no mutable state
/// of its own, so concurrent grabs are independent.
pub struct GrabHandler {
    store: Arc<dyn SearchResultStore>,
    access_log: Arc<dyn AccessLog>,
    fetcher: Arc<dyn OriginFetcher>,
    indexers: Arc<dyn IndexerProvider>,
}

impl GrabHandler {
    /// Create a grab handler from its collaborators
    pub fn new(
        store: Arc<dyn SearchResultStore>,
        access_log: Arc<dyn AccessLog>,
        fetcher: Arc<dyn OriginFetcher>,
        indexers: Arc<dyn IndexerProvider>,
    ) -> Self {
        Self {
            store,
            access_log,
            fetcher,
            indexers,
        }
    }

    /// Resolve a search result into a redirect or proxied content
    ///
    /// Every attempt against a known search result appends exactly one access
    /// record: `Redirect` mode records [`AccessOutcome::Unknown`] without
    /// touching the network, `Proxy` mode fetches once and records
    /// [`AccessOutcome::Successful`] or [`AccessOutcome::ConnectionError`].
    /// An unknown reference fails immediately and records nothing.
    pub async fn grab(
        &self,
        id: SearchResultId,
        mode: AccessMode,
        source: AccessSource,
        username_or_ip: &str,
    ) -> GrabResult {
        let result = match self.store.find_by_id(id).await {
            Ok(Some(result)) => result,
            Ok(None) => {
                tracing::error!(
                    id = %id,
                    "NZB download request with invalid/outdated search result ID"
                );
                return GrabResult::Failed {
                    message: format!(
                        "NZB download request with invalid/outdated search result ID {id}"
                    ),
                };
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Search result lookup failed");
                return GrabResult::Failed {
                    message: format!("NZB download request for search result ID {id} failed"),
                };
            }
        };

        tracing::info!(
            title = %result.title,
            indexer = %result.indexer_name,
            "NZB download request"
        );

        match mode {
            AccessMode::Redirect => {
                tracing::debug!(url = %result.link, "Redirecting to origin");
                self.record_access(
                    &result,
                    mode,
                    source,
                    AccessOutcome::Unknown,
                    username_or_ip,
                    None,
                )
                .await;
                GrabResult::Redirect {
                    title: result.title,
                    url: result.link,
                }
            }
            AccessMode::Proxy => {
                let started = Instant::now();
                match self.fetcher.fetch(&result.link).await {
                    Err(e) => {
                        tracing::error!(
                            url = %result.link,
                            error = %e,
                            "Error while downloading NZB from origin"
                        );
                        self.record_access(
                            &result,
                            mode,
                            source,
                            AccessOutcome::ConnectionError,
                            username_or_ip,
                            Some(e.to_string()),
                        )
                        .await;
                        // Caller-facing message names the item and indexer; the
                        // raw transport error stays in the log and the history
                        GrabResult::Failed {
                            message: format!(
                                "An error occurred while downloading {} from indexer {}",
                                result.title, result.indexer_name
                            ),
                        }
                    }
                    Ok(content) => {
                        tracing::info!(
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "NZB download from indexer successfully completed"
                        );
                        self.record_access(
                            &result,
                            mode,
                            source,
                            AccessOutcome::Successful,
                            username_or_ip,
                            None,
                        )
                        .await;
                        GrabResult::Content {
                            title: result.title,
                            content,
                        }
                    }
                }
            }
        }
    }

    /// Retrieve the NFO for a search result from its producing indexer
    pub async fn nfo(&self, id: SearchResultId) -> Result<NfoResult> {
        let result = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("search result {id}")))?;

        let indexer = self
            .indexers
            .indexer_by_name(&result.indexer_name)
            .ok_or_else(|| Error::UnknownIndexer(result.indexer_name.clone()))?;

        indexer.nfo(&result.indexer_guid).await
    }

    /// Append one access record; failures are logged, never propagated
    async fn record_access(
        &self,
        result: &SearchResult,
        mode: AccessMode,
        source: AccessSource,
        outcome: AccessOutcome,
        username_or_ip: &str,
        error: Option<String>,
    ) {
        let access = NewAccess {
            search_result_id: result.id,
            indexer_name: result.indexer_name.clone(),
            title: result.title.clone(),
            mode,
            source,
            outcome,
            username_or_ip: username_or_ip.to_string(),
            error,
        };

        if let Err(e) = self.access_log.record(access).await {
            tracing::error!(
                id = %result.id,
                error = %e,
                "Failed to append access record"
            );
        }
    }
}

//! # nzb-grab
//!
//! Backend library for handing previously discovered NZBs to their consumers.
//!
//! Given a search result reference assigned by a search subsystem, nzb-grab
//! either redirects the caller to the indexer's origin URL or fetches the
//! content and returns it inline, records every access attempt in an
//! append-only SQLite history, bundles batches of grabs into a single ZIP
//! while tolerating per-item failures, and builds outbound download links
//! for internal and API consumers.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicit wiring** - Collaborators (result store, access log, origin
//!   fetcher, indexers) are plain trait objects passed to constructors
//! - **Audit everything** - Exactly one access record per resolution attempt
//!   against a known item
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use nzb_grab::{
//!     AccessMode, AccessSource, Config, Database, GrabHandler, HttpOriginFetcher,
//!     SearchResultId,
//! };
//! use nzb_grab::store::{Indexer, IndexerProvider};
//!
//! struct NoIndexers;
//!
//! impl IndexerProvider for NoIndexers {
//!     fn indexer_by_name(&self, _name: &str) -> Option<Arc<dyn Indexer>> {
//!         None
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let db = Arc::new(Database::new(&config.database_path).await?);
//!     let fetcher = Arc::new(HttpOriginFetcher::new(Duration::from_secs(
//!         config.fetch_timeout_secs,
//!     ))?);
//!
//!     let handler = GrabHandler::new(db.clone(), db, fetcher, Arc::new(NoIndexers));
//!
//!     let result = handler
//!         .grab(
//!             SearchResultId(42),
//!             AccessMode::Proxy,
//!             AccessSource::Internal,
//!             "10.0.0.1",
//!         )
//!         .await;
//!     println!("successful: {}", result.is_successful());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// HTTP origin fetcher
pub mod fetch;
/// Grab handling (redirect/proxy resolution and ZIP bundling)
pub mod grab;
/// Download link construction
pub mod links;
/// Collaborator traits
pub mod store;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use db::{Database, NewSearchResult};
pub use error::{DatabaseError, Error, Result, ToHttpStatus};
pub use fetch::HttpOriginFetcher;
pub use grab::GrabHandler;
pub use grab::bundle::create_zip;
pub use links::{LinkContext, download_link};
pub use store::{AccessLog, Indexer, IndexerProvider, OriginFetcher, SearchResultStore};
pub use types::{
    AccessEntry, AccessMode, AccessOutcome, AccessSource, DownloadKind, GrabResult, NewAccess,
    NfoResult, SearchResult, SearchResultId,
};

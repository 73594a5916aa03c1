//! Core types for nzb-grab

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a search result (the opaque reference handed out
/// by the search subsystem when a downloadable item was discovered)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultId(pub i64);

impl SearchResultId {
    /// Create a new SearchResultId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for SearchResultId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<SearchResultId> for i64 {
    fn from(id: SearchResultId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SearchResultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SearchResultId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for SearchResultId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for SearchResultId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for SearchResultId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// How a grab request wants the NZB delivered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Send the caller to the indexer's origin URL directly
    Redirect,
    /// Fetch the content from the indexer and return it inline
    Proxy,
}

impl AccessMode {
    /// Convert integer code to AccessMode
    pub fn from_i32(mode: i32) -> Self {
        match mode {
            0 => AccessMode::Redirect,
            _ => AccessMode::Proxy,
        }
    }

    /// Convert AccessMode to integer code
    pub fn to_i32(&self) -> i32 {
        match self {
            AccessMode::Redirect => 0,
            AccessMode::Proxy => 1,
        }
    }
}

/// Where a grab request originated; carried through for the access history only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSource {
    /// Internal application use (web UI, bundling)
    Internal,
    /// External API use (key-gated consumers)
    Api,
}

impl AccessSource {
    /// Convert integer code to AccessSource
    pub fn from_i32(source: i32) -> Self {
        match source {
            0 => AccessSource::Internal,
            _ => AccessSource::Api,
        }
    }

    /// Convert AccessSource to integer code
    pub fn to_i32(&self) -> i32 {
        match self {
            AccessSource::Internal => 0,
            AccessSource::Api => 1,
        }
    }
}

/// Outcome of one access attempt against an indexer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// No fetch was attempted (pure redirect)
    Unknown,
    /// Fetch completed with a successful status
    Successful,
    /// Fetch failed at the transport level (network, timeout, non-2xx)
    ConnectionError,
}

impl AccessOutcome {
    /// Convert integer code to AccessOutcome
    pub fn from_i32(outcome: i32) -> Self {
        match outcome {
            1 => AccessOutcome::Successful,
            2 => AccessOutcome::ConnectionError,
            _ => AccessOutcome::Unknown,
        }
    }

    /// Convert AccessOutcome to integer code
    pub fn to_i32(&self) -> i32 {
        match self {
            AccessOutcome::Unknown => 0,
            AccessOutcome::Successful => 1,
            AccessOutcome::ConnectionError => 2,
        }
    }
}

/// Resource flavor a download link points at; selects the path segment only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    /// NZB-style resource
    Nzb,
    /// Torrent-style resource
    Torrent,
}

impl DownloadKind {
    /// Leading path segment used in download links
    pub fn path_segment(&self) -> &'static str {
        match self {
            DownloadKind::Nzb => "getnzb",
            DownloadKind::Torrent => "gettorrent",
        }
    }
}

/// A previously discovered downloadable item, as stored by the search subsystem
///
/// Immutable snapshot from the grab path's perspective: the grab handler only
/// ever reads these.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct SearchResult {
    /// Unique database ID
    pub id: SearchResultId,
    /// Display title of the item
    pub title: String,
    /// Origin URL where the item's content is hosted
    pub link: String,
    /// Name of the indexer that produced this result
    pub indexer_name: String,
    /// Indexer-internal identifier for the item
    pub indexer_guid: String,
}

/// New access record to be appended to the history
#[derive(Clone, Debug)]
pub struct NewAccess {
    /// Search result this access refers to
    pub search_result_id: SearchResultId,
    /// Indexer that produced the result
    pub indexer_name: String,
    /// Item title at access time
    pub title: String,
    /// Requested delivery mode
    pub mode: AccessMode,
    /// Originating context of the request
    pub source: AccessSource,
    /// Outcome of the attempt
    pub outcome: AccessOutcome,
    /// User name or IP address of the requester
    pub username_or_ip: String,
    /// Error message when the outcome is a failure
    pub error: Option<String>,
}

/// Access record read back from the history
#[derive(Clone, Debug)]
pub struct AccessEntry {
    /// Unique database ID
    pub id: i64,
    /// Search result this access refers to
    pub search_result_id: SearchResultId,
    /// Indexer that produced the result
    pub indexer_name: String,
    /// Item title at access time
    pub title: String,
    /// Requested delivery mode
    pub mode: AccessMode,
    /// Originating context of the request
    pub source: AccessSource,
    /// Outcome of the attempt
    pub outcome: AccessOutcome,
    /// User name or IP address of the requester
    pub username_or_ip: String,
    /// Error message when the outcome is a failure
    pub error: Option<String>,
    /// When the access was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Result of a single grab request
///
/// Transient value returned to the caller; nothing here is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrabResult {
    /// The caller should be redirected to the indexer's origin URL
    Redirect {
        /// Item title
        title: String,
        /// Origin URL to redirect to
        url: String,
    },
    /// The content was fetched from the indexer and is returned inline
    Content {
        /// Item title
        title: String,
        /// Fetched NZB content
        content: String,
    },
    /// The grab failed
    Failed {
        /// Caller-facing error message
        message: String,
    },
}

impl GrabResult {
    /// Whether this grab produced a usable result
    pub fn is_successful(&self) -> bool {
        !matches!(self, GrabResult::Failed { .. })
    }

    /// Item title, if the grab was successful
    pub fn title(&self) -> Option<&str> {
        match self {
            GrabResult::Redirect { title, .. } | GrabResult::Content { title, .. } => Some(title),
            GrabResult::Failed { .. } => None,
        }
    }

    /// Fetched content, if this was a successful proxy grab
    pub fn content(&self) -> Option<&str> {
        match self {
            GrabResult::Content { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Redirect target, if this was a successful redirect grab
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            GrabResult::Redirect { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Caller-facing error message, if the grab failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GrabResult::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Result of an NFO lookup against an indexer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfoResult {
    /// Whether the indexer returned an NFO
    pub successful: bool,
    /// NFO text, when available
    pub content: Option<String>,
}

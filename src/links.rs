//! Download link construction
//!
//! Pure functions building the outbound links handed to consumers. Internal
//! consumers get a link under the application's own base URL with no
//! credential attached; API consumers get a link under the configured
//! external URL (unless overridden) with the API key as a query parameter.

use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{DownloadKind, SearchResultId};

/// Consumer context a download link is built for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkContext {
    /// Trusted in-application consumer (web UI)
    Internal,
    /// External, API-key-gated consumer
    Api,
}

/// Build the download link for a search result
///
/// Reads the configuration at call time and never mutates it. `kind` selects
/// the leading path segment (`getnzb` vs `gettorrent`) and nothing else.
pub fn download_link(
    config: &Config,
    id: SearchResultId,
    context: LinkContext,
    kind: DownloadKind,
) -> Result<String> {
    let mut url = match context {
        LinkContext::Internal => parse_base(&config.base_url, "base_url")?,
        LinkContext::Api => {
            match &config.external_url {
                // A configured external URL wins unless API links are pinned local
                Some(external) if !config.use_local_url_for_api => {
                    parse_base(external, "external_url")?
                }
                _ => parse_base(&config.base_url, "base_url")?,
            }
        }
    };

    let access_segment = match context {
        LinkContext::Internal => "user",
        LinkContext::Api => "api",
    };

    let base_display = url.to_string();
    url.path_segments_mut()
        .map_err(|_| Error::Config {
            message: format!("'{}' cannot be used as a base URL", base_display),
            key: None,
        })?
        .pop_if_empty()
        .push(kind.path_segment())
        .push(access_segment)
        .push(&id.to_string());

    if context == LinkContext::Api {
        if let Some(api_key) = &config.api_key {
            url.query_pairs_mut().append_pair("apikey", api_key);
        }
    }

    Ok(url.to_string())
}

fn parse_base(value: &str, key: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Config {
        message: format!("invalid {} '{}': {}", key, value, e),
        key: Some(key.to_string()),
    })
}

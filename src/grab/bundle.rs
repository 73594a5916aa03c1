//! ZIP bundling of multiple grabbed NZBs
//!
//! Drives the grab handler over a batch of references and packages the
//! successfully fetched payloads into one ZIP. Per-item failures are skipped;
//! the batch fails only when nothing at all could be retrieved. Per-item
//! payloads live in [`NamedTempFile`] artifacts, so they are released on
//! every exit path, including assembly failures.

use std::io::Write;

use tempfile::NamedTempFile;
use zip::write::FileOptions;

use crate::error::{Error, Result};
use crate::types::{AccessMode, AccessSource, GrabResult, SearchResultId};

use super::GrabHandler;

impl GrabHandler {
    /// Grab a batch of search results and bundle them into a ZIP
    ///
    /// Always grabs in `Proxy` mode with an `Internal` source; bundling is a
    /// local, trusted operation. Returns the temp file holding the finished
    /// archive, or [`Error::NothingRetrievable`] when every reference failed.
    pub async fn grab_to_zip(
        &self,
        ids: &[SearchResultId],
        username_or_ip: &str,
    ) -> Result<NamedTempFile> {
        let mut artifacts: Vec<(String, NamedTempFile)> = Vec::new();

        for &id in ids {
            let result = self
                .grab(id, AccessMode::Proxy, AccessSource::Internal, username_or_ip)
                .await;

            let (title, content) = match result {
                GrabResult::Content { title, content } => (title, content),
                // Failures were already logged and recorded by grab()
                _ => continue,
            };

            match write_artifact(&content) {
                Ok(artifact) => artifacts.push((format!("{title}.nzb"), artifact)),
                Err(e) => {
                    tracing::error!(
                        id = %id,
                        error = %e,
                        "Unable to write NZB content to temporary file"
                    );
                }
            }
        }

        if artifacts.is_empty() {
            return Err(Error::NothingRetrievable);
        }

        tracing::info!(
            bundled = artifacts.len(),
            requested = ids.len(),
            "Bundling NZBs into ZIP"
        );

        create_zip(artifacts)
    }
}

/// Write one fetched payload to a temp artifact
fn write_artifact(content: &str) -> Result<NamedTempFile> {
    let mut artifact = NamedTempFile::new()?;
    artifact.write_all(content.as_bytes())?;
    artifact.flush()?;
    Ok(artifact)
}

/// Assemble named artifacts into a ZIP archive
///
/// Order-preserving: entries appear in input order, one per artifact, named
/// by the artifact's assigned name. Each artifact is dropped (its temp file
/// deleted) right after being appended; the archive owns the only remaining
/// copy of the data. An empty input produces a valid empty archive.
pub fn create_zip(artifacts: Vec<(String, NamedTempFile)>) -> Result<NamedTempFile> {
    let archive = NamedTempFile::new()?;
    let mut writer = zip::ZipWriter::new(archive.reopen()?);
    let options = FileOptions::default();

    for (name, artifact) in artifacts {
        tracing::debug!(entry = %name, "Adding NZB to ZIP");
        writer.start_file(name.as_str(), options)?;
        let mut reader = artifact.reopen()?;
        std::io::copy(&mut reader, &mut writer)?;
        // artifact dropped here, deleting its temp file
    }

    writer.finish()?;
    Ok(archive)
}

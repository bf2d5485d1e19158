//! Report sinks - where rendered reports are saved
//!
//! [`FileSink`] writes through a temporary file in the target directory and
//! renames it into place, so a report either appears complete or not at all.
//! The temporary file is removed on every failure path.

use crate::core::export::exporter::ReportArtifact;
use crate::domain::{ReportError, Result};
use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Where a report ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    /// Final location
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes_written: usize,
    /// Hex-encoded SHA-256 of the written bytes
    pub checksum: String,
    /// Whether the written file was read back and compared
    pub verified: bool,
}

/// Destination for rendered reports
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Save an artifact
    async fn save(&self, artifact: &ReportArtifact) -> Result<SavedReport>;
}

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded string of 64 characters.
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Removes a temporary file unless disarmed
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed temporary report file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove temporary report file"
            ),
        }
    }
}

/// Saves reports into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    overwrite: bool,
    verify: bool,
}

impl FileSink {
    /// Create a sink for a directory; verification is on, overwriting off
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            overwrite: false,
            verify: true,
        }
    }

    /// Allow replacing an existing report with the same name
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Read the saved file back and compare checksums
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.directory
            .join(format!(".{file_name}.{}.tmp", Uuid::new_v4()))
    }

    async fn verify_written(&self, path: &Path, expected: &str) -> Result<()> {
        let written = tokio::fs::read(path).await?;
        let actual = calculate_checksum_bytes(&written);
        if actual != expected {
            return Err(ReportError::Sink(format!(
                "Checksum mismatch for {}: expected {expected}, got {actual}",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Removes a saved report that failed verification
async fn remove_unverified(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed unverified report"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove unverified report"
        ),
    }
}

#[async_trait]
impl ReportSink for FileSink {
    async fn save(&self, artifact: &ReportArtifact) -> Result<SavedReport> {
        let file_name = artifact.file_name.as_str();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(ReportError::Sink(format!(
                "Invalid report file name '{file_name}'"
            )));
        }

        tokio::fs::create_dir_all(&self.directory).await?;

        let final_path = self.directory.join(file_name);
        if !self.overwrite && tokio::fs::try_exists(&final_path).await? {
            return Err(ReportError::Sink(format!(
                "Report {} already exists",
                final_path.display()
            )));
        }

        let bytes = artifact.bytes();
        let checksum = calculate_checksum_bytes(bytes);

        let temp_path = self.temp_path(file_name);
        let mut guard = TempFileGuard::new(temp_path.clone());

        tracing::debug!(
            temp_path = %temp_path.display(),
            bytes = bytes.len(),
            "Writing report to temporary file"
        );
        tokio::fs::write(&temp_path, bytes).await?;
        tokio::fs::rename(&temp_path, &final_path).await?;
        guard.disarm();

        if self.verify {
            if let Err(e) = self.verify_written(&final_path, &checksum).await {
                crate::log_error_with_context!(&e, "Saved report failed verification");
                remove_unverified(&final_path).await;
                return Err(e);
            }
        }

        tracing::info!(
            path = %final_path.display(),
            bytes = bytes.len(),
            checksum = %checksum,
            verified = self.verify,
            "Report saved"
        );

        Ok(SavedReport {
            path: final_path,
            bytes_written: bytes.len(),
            checksum,
            verified: self.verify,
        })
    }
}

//! Archive manifest types and serialization.
//!
//! The manifest is the source of truth for an archive's contents:
//! - Archive metadata (version, timestamp, site title)
//! - File listing in packaging order, with SHA-256 checksums and MIME types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Current archive schema version.
pub const ARCHIVE_SCHEMA_VERSION: &str = "1.0.0";

/// Manifest file name within the archive.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Archive manifest containing metadata and file checksums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveManifest {
    /// Archive format version.
    pub bundle_version: String,

    /// When the archive was created.
    pub created_at: DateTime<Utc>,

    /// Title of the packaged website.
    pub title: String,

    /// Files in packaging order, with checksums.
    pub files: Vec<FileEntry>,

    /// Optional description or notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// sitegen version that created this archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_version: Option<String>,
}

impl ArchiveManifest {
    /// Create a new manifest for a website title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            bundle_version: ARCHIVE_SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            title: title.into(),
            files: Vec::new(),
            description: None,
            generator_version: None,
        }
    }

    /// Set the generator version.
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = Some(version.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a file entry.
    pub fn add_file(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }

    /// Get total size of all files in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    /// Get file count.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Find a file by path.
    pub fn find_file(&self, path: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Validate the manifest structure.
    pub fn validate(&self) -> crate::Result<()> {
        if self.bundle_version != ARCHIVE_SCHEMA_VERSION {
            return Err(crate::BundleError::UnsupportedVersion {
                version: self.bundle_version.clone(),
                supported: ARCHIVE_SCHEMA_VERSION.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !is_safe_path(&file.path) {
                return Err(crate::BundleError::CorruptedManifest(format!(
                    "file entry has unsafe path '{}'",
                    file.path
                )));
            }
            if file.path == MANIFEST_FILE_NAME {
                return Err(crate::BundleError::CorruptedManifest(
                    "manifest lists itself".to_string(),
                ));
            }
            if !seen.insert(file.path.as_str()) {
                return Err(crate::BundleError::CorruptedManifest(format!(
                    "file '{}' listed twice",
                    file.path
                )));
            }
            if file.sha256.len() != 64 || !file.sha256.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(crate::BundleError::CorruptedManifest(format!(
                    "file '{}' has invalid checksum",
                    file.path
                )));
            }
        }

        Ok(())
    }

    /// Serialize to JSON with consistent formatting.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A relative path with no parent, root or empty components.
pub(crate) fn is_safe_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..")
}

/// File entry in the manifest with checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path within the archive (relative).
    pub path: String,

    /// SHA-256 checksum (64 hex characters).
    pub sha256: String,

    /// Size in bytes.
    pub bytes: u64,

    /// MIME type (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(path: impl Into<String>, sha256: impl Into<String>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            sha256: sha256.into(),
            bytes,
            mime_type: None,
        }
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Compute SHA-256 checksum of data.
    pub fn compute_checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Verify the checksum against data.
    pub fn verify(&self, data: &[u8]) -> bool {
        Self::compute_checksum(data) == self.sha256
    }
}

//! Archive reader for opening and verifying saved website archives.

use crate::manifest::MANIFEST_FILE_NAME;
use crate::{ArchiveManifest, BundleError, FileEntry, Result};
use sg_compose::{Artifact, DownloadPackage};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Reader for website archives with checksum verification.
pub struct ArchiveReader<R: Read + Seek> {
    manifest: ArchiveManifest,
    archive: ZipArchive<R>,
    verified: HashSet<String>,
}

impl ArchiveReader<File> {
    /// Open an archive from a file path.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl ArchiveReader<Cursor<Vec<u8>>> {
    /// Open an archive from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Create a reader from any Read + Seek source.
    ///
    /// Fails if the manifest is missing, unparseable or invalid.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let manifest = {
            let mut entry = archive
                .by_name(MANIFEST_FILE_NAME)
                .map_err(|_| BundleError::MissingFile(MANIFEST_FILE_NAME.to_string()))?;
            let mut json = String::new();
            entry.read_to_string(&mut json)?;
            ArchiveManifest::from_json(&json)?
        };
        manifest.validate()?;

        info!(
            title = %manifest.title,
            files = manifest.file_count(),
            "Archive opened"
        );

        Ok(Self {
            manifest,
            archive,
            verified: HashSet::new(),
        })
    }

    /// Get the manifest.
    pub fn manifest(&self) -> &ArchiveManifest {
        &self.manifest
    }

    /// List all files in the archive, in packaging order.
    pub fn files(&self) -> &[FileEntry] {
        &self.manifest.files
    }

    /// Check if the manifest lists a file.
    pub fn has_file(&self, path: &str) -> bool {
        self.manifest.find_file(path).is_some()
    }

    /// Read a file from the archive without verification.
    pub fn read_raw(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| BundleError::FileNotFound(path.to_string()))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        debug!(path, bytes = data.len(), "Read file (unverified)");
        Ok(data)
    }

    /// Read a file listed in the manifest and check its checksum.
    pub fn read_verified(&mut self, path: &str) -> Result<Vec<u8>> {
        let expected = self
            .manifest
            .find_file(path)
            .ok_or_else(|| BundleError::FileNotFound(path.to_string()))?
            .sha256
            .clone();

        let data = self.read_raw(path)?;

        let actual = FileEntry::compute_checksum(&data);
        if actual != expected {
            return Err(BundleError::ChecksumMismatch {
                path: path.to_string(),
                expected,
                actual,
            });
        }

        self.verified.insert(path.to_string());
        debug!(path, "File verified");
        Ok(data)
    }

    /// Read a verified file as UTF-8 text.
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        let data = self.read_verified(path)?;
        String::from_utf8(data).map_err(|_| BundleError::InvalidUtf8(path.to_string()))
    }

    /// Check if a file has been verified.
    pub fn is_verified(&self, path: &str) -> bool {
        self.verified.contains(path)
    }

    /// Verify all files in the archive.
    ///
    /// Returns the paths that failed verification.
    pub fn verify_all(&mut self) -> Vec<String> {
        let paths: Vec<String> = self.manifest.files.iter().map(|f| f.path.clone()).collect();

        let mut failures = Vec::new();
        for path in paths {
            if let Err(e) = self.read_verified(&path) {
                warn!(path = %path, error = %e, "Verification failed");
                failures.push(path);
            }
        }

        if failures.is_empty() {
            info!("All files verified");
        } else {
            warn!(failures = ?failures, "Some files failed verification");
        }

        failures
    }

    /// Rebuild the download package, verifying every file.
    pub fn read_package(&mut self) -> Result<DownloadPackage> {
        let entries = self.manifest.files.clone();

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            let content = self.read_text(&entry.path)?;
            let mime_type = entry
                .mime_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            files.push(Artifact::new(entry.path, content, mime_type));
        }

        Ok(DownloadPackage { files })
    }
}

//! Artifact writer.
//!
//! Saves a download package as loose files or as a ZIP archive with a
//! checksummed manifest. Artifacts are always written in packaging order.

use crate::manifest::{is_safe_path, MANIFEST_FILE_NAME};
use crate::{ArchiveManifest, BundleError, FileEntry, Result};
use sg_compose::{Artifact, DownloadPackage};
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Builder for writing packaged artifacts.
pub struct ArtifactWriter {
    manifest: ArchiveManifest,
    files: Vec<(String, Vec<u8>)>,
}

impl ArtifactWriter {
    /// Create an empty writer for a website title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            manifest: ArchiveManifest::new(title),
            files: Vec::new(),
        }
    }

    /// Create a writer holding every artifact of a package.
    pub fn from_package(title: impl Into<String>, package: &DownloadPackage) -> Self {
        let mut writer = Self::new(title);
        for artifact in &package.files {
            writer.add_artifact(artifact);
        }
        writer
    }

    /// Set the generator version.
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.manifest = self.manifest.with_generator_version(version);
        self
    }

    /// Set the archive description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.manifest = self.manifest.with_description(description);
        self
    }

    /// Append an artifact with automatic checksum.
    pub fn add_artifact(&mut self, artifact: &Artifact) {
        let data = artifact.content.as_bytes().to_vec();
        let checksum = FileEntry::compute_checksum(&data);
        let bytes = data.len() as u64;

        let entry = FileEntry::new(&artifact.filename, checksum, bytes)
            .with_mime_type(&artifact.mime_type);

        self.manifest.add_file(entry);
        debug!(path = %artifact.filename, bytes, "Added artifact");
        self.files.push((artifact.filename.clone(), data));
    }

    /// Get the current manifest (for inspection before writing).
    pub fn manifest(&self) -> &ArchiveManifest {
        &self.manifest
    }

    /// Get total size in bytes before compression.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(_, data)| data.len() as u64).sum()
    }

    /// Get file count (not including manifest).
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Save every artifact into a directory, one file at a time, in order.
    ///
    /// Returns the written paths in the same order.
    pub fn write_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.check_writable()?;
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.files.len());
        for (name, data) in &self.files {
            let path = dir.join(name);
            std::fs::write(&path, data)?;
            info!(path = %path.display(), bytes = data.len(), "Artifact saved");
            written.push(path);
        }

        Ok(written)
    }

    /// Write the archive to a file.
    pub fn write_archive(&self, path: &Path) -> Result<ArchiveManifest> {
        self.check_writable()?;

        let file = File::create(path)?;
        self.write_zip(file)?;

        info!(
            path = %path.display(),
            files = self.files.len(),
            bytes = self.total_bytes(),
            "Archive written"
        );

        Ok(self.manifest.clone())
    }

    /// Write the archive to a byte vector (for in-memory use).
    pub fn write_to_vec(&self) -> Result<(Vec<u8>, ArchiveManifest)> {
        self.check_writable()?;

        let mut buffer = Cursor::new(Vec::new());
        self.write_zip(&mut buffer)?;
        let bytes = buffer.into_inner();

        info!(
            files = self.files.len(),
            compressed_bytes = bytes.len(),
            uncompressed_bytes = self.total_bytes(),
            "Archive written to memory"
        );

        Ok((bytes, self.manifest.clone()))
    }

    fn check_writable(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(BundleError::EmptyBundle);
        }
        if let Some((name, _)) = self.files.iter().find(|(name, _)| !is_safe_path(name)) {
            return Err(BundleError::CorruptedManifest(format!(
                "artifact has unsafe file name '{}'",
                name
            )));
        }
        self.manifest.validate()
    }

    fn write_zip<W: Write + Seek>(&self, sink: W) -> Result<()> {
        let manifest_json = self.manifest.to_json()?;

        let mut zip = ZipWriter::new(sink);
        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        // Manifest first, then artifacts in packaging order
        zip.start_file(MANIFEST_FILE_NAME, options)?;
        zip.write_all(manifest_json.as_bytes())?;

        for (name, data) in &self.files {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        zip.finish()?;
        Ok(())
    }
}

//! Artifact writer/reader for packaged websites.
//!
//! Takes the ordered [`DownloadPackage`](sg_compose::DownloadPackage) built by
//! the composer and puts it on disk, either as loose files or as a single
//! integrity-protected archive.
//!
//! # Archive Format
//!
//! Archives are ZIP files containing:
//! - `manifest.json`: Metadata and file listing with SHA-256 checksums
//! - the packaged artifacts (`index.html`, `styles.css`, `script.js`)
//!
//! Entries keep packaging order; they are never re-sorted.
//!
//! # Example
//!
//! ```no_run
//! use sg_bundle::{ArchiveReader, ArtifactWriter};
//! use sg_common::WebsiteBundle;
//! use sg_compose::package_for_download;
//! use std::path::Path;
//!
//! let bundle = WebsiteBundle::new("Site", "<p>hi</p>", "p{}", "");
//! let writer = ArtifactWriter::from_package("Site", &package_for_download(&bundle));
//!
//! // Loose files, saved in order
//! writer.write_dir(Path::new("out")).unwrap();
//!
//! // Single archive, read back with verification
//! writer.write_archive(Path::new("site.zip")).unwrap();
//! let mut reader = ArchiveReader::open(Path::new("site.zip")).unwrap();
//! assert!(reader.verify_all().is_empty());
//! ```

pub mod error;
pub mod manifest;
pub mod reader;
pub mod writer;

pub use error::{BundleError, Result};
pub use manifest::{ArchiveManifest, FileEntry, ARCHIVE_SCHEMA_VERSION, MANIFEST_FILE_NAME};
pub use reader::ArchiveReader;
pub use writer::ArtifactWriter;

//! No-mock archive integration tests.
//!
//! Runs the real composer, writes artifacts to disk and reads them back:
//! - Loose files match the package byte for byte
//! - Archive entries keep packaging order with the manifest first
//! - Checksums verify on read-back and catch tampering on disk

use sg_bundle::{ArchiveReader, ArtifactWriter, BundleError, ARCHIVE_SCHEMA_VERSION};
use sg_common::WebsiteBundle;
use sg_compose::{package_for_download, DownloadPackage};
use std::io::Read;
use tempfile::TempDir;

fn landing_page() -> WebsiteBundle {
    WebsiteBundle::new(
        "Coffee Shop",
        "<!DOCTYPE html>\n<html>\n<head><title>x</title></head>\n<body>\n<header>Beans</header>\n</body>\n</html>",
        "header {\n  font-size: 2rem;\n}\n",
        "document.querySelector('header').addEventListener('click', () => {});\n",
    )
}

fn package() -> DownloadPackage {
    package_for_download(&landing_page())
}

#[test]
fn loose_files_match_package() {
    let temp_dir = TempDir::new().unwrap();
    let package = package();

    let written = ArtifactWriter::from_package("Coffee Shop", &package)
        .write_dir(temp_dir.path())
        .unwrap();

    assert_eq!(written.len(), 3);
    for (path, artifact) in written.iter().zip(&package.files) {
        assert!(path.ends_with(&artifact.filename));
        assert_eq!(std::fs::read_to_string(path).unwrap(), artifact.content);
    }
}

#[test]
fn archive_roundtrip_restores_package() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("coffee.zip");
    let package = package();

    let manifest = ArtifactWriter::from_package("Coffee Shop", &package)
        .with_generator_version("0.1.0-test")
        .write_archive(&path)
        .unwrap();
    assert_eq!(manifest.bundle_version, ARCHIVE_SCHEMA_VERSION);

    let mut reader = ArchiveReader::open(&path).unwrap();
    assert_eq!(reader.manifest().title, "Coffee Shop");
    assert!(reader.verify_all().is_empty());

    let restored = reader.read_package().unwrap();
    assert_eq!(restored, package);
}

#[test]
fn archive_entries_in_packaging_order() {
    let (bytes, _) = ArtifactWriter::from_package("Coffee Shop", &package())
        .write_to_vec()
        .unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut ordered: Vec<String> = Vec::new();
    for i in 0..archive.len() {
        ordered.push(archive.by_index(i).unwrap().name().to_string());
    }
    assert_eq!(
        ordered,
        vec!["manifest.json", "index.html", "styles.css", "script.js"]
    );
}

#[test]
fn manifest_checksums_match_contents() {
    let (bytes, manifest) = ArtifactWriter::from_package("Coffee Shop", &package())
        .write_to_vec()
        .unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    for entry in &manifest.files {
        let mut data = Vec::new();
        archive
            .by_name(&entry.path)
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        assert!(entry.verify(&data), "checksum mismatch for {}", entry.path);
        assert_eq!(entry.bytes, data.len() as u64);
    }
}

#[test]
fn standalone_files_are_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = landing_page();

    ArtifactWriter::from_package("Coffee Shop", &package_for_download(&bundle))
        .write_dir(temp_dir.path())
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("styles.css")).unwrap(),
        bundle.css
    );
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("script.js")).unwrap(),
        bundle.js
    );
    let index = std::fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(index.contains("<header>Beans</header>"));
    assert!(!index.contains("<title>x</title>"));
}

#[test]
fn truncated_archive_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("coffee.zip");
    ArtifactWriter::from_package("Coffee Shop", &package())
        .write_archive(&path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        ArchiveReader::open(&path),
        Err(BundleError::Zip(_))
    ));
}

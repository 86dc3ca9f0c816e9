//! Reading website documents from disk or stdin.
//!
//! A document is any JSON object carrying the four bundle fields: a bare
//! bundle, a generation response or a saved project.

use crate::error::{CliError, Result};
use sg_common::{Project, WebsiteBundle};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Read a document's text; `-` reads stdin.
pub fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode the bundle fields of a document.
pub fn parse_bundle(path: &Path, text: &str) -> Result<WebsiteBundle> {
    let bundle: WebsiteBundle = serde_json::from_str(text).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bundle.code_bytes(), "Bundle loaded");
    Ok(bundle)
}

/// Load the bundle of a document file.
pub fn load_bundle(path: &Path) -> Result<WebsiteBundle> {
    let text = read_document(path)?;
    parse_bundle(path, &text)
}

/// Decode a document as a project save payload named `name`.
///
/// Store-assigned fields (`id`, timestamps) in the document are dropped.
pub fn parse_project(path: &Path, text: &str, name: &str) -> Result<Project> {
    let input_error = |source| CliError::Input {
        path: path.to_path_buf(),
        source,
    };

    let mut value: serde_json::Value = serde_json::from_str(text).map_err(input_error)?;
    let Some(object) = value.as_object_mut() else {
        return Err(CliError::Args(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    };
    for field in ["id", "_id", "created_at", "updated_at"] {
        object.remove(field);
    }
    object.insert("name".to_string(), serde_json::Value::from(name));

    let project: Project = serde_json::from_value(value).map_err(input_error)?;
    project.validate()?;
    Ok(project)
}

/// Load a document file as a project save payload.
pub fn load_project(path: &Path, name: &str) -> Result<Project> {
    let text = read_document(path)?;
    parse_project(path, &text, name)
}

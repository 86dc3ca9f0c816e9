//! Sitegen common types.
//!
//! This crate provides the data model shared by every sitegen crate:
//! - The website bundle (title + HTML fragment + CSS + JS) consumed by the composer
//! - Generation requests and responses exchanged with the remote service
//! - Persisted projects and their identifiers
//! - Option catalogues (color schemes, design styles)
//! - Output format specifications

pub mod bundle;
pub mod catalog;
pub mod error;
pub mod id;
pub mod output;
pub mod project;

pub use bundle::{Component, GenerateRequest, GeneratedWebsite, WebsiteBundle};
pub use catalog::{default_color_schemes, default_styles, ColorScheme, DesignStyle};
pub use error::{Error, Result};
pub use id::ProjectId;
pub use output::OutputFormat;
pub use project::Project;

/// Schema version for sitegen JSON payloads and config files.
pub const SCHEMA_VERSION: &str = "1.0.0";

//! Capability traits for the two external collaborators.

use crate::Result;
use sg_common::{ColorScheme, DesignStyle, GenerateRequest, GeneratedWebsite, Project, ProjectId};

/// Produces website bundles from prompts.
pub trait GenerationService: Send + Sync {
    /// Generate a website for a prompt, style and color scheme.
    fn generate(&self, request: &GenerateRequest) -> Result<GeneratedWebsite>;

    /// Available color schemes.
    fn color_schemes(&self) -> Result<Vec<ColorScheme>>;

    /// Available design styles.
    fn styles(&self) -> Result<Vec<DesignStyle>>;
}

/// Persists generated websites as named projects.
pub trait ProjectStore: Send + Sync {
    /// All projects, newest first.
    fn list(&self) -> Result<Vec<Project>>;

    /// Fetch one project.
    fn get(&self, id: &ProjectId) -> Result<Project>;

    /// Store a new project and return its id.
    fn save(&self, project: &Project) -> Result<ProjectId>;

    /// Replace the content of an existing project, keeping its creation time.
    fn update(&self, id: &ProjectId, project: &Project) -> Result<()>;

    /// Remove a project.
    fn delete(&self, id: &ProjectId) -> Result<()>;
}

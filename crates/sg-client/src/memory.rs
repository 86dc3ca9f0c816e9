//! In-process backends for offline use and tests.

use crate::{ClientError, GenerationService, ProjectStore, Result};
use chrono::Utc;
use sg_common::{
    default_color_schemes, default_styles, ColorScheme, Component, DesignStyle, GenerateRequest,
    GeneratedWebsite, Project, ProjectId, WebsiteBundle,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

/// Thread-safe project store held in memory.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no projects.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writers replace whole entries; a poisoned lock still holds a valid Vec.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Project>> {
        self.projects.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Project>> {
        self.projects.write().unwrap_or_else(|e| e.into_inner())
    }

    fn new_id() -> ProjectId {
        let hex = Uuid::new_v4().simple().to_string();
        ProjectId(hex[..ProjectId::LEN].to_string())
    }
}

fn not_found(id: &ProjectId) -> ClientError {
    ClientError::NotFound(format!("project {}", id))
}

impl ProjectStore for MemoryProjectStore {
    fn list(&self) -> Result<Vec<Project>> {
        // Later inserts first, so equal timestamps still list newest first
        let mut projects: Vec<Project> = self.read().iter().rev().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    fn get(&self, id: &ProjectId) -> Result<Project> {
        self.read()
            .iter()
            .find(|p| p.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn save(&self, project: &Project) -> Result<ProjectId> {
        project.validate()?;

        let id = Self::new_id();
        let now = Utc::now();
        let mut stored = project.clone();
        stored.id = Some(id.clone());
        stored.created_at = Some(now);
        stored.updated_at = Some(now);

        self.write().push(stored);
        debug!(id = %id, name = %project.name, "Project stored in memory");
        Ok(id)
    }

    fn update(&self, id: &ProjectId, project: &Project) -> Result<()> {
        project.validate()?;

        let mut projects = self.write();
        let slot = projects
            .iter_mut()
            .find(|p| p.id.as_ref() == Some(id))
            .ok_or_else(|| not_found(id))?;

        let created_at = slot.created_at;
        *slot = project.clone();
        slot.id = Some(id.clone());
        slot.created_at = created_at;
        slot.updated_at = Some(Utc::now());
        Ok(())
    }

    fn delete(&self, id: &ProjectId) -> Result<()> {
        let mut projects = self.write();
        let before = projects.len();
        projects.retain(|p| p.id.as_ref() != Some(id));
        if projects.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Generation service that answers every prompt with a fixed page.
///
/// The page is a complete document, wrappers included, the way remote
/// generators tend to return it.
#[derive(Debug, Clone, Default)]
pub struct StaticGenerator {
    template: Option<WebsiteBundle>,
}

impl StaticGenerator {
    /// Create a generator producing the built-in page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return this bundle instead of the built-in page.
    pub fn with_bundle(bundle: WebsiteBundle) -> Self {
        Self {
            template: Some(bundle),
        }
    }

    fn builtin(title: &str) -> WebsiteBundle {
        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n</head>\n<body>\n\
             <header class=\"hero\"><h1>{title}</h1></header>\n\
             <main><p>Welcome.</p></main>\n</body>\n</html>"
        );
        let css = ".hero {\n  padding: 4rem 1rem;\n  text-align: center;\n}\n".to_string();
        let js = "document.addEventListener('DOMContentLoaded', () => {});\n".to_string();
        WebsiteBundle::new(title, html, css, js)
    }
}

/// First sentence of the prompt, or its first 80 characters.
pub fn title_from_prompt(prompt: &str) -> String {
    match prompt.split_once('.') {
        Some((first, _)) => first.trim().to_string(),
        None => prompt.chars().take(80).collect::<String>().trim().to_string(),
    }
}

impl GenerationService for StaticGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<GeneratedWebsite> {
        request.validate()?;

        let bundle = match &self.template {
            Some(bundle) => bundle.clone(),
            None => Self::builtin(&title_from_prompt(&request.prompt)),
        };
        let hero = Component {
            kind: "hero".to_string(),
            html: bundle.html.clone(),
            css: bundle.css.clone(),
            js: None,
        };

        Ok(GeneratedWebsite {
            id: None,
            components: vec![hero],
            meta_description: title_from_prompt(&request.prompt),
            prompt: request.prompt.clone(),
            style: request.style.clone(),
            color_scheme: request.color_scheme.clone(),
            bundle,
        })
    }

    fn color_schemes(&self) -> Result<Vec<ColorScheme>> {
        Ok(default_color_schemes())
    }

    fn styles(&self) -> Result<Vec<DesignStyle>> {
        Ok(default_styles())
    }
}

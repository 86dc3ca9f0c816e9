//! Saved project type.

use crate::{Error, GeneratedWebsite, ProjectId, Result, WebsiteBundle};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A generated website persisted in the project store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned id; absent until the project is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    /// User-chosen project name.
    pub name: String,
    /// Prompt the website was generated from.
    #[serde(default)]
    pub prompt: String,
    /// Title and code.
    #[serde(flatten)]
    pub bundle: WebsiteBundle,
    /// Generated sections, stored as opaque objects.
    #[serde(default)]
    pub components: Vec<serde_json::Value>,
    /// Generated meta description.
    #[serde(default)]
    pub meta_description: String,
    /// Design style used.
    #[serde(default)]
    pub style: String,
    /// Color scheme used.
    #[serde(default)]
    pub color_scheme: String,
    /// Creation time, set by the store.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "store_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time, set by the store.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "store_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Build a save payload from a generation response.
    pub fn from_website(name: impl Into<String>, website: &GeneratedWebsite) -> Result<Self> {
        let components = website
            .components
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let project = Self {
            id: None,
            name: name.into(),
            prompt: website.prompt.clone(),
            bundle: website.bundle.clone(),
            components,
            meta_description: website.meta_description.clone(),
            style: website.style.clone(),
            color_scheme: website.color_scheme.clone(),
            created_at: None,
            updated_at: None,
        };
        project.validate()?;
        Ok(project)
    }

    /// Build a save payload from a bare bundle.
    pub fn from_bundle(name: impl Into<String>, bundle: WebsiteBundle) -> Result<Self> {
        let project = Self {
            id: None,
            name: name.into(),
            prompt: String::new(),
            bundle,
            components: Vec::new(),
            meta_description: String::new(),
            style: String::new(),
            color_scheme: String::new(),
            created_at: None,
            updated_at: None,
        };
        project.validate()?;
        Ok(project)
    }

    /// Borrow the composable part of the project.
    pub fn bundle(&self) -> &WebsiteBundle {
        &self.bundle
    }

    /// A project needs a name before it can be stored.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("project name is empty".to_string()));
        }
        Ok(())
    }
}

/// Store timestamps are UTC but may lack an offset (`2026-01-15T14:30:22.123000`).
fn store_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Component;

    fn website() -> GeneratedWebsite {
        GeneratedWebsite {
            id: None,
            bundle: WebsiteBundle::new("Bakery", "<h1>Bread</h1>", "h1{}", "init()"),
            components: vec![Component {
                kind: "hero".to_string(),
                html: "<h1>Bread</h1>".to_string(),
                css: "h1{}".to_string(),
                js: None,
            }],
            meta_description: "Fresh bread".to_string(),
            prompt: "a bakery site".to_string(),
            style: "modern".to_string(),
            color_scheme: "sunset".to_string(),
        }
    }

    #[test]
    fn test_from_website() {
        let project = Project::from_website("My bakery", &website()).unwrap();
        assert_eq!(project.name, "My bakery");
        assert_eq!(project.bundle().title, "Bakery");
        assert_eq!(project.components.len(), 1);
        assert_eq!(project.components[0]["type"], "hero");
        assert!(project.id.is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Project::from_website("  ", &website()).is_err());
        assert!(Project::from_bundle("", WebsiteBundle::default()).is_err());
    }

    #[test]
    fn test_deserialize_stored_project() {
        let json = r#"{
            "id": "65a1b2c3d4e5f60718293a4b",
            "name": "Portfolio",
            "prompt": "photographer portfolio",
            "html": "<html>...</html>",
            "css": "body { }",
            "js": "// JavaScript code",
            "components": [],
            "meta_description": "Professional photography portfolio",
            "title": "Photography Portfolio",
            "style": "modern",
            "color_scheme": "dark",
            "created_at": "2026-01-15T14:30:22Z",
            "updated_at": "2026-01-15T14:30:22Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id.unwrap().as_str(), "65a1b2c3d4e5f60718293a4b");
        assert_eq!(project.bundle.title, "Photography Portfolio");
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_naive_store_timestamps() {
        let json = r#"{"name": "n", "created_at": "2026-01-15T14:30:22.123000", "updated_at": null}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(
            project.created_at.unwrap().to_rfc3339(),
            "2026-01-15T14:30:22.123+00:00"
        );
        assert!(project.updated_at.is_none());

        let bad = r#"{"name": "n", "created_at": "yesterday"}"#;
        assert!(serde_json::from_str::<Project>(bad).is_err());
    }

    #[test]
    fn test_save_payload_omits_store_fields() {
        let project = Project::from_website("Site", &website()).unwrap();
        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["title"], "Bakery");
    }
}

//! Generation option catalogues.

use serde::{Deserialize, Serialize};

/// A selectable color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Identifier sent in generation requests.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A selectable design style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignStyle {
    /// Identifier sent in generation requests.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

/// Color schemes offered by the stock generation service.
pub fn default_color_schemes() -> Vec<ColorScheme> {
    [
        ("default", "Default Light"),
        ("dark", "Dark Mode"),
        ("ocean", "Ocean Blue"),
        ("sunset", "Sunset Orange"),
        ("forest", "Forest Green"),
        ("purple", "Royal Purple"),
        ("minimal", "Minimal Gray"),
    ]
    .into_iter()
    .map(|(id, name)| ColorScheme {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Design styles offered by the stock generation service.
pub fn default_styles() -> Vec<DesignStyle> {
    vec![DesignStyle {
        id: "modern".to_string(),
        name: "Modern".to_string(),
        description: "Clean and contemporary design".to_string(),
    }]
}

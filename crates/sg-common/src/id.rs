//! Project identity types.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted project.
///
/// The project store keys documents by 24-character hexadecimal object ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Length of a valid id in hex characters.
    pub const LEN: usize = 24;

    /// Parse and validate a project id.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != Self::LEN || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidInput(format!("invalid project id: {s:?}")));
        }
        Ok(ProjectId(s.to_ascii_lowercase()))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProjectId::parse(s)
    }
}

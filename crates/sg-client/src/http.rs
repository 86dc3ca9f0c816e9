//! HTTP client for the generation and project API.
//!
//! Endpoints live under `{base}/api`:
//!
//! | Method | Path               | Body / response                        |
//! |--------|--------------------|----------------------------------------|
//! | POST   | `/generate`        | request → website                      |
//! | GET    | `/color-schemes`   | `{"color_schemes": [...]}`             |
//! | GET    | `/styles`          | `{"styles": [...]}`                    |
//! | POST   | `/projects`        | project → `{"id", "message"}`          |
//! | GET    | `/projects`        | `{"projects": [...]}`                  |
//! | GET    | `/projects/{id}`   | project                                |
//! | PUT    | `/projects/{id}`   | project → `{"message"}`                |
//! | DELETE | `/projects/{id}`   | `{"message"}`                          |

use crate::{ClientError, GenerationService, ProjectStore, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sg_common::{ColorScheme, DesignStyle, GenerateRequest, GeneratedWebsite, Project, ProjectId};
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ColorSchemeList {
    color_schemes: Vec<ColorScheme>,
}

#[derive(Deserialize)]
struct StyleList {
    styles: Vec<DesignStyle>,
}

#[derive(Deserialize)]
struct ProjectList {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct SaveResponse {
    id: String,
}

/// Client for a remote sitegen API.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    /// Create a client for a base URL such as `http://localhost:8000`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn project_url(&self, id: &ProjectId) -> String {
        self.url(&format!("/projects/{}", id))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(method = "GET", url, "Sending request");
        let response = self.agent.get(url).call().map_err(map_error)?;
        decode(response)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        body: impl serde::Serialize,
    ) -> Result<T> {
        debug!(method, url, "Sending request");
        let response = self
            .agent
            .request(method, url)
            .send_json(body)
            .map_err(map_error)?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T> {
    response
        .into_json()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Map a ureq failure onto the client error taxonomy.
fn map_error(err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let detail = error_detail(&body);
            match code {
                404 => ClientError::NotFound(detail),
                400 => ClientError::InvalidRequest(detail),
                _ => ClientError::Status { code, detail },
            }
        }
        ureq::Error::Transport(transport) => ClientError::Transport(transport.to_string()),
    }
}

/// The `detail` field of an error body, or the raw body.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}

impl GenerationService for HttpApi {
    fn generate(&self, request: &GenerateRequest) -> Result<GeneratedWebsite> {
        request.validate()?;
        let website: GeneratedWebsite =
            self.send_json("POST", &self.url("/generate"), request)?;
        info!(
            title = %website.title(),
            bytes = website.bundle().code_bytes(),
            "Website generated"
        );
        Ok(website)
    }

    fn color_schemes(&self) -> Result<Vec<ColorScheme>> {
        let list: ColorSchemeList = self.get_json(&self.url("/color-schemes"))?;
        Ok(list.color_schemes)
    }

    fn styles(&self) -> Result<Vec<DesignStyle>> {
        let list: StyleList = self.get_json(&self.url("/styles"))?;
        Ok(list.styles)
    }
}

impl ProjectStore for HttpApi {
    fn list(&self) -> Result<Vec<Project>> {
        let list: ProjectList = self.get_json(&self.url("/projects"))?;
        debug!(count = list.projects.len(), "Projects listed");
        Ok(list.projects)
    }

    fn get(&self, id: &ProjectId) -> Result<Project> {
        self.get_json(&self.project_url(id))
    }

    fn save(&self, project: &Project) -> Result<ProjectId> {
        project.validate()?;
        let saved: SaveResponse = self.send_json("POST", &self.url("/projects"), project)?;
        let id = ProjectId::parse(&saved.id).map_err(|e| ClientError::Decode(e.to_string()))?;
        info!(id = %id, name = %project.name, "Project saved");
        Ok(id)
    }

    fn update(&self, id: &ProjectId, project: &Project) -> Result<()> {
        project.validate()?;
        let _: serde_json::Value = self.send_json("PUT", &self.project_url(id), project)?;
        info!(id = %id, "Project updated");
        Ok(())
    }

    fn delete(&self, id: &ProjectId) -> Result<()> {
        let url = self.project_url(id);
        debug!(method = "DELETE", url = %url, "Sending request");
        self.agent.delete(&url).call().map_err(map_error)?;
        info!(id = %id, "Project deleted");
        Ok(())
    }
}

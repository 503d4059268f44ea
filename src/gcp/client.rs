//! Blocking HTTP client for the Google Cloud REST APIs.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    ApiError, PolicyAnalyzer, ResourceManager, Service,
    types::{ActivityPage, FolderPage, ProjectPage},
};

pub const DEFAULT_RESOURCE_MANAGER_URL: &str = "https://cloudresourcemanager.googleapis.com";
pub const DEFAULT_POLICY_ANALYZER_URL: &str = "https://policyanalyzer.googleapis.com";

/// Connection settings for [`GoogleApiClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub resource_manager_url: String,
    pub policy_analyzer_url: String,
    /// Project billed for the requests (`x-goog-user-project`).
    pub quota_project: Option<String>,
    pub page_size: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            resource_manager_url: DEFAULT_RESOURCE_MANAGER_URL.to_string(),
            policy_analyzer_url: DEFAULT_POLICY_ANALYZER_URL.to_string(),
            quota_project: None,
            page_size: None,
            timeout: None,
        }
    }
}

pub struct GoogleApiClient {
    agent: ureq::Agent,
    access_token: String,
    settings: ClientSettings,
}

impl GoogleApiClient {
    pub fn new(settings: ClientSettings, access_token: String) -> Self {
        // Error statuses are read as regular responses so the JSON error body
        // can be classified.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(settings.timeout)
            .build()
            .into();

        Self {
            agent,
            access_token,
            settings,
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .header("Accept", "application/json")
            .header(
                "User-Agent",
                format!("key-usage-reporter/{}", env!("CARGO_PKG_VERSION")),
            );

        if let Some(project) = &self.settings.quota_project {
            request = request.header("x-goog-user-project", project);
        }

        let page_size = self.settings.page_size.map(|n| n.to_string());
        if let Some(size) = &page_size {
            request = request.query("pageSize", size);
        }
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let transport = |source: ureq::Error| ApiError::Transport {
            url: url.to_string(),
            source,
        };

        let mut response = request.call().map_err(transport)?;
        let status = response.status();
        let body = response.body_mut().read_to_string().map_err(transport)?;

        debug!(%service, url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(ApiError::from_response(service, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { service, source })
    }

    fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        parent: &str,
        page_token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = format!(
            "{}/v3/{}",
            self.settings.resource_manager_url.trim_end_matches('/'),
            collection
        );
        let mut query = vec![("parent", parent)];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get_json(Service::ResourceManager, &url, &query)
    }
}

impl ResourceManager for GoogleApiClient {
    fn list_folders(&self, parent: &str, page_token: Option<&str>) -> Result<FolderPage, ApiError> {
        self.list("folders", parent, page_token)
    }

    fn list_projects(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> Result<ProjectPage, ApiError> {
        self.list("projects", parent, page_token)
    }
}

impl PolicyAnalyzer for GoogleApiClient {
    fn query_activities(
        &self,
        activity_parent: &str,
        page_token: Option<&str>,
    ) -> Result<ActivityPage, ApiError> {
        let url = format!(
            "{}/v1/{}/activities:query",
            self.settings.policy_analyzer_url.trim_end_matches('/'),
            activity_parent
        );
        let query: Vec<(&str, &str)> = page_token.map(|t| ("pageToken", t)).into_iter().collect();
        self.get_json(Service::PolicyAnalyzer, &url, &query)
    }
}

//! Google Cloud API access.
//!
//! The walker and the collector only see the [`ResourceManager`] and
//! [`PolicyAnalyzer`] traits; [`GoogleApiClient`] implements both over HTTP.

mod auth;
mod client;
mod error;
pub mod types;

pub use auth::resolve_access_token;
pub use client::{
    ClientSettings, DEFAULT_POLICY_ANALYZER_URL, DEFAULT_RESOURCE_MANAGER_URL, GoogleApiClient,
};
pub use error::{ApiError, ErrorKind, Service};

use types::{ActivityPage, FolderPage, ProjectPage};

/// Listing side of the Resource Manager v3 API.
pub trait ResourceManager {
    fn list_folders(&self, parent: &str, page_token: Option<&str>) -> Result<FolderPage, ApiError>;

    fn list_projects(&self, parent: &str, page_token: Option<&str>)
    -> Result<ProjectPage, ApiError>;
}

/// Activity query side of the Policy Analyzer v1 API.
pub trait PolicyAnalyzer {
    fn query_activities(
        &self,
        activity_parent: &str,
        page_token: Option<&str>,
    ) -> Result<ActivityPage, ApiError>;
}

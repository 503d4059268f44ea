//! Response payloads of the Resource Manager v3 and Policy Analyzer v1 APIs.
//!
//! Only the fields the report needs are modelled; everything else is ignored.

use serde::Deserialize;

use crate::model::Project;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderPage {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResource {
    /// Resource name, `projects/<number>`.
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl From<ProjectResource> for Project {
    fn from(resource: ProjectResource) -> Self {
        let display_name = if !resource.display_name.is_empty() {
            resource.display_name
        } else if !resource.project_id.is_empty() {
            resource.project_id
        } else {
            resource.name.clone()
        };
        Project::new(resource.name, display_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    #[serde(default)]
    pub projects: Vec<ProjectResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetails {
    #[serde(default)]
    pub last_authenticated_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationPeriod {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub full_resource_name: String,
    #[serde(default)]
    pub activity: Option<ActivityDetails>,
    #[serde(default)]
    pub observation_period: Option<ObservationPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Returns the continuation token, treating an empty string as the last page.
pub(crate) fn continuation(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

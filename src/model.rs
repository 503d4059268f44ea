//! Domain types shared by the walker, the collector and the report writer.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Prefix of the message Google returns when the Policy Analyzer API is
/// disabled for the project being queried.
pub const NOT_ENABLED_PREFIX: &str = "Policy Analyzer API has not been used in project";

/// Activity type queried for every project.
pub const KEY_LAST_AUTHENTICATION: &str = "serviceAccountKeyLastAuthentication";

/// Kind of a top-level hierarchy node that can be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Organization,
    Folder,
}

impl NodeKind {
    fn collection(self) -> &'static str {
        match self {
            NodeKind::Organization => "organizations",
            NodeKind::Folder => "folders",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNodeError {
    #[error("\"{0}\" is not a resource name; expected organizations/<id> or folders/<id>")]
    Malformed(String),
    #[error("unsupported resource type \"{0}\"; expected organizations or folders")]
    UnsupportedKind(String),
}

/// A parsed `<type>/<id>` resource name used as the root of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub kind: NodeKind,
    pub id: String,
}

impl FromStr for ResourceNode {
    type Err = ParseNodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((collection, id)) = trimmed.split_once('/') else {
            return Err(ParseNodeError::Malformed(s.to_string()));
        };
        if id.is_empty() || id.contains('/') {
            return Err(ParseNodeError::Malformed(s.to_string()));
        }

        let kind = match collection {
            "organizations" => NodeKind::Organization,
            "folders" => NodeKind::Folder,
            other => return Err(ParseNodeError::UnsupportedKind(other.to_string())),
        };

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }
}

impl fmt::Display for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.collection(), self.id)
    }
}

/// A project discovered under the scanned node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Project {
    /// Resource name, e.g. `projects/123456`.
    pub id: String,
    pub display_name: String,
}

impl Project {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Parent path for the last-authentication activity query of this project.
    pub fn activity_parent(&self) -> String {
        format!(
            "{}/locations/global/activityTypes/{}",
            self.id, KEY_LAST_AUTHENTICATION
        )
    }
}

/// Usage observed for a single service account key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub full_resource_name: String,
    /// `None` when the key never authenticated inside the observation window.
    pub last_authenticated_time: Option<String>,
    pub observation_start: String,
    pub observation_end: String,
}

/// One report row.
///
/// A record without `usage` marks a project whose Policy Analyzer API is not
/// enabled, so the usage columns are either all present or all empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountKeyInfo {
    pub project_id: String,
    pub project_name: String,
    pub usage: Option<KeyUsage>,
}

impl ServiceAccountKeyInfo {
    pub fn with_usage(project: &Project, usage: KeyUsage) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.display_name.clone(),
            usage: Some(usage),
        }
    }

    pub fn not_enabled(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.display_name.clone(),
            usage: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.usage.is_none()
    }

    pub fn full_resource_name(&self) -> Option<&str> {
        self.usage.as_ref().map(|u| u.full_resource_name.as_str())
    }

    pub fn last_authenticated_time(&self) -> Option<&str> {
        self.usage
            .as_ref()
            .and_then(|u| u.last_authenticated_time.as_deref())
    }

    pub fn observation_start(&self) -> Option<&str> {
        self.usage.as_ref().map(|u| u.observation_start.as_str())
    }

    pub fn observation_end(&self) -> Option<&str> {
        self.usage.as_ref().map(|u| u.observation_end.as_str())
    }

    /// Human-readable error for degraded records.
    pub fn error_message(&self) -> Option<String> {
        self.is_degraded()
            .then(|| not_enabled_message(&self.project_name))
    }
}

pub fn not_enabled_message(project_name: &str) -> String {
    format!("{} {}", NOT_ENABLED_PREFIX, project_name)
}

//! Errors raised while talking to Google Cloud APIs.

use std::{collections::HashMap, fmt};

use serde::Deserialize;
use thiserror::Error;

use crate::model::NOT_ENABLED_PREFIX;

const SERVICE_DISABLED: &str = "SERVICE_DISABLED";
const POLICY_ANALYZER_SERVICE: &str = "policyanalyzer.googleapis.com";

/// Remote service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    ResourceManager,
    PolicyAnalyzer,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::ResourceManager => write!(f, "Cloud Resource Manager"),
            Service::PolicyAnalyzer => write!(f, "Policy Analyzer"),
        }
    }
}

/// Coarse classification used to decide whether a failure is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PolicyAnalyzerNotEnabled,
    Other,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    PolicyAnalyzerNotEnabled { message: String },

    #[error("{service} returned HTTP {status}{}: {message}", parenthesized(.reason))]
    Status {
        service: Service,
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("could not decode {service} response")]
    Decode {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} returned page token \"{token}\" twice in a row")]
    RepeatedPageToken { service: Service, token: String },

    #[error("activity for {full_resource_name} has no observation {field}")]
    IncompleteActivity {
        full_resource_name: String,
        field: &'static str,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::PolicyAnalyzerNotEnabled { .. } => ErrorKind::PolicyAnalyzerNotEnabled,
            _ => ErrorKind::Other,
        }
    }

    /// Builds an error from a non-success HTTP response.
    ///
    /// Google APIs answer with `{"error": {"code", "message", "status", "details"}}`.
    /// A body that is not in that shape is kept verbatim as the message.
    pub fn from_response(service: Service, status: u16, body: &str) -> Self {
        let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
            return ApiError::Status {
                service,
                status,
                reason: None,
                message: body.trim().to_string(),
            };
        };
        let error = envelope.error;

        if error.is_policy_analyzer_disabled() {
            return ApiError::PolicyAnalyzerNotEnabled {
                message: error.message,
            };
        }

        ApiError::Status {
            service,
            status,
            reason: error.reason().map(str::to_string).or(error.status),
            message: error.message,
        }
    }
}

fn parenthesized(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|reason| format!(" ({})", reason))
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl ErrorBody {
    fn reason(&self) -> Option<&str> {
        self.details.iter().find_map(|d| d.reason.as_deref())
    }

    fn is_policy_analyzer_disabled(&self) -> bool {
        let structured = self.details.iter().any(|detail| {
            detail.reason.as_deref() == Some(SERVICE_DISABLED)
                && detail
                    .metadata
                    .get("service")
                    .is_none_or(|service| service == POLICY_ANALYZER_SERVICE)
        });

        structured || self.message.starts_with(NOT_ENABLED_PREFIX)
    }
}

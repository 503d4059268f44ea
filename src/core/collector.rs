//! Per-project lookup of service account key authentication activity.

use tracing::{debug, info};

use super::walker::next_token;
use crate::{
    gcp::{
        ApiError, ErrorKind, PolicyAnalyzer, Service,
        types::{Activity, continuation},
    },
    model::{KeyUsage, Project, ServiceAccountKeyInfo},
};

pub struct KeyUsageCollector<'a, A: PolicyAnalyzer + ?Sized> {
    analyzer: &'a A,
}

impl<'a, A: PolicyAnalyzer + ?Sized> KeyUsageCollector<'a, A> {
    pub fn new(analyzer: &'a A) -> Self {
        Self { analyzer }
    }

    /// Returns one record per key activity of `project`.
    ///
    /// A project without the Policy Analyzer API yields a single degraded
    /// record instead of an error. Every other failure is returned as is.
    pub fn collect(&self, project: &Project) -> Result<Vec<ServiceAccountKeyInfo>, ApiError> {
        let parent = project.activity_parent();
        let mut records = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = match self.analyzer.query_activities(&parent, token.as_deref()) {
                Ok(page) => page,
                Err(err) if token.is_none() && err.kind() == ErrorKind::PolicyAnalyzerNotEnabled => {
                    info!(project = %project.id, "{}", err);
                    return Ok(vec![ServiceAccountKeyInfo::not_enabled(project)]);
                }
                Err(err) => return Err(err),
            };
            debug!(
                project = %project.id,
                count = page.activities.len(),
                "queried key activities"
            );

            for activity in page.activities {
                records.push(ServiceAccountKeyInfo::with_usage(
                    project,
                    key_usage(activity)?,
                ));
            }

            let next = continuation(page.next_page_token);
            token = match next_token(Service::PolicyAnalyzer, token, next)? {
                Some(next) => Some(next),
                None => return Ok(records),
            };
        }
    }
}

fn key_usage(activity: Activity) -> Result<KeyUsage, ApiError> {
    let Activity {
        full_resource_name,
        activity,
        observation_period,
    } = activity;

    let period = observation_period.unwrap_or_default();
    let Some(observation_start) = period.start_time else {
        return Err(ApiError::IncompleteActivity {
            full_resource_name,
            field: "startTime",
        });
    };
    let Some(observation_end) = period.end_time else {
        return Err(ApiError::IncompleteActivity {
            full_resource_name,
            field: "endTime",
        });
    };

    Ok(KeyUsage {
        full_resource_name,
        last_authenticated_time: activity.and_then(|a| a.last_authenticated_time),
        observation_start,
        observation_end,
    })
}

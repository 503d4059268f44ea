//! Walker → collector → sink.

use anyhow::Result;

use super::{KeyUsageCollector, ProjectWalker};
use crate::{
    gcp::{PolicyAnalyzer, ResourceManager},
    model::{ResourceNode, ServiceAccountKeyInfo},
};

/// Receives records in the order they are produced.
pub trait RecordSink {
    fn accept(&mut self, record: &ServiceAccountKeyInfo) -> Result<()>;
}

impl RecordSink for Vec<ServiceAccountKeyInfo> {
    fn accept(&mut self, record: &ServiceAccountKeyInfo) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub projects: usize,
    pub records: usize,
    /// Display names of projects without the Policy Analyzer API.
    pub not_enabled: Vec<String>,
}

/// Scans every project under `root` and hands each record to `sink`.
///
/// Stops at the first error; records accepted before it stay with the sink.
pub fn scan<R, A, S>(
    resource_manager: &R,
    analyzer: &A,
    root: &ResourceNode,
    sink: &mut S,
) -> Result<ScanSummary>
where
    R: ResourceManager + ?Sized,
    A: PolicyAnalyzer + ?Sized,
    S: RecordSink + ?Sized,
{
    let collector = KeyUsageCollector::new(analyzer);
    let mut summary = ScanSummary::default();

    for project in ProjectWalker::new(resource_manager, root) {
        let project = project?;
        let records = collector.collect(&project)?;
        summary.projects += 1;

        for record in &records {
            if record.is_degraded() {
                summary.not_enabled.push(record.project_name.clone());
            }
            sink.accept(record)?;
            summary.records += 1;
        }
    }

    Ok(summary)
}

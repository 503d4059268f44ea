//! CSV serialization of report records.
//!
//! The header is written as soon as the writer is created and each row is
//! flushed as it is accepted, so an interrupted scan still leaves a readable
//! file containing every row produced so far.

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{core::RecordSink, model::ServiceAccountKeyInfo};

pub const REPORT_HEADER: [&str; 7] = [
    "project_id",
    "project_name",
    "full_resource_name",
    "last_authenticated_time",
    "observation_start",
    "observation_end",
    "error",
];

/// One CSV row. Absent values are written as empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub project_id: String,
    pub project_name: String,
    pub full_resource_name: Option<String>,
    pub last_authenticated_time: Option<String>,
    pub observation_start: Option<String>,
    pub observation_end: Option<String>,
    pub error: Option<String>,
}

impl From<&ServiceAccountKeyInfo> for ReportRow {
    fn from(record: &ServiceAccountKeyInfo) -> Self {
        Self {
            project_id: record.project_id.clone(),
            project_name: record.project_name.clone(),
            full_resource_name: record.full_resource_name().map(str::to_string),
            last_authenticated_time: record.last_authenticated_time().map(str::to_string),
            observation_start: record.observation_start().map(str::to_string),
            observation_end: record.observation_end().map(str::to_string),
            error: record.error_message(),
        }
    }
}

pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl ReportWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        Self::new(file)
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        inner
            .write_record(REPORT_HEADER)
            .context("Failed to write report header")?;
        inner.flush().context("Failed to write report header")?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn write(&mut self, record: &ServiceAccountKeyInfo) -> Result<()> {
        self.inner
            .serialize(ReportRow::from(record))
            .with_context(|| format!("Failed to write report row for {}", record.project_id))?;
        self.inner.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes buffered output and returns the number of data rows written.
    pub fn finish(mut self) -> io::Result<usize> {
        self.inner.flush()?;
        Ok(self.rows)
    }
}

impl<W: Write> RecordSink for ReportWriter<W> {
    fn accept(&mut self, record: &ServiceAccountKeyInfo) -> Result<()> {
        self.write(record)
    }
}

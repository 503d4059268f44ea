use std::path::PathBuf;

use crate::{core::ScanSummary, model::Project};

#[derive(Debug)]
pub enum CommandSummary {
    Report(ReportSummary),
    Projects(ProjectsSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ReportSummary {
    pub scan: ScanSummary,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct ProjectsSummary {
    pub parent: String,
    pub projects: Vec<Project>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

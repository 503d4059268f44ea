//! Console output for command results.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, ProjectsSummary, ReportSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::model::ServiceAccountKeyInfo;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult, verbose: bool) {
    let mut out = io::stdout().lock();
    match &result.summary {
        CommandSummary::Report(summary) => print_report_to(summary, verbose, &mut out),
        CommandSummary::Projects(summary) => print_projects_to(summary, &mut out),
        CommandSummary::Init(summary) => print_init_to(summary, &mut out),
    }
}

/// Printed as soon as a project without the Policy Analyzer API is seen.
pub fn print_not_enabled(record: &ServiceAccountKeyInfo) {
    print_not_enabled_to(record, &mut io::stdout().lock());
}

pub fn print_not_enabled_to<W: Write>(record: &ServiceAccountKeyInfo, writer: &mut W) {
    if let Some(message) = record.error_message() {
        let _ = writeln!(writer, "{}", message.yellow());
    }
}

fn print_report_to<W: Write>(summary: &ReportSummary, verbose: bool, writer: &mut W) {
    let scan = &summary.scan;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} for {} {} to {}",
            scan.records,
            if scan.records == 1 { "row" } else { "rows" },
            scan.projects,
            if scan.projects == 1 {
                "project"
            } else {
                "projects"
            },
            summary.output.display()
        )
        .green()
    );

    if !scan.not_enabled.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} {} without Policy Analyzer API",
            "note:".bold().yellow(),
            scan.not_enabled.len(),
            if scan.not_enabled.len() == 1 {
                "project"
            } else {
                "projects"
            }
        );
        if verbose {
            for name in &scan.not_enabled {
                let _ = writeln!(writer, "  - {}", name);
            }
        }
    }
}

fn print_projects_to<W: Write>(summary: &ProjectsSummary, writer: &mut W) {
    for project in &summary.projects {
        let _ = writeln!(writer, "{}\t{}", project.id, project.display_name);
    }
    let count = summary.projects.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found {} {} under {}",
            count,
            if count == 1 { "project" } else { "projects" },
            summary.parent
        )
        .green()
    );
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

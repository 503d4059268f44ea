use anyhow::{Context, Result};

use super::super::{args::ReportCommand, context::RunContext, report::print_not_enabled};
use super::{CommandResult, CommandSummary, ReportSummary};
use crate::{
    core::{RecordSink, scan},
    model::ServiceAccountKeyInfo,
    report_writer::ReportWriter,
};

/// Announces degraded projects on stdout before forwarding each record.
struct Announcing<S> {
    inner: S,
}

impl<S: RecordSink> RecordSink for Announcing<S> {
    fn accept(&mut self, record: &ServiceAccountKeyInfo) -> Result<()> {
        if record.is_degraded() {
            print_not_enabled(record);
        }
        self.inner.accept(record)
    }
}

pub fn report(cmd: ReportCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let output = ctx.output_path(cmd.output.as_ref());

    let mut sink = Announcing {
        inner: ReportWriter::create(&output)?,
    };
    let summary = scan(&ctx.client, &ctx.client, &ctx.parent, &mut sink)
        .with_context(|| format!("Scan of {} aborted", ctx.parent))?;
    sink.inner
        .finish()
        .with_context(|| format!("Failed to write report file: {}", output.display()))?;

    Ok(CommandResult {
        summary: CommandSummary::Report(ReportSummary {
            scan: summary,
            output,
        }),
    })
}

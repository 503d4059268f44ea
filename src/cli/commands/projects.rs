use anyhow::{Context, Result};

use super::super::{args::ProjectsCommand, context::RunContext};
use super::{CommandResult, CommandSummary, ProjectsSummary};
use crate::core::ProjectWalker;

pub fn projects(cmd: ProjectsCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;

    let projects = ProjectWalker::new(&ctx.client, &ctx.parent)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list projects under {}", ctx.parent))?;

    Ok(CommandResult {
        summary: CommandSummary::Projects(ProjectsSummary {
            parent: ctx.parent.to_string(),
            projects,
        }),
    })
}

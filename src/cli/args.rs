//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `report`: scan the hierarchy and write the key usage CSV
//! - `projects`: list the projects found under the parent node
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Report(cmd)) => cmd.common.verbose,
            Some(Command::Projects(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by the commands that call Google Cloud APIs.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Organization or folder to scan, e.g. organizations/123 (overrides config file)
    #[arg(long, env = "TOPLEVEL_PARENT")]
    pub parent: Option<String>,

    /// OAuth access token (defaults to `gcloud auth print-access-token`;
    /// Application Default Credentials and service account key files are not read)
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ReportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// CSV file to write (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProjectsCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a CSV report of service account key authentication activity
    Report(ReportCommand),
    /// List every project under the parent node
    Projects(ProjectsCommand),
    /// Initialize a new .keyusagerc.json configuration file
    Init,
}

use std::{env, path::PathBuf};

use anyhow::{Context as _, Result, anyhow};
use tracing::debug;

use super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    gcp::{GoogleApiClient, resolve_access_token},
    model::ResourceNode,
};

/// Everything a command needs to talk to Google Cloud.
///
/// Values given on the command line (or through their environment
/// variables) take precedence over the configuration file.
pub struct RunContext {
    pub config: Config,
    pub parent: ResourceNode,
    pub client: GoogleApiClient,
}

impl RunContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let config_result = load_config(&cwd)?;

        if args.verbose && !config_result.from_file {
            eprintln!("Note: No .keyusagerc.json found, using default configuration");
        }
        let config = config_result.config;

        let parent = args
            .parent
            .as_deref()
            .or(config.parent.as_deref())
            .ok_or_else(|| {
                anyhow!("No parent to scan: pass --parent, set TOPLEVEL_PARENT, or add \"parent\" to .keyusagerc.json")
            })?;
        let parent: ResourceNode = parent
            .parse()
            .with_context(|| format!("Invalid parent \"{}\"", parent))?;
        debug!(%parent, "resolved scan root");

        let token = resolve_access_token(args.access_token.as_deref())?;
        let client = GoogleApiClient::new(config.client_settings(), token);

        Ok(Self {
            config,
            parent,
            client,
        })
    }

    /// Report path: the command line wins over the configuration file.
    pub fn output_path(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&self.config.output))
    }
}

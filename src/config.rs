use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::gcp::{ClientSettings, DEFAULT_POLICY_ANALYZER_URL, DEFAULT_RESOURCE_MANAGER_URL};

pub const CONFIG_FILE_NAME: &str = ".keyusagerc.json";

pub const DEFAULT_OUTPUT: &str = "./service_account_key_usage_report.csv";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Node to scan, `organizations/<id>` or `folders/<id>`.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_resource_manager_url")]
    pub resource_manager_url: String,
    #[serde(default = "default_policy_analyzer_url")]
    pub policy_analyzer_url: String,
    #[serde(default)]
    pub quota_project: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_resource_manager_url() -> String {
    DEFAULT_RESOURCE_MANAGER_URL.to_string()
}

fn default_policy_analyzer_url() -> String {
    DEFAULT_POLICY_ANALYZER_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parent: None,
            output: default_output(),
            resource_manager_url: default_resource_manager_url(),
            policy_analyzer_url: default_policy_analyzer_url(),
            quota_project: None,
            page_size: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// `parent` is left alone here: it is only parsed once the command line
    /// and environment have had their say.
    pub fn validate(&self) -> Result<()> {
        for (key, url) in [
            ("resourceManagerUrl", &self.resource_manager_url),
            ("policyAnalyzerUrl", &self.policy_analyzer_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                bail!("Invalid '{}': \"{}\" is not an http(s) URL", key, url);
            }
        }

        if self.page_size == Some(0) {
            bail!("Invalid 'pageSize': must be greater than 0");
        }
        if self.timeout_secs == Some(0) {
            bail!("Invalid 'timeoutSecs': must be greater than 0");
        }

        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            resource_manager_url: self.resource_manager_url.clone(),
            policy_analyzer_url: self.policy_analyzer_url.clone(),
            quota_project: self.quota_project.clone(),
            page_size: self.page_size,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

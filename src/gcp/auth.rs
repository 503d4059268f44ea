use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Resolves the OAuth access token used for every request.
///
/// An explicit token wins; otherwise the active gcloud credentials are asked
/// for one.
pub fn resolve_access_token(explicit: Option<&str>) -> Result<String> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    debug!("no access token supplied, asking gcloud");
    let output = Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .context(
            "No access token: pass --access-token, set GOOGLE_OAUTH_ACCESS_TOKEN, or install gcloud",
        )?;

    if !output.status.success() {
        bail!(
            "gcloud auth print-access-token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let token = String::from_utf8(output.stdout)
        .context("gcloud printed a non UTF-8 access token")?
        .trim()
        .to_string();
    if token.is_empty() {
        bail!("gcloud auth print-access-token returned an empty token");
    }
    Ok(token)
}

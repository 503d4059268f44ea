use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, fake_api::FakeApi};

#[test]
fn test_projects_lists_hierarchy_in_scan_order() -> Result<()> {
    let api = FakeApi::builder()
        .folders(
            "organizations/1",
            r#"{"folders": [{"name": "folders/2"}, {"name": "folders/3"}]}"#,
        )
        .projects(
            "folders/2",
            r#"{"projects": [{"name": "projects/11", "projectId": "alpha", "displayName": "Alpha"}]}"#,
        )
        .projects(
            "folders/3",
            r#"{"projects": [{"name": "projects/12", "projectId": "beta"}]}"#,
        )
        .projects(
            "organizations/1",
            r#"{"projects": [{"name": "projects/13", "projectId": "gamma", "displayName": "Gamma"}]}"#,
        )
        .start()?;
    let test = CliTest::with_api(&api)?;

    let output = test.projects_command("organizations/1").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "projects/11\tAlpha\n\
         projects/12\tbeta\n\
         projects/13\tGamma\n\
         \u{2713} Found 3 projects under organizations/1\n"
    );
    // Listing never touches the Policy Analyzer API.
    assert!(api.queried_projects().is_empty());

    Ok(())
}

#[test]
fn test_projects_follows_page_tokens() -> Result<()> {
    let api = FakeApi::builder()
        .projects(
            "folders/7",
            r#"{"projects": [{"name": "projects/1", "displayName": "One"}], "nextPageToken": "page-2"}"#,
        )
        .route(
            "/v3/projects?parent=folders/7&pageToken=page-2",
            r#"{"projects": [{"name": "projects/2", "displayName": "Two"}], "nextPageToken": ""}"#,
        )
        .start()?;
    let test = CliTest::with_api(&api)?;

    let output = test.projects_command("folders/7").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "projects/1\tOne\nprojects/2\tTwo\n\u{2713} Found 2 projects under folders/7\n"
    );

    Ok(())
}

#[test]
fn test_projects_empty_folder() -> Result<()> {
    let api = FakeApi::builder().start()?;
    let test = CliTest::with_api(&api)?;

    let output = test.projects_command("folders/9").output()?;
    assert!(output.status.success());
    insta::assert_snapshot!(
        String::from_utf8_lossy(&output.stdout),
        @"✓ Found 0 projects under folders/9"
    );

    Ok(())
}

#[test]
fn test_projects_rejects_malformed_parent() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.projects_command("organizations").output()?;
    assert_eq!(output.status.code(), Some(2));
    insta::assert_snapshot!(
        String::from_utf8_lossy(&output.stderr),
        @r#"Error: Invalid parent "organizations": "organizations" is not a resource name; expected organizations/<id> or folders/<id>"#
    );

    Ok(())
}

#[test]
fn test_projects_parent_flag_overrides_stale_config_parent() -> Result<()> {
    let api = FakeApi::builder()
        .projects(
            "organizations/1",
            r#"{"projects": [{"name": "projects/5", "displayName": "Five"}]}"#,
        )
        .start()?;
    let test = CliTest::new()?;
    test.write_file(
        ".keyusagerc.json",
        &serde_json::json!({
            "parent": "projects/stale",
            "resourceManagerUrl": api.base_url(),
            "policyAnalyzerUrl": api.base_url(),
        })
        .to_string(),
    )?;

    let output = test.projects_command("organizations/1").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "projects/5\tFive\n\u{2713} Found 1 project under organizations/1\n"
    );

    Ok(())
}

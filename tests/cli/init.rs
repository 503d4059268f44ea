use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for key in [
        "parent",
        "output",
        "resourceManagerUrl",
        "policyAnalyzerUrl",
    ] {
        assert!(
            parsed.get(key).is_some(),
            "Config should have '{}' field",
            key
        );
    }
    assert_eq!(
        parsed["output"],
        "./service_account_key_usage_report.csv"
    );

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\u{2713} Created .keyusagerc.json\n"
    );

    assert!(test.root().join(".keyusagerc.json").exists());
    let content = test.read_file(".keyusagerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyusagerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stderr), @"Error: .keyusagerc.json already exists");
    assert_eq!(test.read_file(".keyusagerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("report"));
    assert!(stdout.contains("projects"));
    assert!(stdout.contains("init"));

    Ok(())
}

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .ivyrc.json"));
    assert!(test.root().join(".ivyrc.json").exists());

    let content = test.read_file(".ivyrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["langPath"], "./lang");
    assert_eq!(parsed["sourceLocale"], "en");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".ivyrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(".ivyrc.json already exists"));
    assert_eq!(test.read_file(".ivyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_then_status_uses_defaults() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"hello": "Hello"}"#)?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_eq!(run(cmd)?.code, Some(0));

    let output = run(test.status_command())?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Source locale:  en"));

    Ok(())
}

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

/// Source locale `en` with a namespaced PHP resource and a flat JSON one,
/// plus a `fr` translation missing one key.
fn pizza_project() -> Result<CliTest> {
    let test = CliTest::with_file(".ivyrc.json", r#"{ "sourceLocale": "en" }"#)?;
    test.write_file(
        "lang/en/pizza.php",
        r#"<?php

return [
    'margherita' => 'Margherita',
    'toppings' => [
        'cheese' => 'Cheese',
    ],
];
"#,
    )?;
    test.write_file("lang/en.json", r#"{"Order now": "Order now"}"#)?;
    test.write_file(
        "lang/fr/pizza.php",
        "<?php return ['margherita' => 'Marguerite'];",
    )?;
    test.write_file("lang/fr.json", r#"{"Order now": "Commander"}"#)?;
    Ok(test)
}

#[test]
fn test_status_lists_resources_and_keys() -> Result<()> {
    let test = pizza_project()?;

    let output = run(test.status_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("en *"));
    assert!(output.stdout.contains("pizza.php"));
    assert!(output.stdout.contains("pizza.toppings.cheese"));
    assert!(output.stdout.contains("Target locales: fr (1)"));
    assert!(output.stdout.contains("Resource files: 4"));
    assert!(output.stdout.contains("Unique keys:    3"));
    assert!(output.stdout.contains("1 key is missing a value"));

    Ok(())
}

#[test]
fn test_status_json_output() -> Result<()> {
    let test = pizza_project()?;

    let mut cmd = test.status_command();
    cmd.args(["--format", "json"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let parsed: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        parsed,
        json!({
            "Order now": { "en": "Order now", "fr": "Commander" },
            "pizza.margherita": { "en": "Margherita", "fr": "Marguerite" },
            "pizza.toppings.cheese": { "en": "Cheese", "fr": null }
        })
    );

    Ok(())
}

#[test]
fn test_status_missing_only_json() -> Result<()> {
    let test = pizza_project()?;

    let mut cmd = test.status_command();
    cmd.args(["--missing-only", "--format", "json"]);
    let output = run(cmd)?;

    let parsed: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        parsed,
        json!({ "pizza.toppings.cheese": { "en": "Cheese", "fr": null } })
    );

    Ok(())
}

#[test]
fn test_status_strict_fails_on_missing_values() -> Result<()> {
    let test = pizza_project()?;

    let mut cmd = test.status_command();
    cmd.arg("--strict");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));

    Ok(())
}

#[test]
fn test_status_strict_succeeds_when_complete() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"a": "A"}"#)?;
    test.write_file("lang/de.json", r#"{"a": "Ä"}"#)?;

    let mut cmd = test.status_command();
    cmd.args(["--strict", "--source-locale", "en"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Every key has a value in every locale"));

    Ok(())
}

#[test]
fn test_status_source_locale_from_env() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"a": "A"}"#)?;

    let mut cmd = test.status_command();
    cmd.env("APP_LOCALE", "en");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Source locale:  en"));
    assert!(output.stdout.contains("Target locales: none"));

    Ok(())
}

#[test]
fn test_status_cli_source_locale_overrides_config() -> Result<()> {
    let test = pizza_project()?;

    let mut cmd = test.status_command();
    cmd.args(["--source-locale", "fr"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Source locale:  fr"));
    assert!(output.stdout.contains("fr *"));

    Ok(())
}

#[test]
fn test_status_lang_path_relative_to_config() -> Result<()> {
    let test = CliTest::with_file(
        ".ivyrc.json",
        r#"{ "langPath": "resources/lang", "sourceLocale": "en" }"#,
    )?;
    test.write_file("resources/lang/en.json", r#"{"a": "A"}"#)?;
    test.write_file("app/.keep", "")?;

    let mut cmd = test.status_command();
    cmd.current_dir(test.root().join("app"));
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Unique keys:    1"));

    Ok(())
}

#[test]
fn test_status_lang_path_flag() -> Result<()> {
    let test = CliTest::with_file("i18n/en.json", r#"{"a": "A"}"#)?;

    let mut cmd = test.status_command();
    cmd.args(["--lang-path", "i18n", "--source-locale", "en"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);

    Ok(())
}

#[test]
fn test_status_missing_lang_directory() -> Result<()> {
    let test = CliTest::with_file(".ivyrc.json", r#"{ "sourceLocale": "en" }"#)?;

    let output = run(test.status_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("does not exist or is not a directory"));
    assert!(output.stderr.contains("Hint: Check the 'langPath' setting"));

    Ok(())
}

#[test]
fn test_status_without_source_locale() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"a": "A"}"#)?;

    let output = run(test.status_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Couldn't determine source locale"));

    Ok(())
}

#[test]
fn test_status_unknown_source_locale() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"a": "A"}"#)?;

    let mut cmd = test.status_command();
    cmd.args(["--source-locale", "ja"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("No resource found matching source locale `ja`"));

    Ok(())
}

#[test]
fn test_status_parse_error() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"a": "A""#)?;

    let mut cmd = test.status_command();
    cmd.args(["--source-locale", "en"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse"));
    assert!(output.stderr.contains("en.json"));

    Ok(())
}

#[test]
fn test_status_duplicate_key_warning() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"auth.failed": "From JSON"}"#)?;
    test.write_file("lang/en/auth.php", "<?php return ['failed' => 'From PHP'];")?;

    let mut cmd = test.status_command();
    cmd.args(["--source-locale", "en", "--format", "json"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let parsed: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(parsed, json!({ "auth.failed": { "en": "From PHP" } }));
    assert!(output.stderr.contains("auth.failed"));

    Ok(())
}

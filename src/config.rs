use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".ivyrc.json";

/// Environment variable consulted last when resolving the source locale.
pub const SOURCE_LOCALE_ENV: &str = "APP_LOCALE";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_lang_path", alias = "langDir")]
    pub lang_path: String,
    #[serde(default)]
    pub source_locale: Option<String>,
}

fn default_lang_path() -> String {
    "./lang".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang_path: default_lang_path(),
            source_locale: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.lang_path.trim().is_empty() {
            bail!("Invalid value in 'langPath': path must not be empty");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        source_locale: Some("en".to_string()),
        ..Default::default()
    };
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
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config was read from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory that relative paths in the config are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
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
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// Pick the source locale: CLI override, then config file, then environment.
///
/// Blank values are skipped. Returns `None` if nothing resolves.
pub fn resolve_source_locale(
    cli: Option<&str>,
    config: &Config,
    env: Option<&str>,
) -> Option<String> {
    [cli, config.source_locale.as_deref(), env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// Read [`SOURCE_LOCALE_ENV`] from the process environment.
pub fn source_locale_from_env() -> Option<String> {
    std::env::var(SOURCE_LOCALE_ENV).ok()
}

/// Pick the lang directory: CLI override, then config file.
///
/// A relative `langPath` from a config file is resolved against the
/// directory holding that file, so running from a subdirectory still
/// finds the same lang root.
pub fn resolve_lang_path(cli: Option<&Path>, loaded: &ConfigLoadResult) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }

    let path = Path::new(&loaded.config.lang_path);
    match loaded.base_dir() {
        Some(base) if path.is_relative() => {
            let rel = path.strip_prefix(".").unwrap_or(path);
            base.join(rel)
        }
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lang_path, "./lang");
        assert!(config.source_locale.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "langPath": "resources/lang",
              "sourceLocale": "en_US"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lang_path, "resources/lang");
        assert_eq!(config.source_locale.as_deref(), Some("en_US"));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "sourceLocale": "fr" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.lang_path, default_lang_path());
        assert_eq!(config.source_locale.as_deref(), Some("fr"));
    }

    #[test]
    fn test_lang_dir_alias() {
        let json = r#"{ "langDir": "./i18n" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lang_path, "./i18n");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"langPath\": \"./lang\""));
        assert!(json.contains("\"sourceLocale\": \"en\""));
        assert!(!json.contains("langDir"));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("app").join("Http");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "sourceLocale": "de" }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file());
        assert_eq!(result.base_dir(), Some(dir.path()));
        assert_eq!(result.config.source_locale.as_deref(), Some("de"));
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file());
        assert_eq!(result.config.lang_path, default_lang_path());
    }

    #[test]
    fn test_load_config_with_empty_lang_path_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "langPath": " " }"#).unwrap();

        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("langPath"));
    }

    #[test]
    fn test_load_config_with_invalid_json_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();

        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_source_locale_precedence() {
        let config = Config {
            source_locale: Some("fr".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_source_locale(Some("es"), &config, Some("de")),
            Some("es".to_string())
        );
        assert_eq!(
            resolve_source_locale(None, &config, Some("de")),
            Some("fr".to_string())
        );
        assert_eq!(
            resolve_source_locale(None, &Config::default(), Some("de")),
            Some("de".to_string())
        );
        assert_eq!(resolve_source_locale(None, &Config::default(), None), None);
    }

    #[test]
    fn test_blank_source_locales_are_skipped() {
        let config = Config {
            source_locale: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_source_locale(Some(""), &config, Some(" en ")),
            Some("en".to_string())
        );
        assert_eq!(resolve_source_locale(Some(""), &config, Some("")), None);
    }

    #[test]
    fn test_lang_path_from_cli_wins() {
        let loaded = ConfigLoadResult {
            config: Config::default(),
            path: Some(PathBuf::from("/project/.ivyrc.json")),
        };
        assert_eq!(
            resolve_lang_path(Some(Path::new("other/lang")), &loaded),
            PathBuf::from("other/lang")
        );
    }

    #[test]
    fn test_lang_path_relative_to_config_file() {
        let loaded = ConfigLoadResult {
            config: Config::default(),
            path: Some(PathBuf::from("/project/.ivyrc.json")),
        };
        assert_eq!(resolve_lang_path(None, &loaded), PathBuf::from("/project/lang"));

        let loaded = ConfigLoadResult {
            config: Config {
                lang_path: "/abs/lang".to_string(),
                ..Default::default()
            },
            path: Some(PathBuf::from("/project/.ivyrc.json")),
        };
        assert_eq!(resolve_lang_path(None, &loaded), PathBuf::from("/abs/lang"));
    }

    #[test]
    fn test_lang_path_without_config_file() {
        let loaded = ConfigLoadResult {
            config: Config::default(),
            path: None,
        };
        assert_eq!(resolve_lang_path(None, &loaded), PathBuf::from("./lang"));
    }
}

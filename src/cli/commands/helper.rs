use std::path::Path;

use anyhow::{Result, anyhow};

use super::super::args::CommonArgs;
use crate::config::{
    CONFIG_FILE_NAME, load_config, resolve_lang_path, resolve_source_locale,
    source_locale_from_env,
};
use crate::core::{Project, ProjectError};

/// Load config from the current directory, apply CLI overrides and open
/// the project it points at.
pub fn open_project(common: &CommonArgs) -> Result<Project> {
    let loaded = load_config(Path::new("."))?;

    if common.verbose {
        match &loaded.path {
            Some(path) => eprintln!("Using config file: {}", path.display()),
            None => eprintln!("No {} found, using defaults", CONFIG_FILE_NAME),
        }
    }

    let lang_path = resolve_lang_path(common.lang_path.as_deref(), &loaded);
    let source_locale = resolve_source_locale(
        common.source_locale.as_deref(),
        &loaded.config,
        source_locale_from_env().as_deref(),
    )
    .unwrap_or_default();

    Project::new(&lang_path, source_locale).map_err(|err| match err {
        ProjectError::NotFound(_) if common.lang_path.is_none() => anyhow!(
            "{}\n  Hint: Check the 'langPath' setting in {} or pass --lang-path.",
            err,
            CONFIG_FILE_NAME
        ),
        err => err.into(),
    })
}

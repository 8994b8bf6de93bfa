use anyhow::Result;

use super::{CommandResult, CommandSummary, ResourceSummary, StatusSummary, helper::open_project};
use crate::cli::args::StatusCommand;
use crate::core::Project;

/// Run the status command: list resource files and keys missing values.
///
/// Exits with failure only under `--strict` when some key is missing.
pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let project = open_project(&cmd.common)?;
    let table = project.keys()?;

    let missing_keys = table.iter().filter(|row| row.has_missing()).count();
    let total_keys = table.len();
    let resources = summarize_resources(&project)?;

    let table = if cmd.missing_only {
        table.with_empty_values()
    } else {
        table
    };

    let summary = StatusSummary {
        format: cmd.format,
        missing_only: cmd.missing_only,
        source_locale: project.source_locale().to_string(),
        target_locales: project
            .target_locales()
            .into_iter()
            .map(String::from)
            .collect(),
        resources,
        total_keys,
        missing_keys,
        table,
    };

    Ok(CommandResult {
        summary: CommandSummary::Status(summary),
        error_count: missing_keys,
        exit_on_errors: cmd.strict,
    })
}

fn summarize_resources(project: &Project) -> Result<Vec<ResourceSummary>> {
    let mut summaries = Vec::new();
    for resource in project.resources() {
        let path = resource.path();
        summaries.push(ResourceSummary {
            locale: resource.locale().to_string(),
            is_source: resource.locale() == project.source_locale(),
            path: path.strip_prefix(project.root()).unwrap_or(path).to_path_buf(),
            key_count: resource.keys()?.len(),
        });
    }
    Ok(summaries)
}

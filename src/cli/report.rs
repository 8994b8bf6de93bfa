//! Report formatting and printing utilities.
//!
//! Kept out of `core` so the engine can be used as a library without
//! pulling in terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, InitSummary, ResourceSummary, StatusSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::KeyTable;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the result of a command to stdout.
pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Status(summary) => match summary.format {
            OutputFormat::Table => print_status_to(summary, writer),
            OutputFormat::Json => print_json_to(&summary.table, writer),
        },
        CommandSummary::Init(summary) => print_init_to(summary, writer),
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}

fn print_json_to<W: Write>(table: &KeyTable, writer: &mut W) {
    match serde_json::to_string_pretty(table) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => {
            let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
        }
    }
}

fn print_status_to<W: Write>(summary: &StatusSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", "Resource files".bold());
    print_resources_to(&summary.resources, writer);
    let _ = writeln!(writer);

    let heading = if summary.missing_only {
        "Keys missing values"
    } else {
        "Keys"
    };
    let _ = writeln!(writer, "{}", heading.bold());
    if summary.table.is_empty() {
        let empty = if summary.missing_only {
            "No keys are missing values."
        } else {
            "No keys found."
        };
        let _ = writeln!(writer, "{}", empty);
    } else {
        print_key_table_to(&summary.table, writer);
    }
    let _ = writeln!(writer);

    print_totals_to(summary, writer);
}

fn print_resources_to<W: Write>(resources: &[ResourceSummary], writer: &mut W) {
    let header = vec!["Locale".to_string(), "File".to_string(), "Keys".to_string()];
    let rows: Vec<Vec<String>> = resources
        .iter()
        .map(|r| {
            let locale = if r.is_source {
                format!("{} *", r.locale)
            } else {
                r.locale.clone()
            };
            vec![
                locale,
                r.path.display().to_string(),
                r.key_count.to_string(),
            ]
        })
        .collect();

    print_box_table_to(&header, &rows, writer);
}

fn print_key_table_to<W: Write>(table: &KeyTable, writer: &mut W) {
    let mut header = vec!["Key".to_string()];
    header.extend(table.locales().iter().cloned());

    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|row| {
            let mut cells = vec![row.key().to_string()];
            cells.extend(row.values().map(|(_, value)| match value {
                Some(_) => SUCCESS_MARK.green().to_string(),
                None => FAILURE_MARK.red().to_string(),
            }));
            cells
        })
        .collect();

    print_box_table_to(&header, &rows, writer);
}

fn print_totals_to<W: Write>(summary: &StatusSummary, writer: &mut W) {
    let targets = if summary.target_locales.is_empty() {
        "none".to_string()
    } else {
        format!(
            "{} ({})",
            summary.target_locales.join(", "),
            summary.target_locales.len()
        )
    };

    let _ = writeln!(writer, "Source locale:  {}", summary.source_locale);
    let _ = writeln!(writer, "Target locales: {}", targets);
    let _ = writeln!(writer, "Resource files: {}", summary.resources.len());
    let _ = writeln!(writer, "Unique keys:    {}", summary.total_keys);

    if summary.missing_keys == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Every key has a value in every locale".green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} {} missing a value in at least one locale",
                summary.missing_keys,
                if summary.missing_keys == 1 { "key is" } else { "keys are" }
            )
            .red()
        );
    }

    let duplicates = summary.table.duplicates().len();
    if duplicates > 0 {
        let _ = writeln!(
            writer,
            "{} {} duplicate {} ignored, the first definition in each locale was kept",
            "warning:".bold().yellow(),
            duplicates,
            if duplicates == 1 { "key" } else { "keys" }
        );
    }
}

/// Draw a box table. Column widths are measured on the visible text, so
/// ANSI color codes in cells do not skew the alignment.
fn print_box_table_to<W: Write>(header: &[String], rows: &[Vec<String>], writer: &mut W) {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(display_width(cell));
            }
        }
    }

    let _ = writeln!(writer, "{}", border(&widths, '┌', '┬', '┐'));
    let _ = writeln!(writer, "{}", table_row(header, &widths));
    let _ = writeln!(writer, "{}", border(&widths, '├', '┼', '┤'));
    for row in rows {
        let _ = writeln!(writer, "{}", table_row(row, &widths));
    }
    let _ = writeln!(writer, "{}", border(&widths, '└', '┴', '┘'));
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(middle.to_string().as_str()), right)
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = width.saturating_sub(display_width(cell));
            format!(" {}{} ", cell, " ".repeat(padding))
        })
        .collect();
    format!("│{}│", padded.join("│"))
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_str())
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

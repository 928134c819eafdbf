//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use kidcare_diagnostics::Diagnostic;
use kidcare_diagnostics::KidcareError;
use kidcare_engine::EngineError;
use kidcare_model::SnapshotError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    JsonPretty,
    Table,
}

impl OutputFormat {
    /// Parse a format name; unknown names fall back to the table view
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "json-pretty" => Self::JsonPretty,
            _ => Self::Table,
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(io::stdout().is_terminal()),
    }
}

fn coded_diagnostic(error: &(dyn std::error::Error + 'static)) -> Option<Diagnostic> {
    if let Some(engine) = error.downcast_ref::<EngineError>() {
        return Some(engine.to_diagnostic());
    }
    error
        .downcast_ref::<SnapshotError>()
        .map(|snapshot| KidcareError::from(snapshot.clone()).to_diagnostic())
}

/// Format an error for display.
///
/// Engine and data file errors anywhere in the chain are shown as coded
/// diagnostics.
pub fn format_error(error: &anyhow::Error) -> String {
    match error.chain().find_map(coded_diagnostic) {
        Some(diagnostic) => {
            let mut out = format_diagnostic(&diagnostic);
            let context: Vec<String> = error
                .chain()
                .take_while(|e| coded_diagnostic(*e).is_none())
                .map(|e| e.to_string())
                .collect();
            if !context.is_empty() {
                out.push_str(&format!("\n  {} {}", "while:".dimmed(), context.join(": ")));
            }
            out
        }
        None => format!("{} {:#}", "Error:".red().bold(), error),
    }
}

pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    diagnostic.render_colored()
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Serialize a value as JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Render rows as a table
pub fn format_table<R: Tabled>(rows: Vec<R>) -> String {
    if rows.is_empty() {
        return "(empty list)".to_string();
    }
    Table::new(rows).with(Style::modern()).to_string()
}

/// Print a value as JSON, or the given table text in table mode
pub fn print_output<T: Serialize + ?Sized>(
    value: &T,
    table: impl FnOnce() -> String,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_json(value, false)?,
        OutputFormat::JsonPretty => format_json(value, true)?,
        OutputFormat::Table => table(),
    };

    write_output(&content, output_file)
}

/// Render an optional value for a table cell
pub fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidcare_model::SlotId;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("pretty"), OutputFormat::JsonPretty);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("whatever"), OutputFormat::Table);
    }

    #[test]
    fn test_format_table() {
        assert_eq!(format_table(Vec::<Row>::new()), "(empty list)");
        let table = format_table(vec![Row {
            name: "BCG".to_string(),
        }]);
        assert!(table.contains("Name"));
        assert!(table.contains("BCG"));
    }

    #[test]
    fn test_format_error_uses_diagnostic() {
        colored::control::set_override(false);
        let slot = SlotId::new();
        let error = anyhow::Error::new(EngineError::SlotAlreadyBooked { slot }).context("booking failed");
        let text = format_error(&error);
        assert!(text.contains("KC0200"));
        assert!(text.contains("Pick another open slot"));
        assert!(text.contains("booking failed"));
    }

    #[test]
    fn test_format_error_for_data_file() {
        colored::control::set_override(false);
        let error = anyhow::Error::new(SnapshotError::Parse("expected value".to_string()))
            .context("Failed to load data file: kidcare.json");
        let text = format_error(&error);
        assert!(text.contains("KC0403"));
        assert!(text.contains("kidcare.json"));
    }

    #[test]
    fn test_format_warning() {
        colored::control::set_override(false);
        assert_eq!(format_warning("check input"), "Warning: check input");
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(Some(3)), "3");
        assert_eq!(cell(None::<u32>), "-");
    }
}

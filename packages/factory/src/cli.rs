//! Command-line interface for the factory's text-run diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use serde::Serialize;

use crate::error::{FactoryError, Result};
use crate::scanner::{classify_text, is_all_whitespace};

/// Rivet factory - Inspect how markup text runs will be instanced.
#[derive(Parser)]
#[command(name = "rivet-factory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a file's content as a text run and report how the factory
    /// would instance it.
    Scan {
        /// File containing the text run
        file: PathBuf,

        /// Emit the report as YAML instead of styled text
        #[arg(long)]
        yaml: bool,
    },
}

/// How a text run would be instanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Classification {
    /// Whitespace only; no element would be created.
    Whitespace,
    /// Contains markup; the run would be re-parsed.
    Markup,
    /// A single text node would be created.
    Text,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Whitespace => "whitespace",
            Classification::Markup => "markup",
            Classification::Text => "text",
        };
        f.write_str(label)
    }
}

/// Scan report for one text run.
#[derive(Debug, Serialize)]
struct ScanReport {
    file: String,
    chars: usize,
    classification: Classification,
    data_expression: bool,
}

/// Run the CLI.
///
/// # Errors
/// Any failure of the selected command; the binary reports it and exits
/// non-zero.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { file, yaml } => scan_command(&file, yaml),
    }
}

/// Execute the scan command.
fn scan_command(file: &Path, yaml: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let report = build_report(file, &text)?;

    if yaml {
        print!("{}", serde_yaml::to_string(&report)?);
    } else {
        println!("{} {}", style("file:").bold(), report.file);
        println!("{} {}", style("chars:").bold(), report.chars);
        println!(
            "{} {}",
            style("classification:").bold(),
            report.classification
        );
        println!(
            "{} {}",
            style("data expression:").bold(),
            if report.data_expression { "yes" } else { "no" }
        );
    }

    Ok(())
}

fn build_report(file: &Path, text: &str) -> Result<ScanReport> {
    let (classification, data_expression) = if is_all_whitespace(text) {
        (Classification::Whitespace, false)
    } else {
        let class = classify_text(text).map_err(|err| FactoryError::MalformedExpression {
            text: text.to_string(),
            reason: err.to_string(),
        })?;
        let classification = if class.contains_markup {
            Classification::Markup
        } else {
            Classification::Text
        };
        (classification, class.contains_expression)
    };

    Ok(ScanReport {
        file: file.display().to_string(),
        chars: text.chars().count(),
        classification,
        data_expression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_plain_text() {
        let report = build_report(Path::new("a.rml"), "hello").unwrap();
        assert_eq!(report.classification, Classification::Text);
        assert!(!report.data_expression);
        assert_eq!(report.chars, 5);
    }

    #[test]
    fn test_report_for_whitespace() {
        let report = build_report(Path::new("a.rml"), " \n\t").unwrap();
        assert_eq!(report.classification, Classification::Whitespace);
        assert!(!report.data_expression);
    }

    #[test]
    fn test_report_for_markup_with_expression() {
        let report = build_report(Path::new("a.rml"), "<b>{{ name }}</b>").unwrap();
        assert_eq!(report.classification, Classification::Markup);
        assert!(report.data_expression);
    }

    #[test]
    fn test_report_for_malformed_expression() {
        let result = build_report(Path::new("a.rml"), "{{ oops");
        assert!(matches!(
            result,
            Err(FactoryError::MalformedExpression { .. })
        ));
    }
}

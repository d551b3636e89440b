//! climat CLI - daily climate table reconstruction tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use climat::{ColumnSpec, JsonFormat, ParseOptions, ReportParser, ReportPeriod};

#[derive(Parser)]
#[command(name = "climat")]
#[command(version)]
#[command(about = "Reconstruct daily climate tables from extracted report text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the table of one monthly report
    Parse {
        /// Extracted text file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Month the report covers (1-12)
        #[arg(short, long)]
        month: u32,

        /// Year the report covers
        #[arg(short, long)]
        year: i32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        text: TextArgs,

        /// Drop rows past the end of the month
        #[arg(long)]
        drop_invalid_dates: bool,
    },

    /// Show what the repair pass does to a report
    Repair {
        /// Extracted text file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        text: TextArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct TextArgs {
    /// Trailing footer lines to drop
    #[arg(long, default_value = "0", env = "CLIMAT_FOOTER_LINES")]
    footer_lines: usize,

    /// Skip Unicode normalization of lines
    #[arg(long)]
    no_normalize: bool,
}

impl TextArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_footer_lines(self.footer_lines)
            .with_unicode_normalization(!self.no_normalize)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON document with period and records
    Json,
    /// Markdown table
    Markdown,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            month,
            year,
            format,
            compact,
            output,
            text,
            drop_invalid_dates,
        } => {
            let mut options = text.options();
            if drop_invalid_dates {
                options = options.drop_invalid_dates();
            }
            cmd_parse(
                input.as_deref(),
                month,
                year,
                format,
                compact,
                output.as_deref(),
                options,
            )
        }
        Commands::Repair { input, text } => cmd_repair(input.as_deref(), text.options()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn cmd_parse(
    input: Option<&Path>,
    month: u32,
    year: i32,
    format: Format,
    compact: bool,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = ReportPeriod::new(year, month)?;
    let text = read_input(input)?;

    let table = ReportParser::with_options(options)
        .parse(&text, period)
        .map_err(|e| format!("{} in {}", e, period))?;
    log::info!("{}: reconstructed {} records", period, table.len());

    let rendered = match format {
        Format::Json if compact => climat::render::to_json(&table, JsonFormat::Compact)?,
        Format::Json => climat::render::to_json(&table, JsonFormat::Pretty)?,
        Format::Markdown => climat::render::to_markdown(&table),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_repair(
    input: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let (grid, report) = ReportParser::with_options(options).repair(&text)?;

    println!("{}", "Repairs".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if report.is_clean() {
        println!("{}", "No repairs needed".green());
    }
    for event in &report.events {
        let spill = event
            .spillover
            .as_deref()
            .map(|s| format!(" -> next: {:?}", s))
            .unwrap_or_default();
        println!(
            "{:>2} {} {:?} => {:?}{}",
            event.column,
            format!("{:<16}", event.rule.name()).bold(),
            event.before,
            event.after,
            spill.dimmed()
        );
    }
    for fragment in &report.dropped {
        println!("{} {:?}", "Dropped".yellow(), fragment);
    }

    println!();
    println!("{}", "Cells per column".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let rows = climat::parser::ROW_COUNT;
    for (index, count) in grid.row_counts().into_iter().enumerate() {
        let name = ColumnSpec::at(index).map_or("?", |spec| spec.name);
        let count_text = if count == rows {
            count.to_string().green()
        } else {
            count.to_string().red()
        };
        println!("{:>2} {} {}", index, format!("{:<16}", name).bold(), count_text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "climat".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Daily climate table reconstruction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\n2\n").unwrap();
        let text = read_input(Some(file.path())).unwrap();
        assert_eq!(text, "1\n2\n");
    }

    #[test]
    fn test_text_args_options() {
        let args = TextArgs {
            footer_lines: 27,
            no_normalize: true,
        };
        let options = args.options();
        assert_eq!(options.footer_lines, 27);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_cli_parses_arguments() {
        let cli = Cli::try_parse_from([
            "climat", "parse", "page.txt", "--month", "2", "--year", "2021", "--format",
            "markdown",
        ])
        .unwrap();
        match cli.command {
            Commands::Parse {
                month, year, format, ..
            } => {
                assert_eq!(month, 2);
                assert_eq!(year, 2021);
                assert!(format == Format::Markdown);
            }
            _ => panic!("expected parse command"),
        }
    }
}

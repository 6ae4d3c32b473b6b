//! Command-line interface: file-selection plumbing around the pipeline.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::error::Result;
use crate::export::{CsvExport, JsonExport, TabularExport};
use crate::extract::{flatten_pages, PageSource, PlainTextSource};
use crate::output;
use crate::pipeline::{self, PipelineReport};
use crate::segment::ParseCondition;

#[derive(Debug, Parser)]
#[command(name = "kruistabel", version, about = "Build vakkennis/vaardigheden cross-tables from kwalificatiedossier text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file overriding the built-in vocabulary
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the incidence matrix and print or export it
    Matrix(MatrixArgs),
    /// Show the recovered document structure and decision traces
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct MatrixArgs {
    /// Extracted document text (pages separated by form feeds)
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Extracted document text (pages separated by form feeds)
    pub input: PathBuf,

    /// Also print flush and classification traces
    #[arg(long)]
    pub trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Csv,
    Json,
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Matrix(args) => run_matrix(args, &config),
        Commands::Inspect(args) => run_inspect(args, &config),
    }
}

fn load_report(input: &Path, config: &Config) -> Result<PipelineReport> {
    let pages = PlainTextSource::new(input).pages()?;
    let text = flatten_pages(&pages)?;
    pipeline::run(&text, config)
}

fn run_matrix(args: &MatrixArgs, config: &Config) -> Result<()> {
    let report = load_report(&args.input, config)?;
    warn_condition(report.condition);

    match args.format {
        Format::Table => match args.output.as_deref() {
            Some(path) => {
                // ANSI escapes have no business in a file.
                colored::control::set_override(false);
                std::fs::write(path, output::render(&report.matrix))?;
                eprintln!("wrote {}", path.display());
                Ok(())
            }
            None => {
                print!("{}", output::render(&report.matrix));
                Ok(())
            }
        },
        Format::Csv => write_export(&CsvExport, &report, args.output.as_deref()),
        Format::Json => write_export(&JsonExport, &report, args.output.as_deref()),
    }
}

fn write_export(
    exporter: &dyn TabularExport,
    report: &PipelineReport,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            exporter.write(&report.matrix, &mut file)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            exporter.write(&report.matrix, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs, config: &Config) -> Result<()> {
    let report = load_report(&args.input, config)?;
    warn_condition(report.condition);

    for task in &report.tree.core_tasks {
        println!("{} ({}, regel {})", task.code, task.section, task.position + 1);
        for wp in report.tree.work_processes_for(&task.code) {
            let preview: String = wp.description.chars().take(60).collect();
            println!("  {}  {}", wp.code, preview);
        }
        for stmt in report.tree.statements_for(&task.code) {
            println!("  - {}", stmt.text);
        }
    }
    println!(
        "{} kerntaken, {} uitspraken, {} via fallback",
        report.tree.core_tasks.len(),
        report.tree.statement_count(),
        report.classification.fallback_count(),
    );

    if args.trace {
        println!("\nflush trace:");
        for event in &report.flush_trace {
            println!("  {event}");
        }
        println!("\nclassification trace:");
        for entry in &report.classification.trace {
            println!("  {entry}");
        }
    }
    Ok(())
}

fn warn_condition(condition: ParseCondition) {
    match condition {
        ParseCondition::NoStructureFound => {
            eprintln!("let op: geen kerntaakcodes gevonden in de tekst");
        }
        ParseCondition::NoStatementsFound => {
            eprintln!("let op: kerntaken gevonden maar geen uitspraken");
        }
        ParseCondition::Ok => {}
    }
}

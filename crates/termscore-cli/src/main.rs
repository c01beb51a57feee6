//! termscore CLI
//!
//! Command-line interface for terminology checks.
//!
//! ## Usage
//!
//! ```bash
//! # Score a translation against a glossary
//! termscore match --dictionary terms.json --source src.txt --translation out.txt \
//!     --source-lang zh --target-lang en
//!
//! # Validate a pasted batch of term pairs
//! cat batch.txt | termscore parse
//!
//! # Inspect a glossary export
//! termscore dictionary show terms.json
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success (`parse`: batch accepted)
//! - 1: `parse`: nothing to parse; `dictionary validate`: invalid
//! - 2: `parse`: batch rejected
//! - 3: Error

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use termscore_core::{
    parse_batch, DictionaryScope, EngineConfig, MatchReport, MatchRequest, ParseOutcome,
    ScoreBand, TerminologyDictionary,
};

/// termscore: terminology accuracy checks for translations
#[derive(Parser)]
#[command(name = "termscore")]
#[command(version)]
#[command(about = "Check translations against a terminology glossary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a translation against a terminology dictionary
    Match {
        /// Dictionary file (JSON or YAML, simplified or full export)
        #[arg(short, long)]
        dictionary: PathBuf,

        /// Source text file
        #[arg(short, long)]
        source: PathBuf,

        /// Translated text file (reads from stdin if not provided)
        #[arg(short, long)]
        translation: Option<PathBuf>,

        /// Source language code (e.g. zh, en-US)
        #[arg(long)]
        source_lang: String,

        /// Target language code
        #[arg(long)]
        target_lang: String,

        /// Only use dictionary rows from this domain
        #[arg(long)]
        domain: Option<String>,

        /// Engine configuration file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// List the verdict for every considered term
        #[arg(long)]
        explain: bool,
    },

    /// Parse a batch of "source target" lines
    Parse {
        /// Batch file (reads from stdin if not provided)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Dictionary commands
    Dictionary {
        #[command(subcommand)]
        action: DictionaryAction,
    },
}

#[derive(Subcommand)]
enum DictionaryAction {
    /// Validate a dictionary file
    Validate {
        /// Path to the dictionary file
        path: PathBuf,
    },

    /// Print every entry of a dictionary file
    Show {
        /// Path to the dictionary file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape of `match` output.
#[derive(Serialize)]
struct MatchOutput<'a> {
    #[serde(flatten)]
    report: &'a MatchReport,
    band: ScoreBand,
    applicable: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            dictionary,
            source,
            translation,
            source_lang,
            target_lang,
            domain,
            config,
            format,
            explain,
        } => match_command(
            dictionary,
            source,
            translation,
            &source_lang,
            &target_lang,
            domain,
            config,
            format,
            explain,
        ),

        Commands::Parse { path, format } => parse_command(path, format),

        Commands::Dictionary { action } => match action {
            DictionaryAction::Validate { path } => validate_dictionary(path),
            DictionaryAction::Show { path } => show_dictionary(path),
        },
    }
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn load_dictionary(path: &Path) -> Result<TerminologyDictionary> {
    TerminologyDictionary::from_file(path)
        .with_context(|| format!("Failed to load dictionary from {:?}", path))
}

#[allow(clippy::too_many_arguments)]
fn match_command(
    dictionary_path: PathBuf,
    source_path: PathBuf,
    translation_path: Option<PathBuf>,
    source_lang: &str,
    target_lang: &str,
    domain: Option<String>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    explain: bool,
) -> Result<ExitCode> {
    let config = match config_path {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => EngineConfig::default(),
    };

    let mut scope = DictionaryScope::new().with_languages(source_lang, target_lang);
    scope.domain = domain;
    let dictionary = TerminologyDictionary::from_file_scoped(&dictionary_path, &scope)
        .with_context(|| format!("Failed to load dictionary from {:?}", dictionary_path))?;
    let source_text = read_input(Some(source_path.as_path()))?;
    let translated_text = read_input(translation_path.as_deref())?;

    let request = MatchRequest::new(&source_text, &translated_text, source_lang, target_lang);
    let report = config.matcher().match_terms(&dictionary, &request);
    let band = config.scoring.bands.band(report.score.score);

    match format {
        OutputFormat::Json => {
            let output = MatchOutput {
                report: &report,
                band,
                applicable: report.score.is_applicable(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_match_report(&report, band, explain),
    }

    Ok(ExitCode::from(0))
}

fn print_match_report(report: &MatchReport, band: ScoreBand, explain: bool) {
    let score = &report.score;

    if !score.is_applicable() {
        println!("No dictionary terms apply to the source text");
        println!();
        println!("Terminology score: {}% (no terms considered)", score.percentage());
        return;
    }

    println!(
        "Terminology score: {}% ({})",
        score.percentage(),
        band.label()
    );
    println!();
    println!(
        "Matched {} of {} considered terms",
        score.matched_count, score.considered_count
    );

    if explain {
        println!();
        println!("--- Term Verdicts ---");
        println!();
        for verdict in &report.verdicts {
            let status = if verdict.matched { "MATCHED" } else { "MISSING" };
            println!(
                "  {}  {} -> {}",
                status, verdict.source_term, verdict.target_term
            );
        }
    } else if report.unmatched().next().is_some() {
        println!();
        println!("Missing translations:");
        for verdict in report.unmatched() {
            println!("  - {} -> {}", verdict.source_term, verdict.target_term);
        }
    }
}

fn parse_command(path: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let raw_text = read_input(path.as_deref())?;
    let outcome = parse_batch(&raw_text);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Text => print_parse_outcome(&outcome),
    }

    Ok(match outcome {
        ParseOutcome::Parsed { .. } => ExitCode::from(0),
        ParseOutcome::Empty => ExitCode::from(1),
        ParseOutcome::Rejected { .. } => ExitCode::from(2),
    })
}

fn print_parse_outcome(outcome: &ParseOutcome) {
    match outcome {
        ParseOutcome::Parsed { entries } => {
            println!("PARSED {} term pairs", entries.len());
            println!();
            for entry in entries {
                println!("  {} -> {}", entry.source_term, entry.target_term);
            }
        }
        ParseOutcome::Empty => {
            println!("NOTHING TO PARSE");
            println!();
            println!("The input contains only blank lines.");
        }
        ParseOutcome::Rejected { errors } => {
            println!("REJECTED: {} malformed lines", errors.len());
            println!();
            for error in errors {
                println!(
                    "  line {}: {} \"{}\"",
                    error.line_number, error.reason, error.raw_line
                );
            }
            println!();
            println!("Fix these lines and try again. No terms were accepted.");
        }
    }
}

fn validate_dictionary(path: PathBuf) -> Result<ExitCode> {
    match TerminologyDictionary::from_file(&path) {
        Ok(dictionary) => {
            println!("Dictionary is valid: {} terms", dictionary.len());
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Dictionary validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}

fn show_dictionary(path: PathBuf) -> Result<ExitCode> {
    let dictionary = load_dictionary(&path)?;

    println!("Dictionary: {} terms", dictionary.len());
    println!();
    for pair in &dictionary {
        println!("  {} -> {}", pair.source_term, pair.target_term);
    }

    Ok(ExitCode::from(0))
}

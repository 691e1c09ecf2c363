use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use litscan::classify::KeywordClassifier;
use litscan::config::Config;
use litscan::output::terminal;
use litscan::patterns::PatternTable;
use litscan::pipeline::RunReport;

/// litscan: keyword screening for literature reviews.
///
/// Flags which documents mention the target compound and which report
/// concentrations in sediment, water or biota.
#[derive(Parser)]
#[command(name = "litscan", version, about)]
struct Cli {
    /// Pattern table JSON (overrides LITSCAN_PATTERNS; default: built-in table)
    #[arg(long, global = true)]
    patterns: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that classify documents.
#[derive(clap::Args)]
struct ClassifyArgs {
    /// Directory for the CSV report (overrides LITSCAN_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Max words between a category term and a concentration term
    #[arg(long)]
    window: Option<usize>,

    /// Require word boundaries around category patterns (e.g. `bio` no
    /// longer matches inside `biodegradable`)
    #[arg(long)]
    strict_boundaries: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze abstracts in a Web of Science full-record export (HTML or text)
    Analyze {
        /// The exported file
        file: PathBuf,

        #[command(flatten)]
        classify: ClassifyArgs,
    },

    /// Analyze the full text of every PDF in a folder
    ScanPdfs {
        /// Folder containing PDF files
        dir: PathBuf,

        #[command(flatten)]
        classify: ClassifyArgs,

        /// Number of PDFs to extract in parallel (default: 4)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Extract DOIs from a saved HTML page
    Dois {
        /// The HTML file
        file: PathBuf,

        /// Keep only the first N DOIs (after sorting)
        #[arg(long)]
        first: Option<usize>,

        /// Where to write the list (default: dois.txt on the desktop)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show and validate the active pattern table
    Patterns {
        /// Print the table as JSON (a starting point for a custom table)
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("litscan=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if cli.patterns.is_some() {
        config.patterns_path = cli.patterns.clone();
    }

    match cli.command {
        Commands::Analyze { file, classify } => {
            apply_classify_args(&mut config, classify);
            let (table, classifier) = build_classifier(&config)?;

            println!("Analyzing records in {}...", file.display());
            let report = litscan::pipeline::records::run(
                &file,
                &classifier,
                &table,
                &config.report_settings(),
            )?;

            finish_run(&report);
        }

        Commands::ScanPdfs {
            dir,
            classify,
            concurrency,
        } => {
            apply_classify_args(&mut config, classify);
            if let Some(n) = concurrency {
                config.concurrency = n;
            }
            let (table, classifier) = build_classifier(&config)?;

            println!(
                "Scanning PDFs in {} ({} concurrent)...",
                dir.display(),
                config.concurrency
            );
            let report = litscan::pipeline::pdfs::run(
                &dir,
                &classifier,
                &table,
                &config.report_settings(),
                config.concurrency,
            )
            .await?;

            terminal::display_document_table(&table, &report.rows);
            finish_run(&report);
        }

        Commands::Dois {
            file,
            first,
            output,
        } => {
            let html = litscan::ingest::read_text_lossy(&file)?;
            let all = litscan::doi::extract_dois(&html)?;
            let total = all.len();
            let selected = litscan::doi::select_first(all, first);

            if selected.is_empty() {
                println!("No DOIs found in {}", file.display());
                return Ok(());
            }

            let path = output.unwrap_or_else(litscan::doi::default_output_path);
            litscan::doi::write_doi_list(&path, &selected)?;

            println!("Found {total} unique DOIs");
            println!(
                "{}",
                format!("Saved {} DOIs to {}", selected.len(), path.display()).bold()
            );
        }

        Commands::Patterns { json } => {
            let table = PatternTable::load(config.patterns_path.as_deref())?;
            // Compiling is the validation: any bad regex fails here
            KeywordClassifier::new(&table, config.match_options())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                let source = pattern_source(config.patterns_path.as_deref());
                terminal::display_pattern_table(&table, &source);
                println!("{}", "All patterns compiled successfully.".green());
            }
        }
    }

    Ok(())
}

fn apply_classify_args(config: &mut Config, args: ClassifyArgs) {
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(window) = args.window {
        config.window = window;
    }
    if args.strict_boundaries {
        config.anchor_presence = true;
    }
}

/// Load the pattern table and compile it. A bad pattern aborts the run here,
/// before any document is read.
fn build_classifier(config: &Config) -> Result<(PatternTable, KeywordClassifier)> {
    let table = PatternTable::load(config.patterns_path.as_deref())?;
    let classifier = KeywordClassifier::new(&table, config.match_options())?;
    info!(
        source = %pattern_source(config.patterns_path.as_deref()),
        categories = table.categories.len(),
        window = classifier.options().window,
        strict_boundaries = classifier.options().anchor_presence,
        "Pattern table ready"
    );
    Ok((table, classifier))
}

fn pattern_source(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "built-in".to_string(),
    }
}

fn finish_run(report: &RunReport) {
    terminal::display_summary(&report.summary);
    println!(
        "{}",
        format!("Report saved to {}", report.csv_path.display()).bold()
    );
}

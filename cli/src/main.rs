//! docsplice CLI - replace and inspect sections of Word documents
//!
//! A command-line tool for swapping the body text under matching headings
//! of DOCX files and for listing a document's structure.

use clap::{Parser, Subcommand};
use colored::*;
use docsplice::{ContentMap, DocxDocument, ParseOptions, ReplaceOptions, SectionReplacer};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Heading-driven section replacement for Word documents
#[derive(Parser)]
#[command(
    name = "docsplice",
    author = "iyulab",
    version,
    about = "Replace and inspect sections of Word documents",
    long_about = "docsplice - Heading-driven section replacement for Word (.docx) documents.\n\n\
                  Finds headings whose label matches a content map entry and replaces the\n\
                  text beneath them, leaving the rest of the document untouched."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace section bodies under matching headings
    Replace {
        /// Input .docx file
        input: PathBuf,

        /// Content map file (.json or .toml) of heading label to text
        #[arg(short, long)]
        content: PathBuf,

        /// Output file path (default: <input>-updated.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Paragraph style of inserted text (empty for none)
        #[arg(long, default_value = "Body Text")]
        body_style: String,

        /// Space after inserted paragraphs, in twentieths of a point
        #[arg(long, default_value = "240")]
        spacing_after: u32,

        /// Deepest heading level treated as a section boundary (1-6)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u8).range(1..=6))]
        max_heading: u8,

        /// Show what would be replaced without writing a file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the block structure of a document
    #[command(visible_alias = "outline")]
    Inspect {
        /// Input .docx file
        input: PathBuf,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Deepest heading level treated as a section boundary (1-6)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u8).range(1..=6))]
        max_heading: u8,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Replace {
            input,
            content,
            output,
            body_style,
            spacing_after,
            max_heading,
            dry_run,
        } => {
            let content = ContentMap::load(&content)?;
            if content.is_empty() {
                println!("{} Content map is empty", "!".yellow().bold());
            }

            let pb = create_spinner("Reading document...");
            let parse_options = ParseOptions::new().with_max_heading_level(max_heading);
            let mut docx = DocxDocument::open_with(&input, &parse_options)?;

            pb.set_message("Replacing sections...");
            let options = ReplaceOptions {
                body_style: Some(body_style).filter(|s| !s.trim().is_empty()),
                spacing_after: Some(spacing_after),
            };
            let summary =
                SectionReplacer::with_options(options).replace(docx.document_mut(), &content);

            let output = output.unwrap_or_else(|| docsplice::updated_path(&input));
            tracing::debug!(output = %output.display(), dry_run, "replacement finished");
            if !dry_run {
                pb.set_message("Saving document...");
                docx.save(&output)?;
            }
            pb.finish_and_clear();

            for r in &summary.replacements {
                println!(
                    "{} {} {} {} {}",
                    "✓".green().bold(),
                    r.heading.bold(),
                    "←".dimmed(),
                    r.key,
                    format!("({} blocks removed)", r.removed).dimmed()
                );
            }
            for key in summary.unused_keys(&content) {
                println!("{} No heading matched {}", "!".yellow().bold(), key.yellow());
            }

            println!();
            if dry_run {
                println!(
                    "{} Dry run: {} of {} sections would be replaced",
                    "i".cyan().bold(),
                    summary.replaced(),
                    content.len()
                );
            } else {
                println!(
                    "{} Replaced {} sections: {}",
                    "✓".green().bold(),
                    summary.replaced(),
                    output.display()
                );
            }
        }

        Commands::Inspect {
            input,
            json,
            max_heading,
        } => {
            let pb = create_spinner("Analyzing document...");
            let options = ParseOptions::new().with_max_heading_level(max_heading);
            let docx = DocxDocument::open_with(&input, &options)?;
            let outline = docsplice::outline(docx.document(), docx.styles());
            pb.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&outline)?);
            } else {
                println!("{}: {}", "File".bold(), file_name(&input));
                print!("{}", outline.to_text());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "docsplice".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading-driven section replacement for Word documents");
    println!();
    println!("Supported formats: DOCX");
    println!("Content maps: JSON, TOML");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

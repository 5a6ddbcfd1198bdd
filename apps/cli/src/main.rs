use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use vocab_deck::anki::SyncOptions;
use vocab_deck::commands::{self, export::ExportOptions, parse::ParseOptions};
use vocab_deck::config::{self, Config, DEFAULT_THROTTLE_MS};

#[derive(Debug, Parser)]
#[command(author, version, about = "Turn GRE-style vocabulary PDFs into Anki flashcards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a PDF and print the entries found
    Parse(ParseArgs),
    /// Write an Anki package (.apkg)
    Export(ExportArgs),
    /// Push cards into a running Anki through AnkiConnect
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Vocabulary PDF
    pdf: PathBuf,
    /// Print entries as JSON
    #[arg(long)]
    json: bool,
    /// Maximum number of entries to print
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Vocabulary PDF
    pdf: PathBuf,
    /// Deck name (defaults to the PDF file name)
    #[arg(long)]
    deck: Option<String>,
    /// Output .apkg path
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Tag added to every note
    #[arg(long)]
    tag: Option<String>,
}

#[derive(Debug, Args)]
struct SyncArgs {
    /// Vocabulary PDF
    pdf: PathBuf,
    /// Deck name (defaults to the PDF file name)
    #[arg(long)]
    deck: Option<String>,
    /// AnkiConnect host, e.g. http://localhost
    #[arg(long)]
    host: Option<String>,
    /// AnkiConnect port
    #[arg(long)]
    port: Option<u16>,
    /// Keep the existing deck instead of deleting it first
    #[arg(long)]
    keep_existing: bool,
    /// Delay between cards in milliseconds (0-200)
    #[arg(long, default_value_t = DEFAULT_THROTTLE_MS)]
    throttle_ms: u64,
    /// Tag added to every note
    #[arg(long)]
    tag: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    vocab_deck::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => commands::parse::run(
            &args.pdf,
            &ParseOptions {
                json: args.json,
                limit: args.limit,
            },
        ),
        Commands::Export(args) => {
            let options = ExportOptions {
                deck_name: args.deck,
                output: args.output,
                tag: args.tag.unwrap_or_else(config::tag_from_env),
            };
            commands::export::run(&args.pdf, &options).map(|_| ())
        }
        Commands::Sync(args) => {
            let mut config = Config::from_env().context("Invalid configuration")?;
            if let Some(host) = args.host {
                config.anki_host = host;
            }
            if let Some(port) = args.port {
                config.anki_port = port;
            }
            if let Some(tag) = args.tag {
                config.tag = tag;
            }

            let options = SyncOptions {
                delete_existing: !args.keep_existing,
                throttle: config::throttle(args.throttle_ms),
                tag: config.tag.clone(),
            };
            commands::sync::run(&args.pdf, args.deck.as_deref(), &config, &options)
                .await
                .map(|_| ())
        }
    }
}

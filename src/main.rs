//! # docseek CLI
//!
//! Terminal client for a remote semantic-search service. Queries and
//! documents travel over the service's JSON HTTP API; everything else
//! (ranking, embeddings, storage) lives on the server side.
//!
//! ## Usage
//!
//! ```bash
//! docseek --config ./docseek.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docseek search "<query>"` | Search the index and print ranked results |
//! | `docseek add --title .. --text ..` | Add a document to the index |
//! | `docseek examples` | List the example queries |
//! | `docseek shell` | Start the interactive search loop |
//!
//! ## Examples
//!
//! ```bash
//! # One-shot search
//! docseek search "kubernetes deployment"
//!
//! # Ingest a runbook pasted from Slack
//! docseek add --title "Restart runbook" --text "Run the playbook." --source slack
//!
//! # Interactive loop
//! docseek shell
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docseek::api::ApiClient;
use docseek::config;
use docseek::ingest::Ingestor;
use docseek::input::EXAMPLE_QUERIES;
use docseek::models::DocSource;
use docseek::session::SearchSession;
use docseek::shell;
use docseek::view;

/// docseek — a terminal client for a remote semantic-search service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; when the file does not exist, the DOCSEEK_API_URL environment
/// variable supplies the service base URL.
#[derive(Parser)]
#[command(
    name = "docseek",
    about = "A terminal client for a remote semantic-search service",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./docseek.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the index.
    ///
    /// Submits the query to the search endpoint and prints ranked results
    /// with relevance tiers, an excerpt, and the search metadata strip.
    Search {
        /// The search query string.
        query: String,
    },

    /// Add a document to the index.
    ///
    /// Uploads a single document for ingestion. On failure the command
    /// prints the failed status; nothing is retried.
    Add {
        /// Document title.
        #[arg(long)]
        title: String,

        /// Document body text.
        #[arg(long)]
        text: String,

        /// Where the document came from.
        #[arg(long, value_enum, default_value_t = DocSource::Manual)]
        source: DocSource,

        /// Source URL to associate with the document.
        #[arg(long, default_value = "")]
        url: String,
    },

    /// List the example queries.
    Examples,

    /// Start the interactive search shell.
    Shell,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("DOCSEEK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Commands that don't require config
    if let Commands::Examples = cli.command {
        for (index, query) in EXAMPLE_QUERIES.iter().enumerate() {
            println!("  {}. {}", index + 1, query);
        }
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;
    let client = ApiClient::new(&cfg)?;

    match cli.command {
        Commands::Search { query } => {
            let session = SearchSession::new(client);
            match session.submit(&query) {
                Some(handle) => {
                    let _ = handle.await;
                    print!("{}", view::render(&session.snapshot()));
                }
                None => println!("Query must not be empty."),
            }
        }
        Commands::Add {
            title,
            text,
            source,
            url,
        } => {
            let ingestor = Ingestor::new(client);
            ingestor.set_form(|form| {
                form.title = title;
                form.text = text;
                form.source = source;
                form.url = url;
            });
            match ingestor.submit() {
                Some(handle) => {
                    let _ = handle.await;
                    println!("{}", view::upload_status_line(ingestor.snapshot().status));
                }
                None => println!("Both --title and --text are required."),
            }
        }
        Commands::Shell => {
            shell::run_shell(client).await?;
        }
        Commands::Examples => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

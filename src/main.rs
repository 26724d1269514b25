use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ge_detective::{
    analysis::GeminiAnalyzer,
    config::{Config, LogFormat},
    history::HistoryStore,
    shell::Shell,
    storage::SqliteStorage,
    views, App, Sample, Status,
};

/// Gender-bias detective for narrative text.
#[derive(Debug, Parser)]
#[command(name = "ge-detective", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive shell (default)
    Shell,
    /// Analyze one text and print the report
    Analyze {
        /// Text to analyze
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Use a built-in example (1 or 2)
        #[arg(long, conflicts_with_all = ["text", "file"])]
        example: Option<Sample>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit the stored history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Show the report of one entry
    Show {
        id: String,
        /// Show suggestions instead of the report
        #[arg(long)]
        suggestions: bool,
    },
    /// Delete one entry
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "GE Detective starting..."
    );

    // Initialize storage
    let storage = match SqliteStorage::new(&config.database).await {
        Ok(s) => {
            info!(path = %config.database.path.display(), "Database initialized");
            s
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    let history = HistoryStore::load(Arc::new(storage.clone()))
        .await
        .with_max_entries(config.history.max_entries);

    let analyzer = GeminiAnalyzer::from_config(&config).context("Failed to build Gemini client")?;
    if !analyzer.client().has_api_key() {
        info!("No Gemini API key configured; analysis will fail until one is set");
    }

    let mut app = App::new(Arc::new(analyzer), history);

    let outcome = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            Shell::new(&mut app)
                .run(stdin, &mut stdout)
                .await
                .map_err(anyhow::Error::from)
        }
        Command::Analyze {
            text,
            file,
            example,
            json,
        } => run_analyze(&mut app, text, file, example, json).await,
        Command::History { action } => run_history(&mut app, action).await,
    };

    storage.close().await;
    info!("Shutdown complete");
    outcome
}

async fn run_analyze(
    app: &mut App,
    text: Option<String>,
    file: Option<PathBuf>,
    example: Option<Sample>,
    json: bool,
) -> anyhow::Result<()> {
    match (text, file, example) {
        (Some(text), _, _) => app.set_input(text),
        (_, Some(path), _) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            app.set_input(text);
        }
        (_, _, Some(sample)) => app.load_example(sample),
        (None, None, None) => bail!("Nothing to analyze: pass TEXT, --file or --example"),
    }

    eprintln!("正在分析...");
    if app.submit().await? == Status::Error {
        bail!(app.error_message().unwrap_or_default().to_string());
    }

    let result = app
        .result()
        .context("Analysis completed without a result")?;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", views::render_report(result));
        println!("{}", views::render_suggestions(result));
    }
    Ok(())
}

async fn run_history(app: &mut App, action: HistoryAction) -> anyhow::Result<()> {
    match action {
        HistoryAction::List => print!("{}", views::render_history(app.history())),
        HistoryAction::Show { id, suggestions } => {
            app.load_history_entry(&id)?;
            let result = app
                .result()
                .context("History entry has no result")?;
            println!("“{}”\n", app.input());
            if suggestions {
                print!("{}", views::render_suggestions(result));
            } else {
                print!("{}", views::render_report(result));
            }
        }
        HistoryAction::Delete { id } => {
            if app.delete_history_entry(&id).await? {
                println!("Deleted {}", id);
            } else {
                bail!("History entry not found: {}", id);
            }
        }
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

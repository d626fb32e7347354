//! relaychat - chat transcripts in the terminal.
//!
//! This is the main entry point for the relaychat CLI.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use relaychat_core::{Config, InputHistory};
use relaychat_storage::{JsonFileStore, KeyValueStore};
use relaychat_tui::{render_plain, App, Transcript};
use relaychat_tui_core::Labels;
use relaychat_util::log::{LogConfig, LogLevel};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "relaychat")]
#[command(author, version, about = "Chat transcripts in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for input history (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a session in the interactive TUI
    Chat {
        /// Session ID
        #[arg(short, long)]
        session: String,
        /// Transcript file to show; sent messages are saved back to it
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },
    /// Print a transcript as plain text, oldest message at the top
    Render {
        /// Session ID
        #[arg(short, long)]
        session: String,
        /// Transcript file
        #[arg(short, long)]
        transcript: PathBuf,
        /// Line width
        #[arg(short, long, default_value_t = 80)]
        width: usize,
    },
    /// Show or clear the input history of a session
    History {
        /// Session ID
        #[arg(short, long)]
        session: String,
        /// Delete the stored history
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let (mut config, sources) = Config::load(Some(&cwd))?;
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }

    // The TUI owns the terminal, so interactive runs log to a file only.
    let interactive = matches!(cli.command, Commands::Chat { .. });
    init_logging(&config, cli.verbose, interactive);
    for source in &sources {
        tracing::debug!(path = %source.display(), "Config source");
    }

    match cli.command {
        Commands::Chat {
            session,
            transcript,
        } => run_chat(&config, &session, transcript).await,
        Commands::Render {
            session,
            transcript,
            width,
        } => run_render(&config, &session, &transcript, width),
        Commands::History { session, clear } => run_history(&config, &session, clear),
    }
}

fn init_logging(config: &Config, verbose: bool, interactive: bool) {
    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::parse(config.log_level()).unwrap_or_default()
    };
    let log_config = LogConfig {
        print: !interactive && verbose,
        level,
        include_location: verbose,
        file: relaychat_util::log::default_log_path(),
    };
    if let Err(e) = relaychat_util::log::init(log_config) {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}

fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let dir = config
        .data_dir()
        .context("no data directory available; pass --data-dir")?;
    let store = JsonFileStore::new(dir);
    tracing::debug!(path = %store.base_path().display(), "Using history store");
    Ok(Arc::new(store))
}

fn load_transcript(path: &Path, session_id: &str) -> anyhow::Result<Transcript> {
    let transcript = Transcript::load(path)?;
    if transcript.session.id != session_id {
        bail!(
            "transcript {} belongs to session {}, not {}",
            path.display(),
            transcript.session.id,
            session_id
        );
    }
    Ok(transcript)
}

async fn run_chat(
    config: &Config,
    session_id: &str,
    transcript_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let transcript = match &transcript_path {
        Some(path) if path.exists() => load_transcript(path, session_id)?,
        _ => Transcript::empty(session_id),
    };
    let history = InputHistory::from_config(open_store(config)?, session_id, config);
    info!(session_id, entries = history.len(), "Opening chat");

    let mut app = App::new(transcript, config, Labels::default(), history)?;
    if let Some(path) = transcript_path {
        app = app.with_transcript_path(path);
    }
    app.run().await?;
    Ok(())
}

fn run_render(
    config: &Config,
    session_id: &str,
    transcript_path: &Path,
    width: usize,
) -> anyhow::Result<()> {
    let transcript = load_transcript(transcript_path, session_id)?;
    let out = render_plain(&transcript, config, Labels::default(), width.max(1))?;
    print!("{}", out);
    Ok(())
}

fn run_history(config: &Config, session_id: &str, clear: bool) -> anyhow::Result<()> {
    let mut history = InputHistory::from_config(open_store(config)?, session_id, config);

    if clear {
        history.clear()?;
        println!("Cleared input history for {}", session_id);
        return Ok(());
    }

    if history.is_empty() {
        println!("No input history for {}", session_id);
        return Ok(());
    }
    for (i, entry) in history.entries().iter().enumerate() {
        println!("{:>3}  {}", i + 1, entry.replace('\n', "\n     "));
    }
    Ok(())
}

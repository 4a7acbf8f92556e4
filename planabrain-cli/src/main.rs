//! `planabrain`: ingest a directory, then ask questions about it or the web.
//!
//! ```bash
//! planabrain ingest ./docs
//! planabrain ask --rag where is the retry policy configured?
//! planabrain ask what is the weather in Seoul today?
//! planabrain reset-memory --user alice
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use planabrain_rag::{answer_question, answer_with_web_search, ingest_directory, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "planabrain")]
#[command(about = "Retrieval-augmented assistant backed by Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Embed every supported file under a directory into a fresh index
    Ingest {
        /// Directory to index
        source_dir: PathBuf,
    },

    /// Ask a question; answered with web search unless --rag is given
    Ask {
        /// Answer from the local index instead of web search
        #[arg(long)]
        rag: bool,

        /// Conversation memory key
        #[arg(long, env = "PLANABRAIN_USER_ID", default_value = "cli")]
        user: String,

        /// The question; words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Forget the stored conversation of a user
    ResetMemory {
        /// Conversation memory key
        #[arg(long, env = "PLANABRAIN_USER_ID", default_value = "cli")]
        user: String,
    },
}

/// Loads `DOTENV_CONFIG_PATH` if set, else the first of `./.env` and
/// `../.env` that exists. Returns the file that was loaded.
fn load_env() -> Result<Option<PathBuf>, dotenvy::Error> {
    if let Some(explicit) = std::env::var_os("DOTENV_CONFIG_PATH") {
        let path = PathBuf::from(explicit);
        dotenvy::from_path(&path)?;
        return Ok(Some(path));
    }

    for candidate in [PathBuf::from(".env"), PathBuf::from("..").join(".env")] {
        if candidate.is_file() {
            dotenvy::from_path(&candidate)?;
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn question_text(words: &[String]) -> Result<String> {
    let question = words.join(" ").trim().to_string();
    if question.is_empty() {
        bail!("Usage: planabrain ask <question>");
    }
    Ok(question)
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Command::Ingest { source_dir } => {
            let count = ingest_directory(&source_dir, &settings).await?;
            println!("{count}");
        }

        Command::Ask {
            rag,
            user,
            question,
        } => {
            let question = question_text(&question)?;
            let answer = if rag {
                answer_question(&question, &settings).await?
            } else {
                answer_with_web_search(&question, &settings, Some(&user)).await?
            };
            println!("{answer}");
        }

        Command::ResetMemory { user } => {
            if settings.memory_store().reset(&user).await? {
                println!("Memory cleared for {user}.");
            } else {
                println!("No memory stored for {user}.");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = load_env();

    // stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match env_file {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "failed to load environment file"),
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Tally CLI - token-based formula editor
//!
//! Commands:
//! - `eval`    - evaluate a token list given on the command line
//! - `repl`    - edit a formula interactively
//! - `suggest` - list suggestions matching a partial name

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tally::prelude::*;

mod config;
mod repl;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Build and evaluate formulas from tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit each argument as a token and print the value
    Eval {
        /// Token texts, in order (numbers, operators or names)
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,

        /// Also print the built expression
        #[arg(short = 'e', long)]
        show_expression: bool,
    },

    /// Edit a formula interactively
    Repl,

    /// List suggestions matching a partial name
    Suggest {
        /// Text to match (case-insensitive)
        partial: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Eval {
            tokens,
            show_expression,
        } => eval(&config, &tokens, show_expression),
        Commands::Repl => {
            let cache = Arc::new(SuggestionCache::default());
            let source = suggestion_source(&config);
            repl::run(new_session(&config), cache, source).await
        }
        Commands::Suggest { partial } => suggest(&config, &partial).await,
    }
}

fn new_session(config: &CliConfig) -> EditingSession<StaticRegistry, UuidIds> {
    EditingSession::with_options(
        config.registry.clone(),
        UuidIds,
        config.session_options(),
    )
}

/// Suggestion file from the config, or the registry names
fn suggestion_source(config: &CliConfig) -> Arc<dyn SuggestionSource> {
    match &config.suggestions {
        Some(path) => Arc::new(JsonFileSource::new(path.clone())),
        None => {
            let mut names: Vec<&str> = config.registry.iter().map(|(name, _)| name).collect();
            names.sort_unstable();
            Arc::new(StaticSource::new(
                names
                    .into_iter()
                    .map(|name| Suggestion::new(name, name))
                    .collect(),
            ))
        }
    }
}

fn eval(config: &CliConfig, tokens: &[String], show_expression: bool) -> Result<()> {
    let mut session = new_session(config);

    for text in tokens {
        session.set_input(text.as_str());
        if session.commit_input().is_none() {
            tracing::warn!("skipping blank token");
        }
    }

    if show_expression {
        println!("{}", session.expression());
    }
    println!("{}", session.value());

    Ok(())
}

async fn suggest(config: &CliConfig, partial: &str) -> Result<()> {
    let cache = SuggestionCache::default();
    let source = suggestion_source(config);
    cache
        .refresh(source.as_ref())
        .await
        .context("Failed to fetch suggestions")?;

    let mut matches = cache.suggest(partial);
    if let Some(max) = config.max_suggestions {
        matches.truncate(max);
    }

    for suggestion in matches {
        println!("{}\t{}", suggestion.value, suggestion.name);
    }

    Ok(())
}

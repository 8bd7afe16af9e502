//! Line-based formula editor
//!
//! Plain text commits a token. Lines starting with `:` are commands:
//!
//! | Command        | Effect                                   |
//! |----------------|------------------------------------------|
//! | `:suggest TEXT`| type TEXT and list matching suggestions  |
//! | `:pick N`      | add suggestion N from the last list      |
//! | `:bs`          | backspace                                |
//! | `:rm N`        | remove token N                           |
//! | `:set N TEXT`  | replace the value of token N             |
//! | `:refresh`     | refetch suggestions in the background    |
//! | `:clear`       | remove every token                       |
//! | `:help`        | list commands                            |
//! | `:quit`        | leave                                    |
//!
//! Token and suggestion numbers start at 1.

use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;
use tally::prelude::*;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
  TEXT           commit TEXT as a token
  :suggest TEXT  list suggestions matching TEXT
  :pick N        add suggestion N
  :bs            backspace
  :rm N          remove token N
  :set N TEXT    replace the value of token N
  :refresh       refetch suggestions
  :clear         remove every token
  :quit          leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Commit(String),
    Suggest(String),
    Pick(usize),
    Backspace,
    Remove(usize),
    Set(usize, String),
    Refresh,
    Clear,
    Help,
    Quit,
}

/// Whether the loop goes on after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Commit(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "suggest" | "s" => ReplCommand::Suggest(arg.to_string()),
        "pick" | "p" => ReplCommand::Pick(parse_index(arg)?),
        "bs" => ReplCommand::Backspace,
        "rm" => ReplCommand::Remove(parse_index(arg)?),
        "set" => {
            let (index, text) = arg
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: :set N TEXT"))?;
            ReplCommand::Set(parse_index(index)?, text.trim().to_string())
        }
        "refresh" => ReplCommand::Refresh,
        "clear" => ReplCommand::Clear,
        "help" | "h" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => bail!("unknown command ':{}'", other),
    };
    Ok(command)
}

fn parse_index(text: &str) -> Result<usize> {
    let n: usize = text
        .parse()
        .with_context(|| format!("expected a number, got '{}'", text))?;
    if n == 0 {
        bail!("numbering starts at 1");
    }
    Ok(n)
}

/// Editor state carried between lines
pub struct Repl<R, G> {
    session: EditingSession<R, G>,
    matches: Vec<Suggestion>,
}

impl<R: Registry, G: IdGenerator> Repl<R, G> {
    pub fn new(session: EditingSession<R, G>) -> Self {
        Self {
            session,
            matches: Vec::new(),
        }
    }

    pub fn session(&self) -> &EditingSession<R, G> {
        &self.session
    }

    /// Suggestions from the last `:suggest`
    pub fn matches(&self) -> &[Suggestion] {
        &self.matches
    }

    /// Apply a command against the given suggestion list
    ///
    /// `:refresh` and `:help` need the outer loop and are no-ops here.
    pub fn apply(&mut self, command: ReplCommand, candidates: &[Suggestion]) -> Result<Step> {
        match command {
            ReplCommand::Commit(text) => {
                self.session.set_input(text);
                if self.session.commit_input().is_none() {
                    self.session.set_input("");
                }
                self.matches.clear();
            }
            ReplCommand::Suggest(text) => {
                self.session.set_input(text);
                self.matches = self.session.suggestions(candidates);
            }
            ReplCommand::Pick(n) => {
                let suggestion = self
                    .matches
                    .get(n - 1)
                    .cloned()
                    .ok_or_else(|| anyhow!("no suggestion {}", n))?;
                self.session.pick_suggestion(&suggestion);
                self.matches.clear();
            }
            ReplCommand::Backspace => {
                self.session.backspace();
            }
            ReplCommand::Remove(n) => {
                let id = self.token_id(n)?;
                self.session.remove_token(&id);
            }
            ReplCommand::Set(n, text) => {
                let id = self.token_id(n)?;
                self.session.update_token(&id, &text)?;
            }
            ReplCommand::Clear => {
                self.session.clear();
                self.matches.clear();
            }
            ReplCommand::Refresh | ReplCommand::Help => {}
            ReplCommand::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    fn token_id(&self, n: usize) -> Result<TokenId> {
        self.session
            .tokens()
            .get(n - 1)
            .map(|t| t.id.clone())
            .ok_or_else(|| anyhow!("no token {}", n))
    }

    /// Numbered suggestion list
    pub fn render_matches(&self) -> String {
        if self.matches().is_empty() {
            return "  (no suggestions)".to_string();
        }
        self.matches()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  {}. {} ({})", i + 1, s.name, s.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Token chips followed by the current value
pub fn render<R: Registry, G: IdGenerator>(session: &EditingSession<R, G>) -> String {
    let chips = if session.tokens().is_empty() {
        "(empty)".to_string()
    } else {
        session
            .tokens()
            .iter()
            .enumerate()
            .map(|(i, t)| format!("[{}] {}", i + 1, t.value))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = format!("  {}", chips);
    if !session.input().is_empty() {
        out.push_str(&format!("  > {}", session.input()));
    }
    out.push_str(&format!("\n  = {}", session.value()));
    out
}

/// Read commands from stdin until `:quit` or end of input
pub async fn run<R: Registry, G: IdGenerator>(
    session: EditingSession<R, G>,
    cache: Arc<SuggestionCache>,
    source: Arc<dyn SuggestionSource>,
) -> Result<()> {
    if let Err(e) = cache.ensure_fetched(source.as_ref()).await {
        eprintln!("  Warning: suggestions unavailable: {}", e);
    }

    let mut repl = Repl::new(session);
    let mut lines = BufReader::new(io::stdin()).lines();

    println!("  Type a token and press Enter, or :help for commands.");
    println!("{}", render(repl.session()));

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("  [Error] {:#}", e);
                continue;
            }
        };

        match command {
            ReplCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ReplCommand::Refresh => {
                // Completes in the background; readers keep the old list meanwhile
                drop(cache.spawn_refresh(Arc::clone(&source)));
                println!("  Refreshing suggestions...");
                continue;
            }
            _ => {}
        }

        let listing = matches!(command, ReplCommand::Suggest(_));
        match repl.apply(command, &cache.snapshot()) {
            Ok(Step::Quit) => break,
            Ok(Step::Continue) => {}
            Err(e) => eprintln!("  [Error] {:#}", e),
        }

        if listing {
            println!("{}", repl.render_matches());
        }
        println!("{}", render(repl.session()));
    }

    Ok(())
}

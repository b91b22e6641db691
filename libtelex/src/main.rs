use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use libtelex::{
    create_ime_engine, Composition, ImeContext, KeyEvent, KeyResult, TelexConfig, TelexEngine,
};
use libviet_core::Config;

/// Type Vietnamese with Telex from the command line.
///
/// Keys are given as text; `<Name>` sends a named key such as `<BackSpace>`
/// or `<Left>`.
#[derive(Parser)]
#[command(name = "libtelex", version)]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/libtelex/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the text an application would receive for a key sequence
    Compose { keys: String },
    /// Compose each line read from stdin
    Repl,
    /// Show the preview after every keystroke
    Trace {
        keys: String,
        /// One JSON object per keystroke
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct TraceRow<'a> {
    key: String,
    handled: bool,
    outcome: Option<Composition>,
    context: &'a ImeContext,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config.or_else(Config::default_path) {
        Some(path) => TelexConfig::load_or_default(&path)?,
        None => TelexConfig::default(),
    };

    match cli.command {
        Command::Compose { keys } => {
            println!("{}", compose(&config, &keys)?);
        }
        Command::Repl => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("reading stdin")?;
                println!("{}", compose(&config, &line)?);
            }
        }
        Command::Trace { keys, json } => trace(&config, &keys, json)?,
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}

fn composing_engine(config: &TelexConfig) -> TelexEngine {
    let mut engine = create_ime_engine(config);
    engine.set_composing(true);
    engine
}

/// Feed one key and append what the application would see to `out`:
/// committed text first, then the key itself if the IME let it through.
fn send(engine: &mut TelexEngine, key: KeyEvent, out: &mut String) -> KeyResult {
    let passthrough = key.utf8().into_owned();
    let result = engine.process_key(key);
    out.push_str(&engine.context_mut().take_commit());
    if result == KeyResult::NotHandled {
        out.push_str(&passthrough);
    }
    result
}

fn compose(config: &TelexConfig, keys: &str) -> Result<String> {
    let mut engine = composing_engine(config);
    let mut out = String::new();
    for key in parse_keys(keys) {
        send(&mut engine, key, &mut out);
    }
    engine.process_action("accept")?;
    out.push_str(&engine.context_mut().take_commit());
    Ok(out)
}

fn trace(config: &TelexConfig, keys: &str, json: bool) -> Result<()> {
    let mut engine = composing_engine(config);
    let mut stdout = io::stdout().lock();

    if !json {
        writeln!(
            stdout,
            "{:<12} {:<8} {:<12} {:<12} {:>6}  output",
            "key", "result", "outcome", "preedit", "cursor"
        )?;
    }
    for key in parse_keys(keys) {
        let label = key.name().into_owned();
        let passthrough = key.utf8().into_owned();
        let result = engine.process_key(key);
        let outcome = engine.last_composition();
        let context = engine.context().clone();
        engine.context_mut().take_commit();

        if json {
            let row = TraceRow {
                key: label,
                handled: result == KeyResult::Handled,
                outcome,
                context: &context,
            };
            writeln!(stdout, "{}", serde_json::to_string(&row)?)?;
        } else {
            let mut output = context.commit_text.clone();
            if result == KeyResult::NotHandled {
                output.push_str(&passthrough);
            }
            writeln!(
                stdout,
                "{:<12} {:<8} {:<12} {:<12} {:>6}  {}",
                label,
                if result == KeyResult::Handled { "handled" } else { "passed" },
                outcome.map_or_else(|| "-".to_string(), |o| format!("{o:?}")),
                context.preedit_text,
                context.preedit_cursor,
                output,
            )?;
        }
    }
    Ok(())
}

/// Split a key string into events; `<Name>` becomes a named key.
fn parse_keys(keys: &str) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    let mut rest = keys;
    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = rest.find('>') {
                let name = &rest[1..end];
                if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    events.push(KeyEvent::named(name));
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        events.push(KeyEvent::char(ch));
        rest = &rest[ch.len_utf8()..];
    }
    events
}

//! # Scriptforge - Revit scripting assistant
//!
//! Turns a natural-language request into a ready-to-run Revit Python
//! script and prints it with syntax coloring.
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate a script (requires GEMINI_API_KEY)
//! cargo run -- generate -y "create three levels every 3 meters"
//!
//! # Repair the last script with the error Revit reported
//! cargo run -- fix --error "InvalidOperationException ..."
//!
//! # Ask a free-form question
//! cargo run -- advise "when do I need a SubTransaction?"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scriptforge_core::{Config, History, Session};
use scriptforge_provider::{GeminiClient, ModelTier};

/// Scriptforge - turn plain language into Revit Python scripts
#[derive(Parser, Debug)]
#[command(name = "scriptforge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a script from a description
    Generate {
        /// What the script should do
        #[arg(value_name = "DESCRIPTION", required = true)]
        description: Vec<String>,

        /// Model tier to use (flash or pro)
        #[arg(short, long)]
        model: Option<ModelTier>,

        /// Copy the plain script to the clipboard
        #[arg(long)]
        copy: bool,

        /// Save the plain script into this directory
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,

        /// Print the plain script instead of markup
        #[arg(long)]
        plain: bool,

        /// Confirm the readiness checklist without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Repair the last script with the error Revit reported
    Fix {
        /// The error message as reported by Revit/pyRevit
        #[arg(short, long, value_name = "TEXT")]
        error: String,

        /// Repair this file instead of the last generated script
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Model tier to use (flash or pro)
        #[arg(short, long)]
        model: Option<ModelTier>,

        /// Print the plain script instead of markup
        #[arg(long)]
        plain: bool,
    },

    /// Ask a free-form Revit API question
    Advise {
        /// The question
        #[arg(value_name = "QUESTION", required = true)]
        question: Vec<String>,
    },

    /// Show recorded generations
    History {
        /// Print the script of entry N (0 = newest)
        #[arg(long, value_name = "N")]
        restore: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Scriptforge v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    // Listing history needs no provider, so it skips session setup
    // (and therefore works without an API key).
    if let Command::History { restore } = &args.command {
        return run_history(&config, *restore);
    }

    let mut session = build_session(config)?;

    match args.command {
        Command::Generate {
            description,
            model,
            copy,
            save,
            plain,
            yes,
        } => {
            if yes {
                session.checklist_mut().check_all();
            }
            if !session.ready() {
                print_checklist(&session);
                anyhow::bail!("confirm the checklist with --yes to generate");
            }

            session.set_description(description.join(" "));
            if let Some(tier) = model {
                session.set_tier(tier);
            }

            // Show the result even when generation failed: the session
            // stores a comment-style error script in that case.
            let outcome = session.generate().await;
            print_script(&session, plain)?;
            outcome?;

            if copy {
                scriptforge_export::copy_to_clipboard(require_plain(&session)?)?;
                eprintln!("Copied to clipboard.");
            }
            if let Some(dir) = save {
                let path = scriptforge_export::save_script(&dir, require_plain(&session)?)?;
                eprintln!("Saved to {}.", path.display());
            }
        }

        Command::Fix {
            error,
            file,
            model,
            plain,
        } => {
            match file {
                Some(path) => session.set_script(std::fs::read_to_string(&path)?),
                None => {
                    let latest = session
                        .history()
                        .latest()
                        .map(|entry| entry.code.clone())
                        .ok_or_else(|| anyhow::anyhow!("no script in history to fix"))?;
                    session.set_script(latest);
                }
            }
            session.set_error_report(error);
            if let Some(tier) = model {
                session.set_tier(tier);
            }

            session.fix().await?;
            print_script(&session, plain)?;
        }

        Command::Advise { question } => {
            let answer = session.advise(&question.join(" ")).await?;
            println!("{answer}");
        }

        // Handled before session setup.
        Command::History { .. } => unreachable!(),
    }

    Ok(())
}

/// Lists recorded generations or prints one entry's plain script.
fn run_history(config: &Config, restore: Option<usize>) -> anyhow::Result<()> {
    let history = load_history(config);

    match restore {
        Some(index) => {
            let entry = history
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("no history entry at index {index}"))?;
            println!("{}", scriptforge_highlight::strip_fence(&entry.code));
        }
        None => {
            if history.is_empty() {
                eprintln!("No generations recorded yet.");
            }
            for (index, entry) in history.iter().enumerate() {
                println!(
                    "{index}: [{}] {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.prompt
                );
            }
        }
    }
    Ok(())
}

/// Wires config, persisted history and the Gemini client into a session.
fn build_session(config: Config) -> anyhow::Result<Session<GeminiClient>> {
    let key_env = &config.provider.api_key_env;
    let api_key = std::env::var(key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("${key_env} is not set, put your Gemini API key in it"))?;

    let provider = GeminiClient::new(api_key);
    let history = load_history(&config);
    Ok(Session::with_history(provider, config, history))
}

/// Loads persisted history, or an empty one when persistence is off or
/// the file is unreadable.
fn load_history(config: &Config) -> History {
    if !config.history.persist {
        return History::new(config.history.capacity);
    }
    History::default_path()
        .and_then(|path| History::load_from(path, config.history.capacity))
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not load history");
            History::new(config.history.capacity)
        })
}

/// Prints the session's script: markup by default, plain on request.
fn print_script(session: &Session<GeminiClient>, plain: bool) -> anyhow::Result<()> {
    let output = if plain {
        require_plain(session)?.to_string()
    } else {
        session
            .highlighted_script()
            .ok_or_else(|| anyhow::anyhow!("no script to display"))?
    };
    println!("{output}");
    Ok(())
}

/// The fence-stripped script text, required to exist.
fn require_plain<'a>(session: &'a Session<GeminiClient>) -> anyhow::Result<&'a str> {
    session
        .plain_script()
        .ok_or_else(|| anyhow::anyhow!("no script to export"))
}

/// Lists the readiness checklist on stderr.
fn print_checklist(session: &Session<GeminiClient>) {
    eprintln!("Before running generated scripts, confirm:");
    for item in session.checklist().items() {
        let mark = if item.checked { "x" } else { " " };
        eprintln!("  [{mark}] {}: {}", item.title, item.desc);
    }
}

//! Main CLI application structure

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::document::load_document;
use super::output::{Output, OutputFormat};
use super::session::{print_reply, Reply, Session};
use crate::config::Config;
use crate::domain::ItemList;

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Scriptable in-memory todo lists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run session commands against an in-memory list
    ///
    /// Examples:
    ///   todo run tasks.todo                  # Commands from a file
    ///   echo "add Buy milk" | todo run       # Commands from stdin
    ///   todo run tasks.todo --load list.json # Start from a list document
    Run {
        /// Script file ("-" or omitted for stdin)
        script: Option<PathBuf>,

        /// Title for the session list
        #[arg(long, conflicts_with = "load")]
        title: Option<String>,

        /// Seed the session from a list document
        #[arg(long)]
        load: Option<PathBuf>,
    },

    /// Print a list document
    Show {
        /// List document (JSON)
        file: PathBuf,

        /// Show only completed items
        #[arg(long, conflicts_with = "pending")]
        done: bool,

        /// Show only open items
        #[arg(long)]
        pending: bool,

        /// Show the first item with this exact title
        #[arg(long, conflicts_with_all = ["done", "pending"])]
        find: Option<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("todo starting");
    output.verbose_ctx("config", &format!("{:?}", config));

    match cli.command {
        Commands::Run { script, title, load } => {
            let list = match load {
                Some(path) => {
                    output.verbose_ctx(
                        "run",
                        &format!("Loading list document: {}", path.display()),
                    );
                    load_document(&path)?
                }
                None => ItemList::new(title.unwrap_or(config.default_title)),
            };
            run_session(&output, list, script.as_deref())?
        }

        Commands::Show { file, done, pending, find } => {
            output.verbose_ctx("show", &format!("Loading list document: {}", file.display()));
            let list = load_document(&file)?;

            let reply = if let Some(title) = find {
                Reply::Found(list.find_by_title(&title))
            } else if done {
                Reply::List(list.all_done())
            } else if pending {
                Reply::List(list.all_not_done())
            } else {
                Reply::List(list)
            };
            print_reply(&output, &reply);
        }
    }

    Ok(())
}

fn run_session(output: &Output, list: ItemList, script: Option<&Path>) -> Result<()> {
    output.verbose_ctx(
        "run",
        &format!("Session list '{}' with {} items", list.title(), list.size()),
    );
    let mut session = Session::new(list);

    match script {
        Some(path) if path != Path::new("-") => {
            output.verbose_ctx("run", &format!("Reading script: {}", path.display()));
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            session.run_script(BufReader::new(file), output)
        }
        _ => {
            output.verbose_ctx("run", "Reading script from stdin");
            session.run_script(io::stdin().lock(), output)
        }
    }
}

//! # Command-Line Interface
//!
//! The `todo` binary runs a single in-memory list through a session.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `run [SCRIPT]` | Apply session commands read from SCRIPT or stdin |
//! | `show FILE` | Print a list document, optionally filtered |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - The list rendering contract (`----Title----`, `[X] item`)
//! - `json` - One JSON value per line
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todo --verbose run tasks.todo
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod document;
mod output;
mod session;

pub use app::{run, Cli, Commands};
pub use document::{load_document, parse_document};
pub use output::{Output, OutputFormat};
pub use session::{Command, Reply, ScriptError, Session};

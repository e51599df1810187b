//! todo - Scriptable in-memory todo lists

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todolist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

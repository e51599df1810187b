//! Session scripts
//!
//! A session applies line-oriented commands to one in-memory list:
//!
//! ```text
//! # comments and blank lines are skipped
//! add Buy milk
//! add Walk dog
//! done 0
//! show
//! ```
//!
//! The argument of a command is everything after the first whitespace
//! character, so titles may contain spaces. A whitespace-only remainder counts
//! as no argument. Index arguments are kept as text and checked against
//! the list when the command runs. The first failing line stops the session.

use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

use super::output::Output;
use crate::domain::{Item, ItemList, ItemRef, ListError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),

    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),
}

/// A single session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Done(String),
    Undone(String),
    DoneTitle(String),
    AllDone,
    AllUndone,
    Remove(String),
    Shift,
    Pop,
    Get(String),
    First,
    Last,
    Find(String),
    Size,
    Status,
    Show,
    ShowDone,
    ShowPending,
    Export,
}

impl FromStr for Command {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) if !arg.trim().is_empty() => (name, Some(arg)),
            Some((name, _)) => (name, None),
            None => (line, None),
        };

        let command = match name {
            "add" => Command::Add(required("add", arg)?),
            "done" => Command::Done(required("done", arg)?),
            "undone" => Command::Undone(required("undone", arg)?),
            "done-title" => Command::DoneTitle(required("done-title", arg)?),
            "remove" => Command::Remove(required("remove", arg)?),
            "get" => Command::Get(required("get", arg)?),
            "find" => Command::Find(required("find", arg)?),
            "all-done" => bare("all-done", arg, Command::AllDone)?,
            "all-undone" => bare("all-undone", arg, Command::AllUndone)?,
            "shift" => bare("shift", arg, Command::Shift)?,
            "pop" => bare("pop", arg, Command::Pop)?,
            "first" => bare("first", arg, Command::First)?,
            "last" => bare("last", arg, Command::Last)?,
            "size" => bare("size", arg, Command::Size)?,
            "status" => bare("status", arg, Command::Status)?,
            "show" => bare("show", arg, Command::Show)?,
            "show-done" => bare("show-done", arg, Command::ShowDone)?,
            "show-pending" => bare("show-pending", arg, Command::ShowPending)?,
            "export" => bare("export", arg, Command::Export)?,
            other => return Err(ScriptError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn required(name: &'static str, arg: Option<&str>) -> Result<String, ScriptError> {
    arg.map(str::to_string)
        .ok_or(ScriptError::MissingArgument(name))
}

fn bare(name: &'static str, arg: Option<&str>, command: Command) -> Result<Command, ScriptError> {
    match arg {
        Some(_) => Err(ScriptError::UnexpectedArgument(name)),
        None => Ok(command),
    }
}

/// Result of executing one command
#[derive(Debug)]
pub enum Reply {
    Nothing,
    Added(ItemRef),
    Item(ItemRef),
    /// `first` / `last` lookups
    Lookup(Option<ItemRef>),
    /// `find` lookups
    Found(Option<ItemRef>),
    Removed(Option<ItemRef>),
    Size(usize),
    Status(bool),
    List(ItemList),
    Export(ItemList),
}

/// An in-memory session over a single list
pub struct Session {
    list: ItemList,
}

impl Session {
    pub fn new(list: ItemList) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &ItemList {
        &self.list
    }

    pub fn into_list(self) -> ItemList {
        self.list
    }

    /// Applies one command to the list
    pub fn execute(&mut self, command: &Command) -> Result<Reply, ListError> {
        let reply = match command {
            Command::Add(title) => Reply::Added(self.list.add(Item::new(title.as_str()))),
            Command::Done(raw) => {
                let index = self.list.parse_index(raw)?;
                self.list.mark_done_at(index)?;
                Reply::Item(self.list.item_at(index)?)
            }
            Command::Undone(raw) => {
                let index = self.list.parse_index(raw)?;
                self.list.mark_undone_at(index)?;
                Reply::Item(self.list.item_at(index)?)
            }
            Command::DoneTitle(title) => {
                self.list.mark_done_by_title(title);
                Reply::Nothing
            }
            Command::AllDone => {
                self.list.mark_all_done();
                Reply::Nothing
            }
            Command::AllUndone => {
                self.list.mark_all_undone();
                Reply::Nothing
            }
            Command::Remove(raw) => {
                let index = self.list.parse_index(raw)?;
                Reply::Removed(Some(self.list.remove_at(index)?))
            }
            Command::Shift => Reply::Removed(self.list.remove_first()),
            Command::Pop => Reply::Removed(self.list.remove_last()),
            Command::Get(raw) => {
                let index = self.list.parse_index(raw)?;
                Reply::Item(self.list.item_at(index)?)
            }
            Command::First => Reply::Lookup(self.list.first()),
            Command::Last => Reply::Lookup(self.list.last()),
            Command::Find(title) => Reply::Found(self.list.find_by_title(title)),
            Command::Size => Reply::Size(self.list.size()),
            Command::Status => Reply::Status(self.list.is_done()),
            Command::Show => Reply::List(self.shared_view()),
            Command::ShowDone => Reply::List(self.list.all_done()),
            Command::ShowPending => Reply::List(self.list.all_not_done()),
            Command::Export => Reply::Export(self.shared_view()),
        };

        Ok(reply)
    }

    /// Runs every command in `reader`, printing replies as they are produced
    pub fn run_script(&mut self, reader: impl BufRead, output: &Output) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.with_context(|| format!("Failed to read line {}", line_no))?;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let command = line
                .trim_start()
                .parse::<Command>()
                .with_context(|| format!("line {}", line_no))?;
            output.verbose_ctx("session", &format!("line {}: {:?}", line_no, command));

            let reply = self
                .execute(&command)
                .with_context(|| format!("line {}", line_no))?;
            print_reply(output, &reply);
        }

        output.verbose_ctx(
            "session",
            &format!("Finished with {} items", self.list.size()),
        );
        Ok(())
    }

    fn shared_view(&self) -> ItemList {
        self.list.filter(|_| true)
    }
}

/// Prints a reply in the selected format
pub fn print_reply(output: &Output, reply: &Reply) {
    if output.is_json() {
        match reply {
            Reply::Nothing => {}
            Reply::Added(item) => output.data(&serde_json::json!({ "added": item })),
            Reply::Item(item) => output.data(item),
            Reply::Lookup(item) | Reply::Found(item) => output.data(item),
            Reply::Removed(item) => output.data(&serde_json::json!({ "removed": item })),
            Reply::Size(size) => output.data(&serde_json::json!({ "size": size })),
            Reply::Status(done) => output.data(&serde_json::json!({ "done": done })),
            Reply::List(list) | Reply::Export(list) => output.data(list),
        }
        return;
    }

    match reply {
        Reply::Nothing => {}
        Reply::Added(item) => output.text(&format!("Added: {}", item.title())),
        Reply::Item(item) => output.text(&item.render()),
        Reply::Lookup(Some(item)) | Reply::Found(Some(item)) => output.text(&item.render()),
        Reply::Lookup(None) => output.text("(empty)"),
        Reply::Found(None) => output.text("(not found)"),
        Reply::Removed(Some(item)) => output.text(&format!("Removed: {}", item.title())),
        Reply::Removed(None) => output.text("(empty)"),
        Reply::Size(size) => output.text(&size.to_string()),
        Reply::Status(true) => output.text("done"),
        Reply::Status(false) => output.text("not done"),
        Reply::List(list) => output.text(&list.render()),
        Reply::Export(list) => output.data(list),
    }
}

//! todolist - An in-memory todo list with a scriptable CLI
//!
//! The library is the [`domain`] module: [`Item`] entries held by an
//! [`ItemList`] through shared [`ItemRef`] handles. The `todo` binary drives
//! a list through a session of line-oriented commands.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{Item, ItemList, ItemRef, ListError};

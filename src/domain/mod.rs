//! Domain models for todolist
//!
//! Contains the item and list types without any I/O concerns.

mod item;
mod list;

pub use item::{Item, ItemRef};
pub use list::{ItemList, ListError};

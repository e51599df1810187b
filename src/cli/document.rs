//! List documents
//!
//! A list document is the JSON form of a list, used to seed a session or
//! to print with `todo show`:
//!
//! ```json
//! {"title": "Today", "items": [{"title": "Buy milk", "done": true}]}
//! ```
//!
//! Documents are read-only input. Items are decoded one at a time through
//! [`ItemList::add_value`] so a malformed entry reports its position.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ItemList;

#[derive(Debug, Deserialize)]
struct ListDocument {
    title: String,
    #[serde(default)]
    items: Vec<Value>,
}

/// Reads and decodes a list document from disk
pub fn load_document(path: &Path) -> Result<ItemList> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read list document: {}", path.display()))?;

    parse_document(&content)
        .with_context(|| format!("Invalid list document: {}", path.display()))
}

/// Decodes a list document from JSON text
pub fn parse_document(content: &str) -> Result<ItemList> {
    let document: ListDocument =
        serde_json::from_str(content).context("Expected an object with `title` and `items`")?;

    let mut list = ItemList::new(document.title);
    for (index, value) in document.items.iter().enumerate() {
        list.add_value(value)
            .with_context(|| format!("item {}", index))?;
    }

    Ok(list)
}

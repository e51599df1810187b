//! Todo item domain model
//!
//! An item is a title plus a completion flag. Lists hold items through
//! [`ItemRef`] handles so that derived lists alias the same entries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Human-readable title
    title: String,

    /// Completion flag
    done: bool,
}

impl Item {
    /// Marker rendered for a completed item
    pub const DONE_MARKER: char = 'X';

    /// Marker rendered for an open item
    pub const UNDONE_MARKER: char = ' ';

    /// Creates a new, not yet done item
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: false,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns `[X] <title>` or `[ ] <title>`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.done {
            Self::DONE_MARKER
        } else {
            Self::UNDONE_MARKER
        };
        write!(f, "[{}] {}", marker, self.title)
    }
}

/// Shared handle to an [`Item`]
///
/// Cloning a handle does not copy the item: every clone observes and
/// mutates the same entry. Equality is identity, not value.
#[derive(Debug, Clone)]
pub struct ItemRef(Rc<RefCell<Item>>);

impl ItemRef {
    pub fn new(item: Item) -> Self {
        Self(Rc::new(RefCell::new(item)))
    }

    pub fn mark_done(&self) {
        self.0.borrow_mut().mark_done();
    }

    pub fn mark_undone(&self) {
        self.0.borrow_mut().mark_undone();
    }

    pub fn is_done(&self) -> bool {
        self.0.borrow().is_done()
    }

    pub fn title(&self) -> String {
        self.0.borrow().title().to_string()
    }

    /// Returns true if the item's title equals `title` exactly
    pub fn has_title(&self, title: &str) -> bool {
        self.0.borrow().title() == title
    }

    pub fn render(&self) -> String {
        self.0.borrow().render()
    }

    /// Returns a detached copy of the item's current state
    pub fn snapshot(&self) -> Item {
        self.0.borrow().clone()
    }

    /// Returns true if both handles refer to the same item
    pub fn ptr_eq(&self, other: &ItemRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Item> for ItemRef {
    fn from(item: Item) -> Self {
        Self::new(item)
    }
}

impl PartialEq for ItemRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ItemRef {}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.borrow(), f)
    }
}

impl Serialize for ItemRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.borrow().serialize(serializer)
    }
}

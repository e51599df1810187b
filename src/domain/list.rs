//! Ordered, titled collection of todo items
//!
//! The list stores [`ItemRef`] handles. Lists derived through [`ItemList::filter`]
//! and its shorthands share those handles with the source list, so marking an
//! item done through a derived list is visible in the original.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::item::{Item, ItemRef};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("can only add todo items: {0}")]
    TypeMismatch(String),

    #[error("invalid index: {0}")]
    OutOfRange(String),
}

/// A titled list of todo items in insertion order
#[derive(Debug, Serialize)]
pub struct ItemList {
    title: String,
    items: Vec<ItemRef>,
}

impl ItemList {
    /// Creates an empty list
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends an item and returns its handle
    pub fn add(&mut self, item: impl Into<ItemRef>) -> ItemRef {
        let handle = item.into();
        self.items.push(handle.clone());
        handle
    }

    /// Appends an item decoded from an untyped JSON value
    ///
    /// Only objects with a string `title` and an optional boolean `done` are
    /// accepted. On failure the list is left unchanged.
    pub fn add_value(&mut self, value: &Value) -> Result<ItemRef, ListError> {
        let item = item_from_value(value)?;
        Ok(self.add(item))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<ItemRef> {
        self.items.first().cloned()
    }

    pub fn last(&self) -> Option<ItemRef> {
        self.items.last().cloned()
    }

    /// Returns the item at `index`, or `OutOfRange` if there is none
    pub fn item_at(&self, index: usize) -> Result<ItemRef, ListError> {
        self.validate_index(index)?;
        Ok(self.items[index].clone())
    }

    /// Parses and bounds-checks an index given as text
    ///
    /// Negative, fractional and non-numeric input is out of range, same as
    /// a position past the end.
    pub fn parse_index(&self, raw: &str) -> Result<usize, ListError> {
        let index: usize = raw
            .trim()
            .parse()
            .map_err(|_| ListError::OutOfRange(raw.to_string()))?;
        self.validate_index(index)?;
        Ok(index)
    }

    pub fn mark_done_at(&self, index: usize) -> Result<(), ListError> {
        self.item_at(index)?.mark_done();
        Ok(())
    }

    pub fn mark_undone_at(&self, index: usize) -> Result<(), ListError> {
        self.item_at(index)?.mark_undone();
        Ok(())
    }

    /// Returns true if every item is done (true for an empty list)
    pub fn is_done(&self) -> bool {
        self.items.iter().all(ItemRef::is_done)
    }

    pub fn remove_first(&mut self) -> Option<ItemRef> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    pub fn remove_last(&mut self) -> Option<ItemRef> {
        self.items.pop()
    }

    /// Removes the item at `index`, keeping the order of the rest
    pub fn remove_at(&mut self, index: usize) -> Result<ItemRef, ListError> {
        self.validate_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Returns the header line followed by one rendered line per item
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn for_each(&self, mut f: impl FnMut(&ItemRef)) {
        for item in &self.items {
            f(item);
        }
    }

    /// Returns a new list with the same title holding the matching items
    pub fn filter(&self, mut predicate: impl FnMut(&ItemRef) -> bool) -> ItemList {
        ItemList {
            title: self.title.clone(),
            items: self
                .items
                .iter()
                .filter(|item| predicate(*item))
                .cloned()
                .collect(),
        }
    }

    /// Returns the first item whose title matches exactly
    pub fn find_by_title(&self, title: &str) -> Option<ItemRef> {
        self.filter(|item| item.has_title(title)).first()
    }

    pub fn all_done(&self) -> ItemList {
        self.filter(|item| item.is_done())
    }

    pub fn all_not_done(&self) -> ItemList {
        self.filter(|item| !item.is_done())
    }

    /// Marks the first item with `title` done; does nothing if absent
    pub fn mark_done_by_title(&self, title: &str) {
        if let Some(item) = self.find_by_title(title) {
            item.mark_done();
        }
    }

    pub fn mark_all_done(&self) {
        self.for_each(ItemRef::mark_done);
    }

    pub fn mark_all_undone(&self) {
        self.for_each(ItemRef::mark_undone);
    }

    /// Returns a shallow copy of the item ordering
    pub fn to_vec(&self) -> Vec<ItemRef> {
        self.items.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }

    fn validate_index(&self, index: usize) -> Result<(), ListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ListError::OutOfRange(index.to_string()))
        }
    }
}

impl fmt::Display for ItemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "----{}----", self.title)?;
        for item in &self.items {
            write!(f, "\n{}", item)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a ItemRef;
    type IntoIter = std::slice::Iter<'a, ItemRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn item_from_value(value: &Value) -> Result<Item, ListError> {
    let object = value.as_object().ok_or_else(|| {
        ListError::TypeMismatch(format!("expected an object, got {}", kind(value)))
    })?;

    let title = match object.get("title") {
        Some(Value::String(title)) => title,
        Some(other) => {
            return Err(ListError::TypeMismatch(format!(
                "`title` must be a string, got {}",
                kind(other)
            )))
        }
        None => return Err(ListError::TypeMismatch("missing `title`".to_string())),
    };

    let mut item = Item::new(title.as_str());
    match object.get("done") {
        None | Some(Value::Bool(false)) => {}
        Some(Value::Bool(true)) => item.mark_done(),
        Some(other) => {
            return Err(ListError::TypeMismatch(format!(
                "`done` must be a boolean, got {}",
                kind(other)
            )))
        }
    }

    Ok(item)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn make_list(titles: &[&str]) -> ItemList {
        let mut list = ItemList::new("Today");
        for title in titles {
            list.add(Item::new(*title));
        }
        list
    }

    #[test]
    fn new_list_is_empty() {
        let list = ItemList::new("Today");
        assert_eq!(list.title(), "Today");
        assert_eq!(list.size(), 0);
        assert!(list.is_empty());
        assert!(list.first().is_none());
        assert!(list.last().is_none());
    }

    #[test]
    fn add_appends_to_end() {
        let mut list = make_list(&["one", "two"]);
        let handle = list.add(Item::new("three"));

        assert_eq!(list.size(), 3);
        assert_eq!(list.last(), Some(handle));
        assert_eq!(list.first().map(|i| i.title()), Some("one".to_string()));
    }

    #[test]
    fn add_value_accepts_item_objects() {
        let mut list = ItemList::new("Imported");

        let open = list.add_value(&json!({"title": "Open"})).unwrap();
        let closed = list.add_value(&json!({"title": "Closed", "done": true})).unwrap();

        assert_eq!(list.size(), 2);
        assert!(!open.is_done());
        assert!(closed.is_done());
    }

    #[test]
    fn add_value_rejects_non_items() {
        let mut list = make_list(&["kept"]);
        let rejected = [
            json!("Buy milk"),
            json!(42),
            json!(null),
            json!(["Buy milk"]),
            json!({}),
            json!({"title": 7}),
            json!({"title": "x", "done": "yes"}),
        ];

        for value in &rejected {
            let err = list.add_value(value).unwrap_err();
            assert!(matches!(err, ListError::TypeMismatch(_)), "{value} => {err:?}");
        }

        assert_eq!(list.size(), 1);
    }

    #[test]
    fn type_mismatch_message() {
        let mut list = ItemList::new("Today");
        let err = list.add_value(&json!("Buy milk")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "can only add todo items: expected an object, got a string"
        );
    }

    #[test]
    fn item_at_checks_bounds() {
        let list = make_list(&["a", "b"]);

        assert_eq!(list.item_at(1).unwrap().title(), "b");
        assert_eq!(list.item_at(2), Err(ListError::OutOfRange("2".to_string())));
        assert_eq!(list.item_at(2).unwrap_err().to_string(), "invalid index: 2");
    }

    #[test]
    fn item_at_on_empty_list_fails() {
        let list = ItemList::new("Empty");
        assert!(list.item_at(0).is_err());
    }

    #[test]
    fn parse_index_rejects_invalid_text() {
        let list = make_list(&["a", "b", "c"]);

        assert_eq!(list.parse_index("0"), Ok(0));
        assert_eq!(list.parse_index(" 2 "), Ok(2));

        for raw in ["-1", "1.5", "3", "two", ""] {
            assert_eq!(
                list.parse_index(raw),
                Err(ListError::OutOfRange(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn mark_at_index() {
        let list = make_list(&["a", "b"]);

        list.mark_done_at(1).unwrap();
        assert!(list.item_at(1).unwrap().is_done());
        assert!(!list.item_at(0).unwrap().is_done());

        list.mark_undone_at(1).unwrap();
        assert!(!list.item_at(1).unwrap().is_done());

        assert!(list.mark_done_at(5).is_err());
        assert!(list.mark_undone_at(5).is_err());
    }

    #[test]
    fn is_done_requires_every_item() {
        let list = ItemList::new("Empty");
        assert!(list.is_done());

        let list = make_list(&["a", "b"]);
        assert!(!list.is_done());

        list.mark_done_at(0).unwrap();
        assert!(!list.is_done());

        list.mark_all_done();
        assert!(list.is_done());
    }

    #[test]
    fn remove_first_and_last() {
        let mut list = make_list(&["a", "b", "c"]);

        assert_eq!(list.remove_first().map(|i| i.title()), Some("a".to_string()));
        assert_eq!(list.remove_last().map(|i| i.title()), Some("c".to_string()));
        assert_eq!(list.size(), 1);
        assert_eq!(list.first().map(|i| i.title()), Some("b".to_string()));

        list.remove_first();
        assert!(list.remove_first().is_none());
        assert!(list.remove_last().is_none());
    }

    #[test]
    fn remove_at_keeps_order() {
        let mut list = make_list(&["a", "b", "c", "d"]);

        let removed = list.remove_at(1).unwrap();
        assert_eq!(removed.title(), "b");

        let titles: Vec<_> = list.iter().map(ItemRef::title).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_at_invalid_index_leaves_list_unchanged() {
        let mut list = make_list(&["a", "b"]);

        assert_eq!(list.remove_at(2), Err(ListError::OutOfRange("2".to_string())));
        assert_eq!(list.size(), 2);
    }

    #[test]
    fn render_matches_format() {
        let list = make_list(&["Buy milk", "Walk dog"]);
        list.mark_done_at(0).unwrap();

        assert_eq!(list.render(), "----Today----\n[X] Buy milk\n[ ] Walk dog");
    }

    #[test]
    fn render_empty_list_is_header_only() {
        let list = ItemList::new("Nothing");
        assert_eq!(list.to_string(), "----Nothing----");
    }

    #[test]
    fn for_each_visits_in_order_and_mutates() {
        let list = make_list(&["a", "b", "c"]);
        let mut seen = Vec::new();

        list.for_each(|item| {
            seen.push(item.title());
            item.mark_done();
        });

        assert_eq!(seen, vec!["a", "b", "c"]);
        assert!(list.is_done());
    }

    #[test]
    fn filter_returns_new_list_sharing_items() {
        let list = make_list(&["keep 1", "drop", "keep 2"]);

        let filtered = list.filter(|item| item.title().starts_with("keep"));
        assert_eq!(filtered.title(), "Today");
        assert_eq!(filtered.size(), 2);
        assert_eq!(list.size(), 3);

        filtered.mark_done_at(1).unwrap();
        assert!(list.item_at(2).unwrap().is_done());
        assert!(filtered.item_at(1).unwrap().ptr_eq(&list.item_at(2).unwrap()));
    }

    #[test]
    fn find_by_title_returns_first_match() {
        let list = make_list(&["dup", "other", "dup"]);

        let found = list.find_by_title("dup").unwrap();
        assert!(found.ptr_eq(&list.item_at(0).unwrap()));

        assert!(list.find_by_title("Dup").is_none());
        assert!(list.find_by_title("missing").is_none());
    }

    #[test]
    fn done_and_not_done_views() {
        let list = make_list(&["a", "b", "c"]);
        list.mark_done_at(1).unwrap();

        let done: Vec<_> = list.all_done().iter().map(ItemRef::title).collect();
        let open: Vec<_> = list.all_not_done().iter().map(ItemRef::title).collect();

        assert_eq!(done, vec!["b"]);
        assert_eq!(open, vec!["a", "c"]);
    }

    #[test]
    fn mark_done_by_title() {
        let list = make_list(&["dup", "dup"]);

        list.mark_done_by_title("dup");
        assert!(list.item_at(0).unwrap().is_done());
        assert!(!list.item_at(1).unwrap().is_done());

        list.mark_done_by_title("missing");
        assert_eq!(list.all_done().size(), 1);
    }

    #[test]
    fn mark_all_undone() {
        let list = make_list(&["a", "b"]);
        list.mark_all_done();
        list.mark_all_undone();

        assert_eq!(list.all_not_done().size(), 2);
    }

    #[test]
    fn to_vec_is_structurally_independent() {
        let list = make_list(&["a", "b"]);

        let mut copy = list.to_vec();
        copy.pop();
        copy.push(ItemRef::new(Item::new("extra")));
        assert_eq!(list.size(), 2);

        copy[0].mark_done();
        assert!(list.item_at(0).unwrap().is_done());
    }

    #[test]
    fn serializes_title_and_items() {
        let list = make_list(&["Buy milk"]);
        list.mark_all_done();

        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({"title": "Today", "items": [{"title": "Buy milk", "done": true}]})
        );
    }

    fn titles_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-c]{0,3}", 0..12)
    }

    fn list_from(titles: &[String]) -> ItemList {
        let mut list = ItemList::new("Props");
        for title in titles {
            list.add(Item::new(title.as_str()));
        }
        list
    }

    proptest! {
        #[test]
        fn add_grows_by_one(titles in titles_strategy(), title in "[a-z]{0,5}") {
            let mut list = list_from(&titles);
            let before = list.size();

            let handle = list.add(Item::new(title));
            prop_assert_eq!(list.size(), before + 1);
            prop_assert_eq!(list.last(), Some(handle));
        }

        #[test]
        fn item_at_valid_iff_in_bounds(titles in titles_strategy(), index in 0usize..16) {
            let list = list_from(&titles);
            match list.item_at(index) {
                Ok(item) => {
                    prop_assert!(index < titles.len());
                    prop_assert_eq!(item.title(), titles[index].clone());
                }
                Err(err) => {
                    prop_assert!(index >= titles.len());
                    prop_assert_eq!(err, ListError::OutOfRange(index.to_string()));
                }
            }
        }

        #[test]
        fn negative_indices_are_out_of_range(titles in titles_strategy(), index in i64::MIN..0) {
            let list = list_from(&titles);
            let raw = index.to_string();
            prop_assert_eq!(list.parse_index(&raw), Err(ListError::OutOfRange(raw.clone())));
        }

        #[test]
        fn remove_at_is_prefix_plus_suffix(
            titles in prop::collection::vec("[a-c]{0,3}", 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut list = list_from(&titles);
            let before = list.to_vec();
            let index = pick.index(before.len());

            let removed = list.remove_at(index).unwrap();
            prop_assert!(removed.ptr_eq(&before[index]));

            let mut expected = before[..index].to_vec();
            expected.extend_from_slice(&before[index + 1..]);
            prop_assert_eq!(list.to_vec(), expected);
        }

        #[test]
        fn filter_keeps_order_and_receiver(
            titles in titles_strategy(),
            done_mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let list = list_from(&titles);
            for (index, done) in done_mask.iter().take(titles.len()).enumerate() {
                if *done {
                    list.mark_done_at(index).unwrap();
                }
            }
            let snapshot: Vec<Item> = list.iter().map(ItemRef::snapshot).collect();

            let done = list.all_done();
            prop_assert!(done.iter().all(ItemRef::is_done));

            let expected: Vec<ItemRef> = list.iter().filter(|i| i.is_done()).cloned().collect();
            prop_assert_eq!(done.to_vec(), expected);

            prop_assert_eq!(list.size(), titles.len());
            let after: Vec<Item> = list.iter().map(ItemRef::snapshot).collect();
            prop_assert_eq!(after, snapshot);
        }

        #[test]
        fn find_by_title_is_first_exact_match(titles in titles_strategy(), needle in "[a-c]{0,3}") {
            let list = list_from(&titles);
            let expected = titles.iter().position(|t| *t == needle);

            match (list.find_by_title(&needle), expected) {
                (Some(found), Some(index)) => {
                    prop_assert!(found.ptr_eq(&list.item_at(index).unwrap()))
                }
                (None, None) => {}
                (found, expected) => {
                    prop_assert!(false, "found {:?}, expected {:?}", found, expected)
                }
            }
        }
    }
}

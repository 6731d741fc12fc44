//! Ordered table type for TOML documents.
//!
//! [`Table`] wraps an [`IndexMap`] so keys come back in the order they were
//! inserted. The parser relies on that to hand out tables whose iteration order
//! matches the source text, and the writer relies on it to keep struct fields
//! in declaration order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Value::from("Alice"));
//! table.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An insertion-ordered map of string keys to TOML values.
///
/// Keys are unique. [`Table::insert`] replaces an existing entry in place and
/// returns the old value; the parser never calls it on an existing key, it
/// reports a duplicate instead.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Value::from(1));
/// table.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(table.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Follows a path of keys through nested tables.
    ///
    /// Each segment must name a table except the last one, which may name any
    /// value. Arrays are not traversed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::{parse, Value};
    ///
    /// let root = parse("[hello.dear]\nworld = false\n").unwrap();
    /// assert_eq!(root.get_path(&["hello", "dear", "world"]), Some(&Value::Boolean(false)));
    /// assert_eq!(root.get_path(&["hello", "missing"]), None);
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut table = self;
        for key in parents {
            table = table.get(key)?.as_table()?;
        }
        table.get(last)
    }

    /// Returns `true` if the table contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Merges `other` into `self`.
    ///
    /// Tables present on both sides are merged recursively; any other value in
    /// `other` replaces the one in `self`. New keys are appended.
    pub fn merge(&mut self, other: Table) {
        for (key, value) in other {
            if let Value::Table(incoming) = value {
                if let Some(Value::Table(existing)) = self.0.get_mut(&key) {
                    existing.merge(incoming);
                    continue;
                }
                self.0.insert(key, Value::Table(incoming));
            } else {
                self.0.insert(key, value);
            }
        }
    }

    /// Sorts the entries by key, ascending.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }
}

impl fmt::Display for Table {
    /// Renders the table as a TOML document, keeping insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        crate::writer::write_document(&mut output, self, &crate::TomlOptions::default());
        f.write_str(&output)
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a table",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let table: Table = vec![
            ("z".to_string(), Value::from(1)),
            ("a".to_string(), Value::from(2)),
            ("m".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_merge_recurses_into_tables() {
        let mut base = Table::new();
        let mut inner = Table::new();
        inner.insert("keep".to_string(), Value::from(1));
        inner.insert("replace".to_string(), Value::from(2));
        base.insert("inner".to_string(), Value::Table(inner));
        base.insert("top".to_string(), Value::from("old"));

        let mut patch = Table::new();
        let mut patch_inner = Table::new();
        patch_inner.insert("replace".to_string(), Value::from(20));
        patch_inner.insert("added".to_string(), Value::from(true));
        patch.insert("inner".to_string(), Value::Table(patch_inner));
        patch.insert("top".to_string(), Value::from("new"));

        base.merge(patch);

        assert_eq!(base.get_path(&["inner", "keep"]), Some(&Value::Number(1)));
        assert_eq!(base.get_path(&["inner", "replace"]), Some(&Value::Number(20)));
        assert_eq!(base.get_path(&["inner", "added"]), Some(&Value::Boolean(true)));
        assert_eq!(base.get("top").and_then(Value::as_str), Some("new"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table: Table = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), Value::from(*k)))
            .collect();
        table.remove("b");
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_sort_keys() {
        let mut table: Table = ["y", "x"]
            .iter()
            .map(|k| (k.to_string(), Value::from(1)))
            .collect();
        table.sort_keys();
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["x", "y"]);
    }
}

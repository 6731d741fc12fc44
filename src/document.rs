//! Tree construction behind the parser.
//!
//! [`DocumentBuilder`] owns the root [`Table`] while a document is being
//! parsed. The "current table" selected by the last header is stored as a
//! path of [`Segment`]s and resolved from the root before every insertion, so
//! no mutable reference into the tree outlives a single call.
//!
//! The builder also remembers how each table came to exist. That history is
//! what separates a legal `[a]` after `[a.b]` from an illegal second `[a]`, and
//! what keeps inline tables sealed.

use crate::writer::format_key;
use crate::{Error, Result, Table, Value};
use std::collections::HashMap;
use tracing::trace;

/// One step from a table to a nested table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Segment {
    Key(String),
    /// Element of an array of tables.
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Intermediate table of a header path, may still be declared once.
    Implicit,
    Header,
    Dotted,
    Inline,
    ArrayOfTables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Dotted,
}

impl Mode {
    fn created(self) -> Origin {
        match self {
            Mode::Header => Origin::Implicit,
            Mode::Dotted => Origin::Dotted,
        }
    }
}

/// A key as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Key {
    pub name: String,
    pub line: usize,
    pub col: usize,
}

/// What currently occupies a key in a table.
enum Slot {
    Vacant,
    Table,
    Array(usize),
    Other(&'static str),
}

impl Slot {
    fn of(table: &Table, key: &str) -> Self {
        match table.get(key) {
            None => Slot::Vacant,
            Some(Value::Table(_)) => Slot::Table,
            Some(Value::Array(items)) => Slot::Array(items.len()),
            Some(other) => Slot::Other(other.type_name()),
        }
    }
}

pub(crate) struct DocumentBuilder {
    root: Table,
    origins: HashMap<Vec<Segment>, Origin>,
    cursor: Vec<Segment>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            root: Table::new(),
            origins: HashMap::new(),
            cursor: Vec::new(),
        }
    }

    pub fn finish(self) -> Table {
        self.root
    }

    /// Handles `[keys]`: finds or creates the table and makes it current.
    pub fn open_table(&mut self, keys: &[Key]) -> Result<()> {
        let (last, parents) = split_keys(keys)?;
        let mut path = self.descend(Vec::new(), parents, Mode::Header)?;
        let table = table_at(&mut self.root, &path)?;
        let slot = Slot::of(table, &last.name);
        path.push(Segment::Key(last.name.clone()));

        match slot {
            Slot::Vacant => {
                table.insert(last.name.clone(), Value::Table(Table::new()));
            }
            Slot::Table => {
                let reason = match self.origins.get(&path) {
                    Some(Origin::Header) => Some("table is already declared"),
                    Some(Origin::Dotted) => Some("table is already defined by dotted keys"),
                    Some(Origin::Inline) => Some("inline tables cannot be extended"),
                    _ => None,
                };
                if let Some(reason) = reason {
                    return Err(Error::duplicate_table(
                        last.line,
                        last.col,
                        &display_keys(keys),
                        reason,
                    ));
                }
            }
            Slot::Array(_) => {
                let found = if self.origins.get(&path) == Some(&Origin::ArrayOfTables) {
                    "an array of tables"
                } else {
                    "an array"
                };
                return Err(conflict(last, keys, found));
            }
            Slot::Other(type_name) => return Err(conflict(last, keys, article(type_name))),
        }

        self.origins.insert(path.clone(), Origin::Header);
        trace!(table = %display_keys(keys), "opened table");
        self.cursor = path;
        Ok(())
    }

    /// Handles `[[keys]]`: appends a fresh table to the array and makes it current.
    pub fn open_array_table(&mut self, keys: &[Key]) -> Result<()> {
        let (last, parents) = split_keys(keys)?;
        let mut path = self.descend(Vec::new(), parents, Mode::Header)?;
        let table = table_at(&mut self.root, &path)?;
        let slot = Slot::of(table, &last.name);
        path.push(Segment::Key(last.name.clone()));

        let index = match slot {
            Slot::Vacant => {
                table.insert(
                    last.name.clone(),
                    Value::Array(vec![Value::Table(Table::new())]),
                );
                self.origins.insert(path.clone(), Origin::ArrayOfTables);
                0
            }
            Slot::Array(len) if self.origins.get(&path) == Some(&Origin::ArrayOfTables) => {
                if let Some(items) = table.get_mut(&last.name).and_then(Value::as_array_mut) {
                    items.push(Value::Table(Table::new()));
                }
                len
            }
            Slot::Array(_) => return Err(conflict(last, keys, "a static array")),
            Slot::Table => return Err(conflict(last, keys, "a table")),
            Slot::Other(type_name) => return Err(conflict(last, keys, article(type_name))),
        };

        path.push(Segment::Index(index));
        self.origins.insert(path.clone(), Origin::Header);
        trace!(array = %display_keys(keys), index, "appended array table");
        self.cursor = path;
        Ok(())
    }

    /// Handles `keys = value` relative to the current table.
    pub fn insert(&mut self, keys: &[Key], value: Value) -> Result<()> {
        let (last, parents) = split_keys(keys)?;
        let mut path = self.descend(self.cursor.clone(), parents, Mode::Dotted)?;
        let table = table_at(&mut self.root, &path)?;

        if table.contains_key(&last.name) {
            return Err(Error::duplicate_key(
                last.line,
                last.col,
                &display_keys(keys),
            ));
        }

        let sealed = value.is_table();
        table.insert(last.name.clone(), value);
        if sealed {
            path.push(Segment::Key(last.name.clone()));
            self.origins.insert(path, Origin::Inline);
        }
        Ok(())
    }

    /// Walks `keys` down from `path`, creating missing tables. Used by headers
    /// and dotted keys alike; `mode` only changes which existing tables may be
    /// entered.
    fn descend(&mut self, mut path: Vec<Segment>, keys: &[Key], mode: Mode) -> Result<Vec<Segment>> {
        for (i, key) in keys.iter().enumerate() {
            let table = table_at(&mut self.root, &path)?;
            let slot = Slot::of(table, &key.name);
            path.push(Segment::Key(key.name.clone()));
            let written = &keys[..=i];

            match slot {
                Slot::Vacant => {
                    table.insert(key.name.clone(), Value::Table(Table::new()));
                    self.origins.insert(path.clone(), mode.created());
                }
                Slot::Table => match (self.origins.get(&path), mode) {
                    (Some(Origin::Inline), _) => {
                        return Err(Error::duplicate_table(
                            key.line,
                            key.col,
                            &display_keys(written),
                            "inline tables cannot be extended",
                        ))
                    }
                    (Some(Origin::Header), Mode::Dotted) => {
                        return Err(Error::duplicate_table(
                            key.line,
                            key.col,
                            &display_keys(written),
                            "a table declared by a header cannot be extended with dotted keys",
                        ))
                    }
                    _ => {}
                },
                Slot::Array(len)
                    if mode == Mode::Header
                        && self.origins.get(&path) == Some(&Origin::ArrayOfTables) =>
                {
                    path.push(Segment::Index(len.saturating_sub(1)));
                }
                Slot::Array(_) => return Err(conflict(key, written, "an array")),
                Slot::Other(type_name) => return Err(conflict(key, written, article(type_name))),
            }
        }
        Ok(path)
    }
}

/// Resolves a cursor path to the table it names.
fn table_at<'t>(root: &'t mut Table, path: &[Segment]) -> Result<&'t mut Table> {
    let mut table = root;
    let mut segments = path.iter();
    while let Some(segment) = segments.next() {
        let key = match segment {
            Segment::Key(key) => key,
            Segment::Index(_) => return Err(lost_path()),
        };
        let value = table.get_mut(key).ok_or_else(lost_path)?;
        table = match value {
            Value::Table(inner) => inner,
            Value::Array(items) => match segments.next() {
                Some(Segment::Index(index)) => items
                    .get_mut(*index)
                    .and_then(Value::as_table_mut)
                    .ok_or_else(lost_path)?,
                _ => return Err(lost_path()),
            },
            _ => return Err(lost_path()),
        };
    }
    Ok(table)
}

fn lost_path() -> Error {
    Error::custom("internal error: table path no longer resolves")
}

fn split_keys(keys: &[Key]) -> Result<(&Key, &[Key])> {
    keys.split_last()
        .ok_or_else(|| Error::custom("internal error: empty key path"))
}

fn conflict(key: &Key, written: &[Key], found: &str) -> Error {
    Error::type_conflict(key.line, key.col, &display_keys(written), found)
}

fn article(type_name: &str) -> &'static str {
    match type_name {
        "integer" => "an integer",
        "string" => "a string",
        "boolean" => "a boolean",
        "array" => "an array",
        _ => "a table",
    }
}

pub(crate) fn display_keys(keys: &[Key]) -> String {
    keys.iter()
        .map(|key| format_key(&key.name))
        .collect::<Vec<_>>()
        .join(".")
}

//! # serde_tomlite
//!
//! A Serde-compatible reader and writer for a practical subset of TOML.
//!
//! ## What is supported?
//!
//! - `key = value` pairs with bare, quoted and dotted keys
//! - `[table]` headers and `[[array.of.tables]]` headers
//! - inline tables `{ a = 1, b = 2 }` and arrays, including multi-line arrays
//! - basic strings with escapes, 64-bit integers (decimal, hex, octal,
//!   binary, `_` separators) and booleans
//! - `#` comments
//!
//! Floats, dates and times, literal and multi-line strings are rejected with
//! a positioned error. See [`grammar`] for the accepted syntax.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_tomlite = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Typed serialization and deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tomlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tls: bool,
//! }
//!
//! let server = Server { host: "localhost".to_string(), port: 8080, tls: false };
//!
//! let toml = to_string(&server).unwrap();
//! assert_eq!(toml, "host = \"localhost\"\nport = 8080\ntls = false\n");
//!
//! let back: Server = from_str(&toml).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Working with the value tree
//!
//! ```rust
//! use serde_tomlite::{parse, Value};
//!
//! let doc = parse(r#"
//! [[fruit]]
//! name = "apple"
//!
//! [[fruit]]
//! name = "banana"
//! "#).unwrap();
//!
//! let names: Vec<_> = doc
//!     .get("fruit")
//!     .and_then(Value::as_array)
//!     .unwrap()
//!     .iter()
//!     .filter_map(|fruit| fruit.get("name").and_then(Value::as_str))
//!     .collect();
//! assert_eq!(names, ["apple", "banana"]);
//! ```
//!
//! ### Building values with `toml!`
//!
//! ```rust
//! use serde_tomlite::toml;
//!
//! let server = toml!({ "host" = "localhost", "ports" = [80, 443] });
//! assert_eq!(server.to_string(), r#"{ host = "localhost", ports = [80, 443] }"#);
//! ```
//!
//! ## Logging
//!
//! Parsing and serialization emit [`tracing`] events: `trace` when a table
//! header is opened and `debug` when a document is finished. Install any
//! `tracing` subscriber to see them; without one they cost nothing.
//!
//! ## Demos
//!
//! - **`simple.rs`** - round trip of a small config struct
//! - **`dynamic_values.rs`** - walking and editing a parsed [`Table`]
//! - **`custom_options.rs`** - [`TomlOptions`] for layout and limits
//! - **`arrays_of_tables.rs`** - `[[header]]` sections in and out
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
mod document;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;
pub mod ser;
pub mod table;
pub mod value;
mod writer;

pub use de::{Deserializer, ValueDeserializer};
pub use error::{Category, Error, Result};
pub use options::TomlOptions;
pub use parser::Parser;
pub use ser::{Serializer, ValueSerializer};
pub use table::Table;
pub use value::{Array, Value};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Parse TOML text into a [`Table`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{parse, Value};
///
/// let table = parse("[a.b]\nc = 1\n").unwrap();
/// assert_eq!(table.get_path(&["a", "b", "c"]), Some(&Value::Number(1)));
/// ```
///
/// # Errors
///
/// Returns a [`Category::Lex`] or [`Category::Parse`] error with the line and
/// column of the offending input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Table> {
    Parser::new(input).parse()
}

/// Parse TOML text into a [`Table`] using custom limits.
///
/// # Errors
///
/// Same as [`parse`]; additionally fails when values nest deeper than
/// [`TomlOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: &TomlOptions) -> Result<Table> {
    Parser::with_options(input, options.clone()).parse()
}

/// Serialize any `T: Serialize` to a TOML document.
///
/// The value must serialize as a table: a struct, a map with string keys, or
/// a [`Table`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for floats, unit values, non-string map
/// keys, integers outside the `i64` range and non-table top-level values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &TomlOptions::default())
}

/// Serialize any `T: Serialize` to a TOML document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{to_string_with_options, TomlOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Section { on: bool }
///
/// #[derive(Serialize)]
/// struct Doc { a: Section, b: Section }
///
/// let doc = Doc { a: Section { on: true }, b: Section { on: false } };
/// let toml = to_string_with_options(&doc, &TomlOptions::compact()).unwrap();
/// assert_eq!(toml, "[a]\non = true\n[b]\non = false\n");
/// ```
///
/// # Errors
///
/// Same as [`to_string`], plus nesting deeper than
/// [`TomlOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &TomlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options.clone());
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Unlike [`to_string`], any value may be converted, not only tables.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{to_value, Value};
///
/// let value = to_value(&vec![1, 2]).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Number(1), Value::Number(2)]));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for values TOML cannot represent,
/// including a top-level `None`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer::new(&TomlOptions::default()))?
        .ok_or_else(|| Error::unsupported_type("`None` has no TOML representation"))
}

/// Serialize any `T: Serialize` as TOML into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut limits = BTreeMap::new();
/// limits.insert("retries", 3);
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &limits).unwrap();
/// assert_eq!(buffer, b"retries = 3\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &TomlOptions::default())
}

/// Serialize any `T: Serialize` as TOML into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &TomlOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toml = to_string_with_options(value, options)?;
    writer
        .write_all(toml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a positioned error if the input is not valid TOML, or a
/// [`Category::Decode`] error if it does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, &TomlOptions::default())
}

/// Deserialize an instance of type `T` from TOML text using custom limits.
///
/// # Errors
///
/// Same as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: &TomlOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options.clone());
    T::deserialize(&mut deserializer)
}

/// Deserialize TOML text on top of an existing value.
///
/// Keys present in the document overwrite the matching fields of `dest`,
/// nested tables are merged, and everything else keeps its current value.
/// This suits layered configuration where defaults come from `Default`.
/// On error `dest` is left untouched.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_tomlite::from_str_into;
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Limits { retries: u32, timeout: u32 }
///
/// let mut limits = Limits { retries: 3, timeout: 30 };
/// from_str_into("timeout = 5", &mut limits).unwrap();
/// assert_eq!(limits, Limits { retries: 3, timeout: 5 });
/// ```
///
/// # Errors
///
/// Returns a parse error for invalid TOML, an encode error if `dest` itself
/// cannot be represented as a table, or a decode error if the merged result
/// does not fit `T`.
pub fn from_str_into<T>(s: &str, dest: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let parsed = parse(s)?;
    let mut merged = match to_value(dest)? {
        Value::Table(table) => table,
        other => {
            return Err(Error::UnsupportedType(format!(
                "destination must be a table, found {}",
                other.type_name()
            )))
        }
    };
    merged.merge(parsed);
    *dest = from_value(Value::Table(merged))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{from_value, Value};
///
/// let n: u16 = from_value(Value::Number(443)).unwrap();
/// assert_eq!(n, 443);
/// ```
///
/// # Errors
///
/// Returns a [`Category::Decode`] error if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOML, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| invalid_utf8(v, e))?;
    from_str(s)
}

/// Reports the position of the first invalid byte the way the lexer would.
fn invalid_utf8(bytes: &[u8], err: std::str::Utf8Error) -> Error {
    let valid = String::from_utf8_lossy(&bytes[..err.valid_up_to()]);
    let line = valid.matches('\n').count() + 1;
    let col = valid.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
    Error::lex(line, col, "invalid UTF-8")
}

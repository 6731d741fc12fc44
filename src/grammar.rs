//! The TOML subset accepted and produced by this crate.
//!
//! # Overview
//!
//! A document is a sequence of lines. Each non-blank line is one of a
//! key/value pair, a `[table]` header or a `[[array]]` header, optionally
//! followed by a `#` comment. Whitespace is spaces and tabs; line breaks are
//! `\n` or `\r\n`.
//!
//! # Keys
//!
//! | Form | Example | Notes |
//! |------|---------|-------|
//! | Bare | `server_name-2` | ASCII letters, digits, `_` and `-` |
//! | Quoted | `"with space"` | basic string rules apply |
//! | Dotted | `server.http.port` | each segment is bare or quoted |
//!
//! Words that read as integers or booleans (`1234`, `true`) are accepted as
//! bare keys too. A dotted key creates the intermediate tables it names:
//!
//! ```text
//! physical.color = "orange"
//! physical.shape = "round"
//! ```
//!
//! is the same as `physical = { color = "orange", shape = "round" }`.
//!
//! # Values
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | String | `"..."` with escapes `\b \t \n \f \r \" \\ \uXXXX \UXXXXXXXX` | `name = "Tom"` |
//! | Integer | optional sign, `_` between digits, `0x`, `0o`, `0b` prefixes | `mask = 0xff_ff` |
//! | Boolean | `true`, `false` | `enabled = true` |
//! | Array | `[v, v, ...]`, may span lines, trailing comma allowed | `ports = [80, 443]` |
//! | Inline table | `{ k = v, ... }`, single line, no trailing comma | `point = { x = 1 }` |
//!
//! Integers must fit in `i64`. Decimal integers may not have leading zeros.
//! Arrays may mix value types.
//!
//! # Tables
//!
//! ```text
//! [owner]
//! name = "Tom"
//!
//! [database.replica]
//! host = "10.0.0.2"
//! ```
//!
//! A header switches the current table; the following pairs land in it until
//! the next header. Missing parents are created implicitly and may be declared
//! by a header later, once.
//!
//! # Arrays of tables
//!
//! ```text
//! [[products]]
//! name = "Hammer"
//!
//! [[products]]
//! name = "Nail"
//! ```
//!
//! Each `[[products]]` appends a fresh table. A header below it, such as
//! `[products.dimensions]`, refers to the most recently appended element.
//!
//! # Redefinition rules
//!
//! The parser rejects, with the position of the offending key:
//!
//! - assigning the same key twice in one table
//! - declaring the same `[table]` header twice
//! - declaring a `[table]` header for a table made by dotted keys
//! - extending a table that was written inline, by header or dotted key
//! - extending a header-declared table with dotted keys from a parent table
//! - a `[[header]]` naming an array written as a value, or any non-array
//! - using a path whose prefix is a string, integer, boolean or static array
//!
//! # Output
//!
//! The writer emits plain keys of a table first, then its sub-tables as
//! `[header]` sections, then its arrays of tables as `[[header]]` sections.
//! Arrays containing anything other than tables, and tables nested in
//! arrays, are written inline. Tables holding only sections get no header of
//! their own. Keys are written bare when possible and quoted otherwise.
//!
//! # Limitations
//!
//! - floats, infinities and NaN
//! - offset and local dates and times
//! - literal strings (`'...'`) and multi-line strings
//! - integers outside the `i64` range

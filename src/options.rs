//! Configuration options for TOML parsing and serialization.
//!
//! [`TomlOptions`] is shared by both directions: the nesting limit applies to
//! the parser and the serializer, the layout switches only to the serializer.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{to_string_with_options, TomlOptions};
//! use std::collections::HashMap;
//!
//! let mut ports = HashMap::new();
//! ports.insert("https", 443);
//! ports.insert("http", 80);
//!
//! // Sorted output is the default; keep it, but drop blank lines between sections
//! let options = TomlOptions::compact();
//! let toml = to_string_with_options(&ports, &options).unwrap();
//! assert_eq!(toml, "http = 80\nhttps = 443\n");
//! ```

/// Default bound on nested arrays, inline tables and serialized structures.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for TOML parsing and serialization.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::TomlOptions;
///
/// let options = TomlOptions::new()
///     .with_max_depth(16)
///     .with_sort_map_keys(false);
/// assert_eq!(options.max_depth, 16);
/// assert!(options.table_spacing);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TomlOptions {
    /// Deepest nesting of arrays and tables accepted in either direction.
    pub max_depth: usize,
    /// Emit map entries in ascending key order instead of iteration order.
    pub sort_map_keys: bool,
    /// Put a blank line before each `[table]` or `[[array]]` header.
    pub table_spacing: bool,
}

impl Default for TomlOptions {
    fn default() -> Self {
        TomlOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            sort_map_keys: true,
            table_spacing: true,
        }
    }
}

impl TomlOptions {
    /// Creates default options (depth 64, sorted maps, spaced sections).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that write headers without separating blank lines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::TomlOptions;
    ///
    /// assert!(!TomlOptions::compact().table_spacing);
    /// ```
    #[must_use]
    pub fn compact() -> Self {
        TomlOptions {
            table_spacing: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Chooses between sorted output and the map's own iteration order.
    ///
    /// Struct fields always keep their declaration order.
    #[must_use]
    pub fn with_sort_map_keys(mut self, sort: bool) -> Self {
        self.sort_map_keys = sort;
        self
    }

    #[must_use]
    pub fn with_table_spacing(mut self, spacing: bool) -> Self {
        self.table_spacing = spacing;
        self
    }
}

//! The [`toml!`](crate::toml) macro for building [`Value`](crate::Value)s inline.

/// Builds a [`Value`](crate::Value) from TOML-like syntax.
///
/// Tables are written `{ "key" = value, ... }` and keep the order given.
/// Any other expression is converted with `Value::from`; negative numbers
/// must be parenthesized, e.g. `(-1)`.
///
/// ```rust
/// use serde_tomlite::{toml, Value};
///
/// let server = toml!({
///     "host" = "localhost",
///     "ports" = [80, 443],
///     "tls" = { "enabled" = true }
/// });
///
/// assert_eq!(server.get("host").and_then(Value::as_str), Some("localhost"));
/// assert_eq!(
///     server.get("tls").and_then(|t| t.get("enabled")),
///     Some(&Value::Boolean(true))
/// );
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal = $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert(::std::string::String::from($key), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

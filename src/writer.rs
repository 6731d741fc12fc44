//! Rendering of value trees as TOML text.
//!
//! A table is written as a document: its plain keys first, then each nested
//! table as a `[header]` section, then each array of tables as repeated
//! `[[header]]` sections. Everything below a plain key is written inline.

use crate::lexer::is_bare_key;
use crate::{Table, TomlOptions, Value};

pub(crate) fn write_document(output: &mut String, table: &Table, options: &TomlOptions) {
    let mut path = Vec::new();
    write_table_body(output, table, &mut path, options);
}

fn write_table_body(
    output: &mut String,
    table: &Table,
    path: &mut Vec<String>,
    options: &TomlOptions,
) {
    for (key, value) in table.iter().filter(|(_, v)| !is_section(v)) {
        output.push_str(&format_key(key));
        output.push_str(" = ");
        write_inline_value(output, value);
        output.push('\n');
    }

    for (key, sub) in table.iter().filter_map(|(k, v)| Some((k, v.as_table()?))) {
        path.push(key.clone());
        // A table holding only sections is implied by their headers
        if sub.is_empty() || sub.values().any(|v| !is_section(v)) {
            write_header(output, path, false, options);
        }
        write_table_body(output, sub, path, options);
        path.pop();
    }

    for (key, items) in table.iter().filter_map(|(k, v)| match v {
        Value::Array(items) if is_array_of_tables(items) => Some((k, items)),
        _ => None,
    }) {
        path.push(key.clone());
        for sub in items.iter().filter_map(Value::as_table) {
            write_header(output, path, true, options);
            write_table_body(output, sub, path, options);
        }
        path.pop();
    }
}

fn write_header(output: &mut String, path: &[String], array: bool, options: &TomlOptions) {
    if options.table_spacing && !output.is_empty() {
        output.push('\n');
    }
    output.push_str(if array { "[[" } else { "[" });
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            output.push('.');
        }
        output.push_str(&format_key(key));
    }
    output.push_str(if array { "]]\n" } else { "]\n" });
}

/// Values written as `[header]` sections rather than `key = value` lines.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Table(_) => true,
        Value::Array(items) => is_array_of_tables(items),
        _ => false,
    }
}

fn is_array_of_tables(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_table)
}

pub(crate) fn write_inline_value(output: &mut String, value: &Value) {
    match value {
        Value::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => output.push_str(&n.to_string()),
        Value::String(s) => write_string(output, s),
        Value::Array(items) => {
            output.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_inline_value(output, item);
            }
            output.push(']');
        }
        Value::Table(table) => {
            if table.is_empty() {
                output.push_str("{}");
                return;
            }
            output.push_str("{ ");
            for (i, (key, item)) in table.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                output.push_str(&format_key(key));
                output.push_str(" = ");
                write_inline_value(output, item);
            }
            output.push_str(" }");
        }
    }
}

fn write_string(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"), // backspace
            '\u{000C}' => output.push_str("\\f"), // form feed
            c if c.is_control() => output.push_str(&format!("\\u{:04X}", c as u32)),
            _ => output.push(ch),
        }
    }
    output.push('"');
}

/// Writes a key bare when possible, quoted otherwise.
pub(crate) fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        let mut quoted = String::with_capacity(key.len() + 2);
        write_string(&mut quoted, key);
        quoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, Value)>) -> Table {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_flat_table() {
        let root = table(vec![("X", Value::from(10)), ("Y", Value::from(10))]);
        assert_eq!(root.to_string(), "X = 10\nY = 10\n");
    }

    #[test]
    fn test_sections_follow_plain_keys() {
        let root = table(vec![
            ("server", Value::Table(table(vec![("port", Value::from(80))]))),
            ("name", Value::from("edge")),
        ]);
        assert_eq!(root.to_string(), "name = \"edge\"\n\n[server]\nport = 80\n");
    }

    #[test]
    fn test_intermediate_tables_are_implied() {
        let root = table(vec![(
            "a",
            Value::Table(table(vec![(
                "b",
                Value::Table(table(vec![("c", Value::from(true))])),
            )])),
        )]);
        let options = TomlOptions::compact();
        let mut output = String::new();
        write_document(&mut output, &root, &options);
        assert_eq!(output, "[a.b]\nc = true\n");
    }

    #[test]
    fn test_array_of_tables() {
        let root = table(vec![(
            "array",
            Value::Array(vec![
                Value::Table(table(vec![("foo", Value::from(10))])),
                Value::Table(table(vec![("foo", Value::from(8))])),
            ]),
        )]);
        let mut output = String::new();
        write_document(&mut output, &root, &TomlOptions::compact());
        assert_eq!(output, "[[array]]\nfoo = 10\n[[array]]\nfoo = 8\n");
    }

    #[test]
    fn test_tables_precede_arrays_of_tables() {
        let root = table(vec![
            (
                "plugins",
                Value::Array(vec![Value::Table(table(vec![("name", Value::from("a"))]))]),
            ),
            ("server", Value::Table(table(vec![("port", Value::from(1))]))),
            ("title", Value::from("demo")),
        ]);
        assert_eq!(
            root.to_string(),
            "title = \"demo\"\n\n[server]\nport = 1\n\n[[plugins]]\nname = \"a\"\n"
        );
    }

    #[test]
    fn test_inline_forms() {
        let mixed = Value::Array(vec![
            Value::from(1),
            Value::Table(table(vec![("k", Value::from("v"))])),
            Value::Array(vec![]),
        ]);
        assert_eq!(mixed.to_string(), "[1, { k = \"v\" }, []]");
        assert_eq!(Value::Table(Table::new()).to_string(), "{}");
    }

    #[test]
    fn test_string_escaping() {
        let value = Value::from("tab\there \"q\" back\\slash\u{1}");
        assert_eq!(value.to_string(), r#""tab\there \"q\" back\\slash\u0001""#);
    }

    #[test]
    fn test_key_quoting() {
        assert_eq!(format_key("plain_key-1"), "plain_key-1");
        assert_eq!(format_key("with space"), "\"with space\"");
        assert_eq!(format_key("a.b"), "\"a.b\"");
        assert_eq!(format_key(""), "\"\"");
    }
}

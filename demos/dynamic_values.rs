//! Working with parsed TOML dynamically through Table and Value.
//!
//! Run with: cargo run --example dynamic_values

use serde_tomlite::{parse, toml, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse(
        r#"
title = "service"

[server]
host = "0.0.0.0"
port = 8080

[server.tls]
enabled = false
"#,
    )?;

    // Typed lookups along a path
    let port = doc.get_path(&["server", "port"]).and_then(Value::as_i64);
    println!("port = {:?}", port);

    // Walk every top-level entry
    for (key, value) in doc.iter() {
        println!("{} is {}", key, value.type_name());
    }

    // Edit in place
    if let Some(server) = doc.get_mut("server").and_then(Value::as_table_mut) {
        server.insert("port".to_string(), Value::from(9090));
        server.insert("workers".to_string(), toml!([1, 2, 4]));
    }

    // Merge an overlay document
    let overlay = parse("[server.tls]\nenabled = true\ncert = \"/etc/tls/cert.pem\"\n")?;
    doc.merge(overlay);

    println!("\nEdited document:\n{}", doc);

    match parse("[server]\nport = 1\n[server]\n") {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("Error ({:?}): {}", e.category(), e),
    }

    Ok(())
}

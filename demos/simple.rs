//! Basic TOML serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    url: String,
    pool_size: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    debug: bool,
    allowed_hosts: Vec<String>,
    database: Database,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "inventory".to_string(),
        debug: false,
        allowed_hosts: vec!["localhost".to_string(), "10.0.0.7".to_string()],
        database: Database {
            url: "postgres://localhost/inventory".to_string(),
            pool_size: 8,
        },
    };

    // Serialize to TOML
    let toml = to_string(&config)?;
    println!("TOML output:\n{}", toml);

    // Deserialize back to struct
    let config_back: Config = from_str(&toml)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}

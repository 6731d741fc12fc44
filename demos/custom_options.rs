//! Customizing TOML output and limits with TomlOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_tomlite::{parse_with_options, to_string_with_options, TomlOptions};
use std::collections::HashMap;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Section {
    enabled: bool,
    level: u8,
}

#[derive(Debug, Serialize)]
struct Features {
    cache: Section,
    metrics: Section,
    labels: HashMap<String, String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut labels = HashMap::new();
    labels.insert("zone".to_string(), "eu-west".to_string());
    labels.insert("tier".to_string(), "gold".to_string());
    labels.insert("app".to_string(), "api".to_string());

    let features = Features {
        cache: Section {
            enabled: true,
            level: 2,
        },
        metrics: Section {
            enabled: false,
            level: 0,
        },
        labels,
    };

    // Default: blank line between sections, map keys sorted
    println!("Default:");
    println!("{}", serde_tomlite::to_string(&features)?);

    // Compact: no blank lines between sections
    println!("Compact:");
    println!("{}", to_string_with_options(&features, &TomlOptions::compact())?);

    // Keep map keys in iteration order (unstable for HashMap)
    println!("Unsorted map keys:");
    let unsorted = TomlOptions::new().with_sort_map_keys(false);
    println!("{}", to_string_with_options(&features, &unsorted)?);

    // Tight nesting limit for untrusted input
    let strict = TomlOptions::new().with_max_depth(2);
    match parse_with_options("matrix = [[[1]]]", &strict) {
        Ok(_) => println!("parsed"),
        Err(e) => println!("Rejected deep input: {}", e),
    }

    Ok(())
}

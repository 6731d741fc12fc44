//! Arrays of tables: `[[header]]` sections in and out.
//!
//! Run with: cargo run --example arrays_of_tables

use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Variety {
    name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Fruit {
    name: String,
    #[serde(default)]
    varieties: Vec<Variety>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Basket {
    owner: String,
    fruits: Vec<Fruit>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let input = r#"
owner = "Ada"

[[fruits]]
name = "apple"

[[fruits.varieties]]
name = "red delicious"

[[fruits.varieties]]
name = "granny smith"

[[fruits]]
name = "banana"
"#;

    let basket: Basket = from_str(input)?;
    for fruit in &basket.fruits {
        let names: Vec<_> = fruit.varieties.iter().map(|v| v.name.as_str()).collect();
        println!("{}: {:?}", fruit.name, names);
    }

    let toml = to_string(&basket)?;
    println!("\nSerialized:\n{}", toml);

    let again: Basket = from_str(&toml)?;
    assert_eq!(basket, again);
    println!("✓ Round-trip successful");

    Ok(())
}

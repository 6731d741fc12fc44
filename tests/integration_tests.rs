use serde::{Deserialize, Serialize};
use serde_tomlite::{
    from_reader, from_str, from_str_into, from_value, parse, to_string, to_string_with_options,
    to_value, to_writer, Category, Error, Table, TomlOptions, Value,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    cents: i64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

#[test]
fn test_simple_struct() {
    let user = alice();
    let toml = to_string(&user).unwrap();
    assert_eq!(
        toml,
        "id = 123\nname = \"Alice\"\nactive = true\ntags = [\"admin\", \"developer\"]\n"
    );

    let user_back: User = from_str(&toml).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: alice(),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                cents: 2999,
                quantity: 2,
            },
            Product {
                sku: "GADGET-042".to_string(),
                cents: 1499,
                quantity: 1,
            },
        ],
        note: None,
    };

    let toml = to_string(&order).unwrap();
    assert!(toml.contains("[customer]"));
    assert!(toml.contains("[[items]]"));
    assert!(!toml.contains("note"));

    let order_back: Order = from_str(&toml).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_serialization_is_stable() {
    let order = Order {
        order_id: 1,
        customer: alice(),
        items: vec![],
        note: Some("leave at door".to_string()),
    };

    let first = to_string(&order).unwrap();
    let second = to_string(&from_str::<Order>(&first).unwrap()).unwrap();
    assert_eq!(first, second);

    let via_table = parse(&first).unwrap().to_string();
    assert_eq!(first, via_table);
}

#[test]
fn test_arrays_of_tables_are_written_last() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Plugin {
        name: String,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Server {
        port: u16,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        plugins: Vec<Plugin>,
        server: Server,
    }

    let config = Config {
        plugins: vec![Plugin {
            name: "a".to_string(),
        }],
        server: Server { port: 1 },
    };

    let toml = to_string(&config).unwrap();
    assert_eq!(toml, "[server]\nport = 1\n\n[[plugins]]\nname = \"a\"\n");
    assert_eq!(from_str::<Config>(&toml).unwrap(), config);
}

#[test]
fn test_empty_vec_is_inline() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        items: Vec<Product>,
    }

    let toml = to_string(&Holder { items: vec![] }).unwrap();
    assert_eq!(toml, "items = []\n");
    let back: Holder = from_str(&toml).unwrap();
    assert!(back.items.is_empty());
}

#[test]
fn test_deeply_nested_tables() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Leaf {
        value: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Middle {
        leaf: Leaf,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Root {
        middle: Middle,
    }

    let root = Root {
        middle: Middle {
            leaf: Leaf { value: 7 },
        },
    };
    let toml = to_string(&root).unwrap();
    assert_eq!(toml, "[middle.leaf]\nvalue = 7\n");
    assert_eq!(from_str::<Root>(&toml).unwrap(), root);
}

#[test]
fn test_special_strings() {
    let mut map = BTreeMap::new();
    map.insert("quote".to_string(), "say \"hi\"".to_string());
    map.insert("newline".to_string(), "line1\nline2".to_string());
    map.insert("unicode".to_string(), "caf\u{e9} \u{1F980}".to_string());
    map.insert("empty".to_string(), String::new());
    map.insert("key with spaces".to_string(), "v".to_string());

    let toml = to_string(&map).unwrap();
    assert!(toml.contains("\"key with spaces\" = \"v\""));

    let back: BTreeMap<String, String> = from_str(&toml).unwrap();
    assert_eq!(map, back);
}

#[test]
fn test_integer_boundaries() {
    let mut map = BTreeMap::new();
    map.insert("min", i64::MIN);
    map.insert("max", i64::MAX);
    map.insert("zero", 0);

    let toml = to_string(&map).unwrap();
    let back: BTreeMap<String, i64> = from_str(&toml).unwrap();
    assert_eq!(back["min"], i64::MIN);
    assert_eq!(back["max"], i64::MAX);
}

#[test]
fn test_oversized_integer_keys_round_trip() {
    let mut map = BTreeMap::new();
    map.insert("99999999999999999999".to_string(), 1i64);
    map.insert("0xFFFFFFFFFFFFFFFFFF".to_string(), 2);
    map.insert("-9223372036854775809".to_string(), 3);

    let toml = to_string(&map).unwrap();
    assert!(toml.contains("99999999999999999999 = 1\n"));
    let back: BTreeMap<String, i64> = from_str(&toml).unwrap();
    assert_eq!(map, back);
    assert_eq!(to_string(&back).unwrap(), toml);
}

#[test]
fn test_hashmap_output_is_sorted() {
    let mut map = HashMap::new();
    for key in ["delta", "alpha", "charlie", "bravo"] {
        map.insert(key.to_string(), key.len() as i32);
    }
    let toml = to_string(&map).unwrap();
    assert_eq!(toml, "alpha = 5\nbravo = 5\ncharlie = 7\ndelta = 5\n");
}

#[test]
fn test_compact_options() {
    #[derive(Serialize)]
    struct Section {
        on: bool,
    }

    #[derive(Serialize)]
    struct Doc {
        a: Section,
        b: Section,
    }

    let doc = Doc {
        a: Section { on: true },
        b: Section { on: false },
    };

    let spaced = to_string(&doc).unwrap();
    assert_eq!(spaced, "[a]\non = true\n\n[b]\non = false\n");

    let compact = to_string_with_options(&doc, &TomlOptions::compact()).unwrap();
    assert_eq!(compact, "[a]\non = true\n[b]\non = false\n");
}

#[test]
fn test_to_value_and_back() {
    let user = alice();
    let value = to_value(&user).unwrap();
    assert_eq!(value.get("id"), Some(&Value::Number(123)));
    assert_eq!(
        value.get("tags").and_then(|t| t.get_index(1)).and_then(Value::as_str),
        Some("developer")
    );

    let back: User = from_value(value).unwrap();
    assert_eq!(back, user);
}

#[test]
fn test_table_as_target() {
    let table: Table = from_str("a = 1\n[b]\nc = true\n").unwrap();
    assert_eq!(table.get_path(&["b", "c"]), Some(&Value::Boolean(true)));
}

#[test]
fn test_writer_and_reader() {
    let user = alice();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &user).unwrap();

    let back: User = from_reader(std::io::Cursor::new(buffer)).unwrap();
    assert_eq!(back, user);
}

#[test]
fn test_layered_configuration() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Logging {
        level: String,
        json: bool,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        workers: u32,
        logging: Logging,
        hosts: Vec<String>,
    }

    let mut settings = Settings {
        workers: 4,
        logging: Logging {
            level: "info".to_string(),
            json: false,
        },
        hosts: vec!["a".to_string()],
    };

    from_str_into("hosts = [\"b\", \"c\"]\n[logging]\njson = true\n", &mut settings).unwrap();

    assert_eq!(settings.workers, 4);
    assert_eq!(settings.logging.level, "info");
    assert!(settings.logging.json);
    assert_eq!(settings.hosts, vec!["b", "c"]);
}

#[test]
fn test_missing_field_is_decode_error() {
    let err = from_str::<User>("id = 1\nname = \"x\"\n").unwrap_err();
    assert_eq!(err.category(), Category::Decode);
    assert!(err.to_string().contains("active"), "{}", err);
}

#[test]
fn test_deny_unknown_fields() {
    #[derive(Deserialize, Debug)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Strict {
        a: i32,
    }

    assert!(from_str::<Strict>("a = 1").is_ok());
    assert!(from_str::<Strict>("a = 1\nb = 2").is_err());
}

#[test]
fn test_unsupported_values() {
    #[derive(Serialize)]
    struct WithFloat {
        ratio: f32,
    }

    #[derive(Serialize)]
    struct WithUnit {
        marker: (),
    }

    let err = to_string(&WithFloat { ratio: 0.5 }).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
    let err = to_string(&WithUnit { marker: () }).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
}

mod byte_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(d)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Misc {
    initial: char,
    #[serde(with = "byte_list")]
    raw: Vec<u8>,
}

#[test]
fn test_char_and_bytes() {
    let misc = Misc {
        initial: 'Q',
        raw: vec![1, 2, 255],
    };
    let toml = to_string(&misc).unwrap();
    assert_eq!(toml, "initial = \"Q\"\nraw = [1, 2, 255]\n");
    assert_eq!(from_str::<Misc>(&toml).unwrap(), misc);
}

//! Property-based tests for the round-trip and stability guarantees.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, parse, to_string};
use std::collections::BTreeMap;

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Scalars {
    number: i64,
    flag: bool,
    text: String,
    small: u16,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Entry {
    id: i32,
    label: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Nested {
    scalars: Scalars,
    numbers: Vec<i64>,
    entries: Vec<Entry>,
    extra: Option<String>,
}

fn scalars() -> impl Strategy<Value = Scalars> {
    (any::<i64>(), any::<bool>(), any::<String>(), any::<u16>()).prop_map(
        |(number, flag, text, small)| Scalars {
            number,
            flag,
            text,
            small,
        },
    )
}

fn entry() -> impl Strategy<Value = Entry> {
    (any::<i32>(), "[a-z ]{0,12}").prop_map(|(id, label)| Entry { id, label })
}

proptest! {
    #[test]
    fn prop_scalars(value in scalars()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_nested(
        scalars in scalars(),
        numbers in prop::collection::vec(any::<i64>(), 0..10),
        entries in prop::collection::vec(entry(), 0..5),
        extra in proptest::option::of("[ -~]{0,20}"),
    ) {
        let nested = Nested { scalars, numbers, entries, extra };
        prop_assert!(roundtrip(&nested));
    }

    #[test]
    fn prop_map_of_strings(map in prop::collection::btree_map("[A-Za-z0-9_ .-]{0,10}", any::<String>(), 0..8)) {
        prop_assert!(roundtrip(&map));
    }

    #[test]
    fn prop_output_is_stable(value in scalars()) {
        let first = to_string(&value).unwrap();
        let again = parse(&first).unwrap().to_string();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn prop_decimal_integers_parse(n in any::<i64>()) {
        let table: BTreeMap<String, i64> = from_str(&format!("n = {}", n)).unwrap();
        prop_assert_eq!(table["n"], n);
    }

    #[test]
    fn prop_hex_integers_parse(n in 0i64..=i64::MAX) {
        let table: BTreeMap<String, i64> = from_str(&format!("n = 0x{:x}", n)).unwrap();
        prop_assert_eq!(table["n"], n);
    }

    #[test]
    fn prop_parser_never_panics(input in "[a-z0-9\\[\\]{}=.,\"# \n]{0,40}") {
        let _ = parse(&input);
    }
}

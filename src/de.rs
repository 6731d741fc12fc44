//! TOML deserialization.
//!
//! The [`Deserializer`] parses the whole document into a [`Table`] first and
//! then walks that tree with a [`ValueDeserializer`]. Because a TOML document
//! is always a table, the target type is usually a struct or a map.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tomlite::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x = 1\ny = 2\n").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Coercions
//!
//! Integers are handed to visitors as `i64`, so any integer field wide
//! enough for the value accepts it. Enums may be written as a string (unit
//! variants) or as a table with exactly one key naming the variant. Keys in
//! the document without a matching field are ignored unless the target uses
//! `#[serde(deny_unknown_fields)]`.

use crate::parser::Parser;
use crate::{Error, Result, Table, TomlOptions, Value};
use serde::de::{Deserializer as _, IntoDeserializer};
use serde::{de, forward_to_deserialize_any};

/// The TOML document deserializer.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    input: &'de str,
    options: TomlOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, TomlOptions::default())
    }

    pub fn with_options(input: &'de str, options: TomlOptions) -> Self {
        Deserializer { input, options }
    }

    fn parse_root(&self) -> Result<ValueDeserializer> {
        let table = Parser::with_options(self.input, self.options.clone()).parse()?;
        Ok(ValueDeserializer::new(Value::Table(table)))
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?.deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?
            .deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Deserializes from an owned [`Value`] tree.
///
/// ```rust
/// use serde::Deserialize;
/// use serde::de::IntoDeserializer;
/// use serde_tomlite::Value;
///
/// let value = Value::from(vec![Value::from(1), Value::from(2)]);
/// let numbers = Vec::<u8>::deserialize(value.into_deserializer()).unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Number(n) => visitor.visit_i64(n),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    // A present value is always `Some`; absent keys are handled by serde.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::type_mismatch("enum", "empty table")),
                }
            }
            Value::Table(_) => Err(Error::type_mismatch(
                "a table with a single key",
                "a table with several keys",
            )),
            other => Err(Error::type_mismatch("enum", other.type_name())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

impl<'de> IntoDeserializer<'de, Error> for Table {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(Value::Table(self))
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Table(table) if table.is_empty() => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("tuple variant", other.type_name())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            other => Err(Error::type_mismatch("struct variant", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_str, from_value, Error, Value};
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Deserialize, Debug, PartialEq)]
    struct Flat {
        #[serde(rename = "X")]
        x: i32,
        #[serde(rename = "Y")]
        y: i32,
    }

    #[test]
    fn test_flat_struct() {
        let flat: Flat = from_str("X = 22\nY = 76\n").unwrap();
        assert_eq!(flat, Flat { x: 22, y: 76 });
    }

    #[test]
    fn test_map() {
        let map: HashMap<String, i64> = from_str("X = 22\nY = 76\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["X"], 22);
        assert_eq!(map["Y"], 76);
    }

    #[test]
    fn test_nested_tables_and_arrays_of_tables() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Product {
            name: String,
            sku: i64,
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Owner {
            name: String,
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Inventory {
            owner: Owner,
            products: Vec<Product>,
            tags: Vec<String>,
        }

        let input = r#"
tags = ["a", "b"]

[owner]
name = "Tom"

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
"#;
        let inventory: Inventory = from_str(input).unwrap();
        assert_eq!(inventory.owner.name, "Tom");
        assert_eq!(inventory.tags, vec!["a", "b"]);
        assert_eq!(
            inventory.products,
            vec![
                Product {
                    name: "Hammer".to_string(),
                    sku: 738594937
                },
                Product {
                    name: "Nail".to_string(),
                    sku: 284758393
                },
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let flat: Flat = from_str("X = 1\nY = 2\nZ = 3\n").unwrap();
        assert_eq!(flat, Flat { x: 1, y: 2 });
    }

    #[test]
    fn test_optional_fields() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Maybe {
            present: Option<bool>,
            absent: Option<bool>,
        }

        let maybe: Maybe = from_str("present = false").unwrap();
        assert_eq!(
            maybe,
            Maybe {
                present: Some(false),
                absent: None
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let err = from_str::<Flat>("X = \"one\"\nY = 2\n").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }), "{:?}", err);
        assert_eq!(err.category(), crate::Category::Decode);
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = from_str::<BTreeMap<String, u8>>("a = 300").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }), "{:?}", err);

        let err = from_str::<BTreeMap<String, u32>>("a = -1").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }), "{:?}", err);
    }

    #[test]
    fn test_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Mode {
            Fast,
            Limited(u32),
            Window { width: u32 },
            Pair(i32, i32),
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Config {
            modes: Vec<Mode>,
        }

        let input = r#"modes = ["Fast", { Limited = 3 }, { Window = { width = 80 } }, { Pair = [1, 2] }]"#;
        let config: Config = from_str(input).unwrap();
        assert_eq!(
            config.modes,
            vec![
                Mode::Fast,
                Mode::Limited(3),
                Mode::Window { width: 80 },
                Mode::Pair(1, 2)
            ]
        );
    }

    #[test]
    fn test_newtype_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Port(u16);

        #[derive(Deserialize, Debug, PartialEq)]
        struct Server {
            port: Port,
        }

        let server: Server = from_str("port = 8080").unwrap();
        assert_eq!(server.port, Port(8080));
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = from_str::<Flat>("X = ").unwrap_err();
        assert_eq!(err.category(), crate::Category::Parse);
    }

    #[test]
    fn test_from_value() {
        let mut table = crate::Table::new();
        table.insert("X".to_string(), Value::from(5));
        table.insert("Y".to_string(), Value::from(6));
        let flat: Flat = from_value(Value::Table(table)).unwrap();
        assert_eq!(flat, Flat { x: 5, y: 6 });
    }

    #[test]
    fn test_dynamic_value() {
        let value: Value = from_str("a.b = [1, true]").unwrap();
        assert_eq!(
            value.get("a").and_then(|a| a.get("b")).and_then(|b| b.get_index(1)),
            Some(&Value::Boolean(true))
        );
    }
}

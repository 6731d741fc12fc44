//! TOML serialization.
//!
//! Serialization happens in two steps. [`ValueSerializer`] turns any
//! `T: Serialize` into a [`Value`] tree; the document [`Serializer`] then
//! requires that tree to be a table and renders it as TOML text.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tomlite::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let toml = to_string(&Point { x: 10, y: 10 }).unwrap();
//! assert_eq!(toml, "x = 10\ny = 10\n");
//! ```
//!
//! ## What can be serialized
//!
//! - integers that fit in `i64`, booleans, strings and chars
//! - sequences, tuples and byte slices, written as arrays
//! - structs and maps with string keys, written as tables
//! - unit variants as strings; other variants as one-key tables
//!
//! Floats and unit values have no representation and fail with
//! [`Error::UnsupportedType`]. `None` struct fields and map values are left
//! out of the output.

use crate::writer::write_document;
use crate::{Error, Result, Table, TomlOptions, Value};
use serde::ser::{self, Serialize, Serializer as _};
use tracing::debug;

/// The TOML document serializer.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{Serializer, TomlOptions};
/// use serde::Serialize;
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("y", 76);
/// map.insert("x", 22);
///
/// let mut serializer = Serializer::new(TomlOptions::default());
/// map.serialize(&mut serializer).unwrap();
/// assert_eq!(serializer.into_inner(), "x = 22\ny = 76\n");
/// ```
pub struct Serializer {
    output: String,
    options: TomlOptions,
}

impl Serializer {
    pub fn new(options: TomlOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn values(&self) -> ValueSerializer {
        ValueSerializer::new(&self.options)
    }

    fn write_root(&mut self, value: Option<Value>) -> Result<()> {
        match value {
            Some(Value::Table(table)) => {
                write_document(&mut self.output, &table, &self.options);
                debug!(
                    keys = table.len(),
                    bytes = self.output.len(),
                    "serialized TOML document"
                );
                Ok(())
            }
            Some(other) => Err(Error::UnsupportedType(format!(
                "top-level value must be a table, found {}",
                other.type_name()
            ))),
            None => Err(Error::unsupported_type(
                "top-level value must be a table, found none",
            )),
        }
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Document<'a, SerializeArray>;
    type SerializeTuple = Document<'a, SerializeArray>;
    type SerializeTupleStruct = Document<'a, SerializeArray>;
    type SerializeTupleVariant = Document<'a, SerializeTupleVariant>;
    type SerializeMap = Document<'a, SerializeTable>;
    type SerializeStruct = Document<'a, SerializeTable>;
    type SerializeStructVariant = Document<'a, SerializeStructVariant>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        let value = self.values().serialize_bool(v)?;
        self.write_root(value)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        let value = self.values().serialize_i64(v)?;
        self.write_root(value)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        let value = self.values().serialize_u64(v)?;
        self.write_root(value)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        let value = self.values().serialize_f64(v)?;
        self.write_root(value)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let value = self.values().serialize_char(v)?;
        self.write_root(value)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        let value = self.values().serialize_str(v)?;
        self.write_root(value)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        let value = self.values().serialize_bytes(v)?;
        self.write_root(value)
    }

    fn serialize_none(self) -> Result<()> {
        self.write_root(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        let value = self.values().serialize_unit()?;
        self.write_root(value)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        let value = self.values().serialize_unit_struct(name)?;
        self.write_root(value)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        let value = self
            .values()
            .serialize_unit_variant(name, variant_index, variant)?;
        self.write_root(value)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = self
            .values()
            .serialize_newtype_variant(name, variant_index, variant, value)?;
        self.write_root(value)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let inner = self.values().serialize_seq(len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        let inner = self.values().serialize_tuple(len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        let inner = self.values().serialize_tuple_struct(name, len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let inner = self
            .values()
            .serialize_tuple_variant(name, variant_index, variant, len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        let inner = self.values().serialize_map(len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        let inner = self.values().serialize_struct(name, len)?;
        Ok(Document { ser: self, inner })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let inner = self
            .values()
            .serialize_struct_variant(name, variant_index, variant, len)?;
        Ok(Document { ser: self, inner })
    }
}

/// A compound value being collected at the top level of a document.
///
/// Fields are gathered by the value-level serializer `S`; `end` hands the
/// finished value to the document writer.
pub struct Document<'a, S> {
    ser: &'a mut Serializer,
    inner: S,
}

impl<'a> ser::SerializeSeq for Document<'a, SerializeArray> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeSeq::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeTuple for Document<'a, SerializeArray> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeSeq::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeTupleStruct for Document<'a, SerializeArray> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeSeq::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeTupleVariant for Document<'a, SerializeTupleVariant> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeTupleVariant::serialize_field(&mut self.inner, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeTupleVariant::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeMap for Document<'a, SerializeTable> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeMap::serialize_key(&mut self.inner, key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeMap::serialize_value(&mut self.inner, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeMap::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeStruct for Document<'a, SerializeTable> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeStruct::end(self.inner)?;
        self.ser.write_root(value)
    }
}

impl<'a> ser::SerializeStructVariant for Document<'a, SerializeStructVariant> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStructVariant::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<()> {
        let value = ser::SerializeStructVariant::end(self.inner)?;
        self.ser.write_root(value)
    }
}

/// Serializes any `T: Serialize` into a [`Value`].
///
/// `Ok(None)` is returned for `None`, which TOML cannot represent; containers
/// decide whether to skip the entry or fail.
#[derive(Clone, Copy, Debug)]
pub struct ValueSerializer {
    depth: usize,
    max_depth: usize,
    sort_map_keys: bool,
}

impl ValueSerializer {
    pub fn new(options: &TomlOptions) -> Self {
        ValueSerializer {
            depth: 0,
            max_depth: options.max_depth,
            sort_map_keys: options.sort_map_keys,
        }
    }

    /// Serializer for the children of a container one level down.
    fn nested(self) -> Result<Self> {
        if self.depth >= self.max_depth {
            return Err(Error::UnsupportedType(format!(
                "value nested deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(ValueSerializer {
            depth: self.depth + 1,
            ..self
        })
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut table = Table::with_capacity(1);
    table.insert(key.to_string(), value);
    Value::Table(table)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Boolean(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Number(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_i64(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|n| Some(Value::Number(n)))
            .map_err(|_| Error::UnsupportedType(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, _v: f64) -> Result<Option<Value>> {
        Err(Error::unsupported_type(
            "floating-point values are not supported",
        ))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        Ok(Some(Value::Array(
            v.iter().map(|b| Value::Number((*b).into())).collect(),
        )))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Err(Error::unsupported_type("unit values are not supported"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Option<Value>> {
        Err(Error::UnsupportedType(format!(
            "unit struct `{}` is not supported",
            name
        )))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(self.nested()?)? {
            Some(inner) => Ok(Some(single_entry(variant, inner))),
            None => Err(Error::UnsupportedType(format!(
                "variant `{}` holds `None`",
                variant
            ))),
        }
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray> {
        Ok(SerializeArray {
            ser: self.nested()?,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeArray> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            array: self.nested()?.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeTable> {
        Ok(SerializeTable {
            ser: self.nested()?,
            table: Table::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeTable> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            table: self.nested()?.serialize_map(Some(len))?,
        })
    }
}

pub struct SerializeArray {
    ser: ValueSerializer,
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeArray {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(self.ser)? {
            Some(item) => {
                self.items.push(item);
                Ok(())
            }
            None => Err(Error::unsupported_type(
                "`None` cannot appear inside an array",
            )),
        }
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Array(self.items)))
    }
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Option<Value>> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeArray {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Option<Value>> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    array: SerializeArray,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.array, value)
    }

    fn end(self) -> Result<Option<Value>> {
        let items = Value::Array(self.array.items);
        Ok(Some(single_entry(self.variant, items)))
    }
}

pub struct SerializeTable {
    ser: ValueSerializer,
    table: Table,
    current_key: Option<String>,
}

impl SerializeTable {
    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(self.ser)? {
            self.table.insert(key, value);
        }
        Ok(())
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(self.ser)? {
            Some(Value::String(s)) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(mut self) -> Result<Option<Value>> {
        if self.ser.sort_map_keys {
            self.table.sort_keys();
        }
        Ok(Some(Value::Table(self.table)))
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Table(self.table)))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    table: SerializeTable,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(single_entry(self.variant, Value::Table(self.table.table))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{to_string, to_value};
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Flat {
        #[serde(rename = "X")]
        x: i32,
        #[serde(rename = "Y")]
        y: i32,
    }

    #[test]
    fn test_struct_keeps_field_order() {
        #[derive(Serialize)]
        struct Order {
            zebra: u8,
            apple: bool,
            mango: &'static str,
        }

        let toml = to_string(&Order {
            zebra: 1,
            apple: true,
            mango: "ripe",
        })
        .unwrap();
        assert_eq!(toml, "zebra = 1\napple = true\nmango = \"ripe\"\n");
    }

    #[test]
    fn test_flat_struct() {
        assert_eq!(to_string(&Flat { x: 10, y: 10 }).unwrap(), "X = 10\nY = 10\n");
    }

    #[test]
    fn test_map_keys_are_sorted() {
        let mut map = std::collections::HashMap::new();
        map.insert("y".to_string(), 76);
        map.insert("x".to_string(), 22);
        assert_eq!(to_string(&map).unwrap(), "x = 22\ny = 76\n");
    }

    #[test]
    fn test_unsorted_map_option() {
        struct Pairs(Vec<(&'static str, i32)>);

        impl Serialize for Pairs {
            fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.collect_map(self.0.iter().cloned())
            }
        }

        let map = Pairs(vec![("b", 1), ("a", 2)]);
        let options = TomlOptions::new().with_sort_map_keys(false);
        let toml = crate::to_string_with_options(&map, &options).unwrap();
        assert_eq!(toml, "b = 1\na = 2\n");
    }

    #[test]
    fn test_none_fields_are_skipped() {
        #[derive(Serialize)]
        struct Partial {
            a: Option<i32>,
            b: Option<i32>,
        }

        let toml = to_string(&Partial { a: None, b: Some(3) }).unwrap();
        assert_eq!(toml, "b = 3\n");
    }

    #[test]
    fn test_none_in_array_fails() {
        #[derive(Serialize)]
        struct Holes {
            items: Vec<Option<i32>>,
        }

        let err = to_string(&Holes {
            items: vec![Some(1), None],
        })
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_float_fails() {
        #[derive(Serialize)]
        struct Price {
            amount: f64,
        }

        let err = to_string(&Price { amount: 1.5 }).unwrap_err();
        assert_eq!(err.category(), crate::Category::Encode);
    }

    #[test]
    fn test_large_u64_fails() {
        let mut map = BTreeMap::new();
        map.insert("big", u64::MAX);
        assert!(matches!(to_string(&map), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_top_level_must_be_table() {
        assert!(matches!(to_string(&42), Err(Error::UnsupportedType(_))));
        assert!(matches!(to_string(&vec![1, 2]), Err(Error::UnsupportedType(_))));
        assert!(matches!(to_string(&None::<i32>), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut map = BTreeMap::new();
        map.insert(1, 2);
        assert!(to_string(&map).is_err());
    }

    #[test]
    fn test_enums() {
        #[derive(Serialize)]
        enum Mode {
            Fast,
            Limited(u32),
            Window { width: u32 },
        }

        #[derive(Serialize)]
        struct Config {
            a: Mode,
            b: Mode,
            c: Mode,
        }

        let value = to_value(&Config {
            a: Mode::Fast,
            b: Mode::Limited(3),
            c: Mode::Window { width: 80 },
        })
        .unwrap();

        assert_eq!(value.get("a"), Some(&Value::from("Fast")));
        assert_eq!(
            value.get("b").and_then(|b| b.get("Limited")),
            Some(&Value::Number(3))
        );
        assert_eq!(
            value
                .get("c")
                .and_then(|c| c.get("Window"))
                .and_then(|w| w.get("width")),
            Some(&Value::Number(80))
        );
    }

    #[test]
    fn test_nested_sections() {
        #[derive(Serialize)]
        struct Server {
            host: String,
            port: u16,
        }

        #[derive(Serialize)]
        struct Plugin {
            name: String,
        }

        #[derive(Serialize)]
        struct Config {
            server: Server,
            title: String,
            plugins: Vec<Plugin>,
            ports: Vec<u16>,
        }

        let config = Config {
            server: Server {
                host: "localhost".to_string(),
                port: 8080,
            },
            title: "demo".to_string(),
            plugins: vec![
                Plugin {
                    name: "auth".to_string(),
                },
                Plugin {
                    name: "cache".to_string(),
                },
            ],
            ports: vec![80, 443],
        };

        let expected = "\
title = \"demo\"
ports = [80, 443]

[server]
host = \"localhost\"
port = 8080

[[plugins]]
name = \"auth\"

[[plugins]]
name = \"cache\"
";
        assert_eq!(to_string(&config).unwrap(), expected);
    }

    #[test]
    fn test_depth_limit() {
        let nested = vec![vec![vec![1]]];
        let options = TomlOptions::new().with_max_depth(2);
        let mut map = BTreeMap::new();
        map.insert("deep", nested);
        assert!(crate::to_string_with_options(&map, &options).is_err());
        assert!(crate::to_string_with_options(&map, &TomlOptions::new()).is_ok());
    }
}

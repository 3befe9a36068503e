//! Conversion of any `Serialize` value into a [`serde_json::Value`] that
//! never fails.
//!
//! Whatever JSON cannot carry natively is replaced by its string form:
//! non-finite floats become `"NaN"`/`"inf"`/`"-inf"`, integers wider than 64
//! bits become decimal strings, non-string map keys become their JSON text,
//! and a value whose `Serialize` impl reports an error becomes the error
//! message. The replacement is local, so siblings of a bad value survive.

use std::fmt;

use serde::ser::{self, Serialize};
use serde_json::{Map, Number, Value};

/// Error raised by a `Serialize` impl while converting.
#[derive(Debug)]
pub struct Error(String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error(msg.to_string())
    }
}

/// Converts `value` to JSON, substituting strings for anything unrepresentable.
pub fn to_value<T>(value: &T) -> Value
where
    T: ?Sized + Serialize,
{
    value
        .serialize(Serializer)
        .unwrap_or_else(|err| Value::String(err.0))
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_owned(), value);
    Value::Object(map)
}

/// Serializer producing a [`Value`]; see the module docs for the fallbacks.
pub struct Serializer;

impl ser::Serializer for Serializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        Ok(i64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        Ok(u64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        if v.is_finite() {
            Ok(Value::from(v))
        } else {
            Ok(Value::String(v.to_string()))
        }
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        Ok(Number::from_f64(v).map_or_else(|| Value::String(v.to_string()), Value::Number))
    }

    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value, Error>
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
    ) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_entry(variant, to_value(value)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, Error> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, Error> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap, Error> {
        Ok(SerializeMap {
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap, Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant, Error> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::new(),
        })
    }
}

pub struct SerializeVec {
    vec: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(single_entry(self.name, Value::Array(self.vec)))
    }
}

pub struct SerializeMap {
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key_string(to_value(key)));
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error("map value serialized before its key".to_owned()))?;
        self.map.insert(key, to_value(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_owned(), to_value(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeMap::end(self)
    }
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map<String, Value>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_owned(), to_value(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(single_entry(self.name, Value::Object(self.map)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use parsett_core::{ParsedTitle, Resolution};
    use serde::Serializer as _;
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(ser::Error::custom("Unserializable"))
        }
    }

    #[derive(Serialize)]
    struct Mixed {
        name: &'static str,
        ratio: f64,
        bad: Unserializable,
        big: i128,
        good: Vec<u8>,
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Line(u8, u8),
        Rect { w: u8, h: u8 },
    }

    #[test]
    fn matches_serde_json_for_plain_values() {
        let mut parsed = ParsedTitle::new("The Matrix");
        parsed.year = Some(1999);
        parsed.resolution = Some(Resolution::FHD1080);

        assert_eq!(to_value(&parsed), serde_json::to_value(&parsed).unwrap());
        assert_eq!(
            to_value(&parsed),
            json!({"title": "The Matrix", "year": 1999, "resolution": "1080p"})
        );
    }

    #[test]
    fn non_finite_floats_become_strings() {
        assert_eq!(to_value(&f64::NAN), json!("NaN"));
        assert_eq!(to_value(&f64::INFINITY), json!("inf"));
        assert_eq!(to_value(&f64::NEG_INFINITY), json!("-inf"));
        assert_eq!(to_value(&f32::NAN), json!("NaN"));
        assert_eq!(to_value(&1.5f64), json!(1.5));
    }

    #[test]
    fn wide_integers_become_strings_only_when_needed() {
        assert_eq!(to_value(&42i128), json!(42));
        assert_eq!(to_value(&u128::MAX), json!(u128::MAX.to_string()));
        assert_eq!(to_value(&i128::MIN), json!(i128::MIN.to_string()));
    }

    #[test]
    fn failing_value_is_replaced_in_place() {
        let mixed = Mixed {
            name: "x",
            ratio: f64::NAN,
            bad: Unserializable,
            big: i128::MAX,
            good: vec![1, 2],
        };

        assert_eq!(
            to_value(&mixed),
            json!({
                "name": "x",
                "ratio": "NaN",
                "bad": "Unserializable",
                "big": i128::MAX.to_string(),
                "good": [1, 2],
            })
        );
        assert_eq!(to_value(&Unserializable), json!("Unserializable"));
    }

    #[test]
    fn non_string_map_keys_are_stringified() {
        let mut by_number = BTreeMap::new();
        by_number.insert(1u32, "one");
        assert_eq!(to_value(&by_number), json!({"1": "one"}));

        let mut by_pair = BTreeMap::new();
        by_pair.insert((1u8, 2u8), true);
        assert_eq!(to_value(&by_pair), json!({"[1,2]": true}));
    }

    #[test]
    fn enum_variants_follow_external_tagging() {
        assert_eq!(to_value(&Shape::Point), json!("Point"));
        assert_eq!(to_value(&Shape::Circle(f64::INFINITY)), json!({"Circle": "inf"}));
        assert_eq!(to_value(&Shape::Line(1, 2)), json!({"Line": [1, 2]}));
        assert_eq!(to_value(&Shape::Rect { w: 3, h: 4 }), json!({"Rect": {"w": 3, "h": 4}}));
    }

    #[test]
    fn options_and_units() {
        assert_eq!(to_value(&Option::<u8>::None), Value::Null);
        assert_eq!(to_value(&Some('c')), json!("c"));
        assert_eq!(to_value(&()), Value::Null);
        assert_eq!(Serializer.serialize_bytes(&[7, 8]).unwrap(), json!([7, 8]));
    }
}

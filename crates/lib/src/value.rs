//! Dynamically typed values held by a store.
//!
//! Values follow the JSON data model: null, bool, number, string, array,
//! and string-keyed object. [`Value`] is `serde_json::Value`, so its
//! accessors (`as_str`, `as_i64`, `as_array`, ...) are the shape-specific
//! conversion helpers. [`to_value`] and [`from_value`] convert between a
//! `Value` and any serde type.
//!
//! JSON has no NaN or infinity. `serde_json` quietly writes such floats as
//! `null`, so [`to_value`] rejects them up front instead.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser;

pub use serde_json::{Map, Value, json};

use crate::error::{Result, StoreError};

/// Convert a serializable type into a [`Value`].
///
/// Fails with an encode error when `value` has no JSON representation,
/// for example a map whose keys do not serialize as strings or a NaN or
/// infinite float anywhere inside it.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
  value.serialize(FiniteCheck).map_err(StoreError::Serialize)?;
  serde_json::to_value(value).map_err(StoreError::Serialize)
}

/// Convert a [`Value`] into a concrete type.
///
/// Fails with a decode error when the value does not fit `T`.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
  T::deserialize(value).map_err(StoreError::Parse)
}

type CheckResult = std::result::Result<(), serde_json::Error>;

fn check_float(v: f64) -> CheckResult {
  if v.is_finite() {
    Ok(())
  } else {
    Err(ser::Error::custom(format!("float {v} has no JSON representation")))
  }
}

/// Serializer that visits a value only to reject non-finite floats.
#[derive(Clone, Copy)]
struct FiniteCheck;

impl ser::Serializer for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;
  type SerializeSeq = Self;
  type SerializeTuple = Self;
  type SerializeTupleStruct = Self;
  type SerializeTupleVariant = Self;
  type SerializeMap = Self;
  type SerializeStruct = Self;
  type SerializeStructVariant = Self;

  fn serialize_bool(self, _: bool) -> CheckResult {
    Ok(())
  }

  fn serialize_i8(self, _: i8) -> CheckResult {
    Ok(())
  }

  fn serialize_i16(self, _: i16) -> CheckResult {
    Ok(())
  }

  fn serialize_i32(self, _: i32) -> CheckResult {
    Ok(())
  }

  fn serialize_i64(self, _: i64) -> CheckResult {
    Ok(())
  }

  fn serialize_i128(self, _: i128) -> CheckResult {
    Ok(())
  }

  fn serialize_u8(self, _: u8) -> CheckResult {
    Ok(())
  }

  fn serialize_u16(self, _: u16) -> CheckResult {
    Ok(())
  }

  fn serialize_u32(self, _: u32) -> CheckResult {
    Ok(())
  }

  fn serialize_u64(self, _: u64) -> CheckResult {
    Ok(())
  }

  fn serialize_u128(self, _: u128) -> CheckResult {
    Ok(())
  }

  fn serialize_f32(self, v: f32) -> CheckResult {
    check_float(f64::from(v))
  }

  fn serialize_f64(self, v: f64) -> CheckResult {
    check_float(v)
  }

  fn serialize_char(self, _: char) -> CheckResult {
    Ok(())
  }

  fn serialize_str(self, _: &str) -> CheckResult {
    Ok(())
  }

  fn serialize_bytes(self, _: &[u8]) -> CheckResult {
    Ok(())
  }

  fn serialize_none(self) -> CheckResult {
    Ok(())
  }

  fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> CheckResult {
    value.serialize(self)
  }

  fn serialize_unit(self) -> CheckResult {
    Ok(())
  }

  fn serialize_unit_struct(self, _: &'static str) -> CheckResult {
    Ok(())
  }

  fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> CheckResult {
    Ok(())
  }

  fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _: &'static str, value: &T) -> CheckResult {
    value.serialize(self)
  }

  fn serialize_newtype_variant<T: Serialize + ?Sized>(
    self,
    _: &'static str,
    _: u32,
    _: &'static str,
    value: &T,
  ) -> CheckResult {
    value.serialize(self)
  }

  fn serialize_seq(self, _: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_tuple(self, _: usize) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_tuple_struct(self, _: &'static str, _: usize) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_tuple_variant(
    self,
    _: &'static str,
    _: u32,
    _: &'static str,
    _: usize,
  ) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_map(self, _: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_struct(self, _: &'static str, _: usize) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }

  fn serialize_struct_variant(
    self,
    _: &'static str,
    _: u32,
    _: &'static str,
    _: usize,
  ) -> std::result::Result<Self, serde_json::Error> {
    Ok(self)
  }
}

impl ser::SerializeSeq for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeTuple for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeTupleStruct for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeTupleVariant for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeMap for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> CheckResult {
    key.serialize(*self)
  }

  fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeStruct for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

impl ser::SerializeStructVariant for FiniteCheck {
  type Ok = ();
  type Error = serde_json::Error;

  fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> CheckResult {
    value.serialize(*self)
  }

  fn end(self) -> CheckResult {
    Ok(())
  }
}

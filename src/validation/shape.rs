//! Classifies a serializable value by its top-level serde shape.
//!
//! A struct and a map both serialize to a JSON object, so the validator
//! cannot tell them apart after the fact. The probe drives `Serialize`
//! just far enough to see which entry point the value picks.

use serde::Serialize;
use serde::ser::{self, Impossible};
use std::fmt;

/// Top-level serde shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Record,
    Map,
    Sequence,
    Other,
}

/// Returns the shape of `value`, looking through newtypes and `Some`.
pub(crate) fn probe<T: Serialize + ?Sized>(value: &T) -> Shape {
    match value.serialize(ShapeProbe) {
        Ok(shape) | Err(Probe::Found(shape)) => shape,
        Err(Probe::Custom(_)) => Shape::Other,
    }
}

/// Compound shapes end the walk early through the error channel.
#[derive(Debug)]
enum Probe {
    Found(Shape),
    Custom(String),
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(shape) => write!(f, "found {shape:?}"),
            Self::Custom(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for Probe {}

impl ser::Error for Probe {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

struct ShapeProbe;

type Never = Impossible<Shape, Probe>;

impl ser::Serializer for ShapeProbe {
    type Ok = Shape;
    type Error = Probe;
    type SerializeSeq = Never;
    type SerializeTuple = Never;
    type SerializeTupleStruct = Never;
    type SerializeTupleVariant = Never;
    type SerializeMap = Never;
    type SerializeStruct = Never;
    type SerializeStructVariant = Never;

    fn serialize_bool(self, _v: bool) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_i8(self, _v: i8) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_i16(self, _v: i16) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_i32(self, _v: i32) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_i64(self, _v: i64) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_u8(self, _v: u8) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_u16(self, _v: u16) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_u32(self, _v: u32) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_u64(self, _v: u64) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_f32(self, _v: f32) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_f64(self, _v: f64) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_char(self, _v: char) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_str(self, _v: &str) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, Probe> {
        Ok(Shape::Sequence)
    }

    fn serialize_none(self) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Shape, Probe> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Shape, Probe> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Shape, Probe> {
        Ok(Shape::Other)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Sequence))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Sequence))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Sequence))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Other))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Map))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Record))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Never, Probe> {
        Err(Probe::Found(Shape::Other))
    }
}

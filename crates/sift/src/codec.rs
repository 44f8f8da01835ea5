//! Scalar codecs: converting one primitive type to and from its string form.
//!
//! A codec is injected into each scalar-based field at construction time. It
//! must satisfy `parse(format(v)) == Ok(v)` for every value the field can
//! bind, which is what makes the field's round-trip law hold.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::{self, CodecError};
use crate::traits::FilterEnum;

/// Parses and formats values of type `T`.
pub trait ScalarCodec<T>: Send + Sync {
    fn parse(&self, raw: &str) -> Result<T, CodecError>;

    fn format(&self, value: &T) -> String;
}

/// Codec for any type with matching [`FromStr`] and [`Display`] impls.
///
/// Parse failures report the message code given at construction.
pub struct FromStrCodec<T> {
    message: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrCodec<T> {
    pub fn new(message: &'static str) -> Self {
        FromStrCodec {
            message,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for FromStrCodec<T> {
    fn clone(&self) -> Self {
        FromStrCodec::new(self.message)
    }
}

impl<T> ScalarCodec<T> for FromStrCodec<T>
where
    T: FromStr + Display,
{
    fn parse(&self, raw: &str) -> Result<T, CodecError> {
        raw.trim()
            .parse()
            .map_err(|_| CodecError::new(self.message))
    }

    fn format(&self, value: &T) -> String {
        value.to_string()
    }
}

/// Integer codec (`error.number`).
pub fn number<T>() -> FromStrCodec<T>
where
    T: FromStr + Display,
{
    FromStrCodec::new(error::NUMBER)
}

/// Finite `f64` codec (`error.real`).
///
/// NaN and infinities are rejected; they would break equality predicates and
/// the round-trip law.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalCodec;

impl ScalarCodec<f64> for DecimalCodec {
    fn parse(&self, raw: &str) -> Result<f64, CodecError> {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(CodecError::new(error::REAL)),
        }
    }

    fn format(&self, value: &f64) -> String {
        value.to_string()
    }
}

pub fn decimal() -> DecimalCodec {
    DecimalCodec
}

/// Boolean codec accepting exactly `true` and `false` (`error.boolean`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl ScalarCodec<bool> for BooleanCodec {
    fn parse(&self, raw: &str) -> Result<bool, CodecError> {
        match raw.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CodecError::new(error::BOOLEAN)),
        }
    }

    fn format(&self, value: &bool) -> String {
        value.to_string()
    }
}

pub fn boolean() -> BooleanCodec {
    BooleanCodec
}

/// Identity codec for text. Text is never trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ScalarCodec<String> for TextCodec {
    fn parse(&self, raw: &str) -> Result<String, CodecError> {
        Ok(raw.to_string())
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}

pub fn text() -> TextCodec {
    TextCodec
}

/// Codec for a [`FilterEnum`] by variant name (`error.enum`, with the
/// accepted names as arguments).
pub struct EnumCodec<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> Default for EnumCodec<E> {
    fn default() -> Self {
        EnumCodec {
            _marker: PhantomData,
        }
    }
}

impl<E> Clone for EnumCodec<E> {
    fn clone(&self) -> Self {
        EnumCodec::default()
    }
}

impl<E: FilterEnum> ScalarCodec<E> for EnumCodec<E> {
    fn parse(&self, raw: &str) -> Result<E, CodecError> {
        E::from_name(raw.trim()).ok_or_else(|| {
            CodecError::new(error::ENUM).with_args(E::variants().iter().map(|v| v.name()))
        })
    }

    fn format(&self, value: &E) -> String {
        value.name().to_string()
    }
}

pub fn enumeration<E: FilterEnum>() -> EnumCodec<E> {
    EnumCodec::default()
}

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::encoding::EncodedText;

/// A candidate value for a column, as handed over by the record layer.
///
/// [`Value::Null`] represents the absence of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Blob(Vec<u8>),
    Boolean(bool),
    Decimal(Decimal),
    EncodedText(EncodedText),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Null,
    Text(String),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
}

/// The textual or binary representation of a [`Value`], as it would be sent to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation<'a> {
    /// Raw bytes.
    Bytes(&'a [u8]),
    /// Text in an encoding other than UTF-8.
    Encoded(&'a EncodedText),
    /// UTF-8 text.
    Text(Cow<'a, str>),
}

impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::Text(s.into()))
    }
}

// implements `From<$ty>` and an `as_*` accessor for a variant
macro_rules! impl_conv_for_value {
    ($variant:ident, $ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl Value {
            /// Attempts to extract a reference to the inner value if it matches the variant.
            pub fn $name(&self) -> Option<&$ty> {
                if let Value::$variant(v) = self {
                    Some(v)
                } else {
                    None
                }
            }
        }
    };
}

impl_conv_for_value!(Blob, Vec<u8>, as_blob);
impl_conv_for_value!(Boolean, bool, as_boolean);
impl_conv_for_value!(Decimal, Decimal, as_decimal);
impl_conv_for_value!(EncodedText, EncodedText, as_encoded_text);
impl_conv_for_value!(Int8, i8, as_int8);
impl_conv_for_value!(Int16, i16, as_int16);
impl_conv_for_value!(Int32, i32, as_int32);
impl_conv_for_value!(Int64, i64, as_int64);
impl_conv_for_value!(Text, String, as_text);
impl_conv_for_value!(Uint8, u8, as_uint8);
impl_conv_for_value!(Uint16, u16, as_uint16);
impl_conv_for_value!(Uint32, u32, as_uint32);
impl_conv_for_value!(Uint64, u64, as_uint64);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.to_vec())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl Value {
    /// Checks if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Blob(_) => "Blob",
            Value::Boolean(_) => "Boolean",
            Value::Decimal(_) => "Decimal",
            Value::EncodedText(_) => "EncodedText",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Null => "Null",
            Value::Text(_) => "Text",
            Value::Uint8(_) => "Uint8",
            Value::Uint16(_) => "Uint16",
            Value::Uint32(_) => "Uint32",
            Value::Uint64(_) => "Uint64",
        }
    }

    /// Returns the representation the value would be written with, or `None` for [`Value::Null`].
    ///
    /// Scalars are rendered to text.
    pub fn representation(&self) -> Option<Representation<'_>> {
        let repr = match self {
            Value::Null => return None,
            Value::Blob(bytes) => Representation::Bytes(bytes),
            Value::EncodedText(text) => Representation::Encoded(text),
            Value::Text(text) => Representation::Text(Cow::Borrowed(text)),
            scalar => Representation::Text(Cow::Owned(scalar.to_string())),
        };
        Some(repr)
    }

    /// Returns the numeric interpretation of the value, if there is one.
    ///
    /// Text is parsed, accepting surrounding whitespace and scientific notation.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Int8(n) => Some(Decimal::from(*n)),
            Value::Int16(n) => Some(Decimal::from(*n)),
            Value::Int32(n) => Some(Decimal::from(*n)),
            Value::Int64(n) => Some(Decimal::from(*n)),
            Value::Uint8(n) => Some(Decimal::from(*n)),
            Value::Uint16(n) => Some(Decimal::from(*n)),
            Value::Uint32(n) => Some(Decimal::from(*n)),
            Value::Uint64(n) => Some(Decimal::from(*n)),
            Value::Text(text) => parse_decimal(text),
            Value::EncodedText(text) => text.decode().ok().as_deref().and_then(parse_decimal),
            Value::Blob(_) | Value::Boolean(_) | Value::Null => None,
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::EncodedText(text) => write!(f, "{}", text.decode_lossy()),
            Value::Int8(n) => write!(f, "{n}"),
            Value::Int16(n) => write!(f, "{n}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Null => write!(f, "NULL"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Uint8(n) => write!(f, "{n}"),
            Value::Uint16(n) => write!(f, "{n}"),
            Value::Uint32(n) => write!(f, "{n}"),
            Value::Uint64(n) => write!(f, "{n}"),
        }
    }
}

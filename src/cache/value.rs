//! Cache Value Module
//!
//! Models the payload types the facade accepts and the conversions applied
//! when reading them back.

use std::fmt;

use crate::error::{CacheError, Result};

// == Cache Value ==
/// A value accepted by [`Cache::store`](crate::cache::Cache::store).
///
/// All variants are written to the store as opaque bytes: text as UTF-8,
/// numbers as their decimal text form. Reading back is untyped; the caller
/// picks a converter.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Signed integer, encoded as decimal text
    Int(i64),
    /// Floating-point number, encoded as decimal text
    Float(f64),
}

impl CacheValue {
    // == Encoding ==
    /// Encodes the value to the bytes written into the store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CacheValue::Text(s) => s.into_bytes(),
            CacheValue::Bytes(b) => b,
            CacheValue::Int(i) => i.to_string().into_bytes(),
            CacheValue::Float(f) => f.to_string().into_bytes(),
        }
    }
}

/// Argument-snapshot form used by the call history: text is quoted, bytes
/// print as a byte list, numbers print bare.
impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Text(s) => write!(f, "{s:?}"),
            CacheValue::Bytes(b) => write!(f, "{b:?}"),
            CacheValue::Int(i) => write!(f, "{i}"),
            CacheValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}

// == Converters ==
/// Decodes stored bytes as UTF-8 text.
pub fn as_text(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| CacheError::ValueConversion(e.to_string()))
}

/// Parses stored bytes as a decimal integer.
pub fn as_int(raw: Vec<u8>) -> Result<i64> {
    as_text(raw)?
        .parse()
        .map_err(|e: std::num::ParseIntError| CacheError::ValueConversion(e.to_string()))
}

/// Parses stored bytes as a decimal float.
pub fn as_float(raw: Vec<u8>) -> Result<f64> {
    as_text(raw)?
        .parse()
        .map_err(|e: std::num::ParseFloatError| CacheError::ValueConversion(e.to_string()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_encoding() {
        let value = CacheValue::from("Hello");
        assert_eq!(value.into_bytes(), b"Hello".to_vec());
    }

    #[test]
    fn test_empty_text_encoding() {
        let value = CacheValue::from("");
        assert_eq!(value.into_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn test_bytes_encoding_passthrough() {
        let raw = vec![0u8, 159, 146, 150];
        let value = CacheValue::from(raw.clone());
        assert_eq!(value.into_bytes(), raw);
    }

    #[test]
    fn test_int_encoding_decimal() {
        assert_eq!(CacheValue::from(42i64).into_bytes(), b"42".to_vec());
        assert_eq!(CacheValue::from(-7i64).into_bytes(), b"-7".to_vec());
    }

    #[test]
    fn test_float_encoding_decimal() {
        assert_eq!(CacheValue::from(1.5f64).into_bytes(), b"1.5".to_vec());
    }

    #[test]
    fn test_display_snapshots() {
        assert_eq!(CacheValue::from("Hello").to_string(), "\"Hello\"");
        assert_eq!(CacheValue::from(42i64).to_string(), "42");
        assert_eq!(CacheValue::from(vec![1u8, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn test_as_text_round_trip() {
        assert_eq!(as_text(b"Hello".to_vec()).unwrap(), "Hello");
        assert_eq!(as_text(Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_as_text_invalid_utf8() {
        let result = as_text(vec![0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::ValueConversion(_))));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(as_int(b"42".to_vec()).unwrap(), 42);
        assert_eq!(as_int(b"-7".to_vec()).unwrap(), -7);
        assert!(matches!(
            as_int(b"forty-two".to_vec()),
            Err(CacheError::ValueConversion(_))
        ));
    }

    #[test]
    fn test_as_float() {
        assert_eq!(as_float(b"1.5".to_vec()).unwrap(), 1.5);
        assert!(matches!(
            as_float(b"pi".to_vec()),
            Err(CacheError::ValueConversion(_))
        ));
    }
}

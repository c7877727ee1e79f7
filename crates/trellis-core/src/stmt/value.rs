use crate::Result;

use std::fmt;

/// A scalar value flowing into a statement (parameter) or out of one
/// (scanned row cell).
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for values that read as "not provided": null, zero, the empty
    /// string. Key columns carrying such a value on insert are treated as
    /// awaiting auto-generation.
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Null => true,
            Self::I64(v) => *v == 0,
            Self::String(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => bail!("cannot convert {self:?} to bool"),
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(*v),
            _ => bail!("cannot convert {self:?} to i64"),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(*v),
            Self::I64(v) => Ok(*v as f64),
            _ => bail!("cannot convert {self:?} to f64"),
        }
    }

    pub fn to_string_value(&self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v.clone()),
            _ => bail!("cannot convert {self:?} to string"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
            Self::String(v) => v.fmt(f),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Null => f.write_str("NULL"),
        }
    }
}

// === Conversions ===

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

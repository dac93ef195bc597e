use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A dynamically typed value flowing through an intercepted call: an argument, a return value
/// or a value produced by the value generator.
///
/// [Value::Null] is a legal value. The absence of a value is expressed with `Option<Value>`.
///
/// Equality is reflexive: a [Value::Float] holding `NaN` equals any other `NaN`, and `0.0`
/// equals `-0.0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// The null reference
    #[default]
    Null,

    /// A boolean
    Bool(bool),

    /// A signed integer
    Int(i64),

    /// An unsigned integer
    UInt(u64),

    /// A floating point number
    Float(f64),

    /// A single character
    Char(char),

    /// A string
    Str(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// An ordered sequence of values
    List(Vec<Value>),

    /// An instance of a complex type, given by its fields
    Object {
        /// Name of the type of the instance
        type_name: String,

        /// Fields of the instance, by name
        fields: BTreeMap<String, Value>,
    },
}

impl Value {
    /// Check if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the inner string if the value is a [Value::Str].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Get the inner integer if the value is a [Value::Int].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Int(left), Value::Int(right)) => left == right,
            (Value::UInt(left), Value::UInt(right)) => left == right,
            (Value::Float(left), Value::Float(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Value::Char(left), Value::Char(right)) => left == right,
            (Value::Str(left), Value::Str(right)) => left == right,
            (Value::Bytes(left), Value::Bytes(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (
                Value::Object {
                    type_name: left_type_name,
                    fields: left_fields,
                },
                Value::Object {
                    type_name: right_type_name,
                    fields: right_fields,
                },
            ) => left_type_name == right_type_name && left_fields == right_fields,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

use serde::{Deserialize, Serialize};

use crate::entities::Value;

/// A value to write in a by-reference argument slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentValue {
    /// Position of the argument
    pub index: usize,

    /// Value to write
    pub value: Value,
}

impl ArgumentValue {
    /// ArgumentValue factory
    pub fn new(index: usize, value: Value) -> Self {
        Self { index, value }
    }
}

/// The outcome of resolving an intercepted call, applied to every matching call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallResultData {
    /// Value to return, `None` when the call should not return anything
    pub return_value: Option<Value>,

    /// Values to write in the by-reference argument slots, by position
    pub argument_values: Vec<ArgumentValue>,
}

impl CallResultData {
    /// CallResultData factory
    pub fn new(return_value: Option<Value>, argument_values: Vec<ArgumentValue>) -> Self {
        Self {
            return_value,
            argument_values,
        }
    }

    /// Create a result that only returns the given value.
    pub fn returning(value: Value) -> Self {
        Self::new(Some(value), vec![])
    }
}

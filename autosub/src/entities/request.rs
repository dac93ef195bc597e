use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::entities::{ParameterDescriptor, PropertyDescriptor, TypeDescriptor, Value};

/// A request sent to the value generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueRequest {
    /// A value of the given type
    Type(TypeDescriptor),

    /// A value for the given property or indexer
    Member(PropertyDescriptor),

    /// A value for the given parameter
    Parameter(ParameterDescriptor),
}

impl ValueRequest {
    /// Type of the value expected by this request.
    pub fn requested_type(&self) -> &TypeDescriptor {
        match self {
            ValueRequest::Type(type_descriptor) => type_descriptor,
            ValueRequest::Member(property) => &property.property_type,
            ValueRequest::Parameter(parameter) => &parameter.parameter_type,
        }
    }
}

impl Display for ValueRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueRequest::Type(type_descriptor) => write!(f, "type {type_descriptor}"),
            ValueRequest::Member(property) => write!(f, "member {property}"),
            ValueRequest::Parameter(parameter) => write!(
                f,
                "parameter {} {}",
                parameter.parameter_type, parameter.name
            ),
        }
    }
}

/// Outcome of a successful resolution by the value generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The generator produced this value
    Value(Value),

    /// The generator was told to produce nothing for the request
    Omitted,
}

impl Resolution {
    /// Convert into the resolved value, `None` if the request was omitted.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolution::Value(value) => Some(value),
            Resolution::Omitted => None,
        }
    }
}

impl From<Value> for Resolution {
    fn from(value: Value) -> Self {
        Resolution::Value(value)
    }
}

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::entities::TypeDescriptor;

/// How an argument is passed to a member.
#[derive(
    strum::Display, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Passed by value, the callee can't change what the caller sees
    #[default]
    In,

    /// Passed by reference, read and possibly rewritten by the callee
    Ref,

    /// Passed by reference, only written by the callee
    Out,
}

/// A parameter of an intercepted member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Name of the parameter
    pub name: String,

    /// Type of the parameter, for by-reference parameters this is the referenced type
    pub parameter_type: TypeDescriptor,

    /// Passing mode of the parameter
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    /// Create a parameter passed by value.
    pub fn new<T: Into<String>>(name: T, parameter_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            kind: ParameterKind::In,
        }
    }

    /// Create a `ref` parameter.
    pub fn by_ref<T: Into<String>>(name: T, parameter_type: TypeDescriptor) -> Self {
        Self {
            kind: ParameterKind::Ref,
            ..Self::new(name, parameter_type)
        }
    }

    /// Create an `out` parameter.
    pub fn out<T: Into<String>>(name: T, parameter_type: TypeDescriptor) -> Self {
        Self {
            kind: ParameterKind::Out,
            ..Self::new(name, parameter_type)
        }
    }

    /// Check if the callee can write the argument back to the caller.
    pub fn is_by_ref(&self) -> bool {
        matches!(self.kind, ParameterKind::Ref | ParameterKind::Out)
    }
}

/// A property (or indexer) backing a getter call.
///
/// Requests targeting the property rather than its type let the value generator apply
/// property specific rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Type declaring the property
    pub declaring_type: TypeDescriptor,

    /// Name of the property, `Item` for the default indexer
    pub name: String,

    /// Type of the property
    pub property_type: TypeDescriptor,
}

impl PropertyDescriptor {
    /// PropertyDescriptor factory
    pub fn new<T: Into<String>>(
        declaring_type: TypeDescriptor,
        name: T,
        property_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            property_type,
        }
    }
}

impl Display for PropertyDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Shape of an intercepted call, given by the interception layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallShape {
    /// An ordinary method call
    Method,

    /// The getter of a property
    PropertyGet(PropertyDescriptor),

    /// The getter of an indexer, the index values are the call arguments
    IndexerGet(PropertyDescriptor),
}

/// Identity of an intercepted member.
///
/// Two instantiations of the same generic method with different type arguments are
/// different members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Type declaring the member
    pub declaring_type: TypeDescriptor,

    /// Name of the member (`get_Name` style names are expected for accessors)
    pub name: String,

    /// Type arguments of a generic method instantiation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeDescriptor>,

    /// Parameters of the member, ordered by position
    pub parameters: Vec<ParameterDescriptor>,

    /// Declared return type of the member
    pub return_type: TypeDescriptor,

    /// Shape of the call
    pub shape: CallShape,
}

impl MemberDescriptor {
    /// Create a parameterless method returning `void`.
    pub fn method<T: Into<String>>(declaring_type: TypeDescriptor, name: T) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            generic_arguments: vec![],
            parameters: vec![],
            return_type: TypeDescriptor::void(),
            shape: CallShape::Method,
        }
    }

    /// Create the getter of the given property.
    pub fn property_getter(property: PropertyDescriptor) -> Self {
        Self {
            declaring_type: property.declaring_type.clone(),
            name: format!("get_{}", property.name),
            generic_arguments: vec![],
            parameters: vec![],
            return_type: property.property_type.clone(),
            shape: CallShape::PropertyGet(property),
        }
    }

    /// Create the getter of the given indexer, taking the given index parameters.
    pub fn indexer_getter(property: PropertyDescriptor, indexes: Vec<ParameterDescriptor>) -> Self {
        Self {
            parameters: indexes,
            shape: CallShape::IndexerGet(property.clone()),
            ..Self::property_getter(property)
        }
    }

    /// Set the return type.
    pub fn returning(mut self, return_type: TypeDescriptor) -> Self {
        self.return_type = return_type;
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the type arguments of a generic method instantiation.
    pub fn with_generic_arguments(mut self, generic_arguments: Vec<TypeDescriptor>) -> Self {
        self.generic_arguments = generic_arguments;
        self
    }

    /// Check if at least one parameter is passed by reference.
    pub fn has_by_ref_parameters(&self) -> bool {
        self.parameters.iter().any(|p| p.is_by_ref())
    }
}

impl Display for MemberDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)?;
        if !self.generic_arguments.is_empty() {
            let arguments = self
                .generic_arguments
                .iter()
                .map(|argument| argument.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "<{arguments}>")?;
        }
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| match parameter.kind {
                ParameterKind::In => parameter.parameter_type.to_string(),
                kind => format!("{kind} {}", parameter.parameter_type),
            })
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "({parameters})")
    }
}

//! ## Call
//!
//! An intercepted invocation as seen by the values handler. The interception layer owns the
//! real call; it exposes it through the [Call] trait, or hands over a [CallDescriptor]
//! directly.

use thiserror::Error;

use crate::entities::{MemberDescriptor, TypeDescriptor, Value};

/// [Call] related errors.
#[derive(Error, Debug, PartialEq)]
pub enum CallError {
    /// The argument position does not exist for the called member
    #[error("argument index {index} is out of range for a call with {arguments_count} arguments")]
    ArgumentIndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of arguments of the call
        arguments_count: usize,
    },
}

/// One intercepted invocation against a substitute.
pub trait Call: Send {
    /// Identity of the called member.
    fn member(&self) -> &MemberDescriptor;

    /// Declared return type of the call.
    fn return_type(&self) -> &TypeDescriptor {
        &self.member().return_type
    }

    /// Current argument values, ordered by position.
    fn arguments(&self) -> &[Value];

    /// Argument values as they were when the invocation started.
    fn original_arguments(&self) -> &[Value];

    /// Overwrite the argument at the given position.
    fn set_argument(&mut self, index: usize, value: Value) -> Result<(), CallError>;

    /// Mark the call as returning the given value.
    fn set_return_value(&mut self, value: Value);

    /// Value returned by the call, if any.
    fn return_value(&self) -> Option<&Value>;
}

/// Plain [Call] implementation owning its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    member: MemberDescriptor,
    arguments: Vec<Value>,
    original_arguments: Vec<Value>,
    return_value: Option<Value>,
}

impl CallDescriptor {
    /// Create a call to the given member, the given arguments are also kept as the original
    /// arguments.
    pub fn new(member: MemberDescriptor, arguments: Vec<Value>) -> Self {
        Self {
            member,
            original_arguments: arguments.clone(),
            arguments,
            return_value: None,
        }
    }

    /// Create a call to a member that takes no arguments.
    pub fn without_arguments(member: MemberDescriptor) -> Self {
        Self::new(member, vec![])
    }

    /// Create a call whose arguments were already changed since the invocation started, as
    /// done by an interception layer that ran other handlers first.
    pub fn with_original_arguments(
        member: MemberDescriptor,
        arguments: Vec<Value>,
        original_arguments: Vec<Value>,
    ) -> Self {
        Self {
            member,
            arguments,
            original_arguments,
            return_value: None,
        }
    }
}

impl Call for CallDescriptor {
    fn member(&self) -> &MemberDescriptor {
        &self.member
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn original_arguments(&self) -> &[Value] {
        &self.original_arguments
    }

    fn set_argument(&mut self, index: usize, value: Value) -> Result<(), CallError> {
        let arguments_count = self.arguments.len();
        let slot = self
            .arguments
            .get_mut(index)
            .ok_or(CallError::ArgumentIndexOutOfRange {
                index,
                arguments_count,
            })?;
        *slot = value;

        Ok(())
    }

    fn set_return_value(&mut self, value: Value) {
        self.return_value = Some(value);
    }

    fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }
}

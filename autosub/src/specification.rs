//! ## Call specification
//!
//! Predicates recognizing calls that should share a cached result, and the factory building
//! them from an intercepted call.

use crate::call::Call;
use crate::entities::{MemberDescriptor, Value};

/// Decide if a call matches a previously resolved one.
pub trait CallSpecification: Send + Sync {
    /// Check if the given call satisfies this specification.
    fn is_satisfied_by(&self, call: &dyn Call) -> bool;
}

/// How the arguments of a call are taken into account by a [CallSpecification].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchArgs {
    /// Arguments must be equal to the arguments of the call, position by position
    AsSpecifiedInCall,

    /// Any arguments match
    Any,
}

/// Build [CallSpecification] from intercepted calls.
pub trait CallSpecificationFactory: Send + Sync {
    /// Create a specification matching calls to the same member as the given call.
    fn create_specification(
        &self,
        call: &dyn Call,
        match_args: MatchArgs,
    ) -> Box<dyn CallSpecification>;
}

/// Specification satisfied by calls to a member with the recorded arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactArgumentsSpecification {
    member: MemberDescriptor,
    arguments: Vec<Value>,
}

impl ExactArgumentsSpecification {
    /// ExactArgumentsSpecification factory
    pub fn new(member: MemberDescriptor, arguments: Vec<Value>) -> Self {
        Self { member, arguments }
    }
}

impl CallSpecification for ExactArgumentsSpecification {
    fn is_satisfied_by(&self, call: &dyn Call) -> bool {
        call.member() == &self.member && call.arguments() == self.arguments.as_slice()
    }
}

/// Specification satisfied by any call to a member.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyArgumentsSpecification {
    member: MemberDescriptor,
}

impl AnyArgumentsSpecification {
    /// AnyArgumentsSpecification factory
    pub fn new(member: MemberDescriptor) -> Self {
        Self { member }
    }
}

impl CallSpecification for AnyArgumentsSpecification {
    fn is_satisfied_by(&self, call: &dyn Call) -> bool {
        call.member() == &self.member
    }
}

/// [CallSpecificationFactory] building [ExactArgumentsSpecification] and
/// [AnyArgumentsSpecification].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCallSpecificationFactory;

impl DefaultCallSpecificationFactory {
    /// DefaultCallSpecificationFactory factory
    pub fn new() -> Self {
        Self
    }
}

impl CallSpecificationFactory for DefaultCallSpecificationFactory {
    fn create_specification(
        &self,
        call: &dyn Call,
        match_args: MatchArgs,
    ) -> Box<dyn CallSpecification> {
        match match_args {
            MatchArgs::AsSpecifiedInCall => Box::new(ExactArgumentsSpecification::new(
                call.member().clone(),
                call.arguments().to_vec(),
            )),
            MatchArgs::Any => Box::new(AnyArgumentsSpecification::new(call.member().clone())),
        }
    }
}

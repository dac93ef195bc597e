//! The entities describing intercepted calls, the requests sent to the value generator and
//! the results kept for later calls.

mod call_result;
mod member;
mod request;
mod type_descriptor;
mod value;

pub use call_result::{ArgumentValue, CallResultData};
pub use member::{
    CallShape, MemberDescriptor, ParameterDescriptor, ParameterKind, PropertyDescriptor,
};
pub use request::{Resolution, ValueRequest};
pub use type_descriptor::TypeDescriptor;
pub use value::Value;

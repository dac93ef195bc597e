//! Members of the `IService` interface used across the tests.

use autosub::entities::{MemberDescriptor, ParameterDescriptor, PropertyDescriptor, TypeDescriptor};

pub const INTERFACE: &str = "IService";

pub fn interface() -> TypeDescriptor {
    TypeDescriptor::new(INTERFACE)
}

pub fn string() -> TypeDescriptor {
    TypeDescriptor::new("String")
}

pub fn int() -> TypeDescriptor {
    TypeDescriptor::new("Int32")
}

pub fn boolean() -> TypeDescriptor {
    TypeDescriptor::new("Boolean")
}

/// `String Get(String key)`
pub fn get() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Get")
        .with_parameter(ParameterDescriptor::new("key", string()))
        .returning(string())
}

/// `Boolean TryGet(String key, out Int32 value)`
pub fn try_get() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "TryGet")
        .with_parameter(ParameterDescriptor::new("key", string()))
        .with_parameter(ParameterDescriptor::out("value", int()))
        .returning(boolean())
}

/// `void Fill(out Int32 first, out Int32 second)`
pub fn fill() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Fill")
        .with_parameter(ParameterDescriptor::out("first", int()))
        .with_parameter(ParameterDescriptor::out("second", int()))
}

/// `void Swap(ref String first, ref String second)`
pub fn swap() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Swap")
        .with_parameter(ParameterDescriptor::by_ref("first", string()))
        .with_parameter(ParameterDescriptor::by_ref("second", string()))
}

/// `String Describe(Double factor)`
pub fn describe() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Describe")
        .with_parameter(ParameterDescriptor::new("factor", TypeDescriptor::new("Double")))
        .returning(string())
}

/// `void Run()`
pub fn run() -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Run")
}

/// `String Name { get; }`
pub fn name_getter() -> MemberDescriptor {
    MemberDescriptor::property_getter(PropertyDescriptor::new(interface(), "Name", string()))
}

/// `String this[Int32 index] { get; }`
pub fn indexer_getter() -> MemberDescriptor {
    MemberDescriptor::indexer_getter(
        PropertyDescriptor::new(interface(), "Item", string()),
        vec![ParameterDescriptor::new("index", int())],
    )
}

/// `T Create<T>(String key)` instantiated with the given type argument.
pub fn create(type_argument: TypeDescriptor) -> MemberDescriptor {
    MemberDescriptor::method(interface(), "Create")
        .with_generic_arguments(vec![type_argument.clone()])
        .with_parameter(ParameterDescriptor::new("key", string()))
        .returning(type_argument)
}

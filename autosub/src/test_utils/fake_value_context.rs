use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;

use crate::StdResult;
use crate::entities::{Resolution, TypeDescriptor, Value, ValueRequest};
use crate::resolver::ValueResolutionContext;

/// Deterministic anonymous value generator.
///
/// Every resolution draws a new number from a sequence, so two resolutions never produce the
/// same value (booleans aside). Types can be configured to be omitted or to fail, and every
/// request is journaled.
pub struct FakeValueContext {
    sequence: AtomicU64,
    omitted_types: HashSet<TypeDescriptor>,
    failing_types: HashSet<TypeDescriptor>,
    requests: Mutex<Vec<ValueRequest>>,
}

impl FakeValueContext {
    /// Create a context resolving a value for every request.
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
            omitted_types: HashSet::new(),
            failing_types: HashSet::new(),
            requests: Mutex::new(vec![]),
        }
    }

    /// Omit every request for the given type.
    pub fn with_omitted_type(mut self, omitted_type: TypeDescriptor) -> Self {
        self.omitted_types.insert(omitted_type);
        self
    }

    /// Fail every request for the given type.
    pub fn with_failing_type(mut self, failing_type: TypeDescriptor) -> Self {
        self.failing_types.insert(failing_type);
        self
    }

    /// All the requests received so far, in order.
    pub fn requests(&self) -> Vec<ValueRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn requests_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_number(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn anonymous_value(&self, value_type: &TypeDescriptor, hint: &str) -> Value {
        let number = self.next_number();
        match value_type.name.as_str() {
            "Boolean" => Value::Bool(number % 2 == 0),
            "Int16" | "Int32" | "Int64" => Value::Int(number as i64),
            "UInt16" | "UInt32" | "UInt64" => Value::UInt(number),
            "Single" | "Double" | "Decimal" => Value::Float(number as f64 + 0.5),
            "Char" => Value::Char(char::from(b'a' + (number % 26) as u8)),
            "String" => Value::Str(format!("{hint}{number}")),
            "Byte[]" => Value::Bytes(number.to_be_bytes().to_vec()),
            "List" | "IEnumerable" | "IList" | "Array" => {
                let item_type = value_type
                    .generic_arguments
                    .first()
                    .cloned()
                    .unwrap_or_else(|| TypeDescriptor::new("Object"));
                Value::List(
                    (0..3)
                        .map(|_| self.anonymous_value(&item_type, &item_type.name))
                        .collect(),
                )
            }
            _ => Value::Object {
                type_name: value_type.to_string(),
                fields: BTreeMap::from([("id".to_string(), Value::UInt(number))]),
            },
        }
    }
}

impl Default for FakeValueContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueResolutionContext for FakeValueContext {
    fn resolve(&self, request: &ValueRequest) -> StdResult<Resolution> {
        self.requests.lock().unwrap().push(request.clone());
        let requested_type = request.requested_type();

        if self.failing_types.contains(requested_type) {
            return Err(anyhow!("unable to create an instance of {requested_type}"));
        }
        if self.omitted_types.contains(requested_type) {
            return Ok(Resolution::Omitted);
        }

        let hint = match request {
            ValueRequest::Type(value_type) => value_type.name.as_str(),
            ValueRequest::Member(property) => property.name.as_str(),
            ValueRequest::Parameter(parameter) => parameter.name.as_str(),
        };

        Ok(Resolution::Value(self.anonymous_value(requested_type, hint)))
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::{ParameterDescriptor, PropertyDescriptor};

    use super::*;

    fn string() -> TypeDescriptor {
        TypeDescriptor::new("String")
    }

    #[test]
    fn resolve_distinct_values_for_each_request() {
        let context = FakeValueContext::new();
        let request = ValueRequest::Type(string());

        let first = context.resolve(&request).unwrap();
        let second = context.resolve(&request).unwrap();

        assert_ne!(first, second);
        assert_eq!(2, context.requests_count());
    }

    #[test]
    fn string_values_are_prefixed_by_the_request_hint() {
        let context = FakeValueContext::new();
        let property = PropertyDescriptor::new(TypeDescriptor::new("IService"), "Name", string());

        let value = context
            .resolve(&ValueRequest::Member(property))
            .unwrap()
            .into_value()
            .unwrap();
        let parameter_value = context
            .resolve(&ValueRequest::Parameter(ParameterDescriptor::out("label", string())))
            .unwrap()
            .into_value()
            .unwrap();

        assert_eq!(Some("Name1"), value.as_str());
        assert_eq!(Some("label2"), parameter_value.as_str());
    }

    #[test]
    fn resolve_lists_of_the_generic_argument_type() {
        let context = FakeValueContext::new();
        let list_of_int = TypeDescriptor::generic("List", vec![TypeDescriptor::new("Int32")]);

        let value = context.resolve(&ValueRequest::Type(list_of_int)).unwrap();

        assert_eq!(
            Resolution::Value(Value::List(vec![Value::Int(2), Value::Int(3), Value::Int(4)])),
            value
        );
    }

    #[test]
    fn resolve_other_types_as_objects() {
        let context = FakeValueContext::new();

        let value = context
            .resolve(&ValueRequest::Type(TypeDescriptor::new("Customer")))
            .unwrap();

        assert_eq!(
            Resolution::Value(Value::Object {
                type_name: "Customer".to_string(),
                fields: BTreeMap::from([("id".to_string(), Value::UInt(1))]),
            }),
            value
        );
    }

    #[test]
    fn omit_configured_types() {
        let context = FakeValueContext::new().with_omitted_type(string());

        let resolution = context.resolve(&ValueRequest::Type(string())).unwrap();

        assert_eq!(Resolution::Omitted, resolution);
        assert_eq!(vec![ValueRequest::Type(string())], context.requests());
    }

    #[test]
    fn fail_configured_types() {
        let context = FakeValueContext::new().with_failing_type(string());

        let error = context.resolve(&ValueRequest::Type(string())).unwrap_err();

        assert_eq!("unable to create an instance of String", error.to_string());
    }
}

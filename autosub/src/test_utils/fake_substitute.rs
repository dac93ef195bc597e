use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::StdResult;
use crate::call::{Call, CallDescriptor};
use crate::entities::{MemberDescriptor, TypeDescriptor, Value};
use crate::registration::{CallHandlerFactory, CallRouter, SubstitutionContext};
use crate::specification::{CallSpecification, ExactArgumentsSpecification};
use crate::values_handler::RouteAction;

struct ConfiguredResult {
    specification: ExactArgumentsSpecification,
    value: Value,
}

struct ConfiguredArgument {
    member: MemberDescriptor,
    index: usize,
    value: Value,
}

/// Minimal call router: answers explicitly configured results first, then asks the
/// registered handlers in registration order.
///
/// Configured arguments are written in the call before any result is looked for, as a
/// callback of the intercepted member would do.
pub struct FakeCallRouter {
    handler_factories: RwLock<Vec<CallHandlerFactory>>,
    configured_results: Mutex<Vec<ConfiguredResult>>,
    configured_arguments: Mutex<Vec<ConfiguredArgument>>,
    received_calls: Mutex<Vec<CallDescriptor>>,
}

impl FakeCallRouter {
    /// Create a router without any handler.
    pub fn new() -> Self {
        Self {
            handler_factories: RwLock::new(vec![]),
            configured_results: Mutex::new(vec![]),
            configured_arguments: Mutex::new(vec![]),
            received_calls: Mutex::new(vec![]),
        }
    }

    /// Route a call, returns the value returned by the call if any.
    pub fn route(&self, call: &mut CallDescriptor) -> StdResult<Option<Value>> {
        self.received_calls.lock().unwrap().push(call.clone());

        for configured in self.configured_arguments.lock().unwrap().iter() {
            if call.member() == &configured.member {
                call.set_argument(configured.index, configured.value.clone())?;
            }
        }

        let configured_value = self
            .configured_results
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|configured| configured.specification.is_satisfied_by(call))
            .map(|configured| configured.value.clone());
        if let Some(value) = configured_value {
            call.set_return_value(value.clone());
            return Ok(Some(value));
        }

        let handler_factories = self.handler_factories.read().unwrap().clone();
        for factory in handler_factories {
            let handler = factory();
            if let RouteAction::Return(value) = handler.handle(call)? {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Make the given call return the given value.
    pub fn configure_return(&self, member: MemberDescriptor, arguments: Vec<Value>, value: Value) {
        self.configured_results.lock().unwrap().push(ConfiguredResult {
            specification: ExactArgumentsSpecification::new(member, arguments),
            value,
        });
    }

    /// Write the given value in an argument slot whenever the member is called.
    pub fn configure_argument(&self, member: MemberDescriptor, index: usize, value: Value) {
        self.configured_arguments
            .lock()
            .unwrap()
            .push(ConfiguredArgument {
                member,
                index,
                value,
            });
    }

    /// Forget every explicitly configured result and argument, registered handlers are kept.
    pub fn clear_configured_results(&self) {
        self.configured_results.lock().unwrap().clear();
        self.configured_arguments.lock().unwrap().clear();
    }

    /// Number of received calls to the given member.
    pub fn received_calls_count(&self, member: &MemberDescriptor) -> usize {
        self.received_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.member() == member)
            .count()
    }

    /// Number of registered handler factories.
    pub fn handler_factories_count(&self) -> usize {
        self.handler_factories.read().unwrap().len()
    }
}

impl Default for FakeCallRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CallRouter for FakeCallRouter {
    fn register_custom_call_handler_factory(&self, factory: CallHandlerFactory) {
        self.handler_factories.write().unwrap().push(factory);
    }
}

/// A substitute of an interface, forwarding its calls to its router.
pub struct FakeSubstitute {
    id: u64,
    interface: TypeDescriptor,
    router: Arc<FakeCallRouter>,
}

impl FakeSubstitute {
    /// Identifier of the substitute, unique within its substitution context.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Substituted interface.
    pub fn interface(&self) -> &TypeDescriptor {
        &self.interface
    }

    /// Router of the substitute.
    pub fn router(&self) -> &FakeCallRouter {
        &self.router
    }

    /// Invoke a member, returns the call as seen by the caller once it returned.
    pub fn invoke(
        &self,
        member: &MemberDescriptor,
        arguments: Vec<Value>,
    ) -> StdResult<CallDescriptor> {
        let mut call = CallDescriptor::new(member.clone(), arguments);
        self.router.route(&mut call)?;

        Ok(call)
    }

    /// Invoke a member and get its return value.
    pub fn call(
        &self,
        member: &MemberDescriptor,
        arguments: Vec<Value>,
    ) -> StdResult<Option<Value>> {
        let call = self.invoke(member, arguments)?;

        Ok(call.return_value().cloned())
    }
}

/// Substitution context creating [FakeSubstitute].
pub struct FakeSubstitutionContext {
    next_id: AtomicU64,
}

impl FakeSubstitutionContext {
    /// FakeSubstitutionContext factory
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a substitute of the given interface, without any handler.
    pub fn create_substitute(&self, interface: TypeDescriptor) -> FakeSubstitute {
        FakeSubstitute {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            interface,
            router: Arc::new(FakeCallRouter::new()),
        }
    }
}

impl Default for FakeSubstitutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SubstitutionContext for FakeSubstitutionContext {
    fn call_router_for(&self, specimen: &dyn Any) -> Option<Arc<dyn CallRouter>> {
        specimen
            .downcast_ref::<FakeSubstitute>()
            .map(|substitute| substitute.router.clone() as Arc<dyn CallRouter>)
    }
}

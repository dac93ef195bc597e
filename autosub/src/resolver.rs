//! ## Call result resolver
//!
//! Resolve the outcome of an intercepted call through the external value generator: the
//! value to return, and the values to write in untouched by-reference argument slots.
//!
//! An omission from the generator is never an error: it means "no return value" or
//! "leave this slot alone".

use std::sync::Arc;

use slog::{Logger, debug, trace};

use crate::StdResult;
use crate::call::{Call, CallError};
use crate::entities::{ArgumentValue, CallResultData, CallShape, Resolution, Value, ValueRequest};
use crate::logging::ComponentLogger;

/// The anonymous value generator, consumed through a single request/response contract.
#[cfg_attr(test, mockall::automock)]
pub trait ValueResolutionContext: Send + Sync {
    /// Resolve a value for the given request.
    ///
    /// Returns [Resolution::Omitted] when the generator was told to produce nothing, and an
    /// error when the request can't be satisfied.
    fn resolve(&self, request: &ValueRequest) -> StdResult<Resolution>;
}

/// Compute a fresh result for an intercepted call, without storing it.
pub trait CallResultResolver: Send + Sync {
    /// Resolve the result of the given call.
    fn resolve_result(&self, call: &dyn Call) -> StdResult<CallResultData>;
}

/// [CallResultResolver] delegating every value to a [ValueResolutionContext].
pub struct ContextCallResultResolver {
    context: Arc<dyn ValueResolutionContext>,
    logger: Logger,
}

impl ContextCallResultResolver {
    /// ContextCallResultResolver factory
    pub fn new(context: Arc<dyn ValueResolutionContext>, logger: Logger) -> Self {
        Self {
            context,
            logger: logger.for_component::<Self>(),
        }
    }

    fn resolve_return_value(&self, call: &dyn Call) -> StdResult<Option<Value>> {
        if call.return_type().is_void() {
            return Ok(None);
        }

        let request = match &call.member().shape {
            CallShape::Method => ValueRequest::Type(call.return_type().clone()),
            CallShape::PropertyGet(property) | CallShape::IndexerGet(property) => {
                ValueRequest::Member(property.clone())
            }
        };
        let value = self.context.resolve(&request)?.into_value();
        if value.is_none() {
            debug!(self.logger, "Return value omitted"; "request" => %request);
        }

        Ok(value)
    }

    /// Every by-reference parameter must have an argument slot to write to.
    fn check_by_ref_slots(call: &dyn Call) -> Result<(), CallError> {
        let arguments_count = call.arguments().len();
        let missing_slot = call
            .member()
            .parameters
            .iter()
            .enumerate()
            .find(|(index, parameter)| parameter.is_by_ref() && *index >= arguments_count);

        match missing_slot {
            Some((index, _)) => Err(CallError::ArgumentIndexOutOfRange {
                index,
                arguments_count,
            }),
            None => Ok(()),
        }
    }

    fn resolve_argument_values(&self, call: &dyn Call) -> StdResult<Vec<ArgumentValue>> {
        if !call.member().has_by_ref_parameters() {
            return Ok(vec![]);
        }
        let arguments = call.arguments();
        let original_arguments = call.original_arguments();
        let mut argument_values = vec![];

        for (index, parameter) in call.member().parameters.iter().enumerate() {
            if !parameter.is_by_ref() {
                continue;
            }
            // A slot changed since the call started already holds an intended value.
            if arguments.get(index) != original_arguments.get(index) {
                trace!(
                    self.logger, "Argument already set, keeping it";
                    "index" => index, "parameter" => &parameter.name
                );
                continue;
            }

            let request = ValueRequest::Type(parameter.parameter_type.clone());
            match self.context.resolve(&request)?.into_value() {
                Some(value) => argument_values.push(ArgumentValue::new(index, value)),
                None => {
                    debug!(
                        self.logger, "Argument value omitted";
                        "index" => index, "request" => %request
                    );
                }
            }
        }

        Ok(argument_values)
    }
}

impl CallResultResolver for ContextCallResultResolver {
    fn resolve_result(&self, call: &dyn Call) -> StdResult<CallResultData> {
        Self::check_by_ref_slots(call)?;
        let return_value = self.resolve_return_value(call)?;
        let argument_values = self.resolve_argument_values(call)?;

        Ok(CallResultData::new(return_value, argument_values))
    }
}

//! ## Values handler
//!
//! Answer every intercepted call with the result cached for it, resolving and caching a new
//! result the first time a call shape is seen.
//!
//! The handler only appends to its results cache, writes the by-reference slots of the call
//! and sets its return value.

use std::sync::Arc;

use slog::{Logger, debug, trace};

use crate::StdResult;
use crate::call::{Call, CallError};
use crate::entities::{CallResultData, Value};
use crate::logging::ComponentLogger;
use crate::resolver::CallResultResolver;
use crate::results_cache::CallResultCache;
use crate::specification::{CallSpecificationFactory, MatchArgs};

/// What the call router should do after a handler processed a call.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    /// Let the next handler process the call
    Continue,

    /// Stop routing, the call returns the given value
    Return(Value),
}

/// A handler plugged into the call router of a substitute.
pub trait CallHandler: Send + Sync {
    /// Process an intercepted call.
    fn handle(&self, call: &mut dyn Call) -> StdResult<RouteAction>;
}

/// [CallHandler] answering calls with automatically resolved values.
pub struct AutoValuesHandler {
    resolver: Arc<dyn CallResultResolver>,
    results_cache: Arc<CallResultCache>,
    specification_factory: Arc<dyn CallSpecificationFactory>,
    logger: Logger,
}

impl AutoValuesHandler {
    /// AutoValuesHandler factory
    pub fn new(
        resolver: Arc<dyn CallResultResolver>,
        results_cache: Arc<CallResultCache>,
        specification_factory: Arc<dyn CallSpecificationFactory>,
        logger: Logger,
    ) -> Self {
        Self {
            resolver,
            results_cache,
            specification_factory,
            logger: logger.for_component::<Self>(),
        }
    }

    fn resolve_and_cache_result(&self, call: &dyn Call) -> StdResult<Arc<CallResultData>> {
        let result = Arc::new(self.resolver.resolve_result(call)?);
        let specification = self
            .specification_factory
            .create_specification(call, MatchArgs::AsSpecifiedInCall);
        self.results_cache.add_result(specification, result.clone());
        debug!(
            self.logger, "Cached a new call result";
            "member" => %call.member(),
            "has_return_value" => result.return_value.is_some(),
            "argument_values" => result.argument_values.len()
        );

        Ok(result)
    }

    fn apply_result(call: &mut dyn Call, result: &CallResultData) -> StdResult<RouteAction> {
        let arguments_count = call.arguments().len();
        if let Some(argument_value) = result
            .argument_values
            .iter()
            .find(|argument_value| argument_value.index >= arguments_count)
        {
            return Err(CallError::ArgumentIndexOutOfRange {
                index: argument_value.index,
                arguments_count,
            }
            .into());
        }

        for argument_value in &result.argument_values {
            call.set_argument(argument_value.index, argument_value.value.clone())?;
        }

        match &result.return_value {
            Some(value) => {
                call.set_return_value(value.clone());
                Ok(RouteAction::Return(value.clone()))
            }
            None => Ok(RouteAction::Continue),
        }
    }
}

impl CallHandler for AutoValuesHandler {
    fn handle(&self, call: &mut dyn Call) -> StdResult<RouteAction> {
        let result = match self.results_cache.try_get_result(call) {
            Some(cached_result) => {
                trace!(self.logger, "Cache hit"; "member" => %call.member());
                cached_result
            }
            None => self.resolve_and_cache_result(call)?,
        };

        Self::apply_result(call, &result)
    }
}

//! ## Call handler registration
//!
//! Install an [AutoValuesHandler] on the call router of every new substitute.
//!
//! All the handlers produced for a substitute share the results cache and the resolver
//! created when the substitute was registered, whatever the number of times the router
//! invokes the factory.

use std::any::Any;
use std::sync::Arc;

use slog::{Logger, debug};

use crate::logging::ComponentLogger;
use crate::resolver::{CallResultResolver, ContextCallResultResolver, ValueResolutionContext};
use crate::results_cache::CallResultCache;
use crate::specification::CallSpecificationFactory;
use crate::values_handler::{AutoValuesHandler, CallHandler};

/// Produce the handler a call router plugs in its routing chain.
pub type CallHandlerFactory = Arc<dyn Fn() -> Arc<dyn CallHandler> + Send + Sync>;

/// Per substitute call routing object of the interception layer.
#[cfg_attr(test, mockall::automock)]
pub trait CallRouter: Send + Sync {
    /// Register a factory of handlers consulted for every call on the substitute.
    fn register_custom_call_handler_factory(&self, factory: CallHandlerFactory);
}

/// Entry point of the interception layer, finds the call router of substitutes.
pub trait SubstitutionContext: Send + Sync {
    /// Get the call router of the given specimen, `None` if it's not a substitute.
    fn call_router_for(&self, specimen: &dyn Any) -> Option<Arc<dyn CallRouter>>;
}

/// Install an [AutoValuesHandler] on newly created substitutes.
pub struct RegisterCallHandlerCommand {
    substitution_context: Arc<dyn SubstitutionContext>,
    specification_factory: Arc<dyn CallSpecificationFactory>,
    shared_results_cache: Option<Arc<CallResultCache>>,
    root_logger: Logger,
    logger: Logger,
}

impl RegisterCallHandlerCommand {
    /// Create a command giving its own results cache to each substitute.
    pub fn new(
        substitution_context: Arc<dyn SubstitutionContext>,
        specification_factory: Arc<dyn CallSpecificationFactory>,
        logger: Logger,
    ) -> Self {
        Self {
            substitution_context,
            specification_factory,
            shared_results_cache: None,
            logger: logger.for_component::<Self>(),
            root_logger: logger,
        }
    }

    /// Make every substitute registered by this command use the given results cache.
    pub fn with_shared_results_cache(mut self, results_cache: Arc<CallResultCache>) -> Self {
        self.shared_results_cache = Some(results_cache);
        self
    }

    /// Register a values handler on the given specimen, resolving values with the given
    /// context.
    ///
    /// Specimens that are not substitutes are left untouched. Returns `true` if a handler
    /// factory was registered.
    pub fn execute(&self, specimen: &dyn Any, context: Arc<dyn ValueResolutionContext>) -> bool {
        let Some(call_router) = self.substitution_context.call_router_for(specimen) else {
            debug!(self.logger, "Specimen is not a substitute, no handler registered");
            return false;
        };

        let resolver: Arc<dyn CallResultResolver> = Arc::new(ContextCallResultResolver::new(
            context,
            self.root_logger.clone(),
        ));
        let results_cache = self
            .shared_results_cache
            .clone()
            .unwrap_or_else(|| Arc::new(CallResultCache::new()));
        let specification_factory = self.specification_factory.clone();
        let logger = self.root_logger.clone();

        call_router.register_custom_call_handler_factory(Arc::new(move || {
            Arc::new(AutoValuesHandler::new(
                resolver.clone(),
                results_cache.clone(),
                specification_factory.clone(),
                logger.clone(),
            )) as Arc<dyn CallHandler>
        }));
        debug!(
            self.logger, "Values handler registered";
            "shared_results_cache" => self.shared_results_cache.is_some()
        );

        true
    }
}

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Automatic values for calls intercepted on test substitutes.
//!
//! Substitutes (dynamically created stand-ins for interfaces) answer every unconfigured call
//! with a value obtained from an anonymous value generator. This crate decides which value a
//! call produces and makes sure the same call keeps producing it:
//! - the [call] abstraction describes one intercepted invocation,
//! - the [specification] module builds predicates that recognize a previously seen call,
//! - the [results_cache] stores the resolved results, latest entry first,
//! - the [resolver] asks the external [ValueResolutionContext] for return and by-reference
//!   values,
//! - the [values_handler] ties them together for every intercepted call,
//! - the [registration] and [customization] modules install handlers on new substitutes.

pub mod call;
pub mod customization;
pub mod entities;
pub mod logging;
pub mod registration;
pub mod resolver;
pub mod results_cache;
pub mod specification;
pub mod values_handler;

#[cfg(any(test, feature = "test_tools"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test_tools")))]
pub mod test_utils;

pub use call::{Call, CallDescriptor, CallError};
pub use customization::{AutoSubstituteConfiguration, AutoSubstituteCustomization, CacheScope};
pub use registration::{
    CallHandlerFactory, CallRouter, RegisterCallHandlerCommand, SubstitutionContext,
};
pub use resolver::{CallResultResolver, ContextCallResultResolver, ValueResolutionContext};
pub use results_cache::CallResultCache;
pub use specification::{
    CallSpecification, CallSpecificationFactory, DefaultCallSpecificationFactory, MatchArgs,
};
pub use values_handler::{AutoValuesHandler, CallHandler, RouteAction};

/// Generic error type
pub type StdError = anyhow::Error;

/// Generic result type
pub type StdResult<T> = anyhow::Result<T, StdError>;

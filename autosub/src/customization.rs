//! ## Customization
//!
//! Configuration of the automatic values and the customization wiring it to the
//! registration of new substitutes.

use std::any::Any;
use std::sync::Arc;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, Map, Source, Value, ValueKind};
use serde::{Deserialize, Serialize};
use slog::{Logger, debug};
use thiserror::Error;

use crate::StdResult;
use crate::logging::ComponentLogger;
use crate::registration::{RegisterCallHandlerCommand, SubstitutionContext};
use crate::resolver::ValueResolutionContext;
use crate::results_cache::CallResultCache;
use crate::specification::{CallSpecificationFactory, DefaultCallSpecificationFactory};

/// Prefix of the environment variables overriding the configuration.
pub const ENVIRONMENT_PREFIX: &str = "AUTOSUB";

/// [AutoSubstituteConfiguration] related errors.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The configuration sources could not be collected
    #[error("could not collect the auto substitute configuration sources")]
    Collect(#[source] ConfigError),

    /// The collected values don't form a valid configuration
    #[error("invalid auto substitute configuration")]
    Invalid(#[source] ConfigError),
}

/// Lifetime of the results caches used by the values handlers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CacheScope {
    /// Each substitute has its own results cache
    #[default]
    Substitute,

    /// All substitutes registered by a customization share a single results cache
    Customization,
}

/// Auto substitute configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSubstituteConfiguration {
    /// Install a values handler on new substitutes, when disabled substitutes only answer
    /// what was explicitly configured on them.
    pub configure_members: bool,

    /// Lifetime of the results caches
    pub cache_scope: CacheScope,
}

impl AutoSubstituteConfiguration {
    /// Create a configuration builder seeded with the default values.
    pub fn builder() -> ConfigBuilder<DefaultState> {
        config::Config::builder().add_source(Self::default())
    }

    /// Build the configuration from the given builder, the `AUTOSUB_*` environment variables
    /// taking precedence over its sources.
    pub fn load(builder: ConfigBuilder<DefaultState>) -> StdResult<Self> {
        Self::load_with_environment(builder, Environment::with_prefix(ENVIRONMENT_PREFIX))
    }

    fn load_with_environment(
        builder: ConfigBuilder<DefaultState>,
        environment: Environment,
    ) -> StdResult<Self> {
        let config = builder
            .add_source(environment)
            .build()
            .map_err(ConfigurationError::Collect)?;

        let configuration = config
            .try_deserialize()
            .map_err(ConfigurationError::Invalid)?;

        Ok(configuration)
    }
}

impl Default for AutoSubstituteConfiguration {
    fn default() -> Self {
        Self {
            configure_members: true,
            cache_scope: CacheScope::default(),
        }
    }
}

impl Source for AutoSubstituteConfiguration {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut result = Map::new();
        let namespace = "auto substitute configuration".to_string();
        result.insert(
            "configure_members".to_string(),
            Value::new(Some(&namespace), ValueKind::from(self.configure_members)),
        );
        result.insert(
            "cache_scope".to_string(),
            Value::new(Some(&namespace), ValueKind::from(self.cache_scope.to_string())),
        );

        Ok(result)
    }
}

/// Automatically answer the calls of the substitutes created by a fixture.
pub struct AutoSubstituteCustomization {
    configuration: AutoSubstituteConfiguration,
    substitution_context: Arc<dyn SubstitutionContext>,
    specification_factory: Arc<dyn CallSpecificationFactory>,
    shared_results_cache: Option<Arc<CallResultCache>>,
    root_logger: Logger,
    logger: Logger,
}

impl AutoSubstituteCustomization {
    /// AutoSubstituteCustomization factory
    pub fn new(
        configuration: AutoSubstituteConfiguration,
        substitution_context: Arc<dyn SubstitutionContext>,
        logger: Logger,
    ) -> Self {
        let shared_results_cache = match configuration.cache_scope {
            CacheScope::Substitute => None,
            CacheScope::Customization => Some(Arc::new(CallResultCache::new())),
        };

        Self {
            configuration,
            substitution_context,
            specification_factory: Arc::new(DefaultCallSpecificationFactory::new()),
            shared_results_cache,
            logger: logger.for_component::<Self>(),
            root_logger: logger,
        }
    }

    /// Replace the factory building the specifications of cached results.
    pub fn with_specification_factory(
        mut self,
        specification_factory: Arc<dyn CallSpecificationFactory>,
    ) -> Self {
        self.specification_factory = specification_factory;
        self
    }

    /// Configuration of this customization.
    pub fn configuration(&self) -> &AutoSubstituteConfiguration {
        &self.configuration
    }

    /// The results cache shared by all substitutes, only with [CacheScope::Customization].
    pub fn shared_results_cache(&self) -> Option<Arc<CallResultCache>> {
        self.shared_results_cache.clone()
    }

    /// The command installing values handlers, `None` when members should not be
    /// configured.
    pub fn register_call_handler_command(&self) -> Option<RegisterCallHandlerCommand> {
        if !self.configuration.configure_members {
            return None;
        }

        let command = RegisterCallHandlerCommand::new(
            self.substitution_context.clone(),
            self.specification_factory.clone(),
            self.root_logger.clone(),
        );

        Some(match &self.shared_results_cache {
            Some(results_cache) => command.with_shared_results_cache(results_cache.clone()),
            None => command,
        })
    }

    /// Prepare a freshly created specimen, returns `true` if a values handler was
    /// installed on it.
    pub fn on_specimen_created(
        &self,
        specimen: &dyn Any,
        context: Arc<dyn ValueResolutionContext>,
    ) -> bool {
        match self.register_call_handler_command() {
            Some(command) => command.execute(specimen, context),
            None => {
                debug!(self.logger, "Members configuration disabled, specimen left untouched");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use config::{File, FileFormat};

    use crate::registration::{CallRouter, MockCallRouter};
    use crate::resolver::MockValueResolutionContext;
    use crate::test_utils::{MockBuilder, TestLogger};

    use super::*;

    struct EverythingIsASubstitute {
        call_router: Arc<dyn CallRouter>,
    }

    impl SubstitutionContext for EverythingIsASubstitute {
        fn call_router_for(&self, _specimen: &dyn Any) -> Option<Arc<dyn CallRouter>> {
            Some(self.call_router.clone())
        }
    }

    fn customization(
        configuration: AutoSubstituteConfiguration,
        expected_registrations: usize,
    ) -> AutoSubstituteCustomization {
        let call_router = MockBuilder::configure(|mock: &mut MockCallRouter| {
            mock.expect_register_custom_call_handler_factory()
                .return_const(())
                .times(expected_registrations);
        });

        AutoSubstituteCustomization::new(
            configuration,
            Arc::new(EverythingIsASubstitute { call_router }),
            TestLogger::stdout(),
        )
    }

    #[test]
    fn default_configuration() {
        let configuration = AutoSubstituteConfiguration::default();

        assert!(configuration.configure_members);
        assert_eq!(CacheScope::Substitute, configuration.cache_scope);
    }

    #[test]
    fn cache_scope_from_and_to_string() {
        assert_eq!(CacheScope::Customization, CacheScope::from_str("customization").unwrap());
        assert_eq!(CacheScope::Substitute, CacheScope::from_str("substitute").unwrap());
        assert!(CacheScope::from_str("global").is_err());
        assert_eq!("customization", CacheScope::Customization.to_string());
    }

    #[test]
    fn load_default_configuration() {
        let configuration =
            AutoSubstituteConfiguration::load(AutoSubstituteConfiguration::builder()).unwrap();

        assert_eq!(AutoSubstituteConfiguration::default(), configuration);
    }

    #[test]
    fn load_configuration_overridden_by_a_source() {
        let builder = AutoSubstituteConfiguration::builder().add_source(File::from_str(
            r#"{ "configure_members": false, "cache_scope": "customization" }"#,
            FileFormat::Json,
        ));

        let configuration = AutoSubstituteConfiguration::load(builder).unwrap();

        assert_eq!(
            AutoSubstituteConfiguration {
                configure_members: false,
                cache_scope: CacheScope::Customization,
            },
            configuration
        );
    }

    #[test]
    fn environment_variables_take_precedence_over_other_sources() {
        let builder = AutoSubstituteConfiguration::builder().add_source(File::from_str(
            r#"{ "configure_members": true, "cache_scope": "substitute" }"#,
            FileFormat::Json,
        ));
        let environment = Environment::with_prefix(ENVIRONMENT_PREFIX).source(Some(Map::from([
            ("AUTOSUB_CONFIGURE_MEMBERS".to_string(), "false".to_string()),
            ("AUTOSUB_CACHE_SCOPE".to_string(), "customization".to_string()),
            ("OTHER_CACHE_SCOPE".to_string(), "global".to_string()),
        ])));

        let configuration =
            AutoSubstituteConfiguration::load_with_environment(builder, environment).unwrap();

        assert_eq!(
            AutoSubstituteConfiguration {
                configure_members: false,
                cache_scope: CacheScope::Customization,
            },
            configuration
        );
    }

    #[test]
    fn load_configuration_fails_with_an_unknown_cache_scope() {
        let builder = AutoSubstituteConfiguration::builder().add_source(File::from_str(
            r#"{ "cache_scope": "global" }"#,
            FileFormat::Json,
        ));

        let error = AutoSubstituteConfiguration::load(builder).unwrap_err();

        assert!(
            matches!(
                error.downcast_ref::<ConfigurationError>(),
                Some(ConfigurationError::Invalid(_))
            ),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn install_values_handler_when_members_are_configured() {
        let customization = customization(AutoSubstituteConfiguration::default(), 1);

        let installed = customization
            .on_specimen_created(&"substitute", Arc::new(MockValueResolutionContext::new()));

        assert!(installed);
    }

    #[test]
    fn leave_specimens_untouched_when_members_are_not_configured() {
        let configuration = AutoSubstituteConfiguration {
            configure_members: false,
            ..AutoSubstituteConfiguration::default()
        };
        let customization = customization(configuration, 0);

        let installed = customization
            .on_specimen_created(&"substitute", Arc::new(MockValueResolutionContext::new()));

        assert!(!installed);
        assert!(customization.register_call_handler_command().is_none());
    }

    #[test]
    fn shared_results_cache_only_with_customization_scope() {
        let substitute_scope = customization(AutoSubstituteConfiguration::default(), 0);
        let customization_scope = customization(
            AutoSubstituteConfiguration {
                cache_scope: CacheScope::Customization,
                ..AutoSubstituteConfiguration::default()
            },
            0,
        );

        assert!(substitute_scope.shared_results_cache().is_none());
        assert!(customization_scope.shared_results_cache().is_some());
    }
}

use std::sync::Arc;

use autosub::entities::TypeDescriptor;
use autosub::test_utils::{FakeSubstitute, FakeSubstitutionContext, FakeValueContext, TestLogger};
use autosub::{AutoSubstituteConfiguration, AutoSubstituteCustomization};

/// Creates substitutes the way a test fixture customized with auto values would.
pub struct AutoSubstituteFixture {
    pub customization: AutoSubstituteCustomization,
    pub substitution_context: Arc<FakeSubstitutionContext>,
    pub value_context: Arc<FakeValueContext>,
}

impl AutoSubstituteFixture {
    pub fn new() -> Self {
        Self::with_configuration(AutoSubstituteConfiguration::default())
    }

    pub fn with_configuration(configuration: AutoSubstituteConfiguration) -> Self {
        let substitution_context = Arc::new(FakeSubstitutionContext::new());
        let customization = AutoSubstituteCustomization::new(
            configuration,
            substitution_context.clone(),
            TestLogger::stdout(),
        );

        Self {
            customization,
            substitution_context,
            value_context: Arc::new(FakeValueContext::new()),
        }
    }

    pub fn with_value_context(mut self, value_context: FakeValueContext) -> Self {
        self.value_context = Arc::new(value_context);
        self
    }

    /// Create a substitute and let the customization prepare it.
    pub fn create_substitute(&self, interface: TypeDescriptor) -> FakeSubstitute {
        let substitute = self.substitution_context.create_substitute(interface);
        self.customization
            .on_specimen_created(&substitute, self.value_context.clone());

        substitute
    }
}

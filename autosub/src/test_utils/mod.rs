//! Test doubles for the external collaborators of the crate: a deterministic value
//! generator and a minimal interception layer, plus logging and mocking helpers.

mod fake_substitute;
mod fake_value_context;
mod mock_extensions;
mod test_logger;

pub use fake_substitute::{FakeCallRouter, FakeSubstitute, FakeSubstitutionContext};
pub use fake_value_context::FakeValueContext;
pub use mock_extensions::MockBuilder;
pub use test_logger::TestLogger;

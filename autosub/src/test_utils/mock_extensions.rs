use std::marker::PhantomData;
use std::sync::Arc;

/// Build a shared `mockall` mock from a configuration closure.
///
/// Components take their collaborators as `Arc<dyn Trait>`: the mock is configured in its own
/// block, then handed over already wrapped.
///
/// The mock type is inferred from the closure parameter
/// (`MockBuilder::configure(|mock: &mut MockValueResolutionContext| ...)`) or given explicitly
/// (`MockBuilder::<MockCallRouter>::configure(...)`).
pub struct MockBuilder<M: Default> {
    mock: PhantomData<fn() -> M>,
}

impl<M: Default> MockBuilder<M> {
    /// Create a mock, set its expectations and share it.
    pub fn configure<F: FnOnce(&mut M)>(set_expectations: F) -> Arc<M> {
        let mut mock = M::default();
        set_expectations(&mut mock);

        Arc::new(mock)
    }
}

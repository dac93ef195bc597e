//! Component loggers.
//!
//! Every component of the crate logs through a child of the logger it was built with. The
//! child tags its records with the short name of the component type under the `src` key, so
//! the records of a values handler can be told apart from the ones of its resolver.

use slog::Logger;

/// Key of the component name in the log records.
pub const COMPONENT_KEY: &str = "src";

/// Derive component loggers from a `slog::Logger`.
pub trait ComponentLogger {
    /// Child logger tagging its records with the name of the component type `T`.
    fn for_component<T>(&self) -> Self;
}

impl ComponentLogger for Logger {
    fn for_component<T>(&self) -> Self {
        self.new(slog::o!(COMPONENT_KEY => component_name::<T>()))
    }
}

/// Name of `T` without its module path nor its generic arguments.
fn component_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    let path = match type_name.find('<') {
        Some(generics_start) => &type_name[..generics_start],
        None => type_name,
    };

    path.rsplit("::").next().unwrap_or(path)
}

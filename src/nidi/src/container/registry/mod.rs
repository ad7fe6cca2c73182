mod binding;
mod configurer;
mod provider_registry;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::key::Key;
use crate::module::Module;

pub use binding::Binding;
pub use provider_registry::ProviderRegistry;

pub(crate) use configurer::ConfigurerImpl;

/// A store of bindings that can be built from a [`Module`].
pub trait Registry: Sized + Send + Sync + 'static {
    /// Runs `module` against a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Aggregated`] holding every error reported
    /// while the module was configuring.
    fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module;
}

/// The sink that modules register their bindings into.
///
/// Errors are not returned to the module. They are collected and reported
/// together once every module is done.
pub trait Configurer: Send + Sync + 'static {
    /// Binds `key` to `binding`. Registering the same name twice is reported
    /// as [`RegistryError::KeyDuplicated`].
    fn register(&mut self, key: Key, binding: Binding);

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("the key {key} already exists in the registry"))]
    #[non_exhaustive]
    KeyDuplicated { key: Key },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

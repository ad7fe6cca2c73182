use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::container::injector::InjectorError;
use crate::container::registry::{Binding, ConfigurerImpl, Registry, RegistryError};
use crate::key::{Chain, Key};
use crate::module::Module;

/// Maps names to [`Binding`]s.
///
/// The registry only stores raw bindings. Factory dependencies and parent
/// lookup are handled by the injector.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    bindings: HashMap<Key, Binding>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Binds `key` to `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::KeyDuplicated`] if `key` is already bound. The
    /// existing binding is kept.
    pub fn register<K>(&mut self, key: K, binding: Binding) -> Result<(), RegistryError>
    where
        K: Into<Key>,
    {
        match self.bindings.entry(key.into()) {
            Entry::Occupied(entry) => Err(RegistryError::KeyDuplicated {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(binding);
                Ok(())
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Looks up the binding of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::UnknownDependency`] if `key` is not bound.
    pub fn get(&self, key: &str) -> Result<&Binding, InjectorError> {
        self.find(key).ok_or_else(|| {
            let key = Key::from(key.to_owned());
            InjectorError::UnknownDependency {
                chain: Chain::new(vec![key.clone()]),
                key,
            }
        })
    }

    pub fn find(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Registry for ProviderRegistry {
    fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        match configurer.finish() {
            Ok(registry) => {
                debug!(bindings = registry.len(), "registry finished");
                Ok(registry)
            }
            Err(errors) => Err(RegistryError::Aggregated { errors }),
        }
    }
}

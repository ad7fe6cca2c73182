use std::error::Error;

use crate::annotation::Target;
use crate::container::Managed;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::module::dsl::provider_helper::ProviderBinding;
use crate::module::dsl::value_helper::ValueBinding;
use crate::provider::component::{Component, ComponentProvider};
use crate::provider::factory::{FactoryProvider, FallibleFactoryProvider};
use crate::provider::Provider;

/// A name waiting for what it is bound to.
pub struct MetadataBinding {
    key: Key,
    lifetime: Lifetime,
}

impl MetadataBinding {
    pub(super) fn new(key: Key) -> Self {
        Self {
            key,
            lifetime: Lifetime::Singleton,
        }
    }

    pub fn within(self, lifetime: Lifetime) -> Self {
        Self { lifetime, ..self }
    }

    pub fn as_transient(self) -> Self {
        self.within(Lifetime::Transient)
    }

    pub fn as_singleton(self) -> Self {
        self.within(Lifetime::Singleton)
    }

    pub fn to_value<T>(self, value: T) -> ValueBinding<T>
    where
        T: Managed,
    {
        ValueBinding::new(self.key, value)
    }

    pub fn to_factory<T>(self, target: T) -> ProviderBinding<FactoryProvider<T>>
    where
        T: Target<Output: Managed> + 'static,
    {
        self.to_provider(FactoryProvider::new(target))
    }

    pub fn to_fallible_factory<T, O, E>(
        self,
        target: T,
    ) -> ProviderBinding<FallibleFactoryProvider<T, O, E>>
    where
        T: Target<Output = Result<O, E>> + 'static,
        O: Managed,
        E: Into<Box<dyn Error + Send + Sync>> + 'static,
    {
        self.to_provider(FallibleFactoryProvider::new(target))
    }

    pub fn to_component<C>(self) -> ProviderBinding<ComponentProvider<C>>
    where
        C: Component,
    {
        self.to_provider(ComponentProvider::new())
    }

    pub fn to_provider<P>(self, provider: P) -> ProviderBinding<P>
    where
        P: Provider,
    {
        ProviderBinding::new(self.key, provider, self.lifetime)
    }
}

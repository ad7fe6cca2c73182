use crate::container::registry::{Binding, Configurer};
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::provider::Provider;

pub struct ProviderBinding<P>
where
    P: Provider,
{
    key: Key,
    provider: P,
    lifetime: Lifetime,
}

impl<P> ProviderBinding<P>
where
    P: Provider,
{
    pub(super) fn new(key: Key, provider: P, lifetime: Lifetime) -> Self {
        Self {
            key,
            provider,
            lifetime,
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

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.key, Binding::factory(self.provider, self.lifetime));
    }
}

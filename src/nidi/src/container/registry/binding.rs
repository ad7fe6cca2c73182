use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::{into_object, Managed, Object};
use crate::lifetime::Lifetime;
use crate::provider::Provider;

/// What a name is bound to.
pub enum Binding {
    /// A ready-made object, handed out as-is on every lookup.
    Value { value: Object },
    /// A provider whose dependencies are resolved by the injector. The
    /// lifetime decides whether its result is cached.
    Factory {
        provider: Box<dyn Provider>,
        lifetime: Lifetime,
    },
}

impl Binding {
    pub fn value<T>(value: T) -> Self
    where
        T: Managed,
    {
        Self::Value {
            value: into_object(value),
        }
    }

    pub fn factory<P>(provider: P, lifetime: Lifetime) -> Self
    where
        P: Provider,
    {
        Self::Factory {
            provider: Box::new(provider),
            lifetime,
        }
    }

    /// Returns the lifetime of a factory binding, or `None` for a value.
    pub fn lifetime(&self) -> Option<Lifetime> {
        match self {
            Self::Value { .. } => None,
            Self::Factory { lifetime, .. } => Some(*lifetime),
        }
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Value { value } => f
                .debug_struct("Value")
                .field("type", &(**value).type_name())
                .finish(),
            Self::Factory { provider, lifetime } => f
                .debug_struct("Factory")
                .field("provider", provider)
                .field("lifetime", lifetime)
                .finish(),
        }
    }
}

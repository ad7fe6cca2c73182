mod arguments;
mod context;
mod invoke;

use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::annotation::Target;
use crate::container::{Managed, Object};
use crate::key::{Chain, Key};
use crate::provider::component::Component;

pub use arguments::{Arguments, Locals};
pub use context::{CallContext, InjectionTrace};

pub(crate) use arguments::downcast_object;
pub(crate) use invoke::{instantiate_component, invoke_target};

/// Resolves type-erased objects by name.
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    /// Resolves the object registered as `key`, starting a new resolution
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, its resolution is cyclic, or
    /// one of its transitive dependencies can't be constructed.
    fn dyn_get(&self, key: &Key) -> Result<Object, InjectorError>;

    /// Resolves `key` as a dependency of the object described by `context`.
    ///
    /// # Errors
    ///
    /// Same as [`Injector::dyn_get`].
    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Object, InjectorError>;

    /// Returns true if `key` can be resolved by this injector or one of its
    /// ancestors.
    fn has(&self, key: &Key) -> bool;
}

pub trait TypedInjector: Injector {
    /// Resolves the object registered as `key` and clones it out as a `T`.
    fn get<T, K>(&self, key: K) -> Result<T, InjectorError>
    where
        T: Managed + Clone,
        K: Into<Key>,
    {
        let key = key.into();
        let object = self.dyn_get(&key)?;
        downcast_object(&key, &object)
    }

    /// Calls `target` with its annotated dependencies.
    fn invoke<T>(&self, target: &T) -> Result<T::Output, InjectorError>
    where
        T: Target + ?Sized,
    {
        self.invoke_with(target, &Locals::new())
    }

    /// Calls `target` with its annotated dependencies, taking any name
    /// present in `locals` from there instead of the injector.
    fn invoke_with<T>(&self, target: &T, locals: &Locals) -> Result<T::Output, InjectorError>
    where
        T: Target + ?Sized,
    {
        invoke_target(self.upcast_dyn(), target, locals, None)
    }

    /// Constructs a new `C` with its annotated dependencies.
    fn instantiate<C>(&self) -> Result<C::Constructed, InjectorError>
    where
        C: Component,
    {
        self.instantiate_with::<C>(&Locals::new())
    }

    /// Constructs a new `C`, taking any name present in `locals` from there
    /// instead of the injector.
    fn instantiate_with<C>(&self, locals: &Locals) -> Result<C::Constructed, InjectorError>
    where
        C: Component,
    {
        instantiate_component::<_, C>(self.upcast_dyn(), locals, None)
    }

    fn upcast_dyn(&self) -> &dyn Injector;
}

impl<T> TypedInjector for T
where
    T: Injector,
{
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

impl TypedInjector for dyn Injector + '_ {
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find any provider of {key} while resolving {chain}"))]
    #[non_exhaustive]
    UnknownDependency { key: Key, chain: Chain },
    #[snafu(display("could not resolve {chain} which depends on itself"))]
    #[non_exhaustive]
    CyclicDependency { chain: Chain },
    #[snafu(display("the annotation lists {actual} names but the callable takes {expected} parameters"))]
    #[non_exhaustive]
    AnnotationMismatch { expected: usize, actual: usize },
    #[snafu(display("malformed inline annotation: {reason}"))]
    #[non_exhaustive]
    MalformedAnnotation { reason: String },
    #[snafu(display("the object {key} is a {found} rather than the requested {expected}"))]
    #[non_exhaustive]
    TypeMismatch {
        key: Key,
        expected: &'static str,
        found: &'static str,
    },
    #[snafu(display("could not construct {target}"))]
    #[non_exhaustive]
    ObjectConstruction {
        target: String,
        source: Arc<dyn Error + Send + Sync>,
    },
}

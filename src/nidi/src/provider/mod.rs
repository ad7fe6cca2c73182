pub mod component;
pub mod factory;

use std::fmt::Debug;

use crate::container::injector::{CallContext, Injector, InjectorError, TypedInjector};
use crate::container::{into_object, Managed, Object};

/// A universal factory which constructs objects bound to one name.
///
/// A [`Provider`] is responsible for constructing an object on each request
/// and retrieving all of its dependencies from an [`Injector`]. Whether the
/// result is cached is decided by the binding's lifetime, not by the provider,
/// so each request to a [`Provider`] should produce a new object.
///
/// In convention, a [`Provider`] is stateless and may be used by multiple
/// threads at once.
///
/// Usually, you don't need to implement [`Provider`] manually, since this is
/// automatically done by [`TypedProvider`]'s blanket implementation.
pub trait Provider: Debug + Send + Sync + 'static {
    /// Provides a newly created type-erased object. Dependencies must be
    /// requested through [`Injector::dyn_get_dependency`] with `context`, so
    /// that cyclic dependencies are detected.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn dyn_provide(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Object, InjectorError>;
}

/// A static variant of the [`Provider`] trait, leveraging static dispatch and
/// type-safety.
pub trait TypedProvider: Provider {
    /// The type of objects constructed by the provider.
    type Output: Managed;

    /// Provides a newly created object of type [`TypedProvider::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized;
}

impl<T: TypedProvider> Provider for T {
    fn dyn_provide(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Object, InjectorError> {
        self.provide(injector, context).map(into_object)
    }
}

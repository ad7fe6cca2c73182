use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{
    instantiate_component, CallContext, InjectorError, Locals, TypedInjector,
};
use crate::provider::component::Component;
use crate::provider::TypedProvider;

/// A [`Provider`] which constructs a [`Component`] on each request.
///
/// [`Provider`]: crate::provider::Provider
pub struct ComponentProvider<C>
where
    C: Component,
{
    _marker: PhantomData<C>,
}

impl<C> ComponentProvider<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Debug for ComponentProvider<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentProvider<C>")
            .field("inject", &C::INJECT)
            .finish_non_exhaustive()
    }
}

impl<C> TypedProvider for ComponentProvider<C>
where
    C: Component,
{
    type Output = C::Constructed;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        instantiate_component::<_, C>(injector.upcast_dyn(), &Locals::new(), Some(context))
    }
}

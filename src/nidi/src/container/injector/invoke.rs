use std::any;
use std::sync::Arc;

use crate::annotation::{self, Annotation, Dependencies, Target};
use crate::container::injector::{Arguments, CallContext, Injector, InjectorError, Locals};
use crate::key::Key;
use crate::provider::component::Component;

pub(crate) fn invoke_target<I, T>(
    injector: &I,
    target: &T,
    locals: &Locals,
    context: Option<&CallContext<'_>>,
) -> Result<T::Output, InjectorError>
where
    I: Injector + ?Sized,
    T: Target + ?Sized,
{
    let keys = annotation::resolve(target.annotation(), target.arity())?;
    let arguments = Arguments::resolve(injector, keys, locals, context)?;
    target.call(arguments)
}

pub(crate) fn instantiate_component<I, C>(
    injector: &I,
    locals: &Locals,
    context: Option<&CallContext<'_>>,
) -> Result<C::Constructed, InjectorError>
where
    I: Injector + ?Sized,
    C: Component,
{
    let names: Vec<Key> = C::INJECT.iter().copied().map(Key::from_static).collect();
    let arity = <C::Dependencies as Dependencies>::ARITY;
    let keys = annotation::resolve(Annotation::Attached(&names), arity)?;
    let arguments = Arguments::resolve(injector, keys, locals, context)?;
    let dependencies = C::Dependencies::extract(arguments)?;

    match C::construct(dependencies) {
        Ok(object) => Ok(object.post_process()),
        Err(err) => Err(InjectorError::ObjectConstruction {
            target: context.map_or_else(
                || any::type_name::<C>().to_owned(),
                |context| context.key().to_string(),
            ),
            source: Arc::from(err.into()),
        }),
    }
}

use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::annotation::{Annotation, Target};
use crate::container::injector::{
    invoke_target, CallContext, InjectorError, Locals, TypedInjector,
};
use crate::container::Managed;
use crate::provider::TypedProvider;

/// A [`Provider`] which calls an annotated target and returns its output.
///
/// [`Provider`]: crate::provider::Provider
pub struct FactoryProvider<T>
where
    T: Target<Output: Managed> + 'static,
{
    target: T,
}

impl<T> FactoryProvider<T>
where
    T: Target<Output: Managed> + 'static,
{
    pub fn new(target: T) -> Self {
        Self { target }
    }
}

impl<T> Debug for FactoryProvider<T>
where
    T: Target<Output: Managed> + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        debug_target(f, "FactoryProvider<T>", self.target.annotation())
    }
}

impl<T> TypedProvider for FactoryProvider<T>
where
    T: Target<Output: Managed> + 'static,
{
    type Output = T::Output;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        invoke_target(injector.upcast_dyn(), &self.target, &Locals::new(), Some(context))
    }
}

/// A [`Provider`] which calls an annotated target returning a [`Result`].
///
/// An `Err` returned by the target is wrapped into
/// [`InjectorError::ObjectConstruction`].
///
/// [`Provider`]: crate::provider::Provider
pub struct FallibleFactoryProvider<T, O, E>
where
    T: Target<Output = Result<O, E>> + 'static,
    O: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
{
    target: T,
    _marker: PhantomData<fn() -> (O, E)>,
}

impl<T, O, E> FallibleFactoryProvider<T, O, E>
where
    T: Target<Output = Result<O, E>> + 'static,
    O: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
{
    pub fn new(target: T) -> Self {
        Self {
            target,
            _marker: PhantomData,
        }
    }
}

impl<T, O, E> Debug for FallibleFactoryProvider<T, O, E>
where
    T: Target<Output = Result<O, E>> + 'static,
    O: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        debug_target(f, "FallibleFactoryProvider<T, O, E>", self.target.annotation())
    }
}

impl<T, O, E> TypedProvider for FallibleFactoryProvider<T, O, E>
where
    T: Target<Output = Result<O, E>> + 'static,
    O: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
{
    type Output = O;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        let output =
            invoke_target(injector.upcast_dyn(), &self.target, &Locals::new(), Some(context))?;
        output.map_err(|err| InjectorError::ObjectConstruction {
            target: context.key().to_string(),
            source: Arc::from(err.into()),
        })
    }
}

fn debug_target(f: &mut Formatter<'_>, name: &str, annotation: Annotation<'_>) -> FmtResult {
    f.debug_struct(name)
        .field("annotation", &annotation)
        .finish_non_exhaustive()
}

#[cfg(test)]
mod tests {
    use crate::annotation::Annotated;
    use crate::container::injector::MockInjector;
    use crate::container::into_object;
    use crate::inline;
    use crate::key::Key;

    use super::*;

    fn make_injector() -> MockInjector {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get_dependency()
            .returning(|key, context| {
                assert_eq!(context.key().as_str(), "sum");
                match key.as_str() {
                    "a" => Ok(into_object(1i32)),
                    "b" => Ok(into_object(2i32)),
                    _ => unreachable!(),
                }
            });
        injector
    }

    #[test]
    fn factory_provider_provide_succeeds() {
        let injector = make_injector();
        let key = Key::from("sum");
        let context = CallContext::new(&key);

        let provider = FactoryProvider::new(Annotated::new(|a: i32, b: i32| a + b).inject(["a", "b"]));
        assert_eq!(provider.provide(&injector, &context).unwrap(), 3);

        let provider = FactoryProvider::new(inline!["b", "a" => |a: i32, b: i32| a * 10 + b]);
        assert_eq!(provider.provide(&injector, &context).unwrap(), 21);
    }

    #[test]
    fn factory_provider_provide_fails_when_annotation_mismatches() {
        let injector = MockInjector::new();
        let key = Key::from("sum");
        let provider = FactoryProvider::new(Annotated::new(|a: i32, b: i32| a + b).inject(["a"]));

        assert!(matches!(
            provider.provide(&injector, &CallContext::new(&key)),
            Err(InjectorError::AnnotationMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn fallible_factory_provider_provide_succeeds() {
        let injector = make_injector();
        let key = Key::from("sum");
        let provider = FallibleFactoryProvider::new(
            Annotated::new(|a: i32, b: i32| a.checked_add(b).ok_or("overflow")).inject(["a", "b"]),
        );

        assert_eq!(
            provider.provide(&injector, &CallContext::new(&key)).unwrap(),
            3
        );
    }

    #[test]
    fn fallible_factory_provider_provide_fails_when_target_fails() {
        let injector = make_injector();
        let key = Key::from("sum");
        let provider = FallibleFactoryProvider::new(
            Annotated::new(|a: i32, _b: i32| if a > 0 { Err("positive") } else { Ok(a) })
                .inject(["a", "b"]),
        );

        let err = provider
            .provide(&injector, &CallContext::new(&key))
            .unwrap_err();
        assert!(matches!(
            err,
            InjectorError::ObjectConstruction { ref target, .. } if target == "sum"
        ));
        assert_eq!(err.to_string(), "could not construct sum");
    }
}

use std::any;
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::{into_object, Managed, Object};
use crate::key::Key;
use crate::util::any::DowncastRef;

/// Per-call values that take precedence over the registry when the direct
/// arguments of an invoked target are resolved.
///
/// Locals never leak into transitive dependencies: if an argument has to be
/// constructed by a factory, that factory's own dependencies come from the
/// injector only.
///
/// # Examples
///
/// ```rust
/// # use nidi::container::injector::Locals;
/// let locals = Locals::new().with("$scope", 42i32);
/// assert!(locals.contains("$scope"));
/// ```
#[derive(Clone, Default)]
pub struct Locals {
    values: HashMap<Key, Object>,
}

impl Locals {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<K, T>(mut self, key: K, value: T) -> Self
    where
        K: Into<Key>,
        T: Managed,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, T>(&mut self, key: K, value: T)
    where
        K: Into<Key>,
        T: Managed,
    {
        self.values.insert(key.into(), into_object(value));
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Debug for Locals {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Locals")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// The resolved arguments of a target, in declaration order.
pub struct Arguments {
    entries: VecDeque<(Key, Object)>,
    taken: usize,
}

impl Arguments {
    pub fn new(entries: Vec<(Key, Object)>) -> Self {
        Self {
            entries: entries.into(),
            taken: 0,
        }
    }

    /// Looks up every key in order, preferring `locals` over the injector.
    ///
    /// Without a `context` each key starts a fresh resolution path; with one,
    /// each key is resolved as a dependency of `context`'s key, so cycles
    /// through it are detected.
    pub(crate) fn resolve<I>(
        injector: &I,
        keys: Vec<Key>,
        locals: &Locals,
        context: Option<&CallContext<'_>>,
    ) -> Result<Self, InjectorError>
    where
        I: Injector + ?Sized,
    {
        let entries = keys
            .into_iter()
            .map(|key| {
                let object = if let Some(local) = locals.get(key.as_str()) {
                    Arc::clone(local)
                } else if let Some(context) = context {
                    injector.dyn_get_dependency(&key, context)?
                } else {
                    injector.dyn_get(&key)?
                };
                Ok((key, object))
            })
            .collect::<Result<Vec<_>, InjectorError>>()?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Takes the next argument as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::TypeMismatch`] if the resolved object isn't a
    /// `T`, or [`InjectorError::AnnotationMismatch`] if all arguments are
    /// already taken.
    pub fn take<T>(&mut self) -> Result<T, InjectorError>
    where
        T: Managed + Clone,
    {
        let Some((key, object)) = self.entries.pop_front() else {
            return Err(InjectorError::AnnotationMismatch {
                expected: self.taken + 1,
                actual: self.taken,
            });
        };
        self.taken += 1;
        downcast_object(&key, &object)
    }
}

impl Debug for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Arguments")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

pub(crate) fn downcast_object<T>(key: &Key, object: &Object) -> Result<T, InjectorError>
where
    T: Managed + Clone,
{
    match object.downcast_ref::<T>() {
        Some(value) => Ok(value.clone()),
        None => Err(InjectorError::TypeMismatch {
            key: key.clone(),
            expected: any::type_name::<T>(),
            found: (**object).type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::container::injector::MockInjector;

    use super::*;

    #[test]
    fn arguments_take_succeeds() {
        let mut arguments = Arguments::new(vec![
            (Key::from("a"), into_object(1i32)),
            (Key::from("b"), into_object("str")),
        ]);

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments.take::<i32>().unwrap(), 1);
        assert_eq!(arguments.take::<&'static str>().unwrap(), "str");
        assert!(arguments.is_empty());
    }

    #[test]
    fn arguments_take_fails_when_type_mismatches() {
        let mut arguments = Arguments::new(vec![(Key::from("a"), into_object(1i32))]);

        let err = arguments.take::<String>().unwrap_err();
        assert!(matches!(
            err,
            InjectorError::TypeMismatch { ref key, found, .. }
                if key.as_str() == "a" && found == "i32"
        ));
    }

    #[test]
    fn arguments_take_fails_when_exhausted() {
        let mut arguments = Arguments::new(vec![(Key::from("a"), into_object(1i32))]);
        let _ = arguments.take::<i32>().unwrap();

        assert!(matches!(
            arguments.take::<i32>(),
            Err(InjectorError::AnnotationMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn arguments_resolve_prefers_locals() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .withf(|key| key.as_str() == "b")
            .times(1)
            .returning(|_| Ok(into_object(2i32)));

        let locals = Locals::new().with("a", 1i32);
        let mut arguments = Arguments::resolve(
            &injector,
            vec![Key::from("a"), Key::from("b")],
            &locals,
            None,
        )
        .unwrap();

        assert_eq!(arguments.take::<i32>().unwrap(), 1);
        assert_eq!(arguments.take::<i32>().unwrap(), 2);
    }

    #[test]
    fn arguments_resolve_forwards_context() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get_dependency()
            .times(1)
            .returning(|key, context| {
                assert_eq!(key.as_str(), "dep");
                assert_eq!(context.key().as_str(), "owner");
                Ok(into_object(3i32))
            });

        let owner = Key::from("owner");
        let context = CallContext::new(&owner);
        let mut arguments = Arguments::resolve(
            &injector,
            vec![Key::from("dep")],
            &Locals::new(),
            Some(&context),
        )
        .unwrap();

        assert_eq!(arguments.take::<i32>().unwrap(), 3);
    }
}

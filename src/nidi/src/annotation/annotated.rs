use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::annotation::{Annotation, Closure, Dependencies, Target};
use crate::container::injector::{Arguments, InjectorError};
use crate::key::Key;

/// A callable carrying an attached, ordered list of dependency names.
///
/// The list is matched positionally against the callable's parameters, so
/// the parameter identifiers themselves are irrelevant. The list length is
/// checked against the parameter count whenever the target is resolved.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use nidi::annotation::Annotated;
/// let greet = Annotated::new(|prefix: Arc<String>, name: &'static str| format!("{prefix} {name}"))
///     .inject(["greeting.prefix", "user.name"]);
/// assert_eq!(greet.names().len(), 2);
/// ```
pub struct Annotated<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    names: Vec<Key>,
    closure: C,
    _marker: PhantomData<D>,
}

impl<C, D> Annotated<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    /// Wraps `closure` with an empty list of names.
    pub fn new(closure: C) -> Self {
        Self {
            names: Vec::new(),
            closure,
            _marker: PhantomData,
        }
    }

    /// Replaces the attached list of names.
    pub fn inject<I, K>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn names(&self) -> &[Key] {
        &self.names
    }
}

impl<C, D> Debug for Annotated<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Annotated<C, D>")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl<C, D> Target for Annotated<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    type Output = C::Output;

    fn annotation(&self) -> Annotation<'_> {
        Annotation::Attached(&self.names)
    }

    fn arity(&self) -> usize {
        D::ARITY
    }

    fn call(&self, arguments: Arguments) -> Result<Self::Output, InjectorError> {
        D::extract(arguments).map(|dependencies| self.closure.run(dependencies))
    }
}

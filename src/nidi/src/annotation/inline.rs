use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::annotation::{Annotation, Closure, Dependencies, InlineSlot, Target};
use crate::container::injector::{Arguments, InjectorError};
use crate::key::Key;

/// An element of an inline annotation sequence.
pub enum InlineElement<C> {
    Name(Key),
    Callable(C),
}

impl<C> InlineElement<C> {
    pub fn name<K: Into<Key>>(key: K) -> Self {
        Self::Name(key.into())
    }

    fn as_slot(&self) -> InlineSlot<'_> {
        match self {
            Self::Name(key) => InlineSlot::Name(key),
            Self::Callable(_) => InlineSlot::Callable,
        }
    }
}

/// An ordered sequence of dependency names followed by the callable that
/// consumes them.
///
/// Use the [`inline!`] macro to build one:
///
/// ```rust
/// # use std::sync::Arc;
/// # use nidi::inline;
/// # use nidi::annotation::{self, Target};
/// let target = inline!["$window" => |w: Arc<String>| w.len()];
/// let names = annotation::resolve(target.annotation(), target.arity()).unwrap();
/// assert_eq!(names[0].as_str(), "$window");
/// ```
///
/// [`inline!`]: crate::inline
pub struct Inline<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    elements: Vec<InlineElement<C>>,
    _marker: PhantomData<D>,
}

impl<C, D> Inline<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    pub fn new(elements: Vec<InlineElement<C>>) -> Self {
        Self {
            elements,
            _marker: PhantomData,
        }
    }

    pub fn elements(&self) -> &[InlineElement<C>] {
        &self.elements
    }
}

impl<C, D> Debug for Inline<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Inline<C, D>")
            .field("elements", &self.annotation())
            .finish_non_exhaustive()
    }
}

impl<C, D> Target for Inline<C, D>
where
    C: Closure<D>,
    D: Dependencies,
{
    type Output = C::Output;

    fn annotation(&self) -> Annotation<'_> {
        Annotation::Inline(self.elements.iter().map(InlineElement::as_slot).collect())
    }

    fn arity(&self) -> usize {
        D::ARITY
    }

    fn call(&self, arguments: Arguments) -> Result<Self::Output, InjectorError> {
        let Some(InlineElement::Callable(closure)) = self.elements.last() else {
            return Err(InjectorError::MalformedAnnotation {
                reason: String::from("the sequence doesn't end with a callable"),
            });
        };
        D::extract(arguments).map(|dependencies| closure.run(dependencies))
    }
}

/// Builds an [`Inline`] annotation from dependency names followed by the
/// callable, separated by `=>`.
///
/// ```rust
/// # use nidi::inline;
/// let target = inline!["a", "b" => |a: i32, b: i32| a + b];
/// let nothing = inline![=> || 42];
/// ```
///
/// [`Inline`]: crate::annotation::Inline
#[macro_export]
macro_rules! inline {
    [$($name:expr),* $(,)? => $callable:expr] => {
        $crate::annotation::Inline::new(vec![
            $($crate::annotation::InlineElement::name($name),)*
            $crate::annotation::InlineElement::Callable($callable),
        ])
    };
}

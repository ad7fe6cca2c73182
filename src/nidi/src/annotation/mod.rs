//! Dependency annotations and their resolution.
//!
//! A target declares the names of its dependencies explicitly, in one of two
//! shapes:
//!
//! - an *attached list*: the callable carries an ordered list of names, see
//!   [`Annotated`] and [`Component::INJECT`];
//! - an *inline sequence*: an ordered sequence of names followed by the
//!   callable itself, see [`Inline`] and the [`inline!`] macro.
//!
//! Parameter names are never inferred. A callable without annotation has an
//! empty name list, which only fits a callable without parameters.
//!
//! [`Component::INJECT`]: crate::provider::component::Component::INJECT
//! [`inline!`]: crate::inline

mod annotated;
mod closure;
mod inline;

use crate::container::injector::{Arguments, InjectorError};
use crate::key::Key;

pub use annotated::Annotated;
pub use closure::{Closure, Dependencies};
pub use inline::{Inline, InlineElement};

/// The annotation shape a [`Target`] exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// An ordered list of names attached to the callable.
    Attached(&'a [Key]),
    /// An ordered sequence whose leading slots are names and whose final slot
    /// is the callable.
    Inline(Vec<InlineSlot<'a>>),
}

/// One element of an inline sequence, with the callable erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineSlot<'a> {
    Name(&'a Key),
    Callable,
}

/// Something the injector can call with resolved dependencies.
pub trait Target: Send + Sync {
    /// The value returned by the call.
    type Output;

    /// Returns the names of the dependencies in the shape they were declared.
    fn annotation(&self) -> Annotation<'_>;

    /// Returns the number of parameters of the underlying callable.
    fn arity(&self) -> usize;

    /// Calls the underlying callable with `arguments`, which are ordered as
    /// the resolved annotation.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument doesn't have the parameter's type.
    fn call(&self, arguments: Arguments) -> Result<Self::Output, InjectorError>;
}

/// Extracts the ordered dependency names from `annotation`, checking them
/// against a callable taking `arity` parameters.
///
/// # Errors
///
/// Returns [`InjectorError::AnnotationMismatch`] if the number of names
/// differs from `arity`, or [`InjectorError::MalformedAnnotation`] if an
/// inline sequence doesn't consist of names followed by exactly one callable.
///
/// # Examples
///
/// ```rust
/// # use nidi::annotation::{self, Annotation, InlineSlot};
/// # use nidi::key::Key;
/// let window = Key::from("$window");
/// let annotation = Annotation::Inline(vec![InlineSlot::Name(&window), InlineSlot::Callable]);
/// assert_eq!(annotation::resolve(annotation, 1).unwrap(), vec![window.clone()]);
/// ```
pub fn resolve(annotation: Annotation<'_>, arity: usize) -> Result<Vec<Key>, InjectorError> {
    let names = match annotation {
        Annotation::Attached(names) => names.to_vec(),
        Annotation::Inline(slots) => resolve_inline(&slots)?,
    };

    if names.len() == arity {
        Ok(names)
    } else {
        Err(InjectorError::AnnotationMismatch {
            expected: arity,
            actual: names.len(),
        })
    }
}

fn resolve_inline(slots: &[InlineSlot<'_>]) -> Result<Vec<Key>, InjectorError> {
    let Some((last, leading)) = slots.split_last() else {
        return Err(InjectorError::MalformedAnnotation {
            reason: String::from("the sequence is empty"),
        });
    };

    if *last != InlineSlot::Callable {
        return Err(InjectorError::MalformedAnnotation {
            reason: String::from("the sequence doesn't end with a callable"),
        });
    }

    leading
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            InlineSlot::Name(key) => Ok((*key).clone()),
            InlineSlot::Callable => Err(InjectorError::MalformedAnnotation {
                reason: format!("found a callable at position {i} before the end"),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&'static str]) -> Vec<Key> {
        names.iter().copied().map(Key::from).collect()
    }

    #[test]
    fn resolve_succeeds_when_list_is_attached() {
        let names = keys(&["a", "b"]);
        let res = resolve(Annotation::Attached(&names), 2).unwrap();
        assert_eq!(res, names);
    }

    #[test]
    fn resolve_fails_when_attached_list_is_shorter_than_parameters() {
        let names = keys(&["a", "b"]);
        assert!(matches!(
            resolve(Annotation::Attached(&names), 3),
            Err(InjectorError::AnnotationMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn resolve_fails_when_attached_list_is_longer_than_parameters() {
        let names = keys(&["a", "b"]);
        assert!(matches!(
            resolve(Annotation::Attached(&names), 0),
            Err(InjectorError::AnnotationMismatch {
                expected: 0,
                actual: 2
            })
        ));
    }

    #[test]
    fn resolve_succeeds_when_sequence_is_inline() {
        let names = keys(&["$window", "$http"]);
        let slots = vec![
            InlineSlot::Name(&names[0]),
            InlineSlot::Name(&names[1]),
            InlineSlot::Callable,
        ];
        assert_eq!(resolve(Annotation::Inline(slots), 2).unwrap(), names);
    }

    #[test]
    fn resolve_succeeds_when_inline_sequence_only_has_callable() {
        let res = resolve(Annotation::Inline(vec![InlineSlot::Callable]), 0).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn resolve_fails_when_inline_sequence_is_malformed() {
        let names = keys(&["a"]);

        assert!(matches!(
            resolve(Annotation::Inline(Vec::new()), 0),
            Err(InjectorError::MalformedAnnotation { .. })
        ));
        assert!(matches!(
            resolve(Annotation::Inline(vec![InlineSlot::Name(&names[0])]), 1),
            Err(InjectorError::MalformedAnnotation { .. })
        ));
        assert!(matches!(
            resolve(
                Annotation::Inline(vec![
                    InlineSlot::Callable,
                    InlineSlot::Name(&names[0]),
                    InlineSlot::Callable
                ]),
                1
            ),
            Err(InjectorError::MalformedAnnotation { .. })
        ));
    }

    #[test]
    fn resolve_fails_when_inline_names_mismatch_parameters() {
        let names = keys(&["a"]);
        let slots = vec![InlineSlot::Name(&names[0]), InlineSlot::Callable];
        assert!(matches!(
            resolve(Annotation::Inline(slots), 2),
            Err(InjectorError::AnnotationMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}

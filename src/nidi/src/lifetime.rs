use std::fmt::{Display, Formatter, Result as FmtResult};

/// How long an object produced by a factory binding lives.
///
/// A singleton object is created at most once per injector, on its first
/// request, and every later request of the same name receives the cached
/// instance. A transient object is created anew on every request and is never
/// cached; its ownership belongs entirely to the requester.
///
/// Note that a singleton is only unique within the injector owning its
/// binding. A child injector forwards requests of names it doesn't bind to its
/// parent, so singletons bound in the parent are shared by all children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lifetime {
    #[default]
    Singleton,
    Transient,
}

impl Lifetime {
    pub fn is_cached(self) -> bool {
        matches!(self, Self::Singleton)
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Transient => "Transient",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

mod chain;

use std::borrow::{Borrow, Cow};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

pub use chain::Chain;

/// The name under which a dependency is registered and requested.
///
/// Names are compared as plain strings, so `"$window"` registered in one
/// module is the same dependency as `"$window"` requested anywhere else.
///
/// # Examples
///
/// ```rust
/// # use nidi::key::Key;
/// let a = Key::from("$window");
/// let b = Key::from(String::from("$window"));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "$window");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    name: Cow<'static, str>,
}

impl Key {
    /// Creates a [`Key`] from a string literal without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self {
            name: Cow::Owned(name),
        }
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

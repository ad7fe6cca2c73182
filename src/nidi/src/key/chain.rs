use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::key::Key;

/// The ordered list of names visited while resolving a dependency, from the
/// outermost request to the innermost one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chain {
    keys: Vec<Key>,
}

impl Chain {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }
}

impl FromIterator<Key> for Chain {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

use crate::key::{Chain, Key};

/// Information about the dependency currently being resolved.
#[derive(Clone)]
pub struct CallContext<'a> {
    trace: InjectionTrace<'a>,
}

impl<'a> CallContext<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            trace: InjectionTrace::new(key),
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> CallContext<'b> {
        CallContext {
            trace: self.trace.append(key),
        }
    }

    pub fn key(&self) -> &Key {
        self.trace.key()
    }

    pub fn trace(&self) -> &InjectionTrace<'_> {
        &self.trace
    }
}

/// A stack-allocated linked list of the names on the active resolution path,
/// innermost first.
#[derive(Clone)]
pub struct InjectionTrace<'a> {
    key: &'a Key,
    previous: Option<&'a InjectionTrace<'a>>,
}

impl<'a> InjectionTrace<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            previous: None,
        }
    }

    pub fn append<'b>(&'b self, key: &'b Key) -> InjectionTrace<'b> {
        InjectionTrace {
            key,
            previous: Some(self),
        }
    }

    pub fn key(&self) -> &Key {
        self.key
    }

    pub fn previous(&self) -> Option<&InjectionTrace<'a>> {
        self.previous
    }

    /// Returns true if `key` is already being resolved further up the path.
    pub fn previous_exist_key(&self, key: &Key) -> bool {
        let mut this = self;
        while let Some(previous) = this.previous() {
            if previous.key() == key {
                return true;
            }
            this = previous;
        }
        false
    }

    /// Collects the path from the outermost request down to the current key.
    pub fn chain(&self) -> Chain {
        let mut keys = vec![self.key.clone()];
        let mut this = self;
        while let Some(previous) = this.previous() {
            keys.push(previous.key().clone());
            this = previous;
        }
        keys.reverse();
        Chain::new(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_trace_previous_exist_key_succeeds() {
        let a = Key::from("a");
        let b = Key::from("b");
        let c = Key::from("c");

        let root = CallContext::new(&a);
        let child = root.append(&b);

        assert!(!root.trace().previous_exist_key(&a));
        assert!(child.trace().previous_exist_key(&a));
        assert!(!child.trace().previous_exist_key(&b));
        assert!(!child.trace().previous_exist_key(&c));
    }

    #[test]
    fn injection_trace_chain_succeeds() {
        let a = Key::from("a");
        let b = Key::from("b");

        let root = CallContext::new(&a);
        let child = root.append(&b);
        let grandchild = child.append(&a);

        assert_eq!(root.trace().chain().to_string(), "a");
        assert_eq!(grandchild.trace().chain().to_string(), "a -> b -> a");
        assert_eq!(grandchild.key(), &a);
    }
}

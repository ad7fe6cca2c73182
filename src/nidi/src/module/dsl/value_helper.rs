use crate::container::registry::{Binding, Configurer};
use crate::container::Managed;
use crate::key::Key;

pub struct ValueBinding<T>
where
    T: Managed,
{
    key: Key,
    value: T,
}

impl<T> ValueBinding<T>
where
    T: Managed,
{
    pub(super) fn new(key: Key, value: T) -> Self {
        Self { key, value }
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.key, Binding::value(self.value));
    }
}

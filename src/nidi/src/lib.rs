#![allow(clippy::new_without_default)]

pub mod annotation;
pub mod container;
pub mod key;
pub mod lifetime;
pub mod module;
pub mod provider;
mod util;

pub use nidi_derive::component;

pub mod prelude {
    pub use crate::annotation::{Annotated, Inline, InlineElement, Target};
    pub use crate::component;
    pub use crate::container::injector::{Injector, InjectorError, Locals, TypedInjector};
    pub use crate::container::registry::{
        Binding, Configurer, ProviderRegistry, Registry, RegistryError,
    };
    pub use crate::container::Container;
    pub use crate::inline;
    pub use crate::key::Key;
    pub use crate::lifetime::Lifetime;
    pub use crate::module::dsl::bind;
    pub use crate::module::{Configuration, Module};
    pub use crate::provider::component::Component;
}

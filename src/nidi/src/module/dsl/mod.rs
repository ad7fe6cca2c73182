//! A fluent syntax for registering bindings inside [`Module::configure`].
//!
//! ```text
//! bind("name").to_value(v)
//! bind("name").to_factory(target)
//! bind("name").to_fallible_factory(target)
//! bind("name").to_component::<C>()
//! bind("name").to_provider(p)
//! ```
//!
//! Factory bindings are singletons unless `.as_transient()` is called.
//!
//! [`Module::configure`]: crate::module::Module::configure

pub mod metadata_helper;
pub mod provider_helper;
pub mod value_helper;

use metadata_helper::MetadataBinding;

use crate::key::Key;

pub fn bind<K>(key: K) -> MetadataBinding
where
    K: Into<Key>,
{
    MetadataBinding::new(key.into())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::error::Error;
    use std::sync::Arc;

    use crate::annotation::Annotated;
    use crate::container::injector::TypedInjector;
    use crate::container::registry::{Binding, Configurer, ProviderRegistry, Registry};
    use crate::container::Container;
    use crate::inline;
    use crate::lifetime::Lifetime;
    use crate::module::Module;
    use crate::provider::component::Component;
    use crate::provider::factory::FactoryProvider;

    use super::*;

    struct DslCompilationTest;

    impl Module for DslCompilationTest {
        fn configure(
            &self,
            configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            bind("object").as_transient().to_component::<TestObject>().set_on(configurer);

            bind("dyn.object")
                .to_component::<TestDynObject>()
                .set_on(configurer);

            bind("i64")
                .to_factory(Annotated::new(|| 42i64))
                .as_transient()
                .set_on(configurer);

            bind("i32")
                .to_fallible_factory(inline!["i64" => |v: i64| i32::try_from(v)])
                .set_on(configurer);

            bind("arc").to_value(Arc::new(42)).set_on(configurer);

            bind("str")
                .to_provider(FactoryProvider::new(Annotated::new(|| "str")))
                .as_singleton()
                .set_on(configurer);

            Ok(())
        }
    }

    trait TestTrait: Send + Sync + 'static {}

    struct TestDynObject;

    impl TestTrait for TestDynObject {}

    impl Component for TestDynObject {
        type Dependencies = ();

        type Constructed = Arc<dyn TestTrait>;

        type Error = Infallible;

        const INJECT: &'static [&'static str] = &[];

        fn construct((): Self::Dependencies) -> Result<Self, Self::Error> {
            Ok(Self)
        }

        fn post_process(self) -> Self::Constructed {
            Arc::new(self)
        }
    }

    #[derive(Clone)]
    struct TestObject;

    impl Component for TestObject {
        type Dependencies = ();

        type Constructed = Self;

        type Error = Infallible;

        const INJECT: &'static [&'static str] = &[];

        fn construct((): Self::Dependencies) -> Result<Self, Self::Error> {
            Ok(Self)
        }

        fn post_process(self) -> Self::Constructed {
            self
        }
    }

    #[test]
    fn dsl_bind_succeeds() {
        let registry = ProviderRegistry::init(DslCompilationTest).unwrap();

        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.get("object").unwrap().lifetime(),
            Some(Lifetime::Transient)
        );
        assert_eq!(
            registry.get("dyn.object").unwrap().lifetime(),
            Some(Lifetime::Singleton)
        );
        assert_eq!(
            registry.get("i64").unwrap().lifetime(),
            Some(Lifetime::Transient)
        );
        assert!(matches!(registry.get("arc"), Ok(Binding::Value { .. })));

        let container = Container::from_registry(registry);
        assert_eq!(container.get::<i32, _>("i32").unwrap(), 42);
        assert_eq!(container.get::<&'static str, _>("str").unwrap(), "str");
        assert!(container.get::<TestObject, _>("object").is_ok());
        assert!(container.get::<Arc<dyn TestTrait>, _>("dyn.object").is_ok());
    }
}

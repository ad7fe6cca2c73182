use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::core::ContainerCore;
use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::registry::{ProviderRegistry, Registry, RegistryError};
use crate::container::Object;
use crate::key::Key;
use crate::module::Module;

/// An injector instance.
///
/// A [`Container`] owns a [`ProviderRegistry`] and the cache of the singletons
/// it constructed. Cloning it yields another handle to the same injector.
///
/// A container created by [`Container::child`] resolves its own bindings first
/// and forwards every other name to its parent, so singletons bound in the
/// parent are constructed and cached once by the parent and shared with all of
/// its children.
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    pub fn from_registry(registry: ProviderRegistry) -> Self {
        Self::from_core(ContainerCore::new_root(registry))
    }

    /// Creates a child injector configured by `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if `module` fails to configure the child registry.
    pub fn child<M>(&self, module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        ProviderRegistry::init(module).map(|registry| self.child_from_registry(registry))
    }

    pub fn child_from_registry(&self, registry: ProviderRegistry) -> Self {
        Self::from_core(ContainerCore::new_child(Arc::clone(&self.core), registry))
    }

    pub fn parent(&self) -> Option<Self> {
        self.core.parent().map(|core| Self {
            core: Arc::clone(core),
        })
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.core.providers()
    }

    fn from_core(core: ContainerCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}

impl Registry for Container {
    fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        ProviderRegistry::init(module).map(Self::from_registry)
    }
}

impl Injector for Container {
    fn dyn_get(&self, key: &Key) -> Result<Object, InjectorError> {
        self.core.dyn_get(key)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Object, InjectorError> {
        self.core.dyn_get_dependency(key, context)
    }

    fn has(&self, key: &Key) -> bool {
        self.core.has(key)
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Container")
            .field("registry", self.core.providers())
            .field("has_parent", &self.core.parent().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::error::Error;
    use std::thread;

    use parking_lot::Mutex;

    use crate::container::injector::TypedInjector;
    use crate::container::registry::Configurer;
    use crate::module::dsl::bind;
    use crate::provider::component::Component;

    use super::*;

    struct TestObject {
        value: Mutex<i32>,
        name: Arc<String>,
    }

    impl TestObject {
        fn set(&self, value: i32) {
            *self.value.lock() = value;
        }

        fn get(&self) -> i32 {
            *self.value.lock()
        }

        fn name(&self) -> &str {
            self.name.as_ref()
        }
    }

    impl Component for TestObject {
        type Dependencies = (Arc<String>,);

        type Constructed = Arc<Self>;

        type Error = Infallible;

        const INJECT: &'static [&'static str] = &["name"];

        fn construct((name,): Self::Dependencies) -> Result<Self, Self::Error> {
            Ok(Self {
                value: Mutex::new(0),
                name,
            })
        }

        fn post_process(self) -> Self::Constructed {
            Arc::new(self)
        }
    }

    struct TestModule;

    impl Module for TestModule {
        fn configure(
            &self,
            configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            bind("object")
                .to_component::<TestObject>()
                .set_on(configurer);
            bind("name")
                .to_value(Arc::new(String::from("test-object")))
                .set_on(configurer);
            Ok(())
        }
    }

    struct ChildModule;

    impl Module for ChildModule {
        fn configure(
            &self,
            configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            bind("name")
                .to_value(Arc::new(String::from("child-object")))
                .set_on(configurer);
            bind("child.object")
                .to_component::<TestObject>()
                .as_transient()
                .set_on(configurer);
            Ok(())
        }
    }

    #[test]
    fn container_operations_succeeds() {
        let container = Container::init(TestModule).unwrap();

        let object: Arc<TestObject> = container.get("object").unwrap();
        assert_eq!(object.get(), 0);
        assert_eq!(object.name(), "test-object");
        object.set(42);

        let handles = [
            thread::spawn({
                let container = container.clone();
                move || {
                    let object: Arc<TestObject> = container.get("object").unwrap();
                    assert_eq!(object.get(), 42);
                }
            }),
            thread::spawn({
                let container = container.clone();
                move || {
                    let object: Arc<TestObject> = container.get("object").unwrap();
                    assert_eq!(object.name(), "test-object");
                }
            }),
        ];
        handles
            .into_iter()
            .for_each(|h| h.join().expect("Each thread should not `panic!()`"));
    }

    #[test]
    fn container_child_succeeds() {
        let container = Container::init(TestModule).unwrap();
        let child = container.child(ChildModule).unwrap();

        let name: Arc<String> = child.get("name").unwrap();
        assert_eq!(name.as_str(), "child-object");

        let shared: Arc<TestObject> = child.get("object").unwrap();
        assert_eq!(shared.name(), "test-object");
        assert!(Arc::ptr_eq(
            &shared,
            &container.get::<Arc<TestObject>, _>("object").unwrap()
        ));

        let own: Arc<TestObject> = child.get("child.object").unwrap();
        assert_eq!(own.name(), "child-object");
        assert!(!container.has(&Key::from("child.object")));
        assert!(child.has(&Key::from("object")));
        assert!(child.parent().is_some());
        assert!(container.parent().is_none());
    }

    #[test]
    fn container_init_fails_when_key_duplicated() {
        struct DuplicatedModule;

        impl Module for DuplicatedModule {
            fn configure(
                &self,
                configurer: &mut dyn Configurer,
            ) -> Result<(), Box<dyn Error + Send + Sync>> {
                bind("a").to_value(1i32).set_on(configurer);
                bind("a").to_value(2i32).set_on(configurer);
                Err("module failure".into())
            }
        }

        match Container::init(DuplicatedModule) {
            Err(RegistryError::Aggregated { errors }) => {
                assert_eq!(errors.len(), 2);
                assert!(matches!(errors[0], RegistryError::KeyDuplicated { .. }));
                assert!(matches!(errors[1], RegistryError::ModuleInner { .. }));
            }
            _ => panic!("registry errors should be aggregated"),
        }
    }
}

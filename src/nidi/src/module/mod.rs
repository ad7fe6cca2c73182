pub mod dsl;

use std::any;
use std::error::Error;

use crate::container::registry::Configurer;

/// A unit of configuration which registers bindings into a [`Configurer`].
///
/// # Examples
///
/// ```rust
/// # use std::error::Error;
/// # use std::sync::Arc;
/// # use nidi::prelude::*;
/// struct GreetingModule;
///
/// impl Module for GreetingModule {
///     fn configure(
///         &self,
///         configurer: &mut dyn Configurer,
///     ) -> Result<(), Box<dyn Error + Send + Sync>> {
///         bind("greeting.prefix")
///             .to_value(Arc::new(String::from("Hello")))
///             .set_on(configurer);
///         bind("greeting")
///             .to_factory(
///                 Annotated::new(|prefix: Arc<String>| Arc::new(format!("{prefix}, world")))
///                     .inject(["greeting.prefix"]),
///             )
///             .set_on(configurer);
///         Ok(())
///     }
/// }
///
/// let container = Container::init(GreetingModule).unwrap();
/// let greeting: Arc<String> = container.get("greeting").unwrap();
/// assert_eq!(greeting.as_str(), "Hello, world");
/// ```
pub trait Module: 'static {
    /// Runs [`Module::configure`], reporting its error to `configurer`.
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }

    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// A [`Module`] composed of other modules, which are set up in insertion
/// order.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }
}

impl Module for Configuration {
    fn setup(&self, configurer: &mut dyn Configurer) {
        self.modules
            .iter()
            .for_each(|module| module.setup(configurer));
    }

    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.setup(configurer);
        Ok(())
    }
}

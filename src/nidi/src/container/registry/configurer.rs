use std::error::Error;

use crate::container::registry::{Binding, Configurer, ProviderRegistry, RegistryError};
use crate::key::Key;

pub struct ConfigurerImpl {
    providers: ProviderRegistry,
    errors: Vec<RegistryError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            providers: ProviderRegistry::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<ProviderRegistry, Vec<RegistryError>> {
        if self.errors.is_empty() {
            Ok(self.providers)
        } else {
            Err(self.errors)
        }
    }
}

impl Configurer for ConfigurerImpl {
    fn register(&mut self, key: Key, binding: Binding) {
        if let Err(err) = self.providers.register(key, binding) {
            self.errors.push(err);
        }
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use oneshot::{Receiver, Sender};
use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::{debug, trace, warn};

use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::registry::{Binding, ProviderRegistry};
use crate::container::Object;
use crate::key::{Chain, Key};
use crate::lifetime::Lifetime;
use crate::provider::Provider;

pub struct ContainerCore {
    parent: Option<Arc<Self>>,
    providers: ProviderRegistry,
    managed: RwLock<ManagedObjectData>,
}

impl ContainerCore {
    pub fn new_root(providers: ProviderRegistry) -> Self {
        Self::new_impl(None, providers)
    }

    pub fn new_child(parent: Arc<Self>, providers: ProviderRegistry) -> Self {
        Self::new_impl(Some(parent), providers)
    }

    fn new_impl(parent: Option<Arc<Self>>, providers: ProviderRegistry) -> Self {
        Self {
            parent,
            providers,
            managed: RwLock::new(ManagedObjectData::new()),
        }
    }

    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    fn get_object(&self, context: &CallContext<'_>) -> Result<Object, InjectorError> {
        let key = context.key();
        if let Some(object) = self.try_get_constructed_object(key) {
            trace!(%key, "singleton cache hit");
            return Ok(object);
        }

        if context.trace().previous_exist_key(key) {
            return Err(self.cyclic_dependency(context));
        }

        match self.providers.find(key.as_str()) {
            Some(Binding::Value { value }) => Ok(Arc::clone(value)),
            Some(Binding::Factory {
                provider,
                lifetime: Lifetime::Singleton,
            }) => self.get_shared_object_from_self(provider.as_ref(), context),
            Some(Binding::Factory {
                provider,
                lifetime: Lifetime::Transient,
            }) => self.get_transient_object_from_self(provider.as_ref(), context),
            None => self.get_object_from_parent(context),
        }
    }

    fn try_get_constructed_object(&self, key: &Key) -> Option<Object> {
        let objects = &self.managed.read().objects;
        objects.get(key).map(Arc::clone)
    }

    fn cyclic_dependency(&self, context: &CallContext<'_>) -> InjectorError {
        let chain = context.trace().chain();
        warn!(%chain, "cyclic dependency detected");
        InjectorError::CyclicDependency { chain }
    }

    fn get_object_from_parent(&self, context: &CallContext<'_>) -> Result<Object, InjectorError> {
        let key = context.key();
        if let Some(parent) = self.parent.as_ref() {
            trace!(%key, "forwarding request to parent injector");
            parent.get_object(context)
        } else {
            Err(InjectorError::UnknownDependency {
                key: key.clone(),
                chain: context.trace().chain(),
            })
        }
    }

    fn get_transient_object_from_self(
        &self,
        provider: &dyn Provider,
        context: &CallContext<'_>,
    ) -> Result<Object, InjectorError> {
        let object = provider.dyn_provide(self, context)?;
        debug!(
            key = %context.key(),
            lifetime = %Lifetime::Transient,
            type_name = (*object).type_name(),
            "object constructed"
        );
        Ok(object)
    }

    fn get_shared_object_from_self(
        &self,
        provider: &dyn Provider,
        context: &CallContext<'_>,
    ) -> Result<Object, InjectorError> {
        let key = context.key();
        let mut managed = self.managed.write();

        // Another thread may have finished between the read and the write lock.
        if let Some(object) = managed.objects.get(key) {
            return Ok(Arc::clone(object));
        }

        if let Some(object_context) = managed.constructing.get(key) {
            let owner = object_context.on_thread;
            if object_context.is_constructed_by_current_thread() {
                Err(self.stop_construction_on_cyclic_dependency(managed, context))
            } else if let Some(chain) = managed.find_waiting_cycle(owner, context) {
                warn!(%chain, "cyclic dependency detected across threads");
                Err(InjectorError::CyclicDependency { chain })
            } else {
                self.wait_for_constructed_object(managed, key)
            }
        } else {
            self.construct_shared_object(managed, provider, context)
        }
    }

    fn stop_construction_on_cyclic_dependency(
        &self,
        managed: RwLockWriteGuard<ManagedObjectData>,
        context: &CallContext<'_>,
    ) -> InjectorError {
        let err = self.cyclic_dependency(context);
        let response = WaitResponse::Error(err.clone());
        self.notify_waiters(managed, context.key(), response);
        err
    }

    fn wait_for_constructed_object(
        &self,
        mut managed: RwLockWriteGuard<ManagedObjectData>,
        key: &Key,
    ) -> Result<Object, InjectorError> {
        let (sender, receiver) = oneshot::channel();
        if let Some(object_context) = managed.constructing.get_mut(key) {
            object_context.register_waiter(sender);
        }
        let current = thread::current().id();
        managed.waiting.insert(current, key.clone());
        drop(managed);

        trace!(%key, "waiting for another thread to construct the object");
        let res = self.get_object_on_object_context_response(receiver, key);
        self.managed.write().waiting.remove(&current);
        res
    }

    fn get_object_on_object_context_response(
        &self,
        receiver: Receiver<WaitResponse>,
        key: &Key,
    ) -> Result<Object, InjectorError> {
        match receiver.recv() {
            Ok(WaitResponse::Constructed(object)) => Ok(object),
            Ok(WaitResponse::Error(err)) => Err(err),
            Err(err) => Err(InjectorError::ObjectConstruction {
                target: key.to_string(),
                source: Arc::new(err),
            }),
        }
    }

    fn construct_shared_object(
        &self,
        mut managed: RwLockWriteGuard<ManagedObjectData>,
        provider: &dyn Provider,
        context: &CallContext<'_>,
    ) -> Result<Object, InjectorError> {
        let key = context.key();
        let on_thread = thread::current().id();
        let object_context = ConstructingObjectContext::new(on_thread);
        managed.constructing.insert(key.clone(), object_context);
        drop(managed);

        match provider.dyn_provide(self, context) {
            Ok(object) => {
                debug!(
                    %key,
                    lifetime = %Lifetime::Singleton,
                    type_name = (*object).type_name(),
                    "object constructed"
                );
                let mut managed = self.managed.write();
                managed.objects.insert(key.clone(), Arc::clone(&object));
                self.notify_waiters(managed, key, WaitResponse::Constructed(Arc::clone(&object)));
                Ok(object)
            }
            Err(err) => {
                let managed = self.managed.write();
                self.notify_waiters(managed, key, WaitResponse::Error(err.clone()));
                Err(err)
            }
        }
    }

    fn notify_waiters(
        &self,
        mut managed: RwLockWriteGuard<ManagedObjectData>,
        key: &Key,
        response: WaitResponse,
    ) {
        if let Some(object_context) = managed.constructing.remove(key) {
            drop(managed);
            object_context.notify(response);
        }
    }
}

impl Injector for ContainerCore {
    fn dyn_get(&self, key: &Key) -> Result<Object, InjectorError> {
        let context = CallContext::new(key);
        self.get_object(&context)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Object, InjectorError> {
        let context = context.append(key);
        self.get_object(&context)
    }

    fn has(&self, key: &Key) -> bool {
        self.providers.has(key.as_str())
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.has(key))
    }
}

struct ManagedObjectData {
    objects: HashMap<Key, Object>,
    constructing: HashMap<Key, ConstructingObjectContext>,
    /// The key each blocked thread is waiting for.
    waiting: HashMap<ThreadId, Key>,
}

impl ManagedObjectData {
    fn new() -> Self {
        Self {
            objects: HashMap::new(),
            constructing: HashMap::new(),
            waiting: HashMap::new(),
        }
    }

    /// Follows the wait edges starting at `owner`, the thread constructing
    /// the requested key. Returns the cycle if they lead back to the current
    /// thread, which would otherwise block forever.
    fn find_waiting_cycle(&self, owner: ThreadId, context: &CallContext<'_>) -> Option<Chain> {
        let current = thread::current().id();
        let mut keys = context.trace().chain().keys().to_vec();
        let mut thread = owner;

        for _ in 0..=self.waiting.len() {
            let key = self.waiting.get(&thread)?;
            keys.push(key.clone());
            let on_thread = self.constructing.get(key)?.on_thread;
            if on_thread == current {
                return Some(Chain::new(keys));
            }
            thread = on_thread;
        }
        None
    }
}

struct ConstructingObjectContext {
    on_thread: ThreadId,
    waiters: Vec<Sender<WaitResponse>>,
}

impl ConstructingObjectContext {
    fn new(on_thread: ThreadId) -> Self {
        Self {
            on_thread,
            waiters: Vec::new(),
        }
    }

    fn is_constructed_by_current_thread(&self) -> bool {
        thread::current().id() == self.on_thread
    }

    fn register_waiter(&mut self, sender: Sender<WaitResponse>) {
        self.waiters.push(sender);
    }

    fn notify(self, response: WaitResponse) {
        for sender in self.waiters {
            let _ = sender.send(response.clone());
        }
    }
}

#[derive(Clone)]
enum WaitResponse {
    Constructed(Object),
    Error(InjectorError),
}

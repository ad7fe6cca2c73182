pub mod injector;
pub mod registry;

mod core;
mod handle;

use std::sync::Arc;

use crate::util::any::AsAny;

pub use handle::Container;

/// Any type whose values can be stored in and handed out by an injector.
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

/// A type-erased managed object.
///
/// Objects are reference counted, so a cached singleton is shared by every
/// requester. Typed access clones the concrete value out of the object, which
/// is why dependencies are usually cheap handles such as `Arc<T>`.
pub type Object = Arc<dyn Managed>;

pub(crate) fn into_object<T: Managed>(value: T) -> Object {
    Arc::new(value)
}

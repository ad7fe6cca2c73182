mod wrapper;

use std::error::Error;

use crate::annotation::Dependencies;
use crate::container::Managed;

pub use wrapper::ComponentProvider;

/// A type that has a dedicated constructor for dependency injection.
///
/// The names of the constructor's dependencies are attached as
/// [`Component::INJECT`] and matched positionally against
/// [`Component::Dependencies`].
///
/// Usually, you don't need to implement the [`Component`] trait manually for
/// your components, because the [`component`] macro helps with this. In case
/// that you really want to write implementation in your own, take a look at
/// the following code snippet:
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use nidi::provider::component::Component;
/// #
/// trait MyTrait: Send + Sync + 'static {}
///
/// struct MyComponent {
///     dep1: i32,
///     dep2: Arc<f64>,
/// }
///
/// impl MyTrait for MyComponent {}
///
/// impl Component for MyComponent {
///     type Dependencies = (i32, Arc<f64>);
///
///     type Constructed = Arc<dyn MyTrait>;
///
///     type Error = Infallible;
///
///     const INJECT: &'static [&'static str] = &["dep1", "dep2"];
///
///     fn construct((dep1, dep2): Self::Dependencies) -> Result<Self, Self::Error> {
///         Ok(Self { dep1, dep2 })
///     }
///
///     fn post_process(self) -> Self::Constructed {
///         Arc::new(self)
///     }
/// }
/// ```
///
/// [`component`]: crate::component
pub trait Component: Managed + Sized {
    /// The constructor's parameter types, in order.
    type Dependencies: Dependencies;

    /// The successfully constructed object. This can be not only `Self`, but
    /// also some boxed `Self`, such as `Arc<Self>` and `Arc<dyn Trait>`.
    type Constructed: Managed;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// The names of the constructor's dependencies, in order.
    const INJECT: &'static [&'static str];

    /// Creates the object from its resolved dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`Component::Error`] if the object construction fails.
    fn construct(dependencies: Self::Dependencies) -> Result<Self, Self::Error>;

    /// Converts `self` to [`Component::Constructed`]. Typical usages are
    /// putting `self` to an [`Arc`] and coercing it to an `Arc<dyn Trait>`.
    ///
    /// [`Arc`]: std::sync::Arc
    fn post_process(self) -> Self::Constructed;
}

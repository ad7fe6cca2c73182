use crate::container::injector::{Arguments, InjectorError};
use crate::container::Managed;

/// An ordered tuple of dependency types.
///
/// Implemented by `()` and by tuples of up to 16 elements whose types are
/// [`Managed`] and [`Clone`]. Each element is cloned out of the resolved
/// object, so dependencies are usually cheap handles such as `Arc<T>`.
pub trait Dependencies: Sized + Send + Sync + 'static {
    /// The number of dependencies, i.e. the parameter count of the callable
    /// consuming them.
    const ARITY: usize;

    /// Takes every dependency out of `arguments` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument doesn't have the expected type.
    fn extract(arguments: Arguments) -> Result<Self, InjectorError>;
}

/// A specialized form of [`Fn`] that can be called with a tuple of
/// [`Dependencies`].
///
/// Closures and functions of `Fn(D1, D2, ...) -> R + Send + Sync + 'static`
/// where `Di: Managed + Clone` are [`Closure`]. Due to the lack of variadic
/// generics, [`Closure`] is only implemented by callables whose arity is at
/// most 16.
pub trait Closure<D>
where
    Self: Send + Sync + 'static,
    D: Dependencies,
{
    /// The value returned by the callable.
    type Output;

    /// Calls `self` with the dependencies spread as arguments.
    fn run(&self, dependencies: D) -> Self::Output;
}

impl Dependencies for () {
    const ARITY: usize = 0;

    fn extract(_arguments: Arguments) -> Result<Self, InjectorError> {
        Ok(())
    }
}

impl<F, R> Closure<()> for F
where
    F: Fn() -> R + Send + Sync + 'static,
{
    type Output = R;

    fn run(&self, _dependencies: ()) -> Self::Output {
        self()
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! for_all_tuples {
    ($implementation:ident) => {
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15, D16);
    };
}

macro_rules! impl_dependencies {
    ($($dep:ident),*) => {
        impl<$($dep,)*> Dependencies for ($($dep,)*)
        where
            $($dep: Managed + Clone,)*
        {
            const ARITY: usize = count!($($dep)*);

            fn extract(mut arguments: Arguments) -> Result<Self, InjectorError> {
                Ok(($(arguments.take::<$dep>()?,)*))
            }
        }
    };
}

macro_rules! impl_closure {
    ($($dep:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, R, $($dep,)*> Closure<($($dep,)*)> for F
        where
            F: Fn($($dep,)*) -> R + Send + Sync + 'static,
            $($dep: Managed + Clone,)*
        {
            type Output = R;

            fn run(&self, ($($dep,)*): ($($dep,)*)) -> Self::Output {
                self($($dep,)*)
            }
        }
    };
}

for_all_tuples!(impl_dependencies);
for_all_tuples!(impl_closure);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::into_object;
    use crate::key::Key;

    use super::*;

    #[test]
    fn dependencies_arity_succeeds() {
        assert_eq!(<() as Dependencies>::ARITY, 0);
        assert_eq!(<(i32,) as Dependencies>::ARITY, 1);
        assert_eq!(<(i32, f64, Arc<String>) as Dependencies>::ARITY, 3);
    }

    #[test]
    fn dependencies_extract_keeps_order() {
        let arguments = Arguments::new(vec![
            (Key::from("a"), into_object(1i32)),
            (Key::from("b"), into_object(2.5f64)),
            (Key::from("c"), into_object("c")),
        ]);

        let (a, b, c) = <(i32, f64, &'static str)>::extract(arguments).unwrap();
        assert_eq!((a, b, c), (1, 2.5, "c"));
    }

    #[test]
    fn closure_run_succeeds() {
        let closure = |a: i32, b: i32| a - b;
        assert_eq!(closure.run((5, 3)), 2);

        let closure = || "no parameter";
        assert_eq!(closure.run(()), "no parameter");
    }
}

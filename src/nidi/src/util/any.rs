use std::any::{self, Any};
use std::ops::Deref;

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

pub trait DowncastRef {
    fn is<T: Any>(&self) -> bool;

    fn downcast_ref<T: Any>(&self) -> Option<&T>;
}

impl<S> DowncastRef for S
where
    S: Deref<Target: AsAny>,
{
    #[inline]
    fn is<T: Any>(&self) -> bool {
        (**self).as_any().is::<T>()
    }

    #[inline]
    fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (**self).as_any().downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    trait Trait: AsAny + Send + Sync {}

    impl Trait for i32 {}

    impl Trait for &'static str {}

    #[test]
    fn downcast_succeeds_when_receiver_is_an_arc() {
        let x: Arc<dyn Trait> = Arc::new(0i32);

        assert!(x.is::<i32>());
        assert_eq!(x.downcast_ref::<i32>(), Some(&0));
        assert_eq!(x.downcast_ref::<u32>(), None);
    }

    #[test]
    fn type_name_reports_concrete_type() {
        let x: Arc<dyn Trait> = Arc::new("str");

        assert_eq!((*x).type_name(), any::type_name::<&'static str>());
    }
}

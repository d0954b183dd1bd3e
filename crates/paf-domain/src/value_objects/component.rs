//! Type-erased instances
//!
//! Everything the container hands around is an [`Instance`]. [`Component`]
//! converts between a typed `Arc<T>` and that erased form. Sized types get the
//! conversion for free; capability traits opt in with
//! [`component_interface!`](crate::component_interface).

use std::any::Any;
use std::sync::Arc;

/// A resolved, type-erased value
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Conversion between typed handles and [`Instance`]
pub trait Component: Send + Sync + 'static {
    /// Erase a typed handle
    fn into_instance(this: Arc<Self>) -> Instance;

    /// Recover a typed handle, `None` if the instance holds another type
    fn from_instance(instance: Instance) -> Option<Arc<Self>>;
}

impl<T: Any + Send + Sync> Component for T {
    fn into_instance(this: Arc<Self>) -> Instance {
        this
    }

    fn from_instance(instance: Instance) -> Option<Arc<Self>> {
        instance.downcast::<T>().ok()
    }
}

/// Make `dyn Trait` capabilities resolvable
///
/// The trait object handle is boxed once more so it fits in an [`Instance`].
///
/// # Example
///
/// ```
/// use paf_domain::component_interface;
///
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// component_interface!(dyn Greeter);
/// ```
#[macro_export]
macro_rules! component_interface {
    ($($capability:ty),+ $(,)?) => {
        $(
            impl $crate::value_objects::Component for $capability {
                fn into_instance(
                    this: ::std::sync::Arc<Self>,
                ) -> $crate::value_objects::Instance {
                    ::std::sync::Arc::new(this)
                }

                fn from_instance(
                    instance: $crate::value_objects::Instance,
                ) -> ::core::option::Option<::std::sync::Arc<Self>> {
                    instance
                        .downcast::<::std::sync::Arc<Self>>()
                        .ok()
                        .map(|handle| ::std::sync::Arc::clone(&*handle))
                }
            }
        )+
    };
}

//! Declared constructors
//!
//! The container cannot inspect Rust constructors, so injectable types declare
//! theirs: the parameter list (used for resolution and reported to overrides)
//! and a closure that receives the resolved values in declaration order.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use paf_domain::error::{Error, Result};
use paf_domain::value_objects::{
    AutoFactory, Component, ConstructorInfo, Delegate, Instance, ParameterInfo, TypeKey,
};

/// A type the container can construct
///
/// ```ignore
/// impl Injectable for Car {
///     fn constructor() -> Constructor {
///         Constructor::of::<Car>()
///             .param::<Engine>("engine")
///             .factory_param::<fn(Arc<Color>) -> Arc<Paint>>("paint")
///             .build(|args| {
///                 Ok(Arc::new(Car {
///                     engine: args.next()?,
///                     paint: args.next_factory()?,
///                 }))
///             })
///     }
/// }
/// ```
pub trait Injectable: Component + Sized {
    /// The constructor the container uses for this type
    fn constructor() -> Constructor;
}

type ConstructFn = dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync;

/// Selected constructor of a type: its description and body
#[derive(Clone)]
pub struct Constructor {
    info: ConstructorInfo,
    body: Arc<ConstructFn>,
}

impl Constructor {
    /// Start declaring the constructor of `T`
    pub fn of<T: Component + ?Sized>() -> ConstructorBuilder<T> {
        ConstructorBuilder {
            parameters: Vec::new(),
            _product: PhantomData,
        }
    }

    /// Parameter list and declaring type
    pub fn info(&self) -> &ConstructorInfo {
        &self.info
    }

    /// Run the body with values for every declared parameter
    pub(crate) fn invoke(&self, values: Vec<Instance>) -> Result<Instance> {
        let mut arguments = Arguments {
            declaring_type: self.info.declaring_type(),
            values: values.into_iter(),
        };
        (self.body)(&mut arguments)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor").field(&self.info.signature()).finish()
    }
}

/// Builder returned by [`Constructor::of`]
pub struct ConstructorBuilder<T: ?Sized> {
    parameters: Vec<ParameterInfo>,
    _product: PhantomData<fn() -> Arc<T>>,
}

impl<T: Component + ?Sized> ConstructorBuilder<T> {
    /// Declare the next parameter, resolved as `P`
    pub fn param<P: Component + ?Sized>(mut self, name: &str) -> Self {
        self.parameters
            .push(ParameterInfo::new(TypeKey::of::<P>(), name));
        self
    }

    /// Declare the next parameter as an auto-factory of shape `F`
    pub fn factory_param<F: Delegate>(mut self, name: &str) -> Self {
        self.parameters
            .push(ParameterInfo::new(TypeKey::of_delegate::<F>(), name));
        self
    }

    /// Finish with the body that builds `T` from the resolved arguments
    pub fn build<C>(self, body: C) -> Constructor
    where
        C: Fn(&mut Arguments) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Constructor {
            info: ConstructorInfo::new(TypeKey::of::<T>(), self.parameters),
            body: Arc::new(move |arguments: &mut Arguments| body(arguments).map(T::into_instance)),
        }
    }
}

/// Resolved constructor arguments, consumed in declaration order
pub struct Arguments {
    declaring_type: TypeKey,
    values: std::vec::IntoIter<Instance>,
}

impl Arguments {
    /// Take the next argument as `P`
    pub fn next<P: Component + ?Sized>(&mut self) -> Result<Arc<P>> {
        let value = self.next_raw()?;
        P::from_instance(value).ok_or_else(|| {
            Error::type_mismatch(
                type_name::<P>(),
                format!("another argument type for {}", self.declaring_type),
            )
        })
    }

    /// Take the next argument as an auto-factory of shape `F`
    pub fn next_factory<F: Delegate>(&mut self) -> Result<AutoFactory<F>> {
        AutoFactory::from_instance(self.next_raw()?)
    }

    /// Arguments not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_raw(&mut self) -> Result<Instance> {
        self.values.next().ok_or_else(|| {
            Error::construction(
                self.declaring_type.name(),
                "constructor read more arguments than it declared",
            )
        })
    }
}

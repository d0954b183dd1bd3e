//! Delegate signatures and factory callables
//!
//! A delegate type is a function pointer type `fn(Arc<A0>, ..., Arc<An>) -> Arc<P>`.
//! It is never called as a function pointer; it only names the shape of an
//! auto-factory. The callable itself is an [`ErasedFactory`], and
//! [`AutoFactory`] is its typed view.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{Component, Instance, TypeKey};
use crate::error::{Error, Result};

/// Argument and product types of a delegate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateShape {
    /// Argument types in positional order
    pub arguments: Vec<TypeKey>,
    /// Type produced by the delegate
    pub product: TypeKey,
}

/// A function pointer type describing a factory shape
pub trait Delegate: Sized + 'static {
    /// Typed argument tuple, `(Arc<A0>, Arc<A1>, ...)`
    type Args: Send + 'static;

    /// Product type
    type Product: Component + ?Sized;

    /// Number of arguments
    const ARITY: usize;

    /// Runtime description of the argument and product types
    fn shape() -> DelegateShape;

    /// Erase a typed argument tuple in positional order
    fn erase_arguments(args: Self::Args) -> Vec<Instance>;

    /// Rebuild a typed argument tuple, `None` on count or type mismatch
    fn restore_arguments(values: Vec<Instance>) -> Option<Self::Args>;
}

macro_rules! impl_delegate {
    ($arity:expr; $($arg:ident $value:ident),*) => {
        impl<P, $($arg),*> Delegate for fn($(Arc<$arg>),*) -> Arc<P>
        where
            P: Component + ?Sized,
            $($arg: Component + ?Sized,)*
        {
            type Args = ($(Arc<$arg>,)*);
            type Product = P;

            const ARITY: usize = $arity;

            fn shape() -> DelegateShape {
                DelegateShape {
                    arguments: vec![$(TypeKey::of::<$arg>()),*],
                    product: TypeKey::of::<P>(),
                }
            }

            fn erase_arguments(args: Self::Args) -> Vec<Instance> {
                let ($($value,)*) = args;
                vec![$(<$arg as Component>::into_instance($value)),*]
            }

            #[allow(unused_mut, unused_variables)]
            fn restore_arguments(values: Vec<Instance>) -> Option<Self::Args> {
                if values.len() != $arity {
                    return None;
                }
                let mut values = values.into_iter();
                Some(($(<$arg as Component>::from_instance(values.next()?)?,)*))
            }
        }
    };
}

impl_delegate!(0;);
impl_delegate!(1; A0 a0);
impl_delegate!(2; A0 a0, A1 a1);
impl_delegate!(3; A0 a0, A1 a1, A2 a2);
impl_delegate!(4; A0 a0, A1 a1, A2 a2, A3 a3);
impl_delegate!(5; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_delegate!(6; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_delegate!(7; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_delegate!(8; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);

/// Signature of a parameterized auto-factory
///
/// Only delegates with at least one argument qualify; a zero-argument
/// delegate is a plain lazy factory and is left to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorySignature {
    delegate: TypeKey,
    arguments: Vec<TypeKey>,
    product: TypeKey,
}

impl FactorySignature {
    /// Analyse a delegate type
    pub fn from_delegate(delegate: TypeKey) -> Result<Self> {
        let shape = delegate
            .delegate_shape()
            .ok_or_else(|| Error::not_a_parameterized_factory(delegate.name()))?;

        if shape.arguments.is_empty() {
            return Err(Error::not_a_parameterized_factory(delegate.name()));
        }

        Ok(Self {
            delegate,
            arguments: shape.arguments,
            product: shape.product,
        })
    }

    /// The delegate type this signature was derived from
    pub fn delegate(&self) -> TypeKey {
        self.delegate
    }

    /// Argument types in positional order
    pub fn arguments(&self) -> &[TypeKey] {
        &self.arguments
    }

    /// Number of arguments, always at least one
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Type the factory produces
    pub fn product(&self) -> TypeKey {
        self.product
    }
}

impl fmt::Display for FactorySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(TypeKey::name)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({}) -> {}", arguments, self.product.name())
    }
}

/// Erased factory body
pub type FactoryFn = dyn Fn(Vec<Instance>) -> Result<Instance> + Send + Sync;

/// A type-erased factory callable
///
/// Cloning shares the same callable. The callable is immutable once built.
#[derive(Clone)]
pub struct ErasedFactory {
    delegate: TypeKey,
    call: Arc<FactoryFn>,
}

impl ErasedFactory {
    /// Wrap a closure as the callable for `delegate`
    pub fn new<C>(delegate: TypeKey, call: C) -> Self
    where
        C: Fn(Vec<Instance>) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            delegate,
            call: Arc::new(call),
        }
    }

    /// Delegate type this callable implements
    pub fn delegate(&self) -> TypeKey {
        self.delegate
    }

    /// Number of positional arguments accepted
    pub fn arity(&self) -> usize {
        self.delegate.delegate_arity().unwrap_or_default()
    }

    /// Invoke with positional arguments
    pub fn call(&self, arguments: Vec<Instance>) -> Result<Instance> {
        if arguments.len() != self.arity() {
            return Err(Error::arity_mismatch(
                self.delegate.name(),
                self.arity(),
                arguments.len(),
            ));
        }
        (self.call)(arguments)
    }

    /// Whether both handles share the same callable
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }

    /// Erase into an [`Instance`] the host can hand out
    pub fn into_instance(self) -> Instance {
        Arc::new(self)
    }
}

impl fmt::Debug for ErasedFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedFactory")
            .field("delegate", &self.delegate)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Typed view over an [`ErasedFactory`]
///
/// # Example
///
/// ```ignore
/// let create: AutoFactory<fn(Arc<Config>) -> Arc<Service>> =
///     container.resolve_factory()?;
/// let service = create.invoke((Arc::new(config),))?;
/// ```
pub struct AutoFactory<F: Delegate> {
    inner: ErasedFactory,
    _signature: PhantomData<fn() -> F>,
}

impl<F: Delegate> AutoFactory<F> {
    /// Wrap an erased callable, checking it implements `F`
    pub fn from_erased(inner: ErasedFactory) -> Result<Self> {
        let expected = TypeKey::of_delegate::<F>();
        if inner.delegate() != expected {
            return Err(Error::type_mismatch(expected.name(), inner.delegate().name()));
        }
        Ok(Self {
            inner,
            _signature: PhantomData,
        })
    }

    /// Recover a typed factory from a resolved instance
    pub fn from_instance(instance: Instance) -> Result<Self> {
        let erased = instance.downcast::<ErasedFactory>().map_err(|_| {
            Error::type_mismatch(type_name::<ErasedFactory>(), "a non-factory instance")
        })?;
        Self::from_erased(ErasedFactory::clone(&erased))
    }

    /// Call the factory
    pub fn invoke(&self, args: F::Args) -> Result<Arc<F::Product>> {
        let product = self.inner.call(F::erase_arguments(args))?;
        <F::Product as Component>::from_instance(product).ok_or_else(|| {
            Error::type_mismatch(type_name::<F::Product>(), "an instance of another type")
        })
    }

    /// The erased callable
    pub fn erased(&self) -> &ErasedFactory {
        &self.inner
    }

    /// Whether both factories share the same callable
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl<F: Delegate> Clone for AutoFactory<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _signature: PhantomData,
        }
    }
}

impl<F: Delegate> fmt::Debug for AutoFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AutoFactory").field(&self.inner).finish()
    }
}

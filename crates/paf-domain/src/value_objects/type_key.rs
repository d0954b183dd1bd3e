//! Runtime type descriptors
//!
//! `TypeKey` is the identity the container, the cache and the override
//! matcher agree on. Identity is the `TypeId`; the name is carried for
//! diagnostics and the delegate descriptor lets the factory provider reject
//! non-factory requests without allocating.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::delegate::{Delegate, DelegateShape};

/// Arity and shape accessor of a delegate type
#[derive(Clone, Copy)]
struct DelegateInfo {
    arity: usize,
    describe: fn() -> DelegateShape,
}

/// Runtime description of a type
///
/// Two keys are equal when they describe the same `TypeId`, regardless of
/// whether one of them carries delegate information.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    delegate: Option<DelegateInfo>,
}

impl TypeKey {
    /// Describe a plain type (including `dyn Trait` capabilities)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            delegate: None,
        }
    }

    /// Describe a delegate type such as `fn(Arc<A>) -> Arc<P>`
    pub fn of_delegate<F: Delegate>() -> Self {
        Self {
            id: TypeId::of::<F>(),
            name: type_name::<F>(),
            delegate: Some(DelegateInfo {
                arity: F::ARITY,
                describe: F::shape,
            }),
        }
    }

    /// The underlying `TypeId`
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this key describes a delegate of any arity
    pub fn is_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Number of arguments of the delegate, `None` for plain types
    pub fn delegate_arity(&self) -> Option<usize> {
        self.delegate.map(|info| info.arity)
    }

    /// Whether this key is a delegate taking at least one argument
    #[inline]
    pub fn is_parameterized_delegate(&self) -> bool {
        matches!(self.delegate, Some(info) if info.arity > 0)
    }

    /// Argument and product types of the delegate
    pub fn delegate_shape(&self) -> Option<DelegateShape> {
        self.delegate.map(|info| (info.describe)())
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

//! The container
//!
//! Resolution order for a requested type:
//! 1. build strategies of the container itself
//! 2. registrations of the container, then of its parents
//! 3. otherwise the type is unresolvable
//!
//! Strategies are never shared with children. A child instead re-runs every
//! extension installed on its parent, so each container owns the strategies
//! (and any caches behind them) it resolves through.
//!
//! While a registered type is constructed, every declared parameter is first
//! offered to the overrides of the current resolution (first value wins) and
//! otherwise resolved recursively with the same overrides.

use std::any::type_name;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use dashmap::{DashMap, DashSet};
use paf_domain::constants::RESOLUTION_PATH_SEPARATOR;
use paf_domain::error::{Error, Result};
use paf_domain::ports::{CapabilityQuery, OverrideContext, ResolutionFacility, ResolverOverride};
use paf_domain::value_objects::{
    AutoFactory, Component, ConstructorInfo, Delegate, ErasedFactory, Instance, TypeKey,
};
use tracing::{debug, trace};

use super::lifetime::{Activator, CastFn, Registration};
use super::{BuildStrategy, Constructor, ContainerExtension, Injectable, Lifetime};
use crate::factory::FactoryBlueprint;

/// Dependency injection container
///
/// Cloning yields another handle to the same container.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    this: Weak<ContainerInner>,
    parent: Option<Arc<ContainerInner>>,
    registrations: DashMap<TypeKey, Arc<Registration>>,
    /// `(concrete, capability)` pairs recorded by mappings
    capabilities: DashSet<(TypeKey, TypeKey)>,
    /// Hierarchical instances owned by this container
    scoped: DashMap<TypeKey, Instance>,
    /// Replaced wholesale on every addition so resolution can hold a snapshot
    strategies: RwLock<Arc<[Arc<dyn BuildStrategy>]>>,
    /// Re-run on every child created from this container
    extensions: RwLock<Vec<Arc<dyn ContainerExtension>>>,
}

impl Container {
    /// Create an empty root container
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<Arc<ContainerInner>>) -> Self {
        let inner = Arc::new_cyclic(|this| ContainerInner {
            this: this.clone(),
            parent,
            registrations: DashMap::new(),
            capabilities: DashSet::new(),
            scoped: DashMap::new(),
            strategies: RwLock::new(Arc::from(Vec::new())),
            extensions: RwLock::new(Vec::new()),
        });
        Self { inner }
    }

    /// Create a child that sees this container's registrations
    ///
    /// Every extension installed here so far is initialized again on the
    /// child. Extensions added to this container later do not reach children
    /// that already exist.
    pub fn create_child(&self) -> Result<Self> {
        let child = Self::with_parent(Some(Arc::clone(&self.inner)));
        let extensions = self
            .inner
            .extensions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for extension in extensions {
            child.install(extension)?;
        }
        Ok(child)
    }

    /// Install an extension on this container and on children created later
    pub fn add_extension<E: ContainerExtension + 'static>(&self, extension: E) -> Result<&Self> {
        self.install(Arc::new(extension))?;
        Ok(self)
    }

    /// Append a build strategy, consulted before any registration
    ///
    /// Strategies added directly apply to this container only.
    pub fn add_strategy(&self, strategy: Arc<dyn BuildStrategy>) -> &Self {
        let mut strategies = self
            .inner
            .strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = strategies.to_vec();
        next.push(strategy);
        *strategies = Arc::from(next);
        self
    }

    /// Register `T` to be built with its declared constructor
    pub fn register_type<T: Injectable>(&self, lifetime: Lifetime) -> &Self {
        self.register(
            TypeKey::of::<T>(),
            Registration::new(
                lifetime,
                Activator::Construct {
                    constructor: T::constructor(),
                    cast: None,
                },
            ),
        )
    }

    /// Register `T` as the implementation of capability `I`
    ///
    /// Also records that `T` implements `I`, which overrides targeting `I`
    /// rely on.
    pub fn register_mapping<I, T>(&self, cast: fn(Arc<T>) -> Arc<I>, lifetime: Lifetime) -> &Self
    where
        I: Component + ?Sized,
        T: Injectable,
    {
        let concrete = TypeKey::of::<T>();
        let capability = TypeKey::of::<I>();
        self.inner.capabilities.insert((concrete, capability));

        let cast: Arc<CastFn> = Arc::new(move |instance: Instance| {
            let concrete = T::from_instance(instance).ok_or_else(|| {
                Error::type_mismatch(type_name::<T>(), "an instance of another type")
            })?;
            Ok(I::into_instance(cast(concrete)))
        });

        self.register(
            capability,
            Registration::new(
                lifetime,
                Activator::Construct {
                    constructor: T::constructor(),
                    cast: Some(cast),
                },
            ),
        )
    }

    /// Register an existing instance
    pub fn register_instance<T: Component + ?Sized>(&self, instance: Arc<T>) -> &Self {
        self.register(
            TypeKey::of::<T>(),
            Registration::new(
                Lifetime::Singleton,
                Activator::Instance(T::into_instance(instance)),
            ),
        )
    }

    /// Configure delegate `F` explicitly with a hand-written body
    ///
    /// Explicitly configured delegates are never replaced by auto-factories.
    pub fn register_delegate<F, C>(&self, body: C) -> &Self
    where
        F: Delegate,
        C: Fn(F::Args) -> Result<Arc<F::Product>> + Send + Sync + 'static,
    {
        let delegate = TypeKey::of_delegate::<F>();
        let factory = ErasedFactory::new(delegate, move |values: Vec<Instance>| {
            let arguments = F::restore_arguments(values).ok_or_else(|| {
                Error::type_mismatch(type_name::<F::Args>(), "arguments of other types")
            })?;
            body(arguments).map(<F::Product as Component>::into_instance)
        });

        self.register(
            delegate,
            Registration::new(Lifetime::Singleton, Activator::Instance(factory.into_instance())),
        )
    }

    /// Whether `ty` is registered here or in a parent
    pub fn is_registered(&self, ty: TypeKey) -> bool {
        self.inner.is_registered(ty)
    }

    /// Whether `concrete` was mapped to `capability` here or in a parent
    pub fn implements(&self, concrete: TypeKey, capability: TypeKey) -> bool {
        self.inner.implements(concrete, capability)
    }

    /// Resolve `T`
    ///
    /// Delegate types must go through [`resolve_factory`](Self::resolve_factory)
    /// to be recognised as auto-factories.
    pub fn resolve<T: Component + ?Sized>(&self) -> Result<Arc<T>> {
        let instance = self.resolve_type(TypeKey::of::<T>())?;
        T::from_instance(instance)
            .ok_or_else(|| Error::type_mismatch(type_name::<T>(), "an instance of another type"))
    }

    /// Resolve the factory of shape `F`
    pub fn resolve_factory<F: Delegate>(&self) -> Result<AutoFactory<F>> {
        AutoFactory::from_instance(self.resolve_type(TypeKey::of_delegate::<F>())?)
    }

    /// Resolve a type by key
    pub fn resolve_type(&self, ty: TypeKey) -> Result<Instance> {
        self.inner.resolve_with(ty, &[])
    }

    /// Callable of a factory blueprint whose products resolve in this container
    ///
    /// The blueprint keeps the callable, so asking again returns the same one.
    pub fn bind_factory(&self, blueprint: &FactoryBlueprint) -> ErasedFactory {
        blueprint.bound_to(&self.inner)
    }

    fn install(&self, extension: Arc<dyn ContainerExtension>) -> Result<()> {
        extension.initialize(self)?;
        self.inner
            .extensions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(extension);
        Ok(())
    }

    fn register(&self, ty: TypeKey, registration: Registration) -> &Self {
        debug!(ty = %ty, lifetime = ?registration.lifetime, "Registered type");
        // A new registration starts without a hierarchical instance
        self.inner.scoped.remove(&ty);
        self.inner.registrations.insert(ty, Arc::new(registration));
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.inner.registrations.len())
            .field("has_parent", &self.inner.parent.is_some())
            .finish_non_exhaustive()
    }
}

impl ContainerInner {
    fn ancestry(&self) -> impl Iterator<Item = &ContainerInner> {
        std::iter::successors(Some(self), |container| container.parent.as_deref())
    }

    fn handle(&self) -> Result<Container> {
        self.this
            .upgrade()
            .map(|inner| Container { inner })
            .ok_or_else(|| Error::infrastructure("Container is being dropped"))
    }

    fn strategies(&self) -> Arc<[Arc<dyn BuildStrategy>]> {
        Arc::clone(&self.strategies.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn find_registration(&self, ty: TypeKey) -> Option<Arc<Registration>> {
        self.ancestry().find_map(|container| {
            container
                .registrations
                .get(&ty)
                .map(|entry| Arc::clone(entry.value()))
        })
    }

    fn resolve_in(
        &self,
        ty: TypeKey,
        overrides: &[Box<dyn ResolverOverride>],
        path: &mut Vec<TypeKey>,
    ) -> Result<Instance> {
        if path.contains(&ty) {
            let cycle = path
                .iter()
                .chain(std::iter::once(&ty))
                .map(TypeKey::name)
                .collect::<Vec<_>>()
                .join(RESOLUTION_PATH_SEPARATOR);
            return Err(Error::circular_dependency(cycle));
        }

        path.push(ty);
        let resolved = self.resolve_unchecked(ty, overrides, path);
        path.pop();
        resolved
    }

    fn resolve_unchecked(
        &self,
        ty: TypeKey,
        overrides: &[Box<dyn ResolverOverride>],
        path: &mut Vec<TypeKey>,
    ) -> Result<Instance> {
        trace!(ty = %ty, "Resolving");

        let strategies = self.strategies();
        if !strategies.is_empty() {
            let container = self.handle()?;
            for strategy in strategies.iter() {
                if let Some(instance) = strategy.pre_build(&container, ty)? {
                    return Ok(instance);
                }
            }
        }

        let registration = self
            .find_registration(ty)
            .ok_or_else(|| Error::unresolvable(ty.name()))?;

        match registration.lifetime {
            Lifetime::Transient => self.activate(&registration, overrides, path),
            Lifetime::Singleton => registration
                .singleton
                .get_or_try_init(|| self.activate(&registration, overrides, path))
                .cloned(),
            Lifetime::Hierarchical => {
                if let Some(existing) = self.scoped.get(&ty) {
                    return Ok(Arc::clone(existing.value()));
                }
                let instance = self.activate(&registration, overrides, path)?;
                Ok(Arc::clone(self.scoped.entry(ty).or_insert(instance).value()))
            }
        }
    }

    fn activate(
        &self,
        registration: &Registration,
        overrides: &[Box<dyn ResolverOverride>],
        path: &mut Vec<TypeKey>,
    ) -> Result<Instance> {
        match &registration.activator {
            Activator::Instance(instance) => Ok(Arc::clone(instance)),
            Activator::Construct { constructor, cast } => {
                let built = self.construct(constructor, overrides, path)?;
                match cast {
                    Some(cast) => cast(built),
                    None => Ok(built),
                }
            }
        }
    }

    fn construct(
        &self,
        constructor: &Constructor,
        overrides: &[Box<dyn ResolverOverride>],
        path: &mut Vec<TypeKey>,
    ) -> Result<Instance> {
        let info = constructor.info();
        let context = ConstructionContext {
            container: self,
            constructor: info,
        };

        let mut values = Vec::with_capacity(info.parameters().len());
        for parameter in info.parameters() {
            let value = match Self::consult_overrides(&context, parameter.ty(), overrides)? {
                Some(value) => value,
                None => self.resolve_in(parameter.ty(), overrides, path)?,
            };
            values.push(value);
        }

        constructor.invoke(values)
    }

    fn consult_overrides(
        context: &ConstructionContext<'_>,
        dependency: TypeKey,
        overrides: &[Box<dyn ResolverOverride>],
    ) -> Result<Option<Instance>> {
        for resolver in overrides {
            if let Some(value) = resolver.resolve(context, dependency)? {
                trace!(
                    target_type = %context.target(),
                    dependency = %dependency,
                    "Dependency supplied by override"
                );
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl CapabilityQuery for ContainerInner {
    fn implements(&self, concrete: TypeKey, capability: TypeKey) -> bool {
        self.ancestry()
            .any(|container| container.capabilities.contains(&(concrete, capability)))
    }
}

impl ResolutionFacility for ContainerInner {
    fn resolve_with(&self, ty: TypeKey, overrides: &[Box<dyn ResolverOverride>]) -> Result<Instance> {
        self.resolve_in(ty, overrides, &mut Vec::new())
    }

    fn is_registered(&self, ty: TypeKey) -> bool {
        self.ancestry()
            .any(|container| container.registrations.contains_key(&ty))
    }
}

/// What an override sees while the container builds one type
struct ConstructionContext<'a> {
    container: &'a ContainerInner,
    constructor: &'a ConstructorInfo,
}

impl CapabilityQuery for ConstructionContext<'_> {
    fn implements(&self, concrete: TypeKey, capability: TypeKey) -> bool {
        self.container.implements(concrete, capability)
    }
}

impl OverrideContext for ConstructionContext<'_> {
    fn target(&self) -> TypeKey {
        self.constructor.declaring_type()
    }

    fn selected_constructor(&self) -> Option<&ConstructorInfo> {
        Some(self.constructor)
    }
}

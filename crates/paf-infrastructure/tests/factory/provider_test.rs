//! Factory provider: fast paths, deferral and build-once

use std::sync::Arc;

use paf_domain::error::Error;
use paf_domain::value_objects::TypeKey;
use paf_infrastructure::factory::FactoryProvider;
use rayon::prelude::*;

use crate::test_utils::fixtures::{BuildCar, Car, Color, CountingBuilder, PaintCar, PlanRoute};

fn counting_provider(capacity: usize) -> (FactoryProvider, Arc<CountingBuilder>) {
    let builder = Arc::new(CountingBuilder::default());
    let provider = FactoryProvider::with_builder(capacity, builder.clone()).unwrap();
    (provider, builder)
}

#[test]
fn test_zero_capacity_rejected() {
    assert!(matches!(
        FactoryProvider::new(0),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_plain_type_not_handled() {
    let (provider, builder) = counting_provider(8);

    let result = provider
        .try_get_or_create(TypeKey::of::<Car>(), || panic!("plain types never reach the host query"))
        .unwrap();

    assert!(result.is_none());
    assert_eq!(builder.builds(), 0);
    assert_eq!(provider.cached(), 0);
    assert_eq!(provider.stats().misses(), 0);
}

#[test]
fn test_zero_argument_delegate_not_handled() {
    let (provider, builder) = counting_provider(8);

    let result = provider
        .try_get_or_create(TypeKey::of_delegate::<fn() -> Arc<Car>>(), || false)
        .unwrap();

    assert!(result.is_none());
    assert_eq!(builder.builds(), 0);
}

#[test]
fn test_delegate_key_without_shape_not_handled() {
    let (provider, _) = counting_provider(8);

    // Same TypeId as the delegate but described as a plain type
    let result = provider
        .try_get_or_create(TypeKey::of::<PaintCar>(), || false)
        .unwrap();

    assert!(result.is_none());
}

#[test]
fn test_second_request_served_from_cache() {
    let (provider, builder) = counting_provider(8);
    let key = TypeKey::of_delegate::<PaintCar>();

    let first = provider.try_get_or_create(key, || false).unwrap().unwrap();
    let second = provider
        .try_get_or_create(key, || panic!("cache hits skip the host query"))
        .unwrap()
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(builder.builds(), 1);
    assert_eq!(provider.stats().builds(), 1);
    assert_eq!(provider.stats().hits(), 1);
    assert_eq!(provider.stats().misses(), 1);
}

#[test]
fn test_registered_delegate_deferred_to_host() {
    let (provider, builder) = counting_provider(8);
    let key = TypeKey::of_delegate::<PaintCar>();

    let result = provider.try_get_or_create(key, || true).unwrap();

    assert!(result.is_none());
    assert_eq!(builder.builds(), 0);
    assert_eq!(provider.cached(), 0);
    assert_eq!(provider.stats().deferrals(), 1);
}

#[test]
fn test_cached_factory_outlives_later_registration() {
    let (provider, _) = counting_provider(8);
    let key = TypeKey::of_delegate::<PaintCar>();

    provider.try_get_or_create(key, || false).unwrap().unwrap();
    let after = provider.try_get_or_create(key, || true).unwrap();

    assert!(after.is_some());
    assert_eq!(provider.stats().deferrals(), 0);
}

#[test]
fn test_blueprint_carries_signature() {
    let (provider, _) = counting_provider(8);

    let blueprint = provider
        .try_get_or_create(TypeKey::of_delegate::<BuildCar>(), || false)
        .unwrap()
        .unwrap();

    let signature = blueprint.signature();
    assert_eq!(signature.arity(), 2);
    assert_eq!(signature.product(), TypeKey::of::<Car>());
    assert_eq!(signature.arguments()[0], TypeKey::of::<Color>());
    assert_eq!(blueprint.delegate(), TypeKey::of_delegate::<BuildCar>());
}

#[test]
fn test_eviction_forces_rebuild() {
    let (provider, builder) = counting_provider(1);
    let paint = TypeKey::of_delegate::<PaintCar>();
    let route = TypeKey::of_delegate::<PlanRoute>();

    provider.try_get_or_create(paint, || false).unwrap();
    provider.try_get_or_create(route, || false).unwrap();
    provider.try_get_or_create(paint, || false).unwrap();

    assert_eq!(builder.builds(), 3);
    assert_eq!(provider.cached(), 1);
}

#[test]
fn test_clear_forces_rebuild() {
    let (provider, builder) = counting_provider(8);
    let key = TypeKey::of_delegate::<PaintCar>();

    provider.try_get_or_create(key, || false).unwrap();
    provider.clear();
    provider.try_get_or_create(key, || false).unwrap();

    assert_eq!(builder.builds(), 2);
}

#[test]
fn test_concurrent_first_requests_build_once() {
    let (provider, builder) = counting_provider(8);
    let key = TypeKey::of_delegate::<PaintCar>();

    let blueprints = (0..64)
        .into_par_iter()
        .map(|_| provider.try_get_or_create(key, || false).unwrap().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(builder.builds(), 1);
    assert!(blueprints.iter().all(|b| Arc::ptr_eq(b, &blueprints[0])));
    assert_eq!(provider.stats().builds(), 1);
    assert_eq!(provider.stats().hits() + provider.stats().builds(), 64);
}

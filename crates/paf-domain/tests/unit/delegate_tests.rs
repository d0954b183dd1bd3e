//! Unit tests for delegate signatures and typed factories

use std::sync::Arc;

use paf_domain::{
    AutoFactory, Component, Delegate, ErasedFactory, Error, FactorySignature, Instance, TypeKey,
    component_interface,
};

#[derive(Debug, PartialEq)]
struct Wheel(u8);

#[derive(Debug)]
struct Bike {
    front: Arc<Wheel>,
}

trait Vehicle: Send + Sync {
    fn wheels(&self) -> usize;
}

impl Vehicle for Bike {
    fn wheels(&self) -> usize {
        2
    }
}

component_interface!(dyn Vehicle);

type BuildBike = fn(Arc<Wheel>) -> Arc<Bike>;
type BuildVehicle = fn(Arc<Wheel>) -> Arc<dyn Vehicle>;

fn bike_factory() -> ErasedFactory {
    ErasedFactory::new(TypeKey::of_delegate::<BuildBike>(), |mut args| {
        let front = Wheel::from_instance(args.remove(0)).ok_or_else(|| {
            Error::type_mismatch(std::any::type_name::<Wheel>(), "another argument type")
        })?;
        Ok(Bike::into_instance(Arc::new(Bike { front })))
    })
}

#[test]
fn test_signature_display() {
    let signature = FactorySignature::from_delegate(TypeKey::of_delegate::<BuildBike>()).unwrap();
    let rendered = signature.to_string();

    assert!(rendered.starts_with("fn("));
    assert!(rendered.contains(std::any::type_name::<Wheel>()));
    assert!(rendered.ends_with(std::any::type_name::<Bike>()));
}

#[test]
fn test_typed_factory_invocation() {
    let factory = AutoFactory::<BuildBike>::from_erased(bike_factory()).unwrap();
    let wheel = Arc::new(Wheel(7));

    let bike = factory.invoke((Arc::clone(&wheel),)).unwrap();

    assert!(Arc::ptr_eq(&bike.front, &wheel));
}

#[test]
fn test_typed_factory_rejects_other_delegate() {
    let result = AutoFactory::<BuildVehicle>::from_erased(bike_factory());
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_typed_factory_from_instance() {
    let instance: Instance = bike_factory().into_instance();
    let factory = AutoFactory::<BuildBike>::from_instance(instance).unwrap();
    assert_eq!(factory.erased().arity(), 1);

    let not_a_factory: Instance = Arc::new(Wheel(1));
    assert!(AutoFactory::<BuildBike>::from_instance(not_a_factory).is_err());
}

#[test]
fn test_clones_share_the_callable() {
    let factory = AutoFactory::<BuildBike>::from_erased(bike_factory()).unwrap();
    let clone = factory.clone();
    assert!(factory.ptr_eq(&clone));

    let rebuilt = AutoFactory::<BuildBike>::from_erased(bike_factory()).unwrap();
    assert!(!factory.ptr_eq(&rebuilt));
}

#[test]
fn test_capability_round_trip() {
    let vehicle: Arc<dyn Vehicle> = Arc::new(Bike {
        front: Arc::new(Wheel(1)),
    });

    let instance = <dyn Vehicle as Component>::into_instance(vehicle);
    let restored = <dyn Vehicle as Component>::from_instance(instance).unwrap();

    assert_eq!(restored.wheels(), 2);
}

#[test]
fn test_erase_arguments_preserves_order() {
    type Pair = fn(Arc<Wheel>, Arc<Wheel>) -> Arc<Bike>;

    let erased = <Pair as Delegate>::erase_arguments((Arc::new(Wheel(1)), Arc::new(Wheel(2))));
    let (first, second) = <Pair as Delegate>::restore_arguments(erased).unwrap();

    assert_eq!(*first, Wheel(1));
    assert_eq!(*second, Wheel(2));
}

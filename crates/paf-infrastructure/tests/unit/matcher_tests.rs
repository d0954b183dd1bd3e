//! Target override matcher tests

use paf_domain::ports::CapabilityQuery;
use paf_domain::value_objects::{ConstructorInfo, ParameterInfo, TypeKey};
use paf_infrastructure::factory::TargetOverrideMatcher;

struct Gearbox;
struct Sedan;
struct Truck;
trait Drivable {}

/// Knows that `Sedan` was mapped to `dyn Drivable`
struct Mappings;

impl CapabilityQuery for Mappings {
    fn implements(&self, concrete: TypeKey, capability: TypeKey) -> bool {
        concrete == TypeKey::of::<Sedan>() && capability == TypeKey::of::<dyn Drivable>()
    }
}

fn constructor_with(count: usize) -> ConstructorInfo {
    let parameters = (0..count)
        .map(|i| ParameterInfo::new(TypeKey::of::<Gearbox>(), format!("gearbox{i}")))
        .chain(std::iter::once(ParameterInfo::new(TypeKey::of::<u32>(), "doors")))
        .collect();
    ConstructorInfo::new(TypeKey::of::<Sedan>(), parameters)
}

#[test]
fn test_target_matches_exact_type() {
    let matcher = TargetOverrideMatcher::new(TypeKey::of::<Sedan>(), TypeKey::of::<Gearbox>());

    assert!(matcher.target_type_matches(TypeKey::of::<Sedan>(), &Mappings));
    assert!(!matcher.target_type_matches(TypeKey::of::<Truck>(), &Mappings));
}

#[test]
fn test_target_matches_through_capability() {
    let matcher =
        TargetOverrideMatcher::new(TypeKey::of::<dyn Drivable>(), TypeKey::of::<Gearbox>());

    assert!(matcher.target_type_matches(TypeKey::of::<Sedan>(), &Mappings));
    assert!(!matcher.target_type_matches(TypeKey::of::<Truck>(), &Mappings));
}

#[test]
fn test_parameter_matches_exact_type_only() {
    let matcher = TargetOverrideMatcher::new(TypeKey::of::<Sedan>(), TypeKey::of::<Gearbox>());

    assert!(matcher.parameter_type_matches(TypeKey::of::<Gearbox>()));
    assert!(!matcher.parameter_type_matches(TypeKey::of::<Truck>()));
}

#[test]
fn test_zero_or_one_matching_parameter_accepted() {
    let matcher = TargetOverrideMatcher::new(TypeKey::of::<Sedan>(), TypeKey::of::<Gearbox>());

    assert!(
        matcher
            .ensure_single_parameter_of_overridden_type(&constructor_with(0))
            .is_ok()
    );
    assert!(
        matcher
            .ensure_single_parameter_of_overridden_type(&constructor_with(1))
            .is_ok()
    );
}

#[test]
fn test_two_matching_parameters_rejected() {
    let matcher = TargetOverrideMatcher::new(TypeKey::of::<Sedan>(), TypeKey::of::<Gearbox>());

    let err = matcher
        .ensure_single_parameter_of_overridden_type(&constructor_with(2))
        .unwrap_err();

    let expected = format!(
        "The constructor {}({} gearbox0, {} gearbox1, u32 doors) has 2 parameters of type {}.\nDo not know which one you meant to override.",
        TypeKey::of::<Sedan>().name(),
        TypeKey::of::<Gearbox>().name(),
        TypeKey::of::<Gearbox>().name(),
        TypeKey::of::<Gearbox>().name(),
    );
    assert_eq!(err.to_string(), expected);
}

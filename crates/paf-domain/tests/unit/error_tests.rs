//! Unit tests for domain error types

use paf_domain::Error;

#[test]
fn test_ambiguous_override_message() {
    let error = Error::ambiguous_override("app::Tree(app::Leaf left, app::Leaf right)", 2, "app::Leaf");
    let display = error.to_string();

    assert!(error.is_ambiguous_override());
    assert!(display.contains("The constructor app::Tree(app::Leaf left, app::Leaf right)"));
    assert!(display.contains("has 2 parameters of type app::Leaf."));
    assert!(display.contains("Do not know which one you meant to override."));
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("capacity must be positive");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "capacity must be positive");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_configuration_error_with_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("failed to read", io_error);
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_arity_mismatch_error() {
    let error = Error::arity_mismatch("fn(A) -> B", 1, 3);
    match error {
        Error::ArityMismatch {
            type_name,
            expected,
            actual,
        } => {
            assert_eq!(type_name, "fn(A) -> B");
            assert_eq!(expected, 1);
            assert_eq!(actual, 3);
        }
        _ => panic!("Expected ArityMismatch error"),
    }
}

#[test]
fn test_not_a_parameterized_factory_error() {
    let error = Error::not_a_parameterized_factory("app::Service");
    assert!(!error.is_ambiguous_override());
    assert!(error.to_string().contains("app::Service"));
}

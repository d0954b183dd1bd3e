//! Error context tests

use std::error::Error as _;
use std::io;

use paf_domain::error::{Error, Result};
use paf_infrastructure::error_ext::ErrorContext;

fn not_found() -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[test]
fn test_context_wraps_as_infrastructure() {
    let result: Result<()> = not_found().context("loading blueprint");

    match result {
        Err(Error::Infrastructure { message, source }) => {
            assert!(message.starts_with("loading blueprint"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_config_context_wraps_as_configuration() {
    let result: Result<()> = not_found().config_context("reading paf.toml");

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_io_context_keeps_message() {
    let err = not_found().io_context("writing config").unwrap_err();

    assert!(err.to_string().contains("writing config"));
}

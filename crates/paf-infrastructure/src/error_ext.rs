//! Folding foreign errors into [`Error`]
//!
//! The config loader talks to figment, toml and the filesystem; each failure
//! is wrapped with a short description of what was being attempted.

use std::fmt;

use paf_domain::error::{Error, Result};

/// Attach a description to a foreign error
pub trait ErrorContext<T> {
    /// Wrap as [`Error::Infrastructure`]
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap a filesystem failure as [`Error::Infrastructure`]
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap as [`Error::Configuration`]
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::infrastructure_with_source(format!("{context}: {err}"), err))
    }

    fn io_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| {
            Error::infrastructure_with_source(format!("I/O failure, {context}: {err}"), err)
        })
    }

    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::configuration_with_source(format!("{context}: {err}"), err))
    }
}

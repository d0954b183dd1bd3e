//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for parameterized auto-factories and their host container
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A type was expected to be a delegate with at least one argument
    #[error("{type_name} is not a parameterized factory fn(Arg0, ..., ArgN) -> Product")]
    NotAParameterizedFactory {
        /// Name of the offending type
        type_name: String,
    },

    /// More than one constructor parameter has the overridden type
    #[error(
        "The constructor {constructor} has {count} parameters of type {parameter_type}.\nDo not know which one you meant to override."
    )]
    AmbiguousOverride {
        /// Human-readable constructor signature
        constructor: String,
        /// Number of parameters of the overridden type
        count: usize,
        /// Name of the overridden parameter type
        parameter_type: String,
    },

    /// An erased factory was invoked with the wrong number of arguments
    #[error("Factory {type_name} expects {expected} argument(s) but received {actual}")]
    ArityMismatch {
        /// Delegate type of the factory
        type_name: String,
        /// Declared arity
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// A resolved instance could not be viewed as the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Requested type
        expected: String,
        /// What was actually produced
        actual: String,
    },

    /// Nothing knows how to produce the requested type
    #[error("Cannot resolve {type_name}: no registration or build strategy handles it")]
    Unresolvable {
        /// Requested type
        type_name: String,
    },

    /// Resolution re-entered a type that is already being constructed
    #[error("Circular dependency detected: {path}")]
    CircularDependency {
        /// Resolution path rendered as `A -> B -> A`
        path: String,
    },

    /// A user-supplied constructor failed
    #[error("Failed to construct {type_name}: {message}")]
    Construction {
        /// Type being constructed
        type_name: String,
        /// Description of the failure
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Factory and resolution error creation methods
impl Error {
    /// Create a not-a-parameterized-factory error
    pub fn not_a_parameterized_factory<S: Into<String>>(type_name: S) -> Self {
        Self::NotAParameterizedFactory {
            type_name: type_name.into(),
        }
    }

    /// Create an ambiguous override error
    pub fn ambiguous_override<S: Into<String>, P: Into<String>>(
        constructor: S,
        count: usize,
        parameter_type: P,
    ) -> Self {
        Self::AmbiguousOverride {
            constructor: constructor.into(),
            count,
            parameter_type: parameter_type.into(),
        }
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch<S: Into<String>>(type_name: S, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            type_name: type_name.into(),
            expected,
            actual,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unresolvable type error
    pub fn unresolvable<S: Into<String>>(type_name: S) -> Self {
        Self::Unresolvable {
            type_name: type_name.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular_dependency<S: Into<String>>(path: S) -> Self {
        Self::CircularDependency { path: path.into() }
    }

    /// Create a construction error
    pub fn construction<T: Into<String>, S: Into<String>>(type_name: T, message: S) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports an ambiguous override
    pub fn is_ambiguous_override(&self) -> bool {
        matches!(self, Self::AmbiguousOverride { .. })
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ParseError: a single package token could not be understood
//! - LookupError: registry or vulnerability database communication failures
//! - ValidationError: the overall request shape is unusable
//!
//! Lookup failures are reported per package and degrade that package's
//! result; only a `ValidationError` rejects a whole request.

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package token parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Registry / vulnerability database lookup errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Request validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised while parsing a package token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token is empty or contains no recognizable package name
    #[error("no package name found in token '{token}'")]
    NoPackageName { token: String },

    /// The package name does not match the ecosystem's naming rules
    #[error("invalid package name '{name}' in token '{token}'")]
    InvalidName { token: String, name: String },
}

/// Errors raised while talking to an external lookup service
#[derive(Error, Debug)]
pub enum LookupError {
    /// Package not found by the service
    #[error("package '{package}' not found in {service}")]
    NotFound { package: String, service: String },

    /// Network request failed
    #[error("failed to query {service} for '{package}': {message}")]
    Network {
        package: String,
        service: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {service}")]
    RateLimited { service: String },

    /// The service answered with something we could not decode
    #[error("invalid response from {service} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        service: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while querying {service} for '{package}'")]
    Timeout { package: String, service: String },
}

/// Errors raised when the request shape itself is unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither packages nor dependency maps yielded anything to analyze
    #[error("no valid packages found in request")]
    NoValidPackages,

    /// Unknown ecosystem name in the request
    #[error("ecosystem must be 'python' or 'npm', got '{value}'")]
    UnknownEcosystem { value: String },
}

impl ParseError {
    /// Creates a new NoPackageName error
    pub fn no_package_name(token: impl Into<String>) -> Self {
        ParseError::NoPackageName {
            token: token.into(),
        }
    }

    /// Creates a new InvalidName error
    pub fn invalid_name(token: impl Into<String>, name: impl Into<String>) -> Self {
        ParseError::InvalidName {
            token: token.into(),
            name: name.into(),
        }
    }
}

impl LookupError {
    /// Creates a new NotFound error
    pub fn not_found(package: impl Into<String>, service: impl Into<String>) -> Self {
        LookupError::NotFound {
            package: package.into(),
            service: service.into(),
        }
    }

    /// Creates a new Network error
    pub fn network(
        package: impl Into<String>,
        service: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LookupError::Network {
            package: package.into(),
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimited error
    pub fn rate_limited(service: impl Into<String>) -> Self {
        LookupError::RateLimited {
            service: service.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        service: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LookupError::InvalidResponse {
            package: package.into(),
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, service: impl Into<String>) -> Self {
        LookupError::Timeout {
            package: package.into(),
            service: service.into(),
        }
    }
}

//! # Test Bot Errors
//!
//! Each concern owns a small error enum, and [`Error`] composes them with
//! `#[from]` so `?` works across module boundaries.
//!
//! None of these are process-fatal. The public entry points
//! ([`ScenarioBinder::generate`](crate::scenario::ScenarioBinder::generate),
//! [`SessionScope::run_as`](crate::session::SessionScope::run_as)) recover them
//! into a logged diagnostic plus an empty or aborted result.

use thiserror::Error;

/// Boxed error returned by external collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller misuse.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UsageError {
    /// The arguments passed to `crud_test` cannot be used.
    #[error("invalid parameters passed to crud_test(): {0}")]
    InvalidArguments(String),

    /// A user record was handed to sign-in before it was saved.
    #[error("user must be persisted: {0}")]
    UnpersistedUser(String),

    /// The user reference is not a user record, an email or `false`.
    #[error("sign_in expected a user record or an email string, got {0}")]
    InvalidUserReference(String),

    /// A session is already open on this scope.
    #[error("already signed in as {0}; nested sessions are not supported")]
    NestedSession(String),
}

/// Failure to turn a resource spec into an instance.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolutionError {
    #[error("failed to initialize object with {type_name}::default(): {reason}")]
    UninstantiableType { type_name: String, reason: String },
}

/// Failure to find a user in the directory.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("no user found with email {0}")]
    UserNotFound(String),
}

/// Top-level error for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The user directory collaborator failed.
    #[error("user directory error: {0}")]
    Directory(#[source] BoxError),

    /// The browser driver collaborator failed.
    #[error("browser error: {0}")]
    Browser(#[source] BoxError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Short machine-friendly name of the failure, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Usage(UsageError::InvalidArguments(_)) => "invalid-arguments",
            Error::Usage(UsageError::UnpersistedUser(_)) => "unpersisted-user",
            Error::Usage(UsageError::InvalidUserReference(_)) => "invalid-user-reference",
            Error::Usage(UsageError::NestedSession(_)) => "nested-session",
            Error::Resolution(ResolutionError::UninstantiableType { .. }) => "uninstantiable-type",
            Error::Lookup(LookupError::UserNotFound(_)) => "user-not-found",
            Error::Directory(_) => "directory",
            Error::Browser(_) => "browser",
            Error::Config(_) => "config",
        }
    }
}

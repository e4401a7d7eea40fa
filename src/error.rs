//! Error types for the Shipyard deployment-group node lookup client.

use thiserror::Error;

/// Node lookup errors.
///
/// The variants form a closed set of failure kinds. The retry loop classifies
/// each failure with [`is_fatal`] and otherwise hands the error back to the
/// caller exactly as it was produced.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid deployment group node lookup: {0}")]
    InvalidInput(String),

    #[error("An incomplete design ref was supplied to the node lookup: {0}")]
    IncompleteDesignRef(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Unexpected node lookup failure: {0}")]
    Unexpected(#[source] anyhow::Error),
}

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    InvalidInput,
    IncompleteDesignRef,
    Unauthorized,
    Forbidden,
    Client,
    Unexpected,
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::InvalidInput(_) => LookupErrorKind::InvalidInput,
            LookupError::IncompleteDesignRef(_) => LookupErrorKind::IncompleteDesignRef,
            LookupError::Unauthorized(_) => LookupErrorKind::Unauthorized,
            LookupError::Forbidden(_) => LookupErrorKind::Forbidden,
            LookupError::Client(_) => LookupErrorKind::Client,
            LookupError::Unexpected(_) => LookupErrorKind::Unexpected,
        }
    }

    /// Wrap an unclassified failure raised by a query capability.
    pub fn unexpected<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        LookupError::Unexpected(err.into())
    }
}

/// Authorization failures end a lookup after a single attempt; every other
/// backend failure may be retried.
pub fn is_fatal(error: &LookupError) -> bool {
    match error.kind() {
        LookupErrorKind::Unauthorized | LookupErrorKind::Forbidden => true,
        // Raised before the backend is contacted; retrying cannot help either.
        LookupErrorKind::InvalidInput | LookupErrorKind::IncompleteDesignRef => true,
        LookupErrorKind::Client | LookupErrorKind::Unexpected => false,
    }
}

/// Application-level errors (configuration, logging, CLI input, client setup).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provisioning client error: {0}")]
    ProvisioningClient(String),

    #[error("Node lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

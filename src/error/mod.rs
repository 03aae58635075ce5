//! Error types for tag reconciliation.
//!
//! Diffing itself is total and never fails. Errors come from the fallible
//! edges around it: configuration, validation of user-declared tags,
//! conversion from loosely typed input, and the tagging API calls a
//! reconciler issues.

mod mapping;

pub use mapping::map_api_error_code;

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum TagError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Tag validation and conversion errors.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Errors returned by a service's tagging API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl TagError {
    /// Returns true if the error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            TagError::Api(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns the retry delay hint if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            TagError::Api(ApiError::Throttled { retry_after, .. }) => *retry_after,
            TagError::Api(ApiError::ServiceUnavailable { retry_after, .. }) => *retry_after,
            _ => None,
        }
    }

    /// Returns the AWS error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            TagError::Api(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Returns the AWS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            TagError::Api(e) => e.request_id(),
            _ => None,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Tag validation and conversion errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Tag key is empty.
    #[error("Tag key must not be empty")]
    EmptyKey,

    /// Tag key exceeds the maximum length.
    #[error("Tag key '{key}' is {length} characters, maximum is {max}")]
    KeyTooLong {
        /// The offending key.
        key: String,
        /// Its length in characters.
        length: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Tag value exceeds the maximum length.
    #[error("Value of tag '{key}' is {length} characters, maximum is {max}")]
    ValueTooLong {
        /// Key of the offending tag.
        key: String,
        /// Value length in characters.
        length: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// More tags than a resource may carry.
    #[error("Too many tags: {count} exceeds maximum of {max}")]
    TooManyTags {
        /// Number of user tags declared.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// User declared a key inside a reserved namespace.
    #[error("Tag key '{key}' uses a reserved prefix")]
    ReservedKey {
        /// The reserved key.
        key: String,
    },

    /// Tag input was not a key/value object.
    #[error("Tags must be an object of string values, got {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: String,
    },

    /// A tag value was not a string.
    #[error("Value of tag '{key}' must be a string, got {found}")]
    NonStringValue {
        /// Key of the offending tag.
        key: String,
        /// JSON type that was found instead.
        found: String,
    },
}

/// Errors reported by a service tagging API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request was throttled.
    #[error("Throttled: {message}")]
    Throttled {
        /// Error message.
        message: String,
        /// Retry after duration hint.
        retry_after: Option<Duration>,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Caller lacks permission to tag the resource.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// Error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Tagged resource does not exist.
    #[error("Resource not found: {message}")]
    ResourceNotFound {
        /// Error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Service rejected a tag key or value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Service-side tag limit reached.
    #[error("Tag limit exceeded: {message}")]
    LimitExceeded {
        /// Error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Service temporarily unavailable.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
        /// Retry after duration hint.
        retry_after: Option<Duration>,
        /// AWS request ID.
        request_id: Option<String>,
    },

    /// Any other service error.
    #[error("{code}: {message}")]
    Service {
        /// AWS error code.
        code: String,
        /// Error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
    },
}

impl ApiError {
    /// Returns the canonical error code.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Throttled { .. } => "ThrottlingException",
            ApiError::AccessDenied { .. } => "AccessDeniedException",
            ApiError::ResourceNotFound { .. } => "ResourceNotFoundException",
            ApiError::InvalidParameter { .. } => "InvalidParameterValueException",
            ApiError::LimitExceeded { .. } => "TagLimitExceeded",
            ApiError::ServiceUnavailable { .. } => "ServiceUnavailable",
            ApiError::Service { code, .. } => code,
        }
    }

    /// Returns the AWS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ApiError::Throttled { request_id, .. }
            | ApiError::AccessDenied { request_id, .. }
            | ApiError::ResourceNotFound { request_id, .. }
            | ApiError::InvalidParameter { request_id, .. }
            | ApiError::LimitExceeded { request_id, .. }
            | ApiError::ServiceUnavailable { request_id, .. }
            | ApiError::Service { request_id, .. } => request_id.as_deref(),
        }
    }

    /// Returns true if the error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Throttled { .. } | ApiError::ServiceUnavailable { .. }
        )
    }
}

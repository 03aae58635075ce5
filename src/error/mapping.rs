//! Error code mapping from AWS tagging API responses to typed errors.

use super::*;

/// Map an AWS error code to a typed error.
///
/// Tagging APIs across services disagree on spelling (`Throttling` vs
/// `ThrottlingException`, `AccessDenied` vs `AccessDeniedException`), so
/// every known variant maps onto the same [`ApiError`] case. Unknown codes
/// become [`ApiError::Service`] and keep the original code.
///
/// # Arguments
///
/// * `code` - The AWS error code (e.g., "ThrottlingException")
/// * `message` - Human-readable error message from the response
/// * `request_id` - AWS request ID, if the response carried one
pub fn map_api_error_code(
    code: &str,
    message: impl Into<String>,
    request_id: Option<String>,
) -> TagError {
    let message = message.into();

    let error = match code {
        "Throttling"
        | "ThrottlingException"
        | "ThrottledException"
        | "TooManyRequestsException"
        | "RequestLimitExceeded"
        | "RequestThrottled"
        | "RequestThrottledException"
        | "SlowDown" => ApiError::Throttled {
            message,
            retry_after: None,
            request_id,
        },

        "AccessDenied" | "AccessDeniedException" | "UnauthorizedOperation" => {
            ApiError::AccessDenied {
                message,
                request_id,
            }
        }

        "ResourceNotFoundException" | "ResourceNotFound" | "NotFoundException"
        | "InvalidResourceId" => ApiError::ResourceNotFound {
            message,
            request_id,
        },

        "InvalidParameterValue"
        | "InvalidParameterValueException"
        | "InvalidParameterException"
        | "InvalidTagKey"
        | "InvalidTag"
        | "ValidationException" => ApiError::InvalidParameter {
            message,
            request_id,
        },

        "TagLimitExceeded" | "TooManyTagsException" | "LimitExceededException"
        | "TagLimitExceededException" => ApiError::LimitExceeded {
            message,
            request_id,
        },

        "ServiceUnavailable" | "ServiceUnavailableException" | "InternalFailure"
        | "InternalError" | "InternalServerError" => ApiError::ServiceUnavailable {
            message,
            retry_after: None,
            request_id,
        },

        other => ApiError::Service {
            code: other.to_string(),
            message,
            request_id,
        },
    };

    TagError::Api(error)
}

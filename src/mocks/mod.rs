//! Mock implementations for testing.
//!
//! This module provides an in-memory tagging API and fixtures for tests of
//! code built on this crate.

mod api;

pub use api::{MockTaggingApi, RecordedCall};

use crate::error::{ApiError, TagError};
use crate::types::TagSet;
use std::time::Duration;

/// Test fixtures for tagging operations.
pub struct TestFixtures;

impl TestFixtures {
    /// A resource ARN used across tests.
    pub fn resource_arn() -> &'static str {
        "arn:aws:acm:us-east-1:123456789012:certificate/12345678-1234-1234-1234-123456789012"
    }

    /// Build a tag set from pairs.
    pub fn tags(pairs: &[(&str, &str)]) -> TagSet {
        pairs.iter().copied().collect()
    }

    /// Typical user-declared tags.
    pub fn sample_tags() -> TagSet {
        Self::tags(&[("Environment", "Test"), ("Project", "TagReconcile")])
    }

    /// Tags as listed for a resource created by a CloudFormation stack.
    pub fn cloudformation_tags() -> TagSet {
        Self::tags(&[
            ("Environment", "Test"),
            ("aws:cloudformation:stack-name", "test-stack"),
            (
                "aws:cloudformation:stack-id",
                "arn:aws:cloudformation:us-east-1:123456789012:stack/test-stack/abc",
            ),
        ])
    }

    /// A throttling error with an optional retry hint.
    pub fn throttled(retry_after: Option<Duration>) -> TagError {
        TagError::Api(ApiError::Throttled {
            message: "Rate exceeded".to_string(),
            retry_after,
            request_id: Some("test-request-id".to_string()),
        })
    }

    /// An access denied error.
    pub fn access_denied() -> TagError {
        TagError::Api(ApiError::AccessDenied {
            message: "User is not authorized to perform: tag:TagResources".to_string(),
            request_id: Some("test-request-id".to_string()),
        })
    }
}

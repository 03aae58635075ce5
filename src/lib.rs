//! AWS Tag Reconciliation
//!
//! One generic implementation of the tag diff every AWS resource needs:
//! given the tags a resource has and the tags it should have, work out what
//! to create, update and delete, and nothing more.
//!
//! # Features
//!
//! - **Pure diff**: [`diff`] over string maps, independent of iteration order
//! - **Reserved keys**: `aws:` tags are never proposed for mutation
//! - **Service boundary**: convert any service tag struct via [`ServiceTag`]
//! - **Validation**: AWS key/value length and tag count limits
//! - **Reconciler**: batched untag-then-tag calls with throttling retry
//!
//! # Quick Start
//!
//! ```rust
//! use aws_tags::{diff, TagSet};
//!
//! let old: TagSet = [("foo", "bar"), ("baz", "qux")].into_iter().collect();
//! let new: TagSet = [("foo", "bar")].into_iter().collect();
//!
//! let delta = diff(&old, &new);
//! assert!(delta.to_upsert.is_empty());
//! assert_eq!(delta.remove_keys(), vec!["baz".to_string()]);
//! ```
//!
//! Driving a service:
//!
//! ```rust,no_run
//! use aws_tags::{TagReconciler, TaggingApi, TaggingConfig, TagSet};
//! use std::sync::Arc;
//!
//! # async fn example(api: Arc<dyn TaggingApi>) -> Result<(), aws_tags::TagError> {
//! let config = Arc::new(TaggingConfig::builder().from_env().build()?);
//! let reconciler = TagReconciler::new(config, api);
//!
//! let desired: TagSet = [("Environment", "prod")].into_iter().collect();
//! let output = reconciler.sync("arn:aws:efs:us-east-1:123456789012:file-system/fs-1", &desired).await?;
//! println!("{} API calls", output.api_calls);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod mocks;
pub mod resilience;
pub mod services;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use client::TaggingApi;
pub use config::{TaggingConfig, TaggingConfigBuilder};
pub use diff::{diff, TagDiffer};
pub use error::{map_api_error_code, ApiError, ConfigurationError, TagError, ValidationError};
pub use filter::{is_reserved_tag, ReservedTagPolicy, AWS_RESERVED_PREFIX};
pub use resilience::{RetryConfig, RetryPolicy};
pub use services::{ReconcileOutput, TagReconciler};
pub use types::{ServiceTag, Tag, TagDelta, TagSet};
pub use validation::{validate_tags, TagLimits};

/// Create a reconciler configured from environment variables.
///
/// Reads `AWS_TAGS_RESERVED_PREFIXES`, `AWS_TAGS_BATCH_SIZE`,
/// `AWS_TAGS_MAX_RETRIES` and `AWS_TAGS_MAX_TAGS`.
pub fn create_reconciler_from_env(
    api: std::sync::Arc<dyn TaggingApi>,
) -> Result<TagReconciler> {
    let config = TaggingConfig::builder().from_env().build()?;
    Ok(TagReconciler::new(std::sync::Arc::new(config), api))
}

/// Result type alias for tagging operations.
pub type Result<T> = std::result::Result<T, TagError>;

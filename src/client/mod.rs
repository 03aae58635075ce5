//! Service tagging API abstraction.
//!
//! Every AWS service exposes some form of list/tag/untag for its resources.
//! Implement [`TaggingApi`] over a service client to let a
//! [`TagReconciler`](crate::services::TagReconciler) drive it.

use crate::error::TagError;
use crate::types::Tag;
use async_trait::async_trait;

/// A service's tagging endpoints for a single resource type.
///
/// `resource` is whatever identifies the resource to the service, usually an
/// ARN. Implementations map service error codes with
/// [`map_api_error_code`](crate::error::map_api_error_code).
#[async_trait]
pub trait TaggingApi: Send + Sync {
    /// List all tags currently on the resource, including reserved ones.
    async fn list_tags(&self, resource: &str) -> Result<Vec<Tag>, TagError>;

    /// Create or overwrite the given tags.
    async fn tag_resource(&self, resource: &str, tags: &[Tag]) -> Result<(), TagError>;

    /// Delete the given tag keys.
    async fn untag_resource(&self, resource: &str, keys: &[String]) -> Result<(), TagError>;
}

//! Reconciler that drives a service tagging API from a tag diff.

use crate::client::TaggingApi;
use crate::config::TaggingConfig;
use crate::diff::TagDiffer;
use crate::error::TagError;
use crate::resilience::RetryPolicy;
use crate::types::{Tag, TagDelta, TagSet};
use crate::validation::validate_tags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutput {
    /// Keys deleted from the resource.
    pub removed: Vec<String>,
    /// Tags created or overwritten on the resource.
    pub upserted: Vec<Tag>,
    /// Number of tag/untag calls issued (retries not counted).
    pub api_calls: usize,
}

impl ReconcileOutput {
    /// Returns true if nothing was changed.
    pub fn is_noop(&self) -> bool {
        self.api_calls == 0
    }
}

/// Converges a resource's tags onto a desired set.
///
/// Reserved keys are stripped from both sides before diffing. Removals are
/// issued before upserts so a changed value is deleted and then recreated.
/// Calls are split into batches of at most `batch_size` entries and retried
/// on throttling.
pub struct TagReconciler {
    config: Arc<TaggingConfig>,
    api: Arc<dyn TaggingApi>,
    differ: TagDiffer,
    retry: RetryPolicy,
    batch_size: usize,
}

impl TagReconciler {
    /// Create a new reconciler.
    pub fn new(config: Arc<TaggingConfig>, api: Arc<dyn TaggingApi>) -> Self {
        let differ = TagDiffer::new(config.reserved_policy());
        let retry = RetryPolicy::new(config.retry_config());
        // `chunks` panics on zero; a hand-built config can bypass the builder.
        let batch_size = config.batch_size.max(1);
        Self {
            config,
            api,
            differ,
            retry,
            batch_size,
        }
    }

    /// Read the user-managed tags currently on `resource`.
    pub async fn read(&self, resource: &str) -> Result<TagSet, TagError> {
        let tags = self.retry.execute(|| self.api.list_tags(resource)).await?;
        let all = TagSet::from(tags);
        let user = self.differ.policy().filter(&all);

        debug!(
            resource = resource,
            total = all.len(),
            ignored = all.len() - user.len(),
            "Read resource tags"
        );

        Ok(user)
    }

    /// Validate `new` and compute the delta from `old`. Issues no API calls.
    pub fn plan(&self, old: &TagSet, new: &TagSet) -> Result<TagDelta, TagError> {
        validate_tags(new, &self.config.limits, self.differ.policy())?;
        Ok(self.differ.diff(old, new))
    }

    /// Converge `resource` from the `old` tags onto the `new` ones.
    pub async fn reconcile(
        &self,
        resource: &str,
        old: &TagSet,
        new: &TagSet,
    ) -> Result<ReconcileOutput, TagError> {
        let delta = self.plan(old, new)?;
        if delta.is_empty() {
            debug!(resource = resource, "Tags already up to date");
            return Ok(ReconcileOutput::default());
        }

        info!(
            resource = resource,
            to_remove = delta.to_remove.len(),
            to_upsert = delta.to_upsert.len(),
            "Updating resource tags"
        );

        let mut output = ReconcileOutput::default();

        let keys = delta.remove_keys();
        for chunk in keys.chunks(self.batch_size) {
            debug!(resource = resource, keys = ?chunk, "Removing tags");
            self.retry
                .execute(|| self.api.untag_resource(resource, chunk))
                .await?;
            output.api_calls += 1;
            output.removed.extend_from_slice(chunk);
        }

        let tags = delta.upsert_tags();
        for chunk in tags.chunks(self.batch_size) {
            debug!(resource = resource, count = chunk.len(), "Upserting tags");
            self.retry
                .execute(|| self.api.tag_resource(resource, chunk))
                .await?;
            output.api_calls += 1;
            output.upserted.extend_from_slice(chunk);
        }

        Ok(output)
    }

    /// Read the current tags of `resource` and converge them onto `desired`.
    pub async fn sync(
        &self,
        resource: &str,
        desired: &TagSet,
    ) -> Result<ReconcileOutput, TagError> {
        let current = self.read(resource).await?;
        self.reconcile(resource, &current, desired).await
    }

    /// The configuration in use.
    pub fn config(&self) -> &TaggingConfig {
        &self.config
    }
}

impl std::fmt::Debug for TagReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagReconciler")
            .field("config", &self.config)
            .field("differ", &self.differ)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

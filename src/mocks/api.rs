//! In-memory tagging API for testing.

use crate::client::TaggingApi;
use crate::error::TagError;
use crate::types::{Tag, TagSet};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// A call received by [`MockTaggingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `list_tags`.
    List {
        /// Resource identifier.
        resource: String,
    },
    /// `tag_resource`.
    Tag {
        /// Resource identifier.
        resource: String,
        /// Tags sent.
        tags: Vec<Tag>,
    },
    /// `untag_resource`.
    Untag {
        /// Resource identifier.
        resource: String,
        /// Keys sent.
        keys: Vec<String>,
    },
}

/// Tagging API backed by an in-memory map of resource to tags.
///
/// Successful tag/untag calls mutate the stored tags, so a test can check
/// the end state as well as the calls. A failing call records itself but
/// leaves the store untouched. Failures scheduled for a call number take
/// precedence over queued ones.
#[derive(Default)]
pub struct MockTaggingApi {
    resources: Mutex<HashMap<String, TagSet>>,
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<VecDeque<TagError>>,
    scheduled: Mutex<HashMap<usize, TagError>>,
}

impl MockTaggingApi {
    /// Create an API with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an API holding one resource with the given tags.
    pub fn with_resource(resource: impl Into<String>, tags: TagSet) -> Self {
        let api = Self::new();
        api.set_tags(resource, tags);
        api
    }

    /// Replace the stored tags of `resource`.
    pub fn set_tags(&self, resource: impl Into<String>, tags: TagSet) {
        self.resources.lock().insert(resource.into(), tags);
    }

    /// Stored tags of `resource`, empty if unknown.
    pub fn tags(&self, resource: &str) -> TagSet {
        self.resources
            .lock()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Queue an error for the next call.
    pub fn fail_next(&self, error: TagError) {
        self.failures.lock().push_back(error);
    }

    /// Fail the `call`-th call (1-based, counting every call made).
    pub fn fail_call(&self, call: usize, error: TagError) {
        self.scheduled.lock().insert(call, error);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: RecordedCall) -> Result<(), TagError> {
        let number = {
            let mut calls = self.calls.lock();
            calls.push(call);
            calls.len()
        };
        if let Some(error) = self.scheduled.lock().remove(&number) {
            return Err(error);
        }
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TaggingApi for MockTaggingApi {
    async fn list_tags(&self, resource: &str) -> Result<Vec<Tag>, TagError> {
        self.record(RecordedCall::List {
            resource: resource.to_string(),
        })?;
        Ok(self.tags(resource).to_tags())
    }

    async fn tag_resource(&self, resource: &str, tags: &[Tag]) -> Result<(), TagError> {
        self.record(RecordedCall::Tag {
            resource: resource.to_string(),
            tags: tags.to_vec(),
        })?;

        let mut resources = self.resources.lock();
        let stored = resources.entry(resource.to_string()).or_default();
        for tag in tags {
            stored.insert(tag.key.clone(), tag.value.clone());
        }
        Ok(())
    }

    async fn untag_resource(&self, resource: &str, keys: &[String]) -> Result<(), TagError> {
        self.record(RecordedCall::Untag {
            resource: resource.to_string(),
            keys: keys.to_vec(),
        })?;

        if let Some(stored) = self.resources.lock().get_mut(resource) {
            for key in keys {
                stored.remove(key);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MockTaggingApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTaggingApi")
            .field("call_count", &self.call_count())
            .finish_non_exhaustive()
    }
}

//! Reserved tag filtering.
//!
//! AWS attaches tags under the `aws:` namespace (CloudFormation stack ids,
//! autoscaling group names, ...). Users cannot create or delete them, so they
//! must never reach a diff as something to add or remove.

use crate::types::TagSet;
use serde::{Deserialize, Serialize};

/// Prefix AWS reserves for tags it manages itself.
pub const AWS_RESERVED_PREFIX: &str = "aws:";

/// Set of key prefixes that mark a tag as cloud-managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedTagPolicy {
    prefixes: Vec<String>,
}

impl Default for ReservedTagPolicy {
    fn default() -> Self {
        Self {
            prefixes: vec![AWS_RESERVED_PREFIX.to_string()],
        }
    }
}

impl ReservedTagPolicy {
    /// Create a policy reserving the given key prefixes.
    ///
    /// Empty prefixes are dropped, since they would match every key.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// A policy that reserves nothing.
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// The reserved prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns true if `key` falls in a reserved namespace. Case-sensitive.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// Copy of `tags` without reserved keys.
    pub fn filter(&self, tags: &TagSet) -> TagSet {
        tags.iter()
            .filter(|(k, _)| !self.is_reserved(k))
            .collect()
    }

    /// Only the reserved keys of `tags`.
    pub fn reserved(&self, tags: &TagSet) -> TagSet {
        tags.iter().filter(|(k, _)| self.is_reserved(k)).collect()
    }
}

/// Returns true if `key` is reserved under the default `aws:` policy.
pub fn is_reserved_tag(key: &str) -> bool {
    ReservedTagPolicy::default().is_reserved(key)
}

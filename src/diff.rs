//! Tag diffing.
//!
//! [`diff`] computes the minimal set of tag creations, updates and
//! deletions that converge an observed tag set onto a desired one. It is a
//! pure function: inputs are borrowed and never modified.

use crate::filter::ReservedTagPolicy;
use crate::types::{TagDelta, TagSet};
use std::collections::BTreeSet;

/// Compute the changes that turn `old` into `new`.
///
/// - A key in `old` that is missing from `new`, or whose value differs, is
///   removed.
/// - A key in `new` that is missing from `old`, or whose value differs, is
///   upserted with its new value.
/// - A key present in both with the same value appears in neither output.
///
/// A changed key is therefore both removed and upserted. Callers untag
/// before tagging; APIs that overwrite in place treat the removal as a
/// harmless no-op.
///
/// # Example
///
/// ```rust
/// use aws_tags::{diff, TagSet};
///
/// let old: TagSet = [("foo", "bar")].into_iter().collect();
/// let new: TagSet = [("foo", "baz")].into_iter().collect();
///
/// let delta = diff(&old, &new);
/// assert_eq!(delta.to_upsert.get("foo"), Some("baz"));
/// assert!(delta.to_remove.contains("foo"));
/// ```
pub fn diff(old: &TagSet, new: &TagSet) -> TagDelta {
    let to_remove: BTreeSet<String> = old
        .iter()
        .filter(|(k, v)| new.get(k) != Some(*v))
        .map(|(k, _)| k.to_string())
        .collect();

    let to_upsert: TagSet = new
        .iter()
        .filter(|(k, v)| old.get(k) != Some(*v))
        .collect();

    TagDelta {
        to_upsert,
        to_remove,
    }
}

/// Diffs tag sets after stripping reserved keys from both sides.
#[derive(Debug, Clone, Default)]
pub struct TagDiffer {
    policy: ReservedTagPolicy,
}

impl TagDiffer {
    /// Create a differ that ignores keys reserved by `policy`.
    pub fn new(policy: ReservedTagPolicy) -> Self {
        Self { policy }
    }

    /// A differ that compares every key.
    pub fn unfiltered() -> Self {
        Self {
            policy: ReservedTagPolicy::none(),
        }
    }

    /// The reserved-key policy in use.
    pub fn policy(&self) -> &ReservedTagPolicy {
        &self.policy
    }

    /// Diff `old` against `new`, never mentioning a reserved key.
    pub fn diff(&self, old: &TagSet, new: &TagSet) -> TagDelta {
        diff(&self.policy.filter(old), &self.policy.filter(new))
    }
}

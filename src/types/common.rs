//! Wire-shaped tag types shared with service APIs.

use serde::{Deserialize, Serialize};

/// A single key/value tag, the list-of-struct shape most AWS tagging APIs
/// send and receive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A service-native tag representation.
///
/// Services model tags with their own structs (`acm::Tag`,
/// `efs::Tag`, `datasync::TagListEntry`, ...). Implementing this trait lets
/// such a type convert to and from a [`TagSet`](crate::types::TagSet) at the
/// service boundary so the diff runs on one shape.
pub trait ServiceTag {
    /// The tag key.
    fn key(&self) -> &str;

    /// The tag value. Services with optional values report `""` for absent.
    fn value(&self) -> &str;

    /// Build the service tag from a key/value pair.
    fn from_pair(key: String, value: String) -> Self;
}

impl ServiceTag for Tag {
    fn key(&self) -> &str {
        &self.key
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn from_pair(key: String, value: String) -> Self {
        Self { key, value }
    }
}

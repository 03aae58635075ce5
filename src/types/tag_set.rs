//! Tag sets and the delta between two of them.

use super::common::{ServiceTag, Tag};
use crate::error::{TagError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A mapping from tag key to tag value.
///
/// Keys are unique and order is irrelevant to equality. The backing map is
/// ordered so iteration, debug output and API batches are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a tag, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a tag, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Build a tag set from service-native tags. Later duplicates win.
    pub fn from_service_tags<'a, T, I>(tags: I) -> Self
    where
        T: ServiceTag + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        tags.into_iter()
            .map(|t| (t.key().to_string(), t.value().to_string()))
            .collect()
    }

    /// Convert to service-native tags, ordered by key.
    pub fn to_service_tags<T: ServiceTag>(&self) -> Vec<T> {
        self.0
            .iter()
            .map(|(k, v)| T::from_pair(k.clone(), v.clone()))
            .collect()
    }

    /// Convert to the generic [`Tag`] list shape.
    pub fn to_tags(&self) -> Vec<Tag> {
        self.to_service_tags()
    }

    /// Build a tag set from a loosely typed configuration map.
    ///
    /// Accepts a JSON object whose values are all strings. `null` is an
    /// empty set.
    pub fn from_json(value: &Value) -> Result<Self, TagError> {
        let object = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::NotAnObject {
                    found: json_type_name(other).to_string(),
                }
                .into())
            }
        };

        let mut tags = Self::new();
        for (key, value) in object {
            match value {
                Value::String(s) => {
                    tags.insert(key.clone(), s.clone());
                }
                other => {
                    return Err(ValidationError::NonStringValue {
                        key: key.clone(),
                        found: json_type_name(other).to_string(),
                    }
                    .into())
                }
            }
        }
        Ok(tags)
    }

    /// Convert into a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TagSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.0.insert(k.into(), v.into());
        }
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, String>> for TagSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for TagSet {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        tags.into_iter().map(|t| (t.key, t.value)).collect()
    }
}

impl From<&[Tag]> for TagSet {
    fn from(tags: &[Tag]) -> Self {
        Self::from_service_tags(tags)
    }
}

/// The changes needed to move remote tags to the desired state.
///
/// A key whose value changed appears in both `to_upsert` and `to_remove`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDelta {
    /// Tags to create or overwrite, with their desired values.
    pub to_upsert: TagSet,
    /// Keys to delete.
    pub to_remove: BTreeSet<String>,
}

impl TagDelta {
    /// Returns true if no API calls are needed.
    pub fn is_empty(&self) -> bool {
        self.to_upsert.is_empty() && self.to_remove.is_empty()
    }

    /// Tags to upsert in the list-of-struct shape.
    pub fn upsert_tags(&self) -> Vec<Tag> {
        self.to_upsert.to_tags()
    }

    /// Keys to remove, sorted.
    pub fn remove_keys(&self) -> Vec<String> {
        self.to_remove.iter().cloned().collect()
    }

    /// Apply this delta to `tags`: remove first, then upsert.
    pub fn apply_to(&self, tags: &TagSet) -> TagSet {
        let mut result = tags.clone();
        for key in &self.to_remove {
            result.remove(key);
        }
        result.extend(self.to_upsert.iter());
        result
    }
}

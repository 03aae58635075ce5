//! Validation of user-declared tags against AWS tagging limits.

use crate::error::{TagError, ValidationError};
use crate::filter::ReservedTagPolicy;
use crate::types::TagSet;
use serde::{Deserialize, Serialize};

/// Maximum tag key length most AWS services accept.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 128;
/// Maximum tag value length most AWS services accept.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 256;
/// Maximum number of user tags per resource.
pub const DEFAULT_MAX_TAGS: usize = 50;

/// Per-resource tag limits. Lengths count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLimits {
    /// Maximum key length.
    pub max_key_length: usize,
    /// Maximum value length.
    pub max_value_length: usize,
    /// Maximum number of tags.
    pub max_tags: usize,
}

impl Default for TagLimits {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

impl TagLimits {
    /// Set the maximum key length.
    pub fn with_max_key_length(mut self, max: usize) -> Self {
        self.max_key_length = max;
        self
    }

    /// Set the maximum value length.
    pub fn with_max_value_length(mut self, max: usize) -> Self {
        self.max_value_length = max;
        self
    }

    /// Set the maximum number of tags.
    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.max_tags = max;
        self
    }
}

/// Check a desired tag set before any API call is made.
///
/// Rejects empty keys, keys or values over the length limits, more than
/// `limits.max_tags` tags, and keys in a reserved namespace.
pub fn validate_tags(
    tags: &TagSet,
    limits: &TagLimits,
    policy: &ReservedTagPolicy,
) -> Result<(), TagError> {
    if tags.len() > limits.max_tags {
        return Err(ValidationError::TooManyTags {
            count: tags.len(),
            max: limits.max_tags,
        }
        .into());
    }

    for (key, value) in tags.iter() {
        validate_tag(key, value, limits)?;

        if policy.is_reserved(key) {
            return Err(ValidationError::ReservedKey {
                key: key.to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_tag(key: &str, value: &str, limits: &TagLimits) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }

    let key_len = key.chars().count();
    if key_len > limits.max_key_length {
        return Err(ValidationError::KeyTooLong {
            key: key.to_string(),
            length: key_len,
            max: limits.max_key_length,
        });
    }

    let value_len = value.chars().count();
    if value_len > limits.max_value_length {
        return Err(ValidationError::ValueTooLong {
            key: key.to_string(),
            length: value_len,
            max: limits.max_value_length,
        });
    }

    Ok(())
}

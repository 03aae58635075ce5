//! Configuration for tag reconciliation.
//!
//! This module provides the `TaggingConfig` type, covering reserved-key
//! policy, per-resource limits, API batch sizing and retry settings.

use crate::error::{ConfigurationError, TagError};
use crate::filter::{ReservedTagPolicy, AWS_RESERVED_PREFIX};
use crate::resilience::RetryConfig;
use crate::validation::TagLimits;
use std::time::Duration;

/// Configuration for a [`TagReconciler`](crate::services::TagReconciler).
#[derive(Debug, Clone)]
pub struct TaggingConfig {
    /// Key prefixes owned by the cloud provider.
    pub reserved_prefixes: Vec<String>,

    /// Maximum number of tags or keys sent in a single API call.
    pub batch_size: usize,

    /// Per-resource tag limits.
    pub limits: TagLimits,

    /// Maximum number of retries for throttled calls.
    pub max_retries: u32,

    /// Initial backoff delay for retries.
    pub initial_backoff: Duration,

    /// Maximum backoff delay.
    pub max_backoff: Duration,

    /// Backoff multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            reserved_prefixes: vec![AWS_RESERVED_PREFIX.to_string()],
            batch_size: 20,
            limits: TagLimits::default(),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(20),
            backoff_multiplier: 2.0,
        }
    }
}

impl TaggingConfig {
    /// Create a new configuration builder.
    pub fn builder() -> TaggingConfigBuilder {
        TaggingConfigBuilder::default()
    }

    /// The reserved-key policy described by this configuration.
    pub fn reserved_policy(&self) -> ReservedTagPolicy {
        ReservedTagPolicy::new(self.reserved_prefixes.iter().cloned())
    }

    /// Retry settings for API calls.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.max_retries)
            .with_initial_backoff(self.initial_backoff)
            .with_max_backoff(self.max_backoff)
            .with_multiplier(self.backoff_multiplier)
    }
}

/// Builder for tagging configuration.
#[derive(Default)]
pub struct TaggingConfigBuilder {
    reserved_prefixes: Option<Vec<String>>,
    batch_size: Option<usize>,
    limits: Option<TagLimits>,
    max_retries: Option<u32>,
    initial_backoff: Option<Duration>,
    max_backoff: Option<Duration>,
    backoff_multiplier: Option<f64>,
}

impl TaggingConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reserved key prefixes.
    pub fn reserved_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the maximum entries per API call.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Set the per-resource tag limits.
    pub fn limits(mut self, limits: TagLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the initial backoff delay.
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = Some(delay);
        self
    }

    /// Set the maximum backoff delay.
    pub fn max_backoff(mut self, delay: Duration) -> Self {
        self.max_backoff = Some(delay);
        self
    }

    /// Set the backoff multiplier.
    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = Some(multiplier);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are ignored and the default kept.
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("AWS_TAGS_RESERVED_PREFIXES") {
            self.reserved_prefixes = Some(parse_prefix_list(&val));
        }
        if let Ok(val) = std::env::var("AWS_TAGS_BATCH_SIZE") {
            if let Ok(size) = val.parse() {
                self.batch_size = Some(size);
            }
        }
        if let Ok(val) = std::env::var("AWS_TAGS_MAX_RETRIES") {
            if let Ok(retries) = val.parse() {
                self.max_retries = Some(retries);
            }
        }
        if let Ok(val) = std::env::var("AWS_TAGS_MAX_TAGS") {
            if let Ok(max) = val.parse() {
                let limits = self.limits.unwrap_or_default();
                self.limits = Some(limits.with_max_tags(max));
            }
        }

        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<TaggingConfig, TagError> {
        let defaults = TaggingConfig::default();

        let batch_size = self.batch_size.unwrap_or(defaults.batch_size);
        if batch_size == 0 {
            return Err(invalid("batch_size", "Batch size must be at least 1"));
        }

        let reserved_prefixes = self.reserved_prefixes.unwrap_or(defaults.reserved_prefixes);
        if reserved_prefixes.iter().any(String::is_empty) {
            // An empty prefix would match every key.
            return Err(invalid(
                "reserved_prefixes",
                "Reserved prefixes must not be empty",
            ));
        }

        let backoff_multiplier = self.backoff_multiplier.unwrap_or(defaults.backoff_multiplier);
        if backoff_multiplier < 1.0 {
            return Err(invalid(
                "backoff_multiplier",
                "Backoff multiplier must be at least 1.0",
            ));
        }

        Ok(TaggingConfig {
            reserved_prefixes,
            batch_size,
            limits: self.limits.unwrap_or(defaults.limits),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            initial_backoff: self.initial_backoff.unwrap_or(defaults.initial_backoff),
            max_backoff: self.max_backoff.unwrap_or(defaults.max_backoff),
            backoff_multiplier,
        })
    }
}

fn invalid(field: &str, message: &str) -> TagError {
    TagError::Configuration(ConfigurationError::InvalidConfiguration {
        field: field.to_string(),
        message: message.to_string(),
    })
}

fn parse_prefix_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaggingConfig::default();
        assert_eq!(config.reserved_prefixes, vec!["aws:".to_string()]);
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.limits.max_tags, 50);
    }

    #[test]
    fn test_builder() {
        let config = TaggingConfig::builder()
            .reserved_prefixes(["aws:", "kubernetes.io/"])
            .batch_size(10)
            .max_retries(5)
            .build()
            .unwrap();

        assert_eq!(config.batch_size, 10);
        assert_eq!(config.max_retries, 5);
        assert!(config.reserved_policy().is_reserved("kubernetes.io/cluster"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = TaggingConfig::builder().batch_size(0).build();
        assert!(matches!(result, Err(TagError::Configuration(_))));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let result = TaggingConfig::builder().reserved_prefixes([""]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_low_multiplier_rejected() {
        let result = TaggingConfig::builder().backoff_multiplier(0.5).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_prefix_list() {
        assert_eq!(
            parse_prefix_list(" aws: , ,kubernetes.io/ "),
            vec!["aws:".to_string(), "kubernetes.io/".to_string()]
        );
    }

    #[test]
    fn test_retry_config_from_settings() {
        let config = TaggingConfig::builder()
            .max_retries(7)
            .initial_backoff(Duration::from_millis(50))
            .build()
            .unwrap();
        let retry = config.retry_config();
        assert_eq!(retry.max_retries, 7);
        assert_eq!(retry.initial_backoff, Duration::from_millis(50));
    }
}

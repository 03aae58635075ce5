//! Environment-driven configuration tests.
//!
//! Environment variables are process-wide, so every case runs inside one
//! test function in sequence.

use aws_tags::mocks::MockTaggingApi;
use aws_tags::{create_reconciler_from_env, TaggingConfig};
use std::env;
use std::sync::Arc;

const VARS: [&str; 4] = [
    "AWS_TAGS_RESERVED_PREFIXES",
    "AWS_TAGS_BATCH_SIZE",
    "AWS_TAGS_MAX_RETRIES",
    "AWS_TAGS_MAX_TAGS",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env() {
    clear_vars();

    // Unset: defaults.
    let config = TaggingConfig::builder().from_env().build().unwrap();
    let defaults = TaggingConfig::default();
    assert_eq!(config.reserved_prefixes, defaults.reserved_prefixes);
    assert_eq!(config.batch_size, defaults.batch_size);
    assert_eq!(config.max_retries, defaults.max_retries);
    assert_eq!(config.limits.max_tags, defaults.limits.max_tags);

    // Valid values.
    env::set_var("AWS_TAGS_RESERVED_PREFIXES", "aws:, kubernetes.io/ ,");
    env::set_var("AWS_TAGS_BATCH_SIZE", "5");
    env::set_var("AWS_TAGS_MAX_RETRIES", "7");
    env::set_var("AWS_TAGS_MAX_TAGS", "10");

    let config = TaggingConfig::builder().from_env().build().unwrap();
    assert_eq!(
        config.reserved_prefixes,
        vec!["aws:".to_string(), "kubernetes.io/".to_string()]
    );
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.max_retries, 7);
    assert_eq!(config.limits.max_tags, 10);
    assert!(config.reserved_policy().is_reserved("kubernetes.io/cluster/main"));

    // Explicit builder settings after from_env win.
    let config = TaggingConfig::builder()
        .from_env()
        .batch_size(3)
        .build()
        .unwrap();
    assert_eq!(config.batch_size, 3);
    assert_eq!(config.max_retries, 7);

    let reconciler = create_reconciler_from_env(Arc::new(MockTaggingApi::new())).unwrap();
    assert_eq!(reconciler.config().batch_size, 5);
    assert_eq!(reconciler.config().max_retries, 7);
    assert_eq!(reconciler.config().limits.max_tags, 10);

    // Garbage is ignored and the default kept.
    env::set_var("AWS_TAGS_BATCH_SIZE", "lots");
    env::set_var("AWS_TAGS_MAX_RETRIES", "-1");
    env::set_var("AWS_TAGS_MAX_TAGS", "");

    let config = TaggingConfig::builder().from_env().build().unwrap();
    assert_eq!(config.batch_size, defaults.batch_size);
    assert_eq!(config.max_retries, defaults.max_retries);
    assert_eq!(config.limits.max_tags, defaults.limits.max_tags);

    // Parseable but invalid: surfaced by build.
    env::set_var("AWS_TAGS_BATCH_SIZE", "0");
    assert!(TaggingConfig::builder().from_env().build().is_err());
    assert!(create_reconciler_from_env(Arc::new(MockTaggingApi::new())).is_err());

    clear_vars();
}

//! Integration tests for tag diffing.

use aws_tags::mocks::TestFixtures;
use aws_tags::{diff, ServiceTag, Tag, TagDiffer, TagSet};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use test_case::test_case;

fn tags(pairs: &[(&str, &str)]) -> TagSet {
    TestFixtures::tags(pairs)
}

fn keys(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|k| k.to_string()).collect()
}

#[test_case(&[("foo", "bar")], &[("bar", "baz")], &[("bar", "baz")], &["foo"] ; "disjoint keys")]
#[test_case(&[("foo", "bar")], &[("foo", "baz")], &[("foo", "baz")], &["foo"] ; "changed value")]
#[test_case(&[], &[], &[], &[] ; "both empty")]
#[test_case(&[("foo", "bar"), ("baz", "qux")], &[("foo", "bar")], &[], &["baz"] ; "removed key")]
#[test_case(&[("a", "1")], &[("a", "1"), ("b", "2")], &[("b", "2")], &[] ; "added key")]
fn test_diff_scenarios(
    old: &[(&str, &str)],
    new: &[(&str, &str)],
    expected_upsert: &[(&str, &str)],
    expected_remove: &[&str],
) {
    let delta = diff(&tags(old), &tags(new));

    assert_eq!(delta.to_upsert, tags(expected_upsert));
    assert_eq!(delta.to_remove, keys(expected_remove));
}

#[test]
fn test_pure_addition() {
    let new = TestFixtures::sample_tags();
    let delta = diff(&TagSet::new(), &new);

    assert_eq!(delta.to_upsert, new);
    assert!(delta.to_remove.is_empty());
}

#[test]
fn test_pure_removal() {
    let old = TestFixtures::sample_tags();
    let delta = diff(&old, &TagSet::new());

    assert!(delta.to_upsert.is_empty());
    assert_eq!(delta.to_remove, keys(&["Environment", "Project"]));
}

#[test]
fn test_identical_sets() {
    let set = TestFixtures::sample_tags();
    assert!(diff(&set, &set.clone()).is_empty());
}

#[test]
fn test_default_differ_ignores_cloudformation_tags() {
    let observed = TestFixtures::cloudformation_tags();
    let desired = tags(&[("Environment", "Prod")]);

    let delta = TagDiffer::default().diff(&observed, &desired);

    assert_eq!(delta.to_upsert, tags(&[("Environment", "Prod")]));
    assert_eq!(delta.to_remove, keys(&["Environment"]));
}

#[test]
fn test_hashmap_input() {
    let mut old = HashMap::new();
    old.insert("Name".to_string(), "a".to_string());
    let mut new = HashMap::new();
    new.insert("Name".to_string(), "b".to_string());

    let delta = diff(&TagSet::from(old), &TagSet::from(new));
    assert_eq!(delta.upsert_tags(), vec![Tag::new("Name", "b")]);
    assert_eq!(delta.remove_keys(), vec!["Name".to_string()]);
}

/// A service tag whose value is optional, like DataSync's `TagListEntry`.
#[derive(Debug, Clone, PartialEq)]
struct TagListEntry {
    key: String,
    value: Option<String>,
}

impl ServiceTag for TagListEntry {
    fn key(&self) -> &str {
        &self.key
    }

    fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    fn from_pair(key: String, value: String) -> Self {
        Self {
            key,
            value: if value.is_empty() { None } else { Some(value) },
        }
    }
}

#[test]
fn test_service_tag_boundary() {
    let remote = vec![
        TagListEntry {
            key: "Name".to_string(),
            value: Some("agent".to_string()),
        },
        TagListEntry {
            key: "Flag".to_string(),
            value: None,
        },
    ];
    let observed = TagSet::from_service_tags(&remote);
    assert_eq!(observed.get("Flag"), Some(""));

    let desired = tags(&[("Name", "agent-2"), ("Flag", "")]);
    let delta = diff(&observed, &desired);

    let to_create: Vec<TagListEntry> = delta.to_upsert.to_service_tags();
    assert_eq!(
        to_create,
        vec![TagListEntry {
            key: "Name".to_string(),
            value: Some("agent-2".to_string()),
        }]
    );
    assert_eq!(delta.remove_keys(), vec!["Name".to_string()]);
}

fn tag_set_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    // Small key/value alphabets so generated sets overlap often.
    prop::collection::vec(("[a-e]{1,2}", "[xyz]{0,2}"), 0..12)
}

proptest! {
    #[test]
    fn prop_no_op_on_identical(pairs in tag_set_strategy()) {
        let set: TagSet = pairs.into_iter().collect();
        let delta = diff(&set, &set);
        prop_assert!(delta.to_upsert.is_empty());
        prop_assert!(delta.to_remove.is_empty());
    }

    #[test]
    fn prop_unchanged_keys_absent(old in tag_set_strategy(), new in tag_set_strategy()) {
        let old: TagSet = old.into_iter().collect();
        let new: TagSet = new.into_iter().collect();
        let delta = diff(&old, &new);

        for (key, value) in old.iter() {
            if new.get(key) == Some(value) {
                prop_assert!(!delta.to_upsert.contains_key(key));
                prop_assert!(!delta.to_remove.contains(key));
            }
        }
    }

    #[test]
    fn prop_outputs_match_definition(old in tag_set_strategy(), new in tag_set_strategy()) {
        let old: TagSet = old.into_iter().collect();
        let new: TagSet = new.into_iter().collect();
        let delta = diff(&old, &new);

        for key in &delta.to_remove {
            prop_assert!(old.contains_key(key));
            prop_assert_ne!(old.get(key), new.get(key));
        }
        for (key, value) in delta.to_upsert.iter() {
            prop_assert_eq!(new.get(key), Some(value));
            prop_assert_ne!(old.get(key), Some(value));
        }
    }

    #[test]
    fn prop_changed_value_in_both(key in "[a-e]{1,2}", v1 in "[xyz]{0,2}", v2 in "[xyz]{0,2}") {
        prop_assume!(v1 != v2);
        let old = TagSet::from_iter([(key.clone(), v1)]);
        let new = TagSet::from_iter([(key.clone(), v2.clone())]);
        let delta = diff(&old, &new);

        prop_assert!(delta.to_remove.contains(&key));
        prop_assert_eq!(delta.to_upsert.get(&key), Some(v2.as_str()));
    }

    #[test]
    fn prop_apply_converges(old in tag_set_strategy(), new in tag_set_strategy()) {
        let old: TagSet = old.into_iter().collect();
        let new: TagSet = new.into_iter().collect();
        prop_assert_eq!(diff(&old, &new).apply_to(&old), new);
    }

    #[test]
    fn prop_insertion_order_irrelevant(pairs in tag_set_strategy(), other in tag_set_strategy()) {
        let forward: TagSet = pairs.iter().cloned().collect();
        // Dedupe first so reversing cannot change which duplicate wins.
        let reversed: TagSet = forward.clone().into_iter().rev().collect();
        let new: TagSet = other.into_iter().collect();

        prop_assert_eq!(diff(&forward, &new), diff(&reversed, &new));
        prop_assert_eq!(diff(&new, &forward), diff(&new, &reversed));
    }

    #[test]
    fn prop_default_differ_never_touches_reserved(
        old in tag_set_strategy(),
        new in tag_set_strategy(),
        reserved in "[a-e]{1,2}",
    ) {
        let mut old: TagSet = old.into_iter().collect();
        let mut new: TagSet = new.into_iter().collect();
        old.insert(format!("aws:{}", reserved), "old");
        new.insert(format!("aws:{}", reserved), "new");

        let delta = TagDiffer::default().diff(&old, &new);
        prop_assert!(delta.to_upsert.keys().all(|k| !k.starts_with("aws:")));
        prop_assert!(delta.to_remove.iter().all(|k| !k.starts_with("aws:")));
    }
}

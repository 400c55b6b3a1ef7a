//! Integration tests for the bounded analytics event log.

use std::collections::BTreeMap;

use polymotiv::{Config, Motivator};
use serde_json::json;
use tempfile::tempdir;

fn payload(key: &str, value: i64) -> BTreeMap<String, serde_json::Value> {
    let mut data = BTreeMap::new();
    data.insert(key.to_string(), json!(value));
    data
}

#[test]
fn test_events_append_in_order() {
    let dir = tempdir().unwrap();
    let app = Motivator::open(dir.path().join("motiv.db"), Config::default()).unwrap();

    app.record_event("first", BTreeMap::new());
    app.record_event("second", BTreeMap::new());
    app.record_event("third", payload("n", 3));

    let events = app.events();
    let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(events[2].data.get("n"), Some(&json!(3)));
}

#[test]
fn test_hundred_and_first_event_evicts_oldest() {
    let dir = tempdir().unwrap();
    let app = Motivator::open(dir.path().join("motiv.db"), Config::default()).unwrap();

    for i in 0..101 {
        app.record_event(&format!("event_{i}"), BTreeMap::new());
    }

    let events = app.events();
    assert_eq!(events.len(), 100);
    // The very first event is gone; the rest survive in order
    assert_eq!(events[0].name, "event_1");
    assert_eq!(events[99].name, "event_100");
}

#[test]
fn test_custom_capacity_is_honored() {
    let dir = tempdir().unwrap();
    let config = Config {
        event_log_capacity: 3,
        ..Default::default()
    };
    let app = Motivator::open(dir.path().join("motiv.db"), config).unwrap();

    for i in 0..10 {
        app.record_event(&format!("event_{i}"), BTreeMap::new());
    }

    let events = app.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].name, "event_7");
    assert_eq!(events[2].name, "event_9");
}

#[test]
fn test_events_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("motiv.db");

    {
        let app = Motivator::open(&path, Config::default()).unwrap();
        app.record_event("persisted", payload("value", 42));
        app.close().unwrap();
    }

    let app = Motivator::open(&path, Config::default()).unwrap();
    let events = app.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "persisted");
    assert_eq!(events[0].data.get("value"), Some(&json!(42)));
}

#[test]
fn test_event_context_is_captured() {
    let dir = tempdir().unwrap();
    let app = Motivator::open(dir.path().join("motiv.db"), Config::default()).unwrap();

    app.record_event("ctx_check", BTreeMap::new());

    let events = app.events();
    assert_eq!(events[0].context.app_version, env!("CARGO_PKG_VERSION"));
    assert!(!events[0].context.platform.is_empty());
}

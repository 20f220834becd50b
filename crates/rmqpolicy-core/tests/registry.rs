//! Registry lookup and keyword-argument construction.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use rmqpolicy_core::error::ErrorCode;
use rmqpolicy_core::registry::build;
use rmqpolicy_core::{ApplyTo, HaMode, Policy, PolicyArgs, PolicyType};

fn args(v: Value) -> PolicyArgs {
    match v {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn tags_map_to_variants() {
    assert_eq!("generic".parse::<PolicyType>().unwrap(), PolicyType::Generic);
    assert_eq!("ha".parse::<PolicyType>().unwrap(), PolicyType::Ha);
    assert_eq!("ttl".parse::<PolicyType>().unwrap(), PolicyType::Ttl);
    for t in PolicyType::ALL {
        assert_eq!(t.tag().parse::<PolicyType>().unwrap(), t);
    }
    let err = "federation".parse::<PolicyType>().unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownPolicyType);
}

#[test]
fn missing_type_means_generic() {
    let p = build(&args(json!({ "vhost": "/", "name": "HA" }))).unwrap();
    assert_eq!(p.policy_type(), PolicyType::Generic);
    assert_eq!(p.target().type_tag(), "generic");
    assert!(p.target().pattern().is_none());
}

#[test]
fn ttl_entry_coerces_fields() {
    let p = build(&args(json!({
        "type": "ttl",
        "vhost": "openstack",
        "name": "TTL",
        "pattern": "foo",
        "apply_to": "all",
        "priority": 0,
        "ttl": "3600",
        "message_ttl": false,
    })))
    .unwrap();

    let Policy::Ttl(ttl) = &p else {
        panic!("expected ttl, got {p}");
    };
    assert_eq!(ttl.ttl(), 3600);
    assert!(!ttl.message_ttl());
    assert_eq!(p.target().apply_to(), ApplyTo::All);
    assert_eq!(p.target().priority(), "0");
    assert_eq!(p.definition().as_deref(), Some(r#"{"experies":3600}"#));
}

#[test]
fn ttl_rejects_non_numeric_ttl() {
    let err = build(&args(json!({
        "type": "ttl", "vhost": "/", "name": "TTL", "pattern": "foo", "ttl": "an hour",
    })))
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Coercion);
}

#[test]
fn ttl_truthiness_for_message_ttl() {
    let p = build(&args(json!({
        "type": "ttl", "vhost": "/", "name": "TTL", "pattern": "foo", "message_ttl": 0,
    })))
    .unwrap();
    let Policy::Ttl(ttl) = p else { panic!() };
    assert!(!ttl.message_ttl());
}

#[test]
fn ha_entry_validates_modes() {
    let p = build(&args(json!({
        "type": "ha",
        "vhost": "openstack",
        "name": "HA",
        "pattern": "foo",
        "params": ["rabbit@a", "rabbit@b"],
        "mode": "nodes",
        "sync_mode": "manual",
    })))
    .unwrap();
    let Policy::Ha(ha) = &p else { panic!() };
    assert_eq!(ha.mode(), HaMode::Nodes);
    assert_eq!(ha.params(), Some(&json!(["rabbit@a", "rabbit@b"])));

    let err = build(&args(json!({
        "type": "ha", "vhost": "/", "name": "HA", "pattern": "foo", "mode": "bar",
    })))
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidEnumValue);
}

#[test]
fn typed_variants_require_pattern() {
    for tag in ["ttl", "ha"] {
        let err = build(&args(json!({ "type": tag, "vhost": "/", "name": "x" }))).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadArguments, "{tag}");
    }
}

#[test]
fn arguments_of_another_variant_are_rejected() {
    let err = build(&args(json!({
        "type": "ttl", "vhost": "/", "name": "TTL", "pattern": "foo", "mode": "all",
    })))
    .unwrap_err();
    assert_eq!(err.to_string(), "unexpected argument: mode");

    let err = build(&args(json!({
        "vhost": "/", "name": "HA", "ttl": 5,
    })))
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadArguments);
}

#[test]
fn generic_definition_object_is_serialized() {
    let p = build(&args(json!({
        "vhost": "/",
        "name": "lazy",
        "pattern": "^lazy\\.",
        "definition": { "queue-mode": "lazy" },
        "apply_to": "queues",
    })))
    .unwrap();
    let def: Value = serde_json::from_str(&p.definition().unwrap()).unwrap();
    assert_eq!(def, json!({ "queue-mode": "lazy" }));
}

#[test]
fn invalid_apply_to_fails_construction() {
    let err = build(&args(json!({
        "type": "ttl", "vhost": "openstack", "name": "TTL", "pattern": "foo", "apply_to": "bar",
    })))
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidEnumValue);
}

//! Request chaining workflow tests
//!
//! Simulates a run of several steps: resolve a request, take values out of a
//! canned response with capture directives, and feed them into the next
//! request through the store.

use super::deterministic_resolver;
use request_templates::capture::{apply_captures, parse_capture_directives, CaptureError};
use request_templates::store::{Scope, StoreSnapshot, VariableStore};
use serde_json::json;

#[test]
fn test_login_then_profile_chain() {
    let mut store = VariableStore::new();
    store.set_global("baseUrl", json!("https://api.example.com"));

    let login = {
        let resolver = deterministic_resolver(&store);
        resolver
            .resolve(&json!({
                "url": "{{baseUrl}}/auth/login",
                "body": {"username": "{{$faker.internet.email}}", "password": "secret"}
            }))
            .unwrap()
    };
    assert_eq!(login["body"]["username"], "ada@example.com");

    let login_response = json!({
        "token": "jwt-abc",
        "user": {"id": 42, "roles": ["reader", "writer"]}
    });
    let directives = parse_capture_directives(
        "# @capture global authToken = $.token\n\
         # @capture userId = $.user.id\n\
         # @capture local primaryRole = $.user.roles[0]",
    );
    apply_captures(&mut store, &directives, &login_response).unwrap();

    let resolver = deterministic_resolver(&store);
    let profile = resolver
        .resolve(&json!({
            "url": "{{baseUrl}}/users/{{userId}}",
            "headers": {"Authorization": "Bearer {{authToken}}"},
            "body": {"id": "{{userId}}", "role": "{{primaryRole}}"}
        }))
        .unwrap();

    assert_eq!(
        profile,
        json!({
            "url": "https://api.example.com/users/42",
            "headers": {"Authorization": "Bearer jwt-abc"},
            "body": {"id": 42, "role": "reader"}
        })
    );
}

#[test]
fn test_globals_survive_step_boundary() {
    let mut store = VariableStore::new();

    let directives = parse_capture_directives(
        "# @capture global sessionId = $.session\n# @capture stepValue = $.value",
    );
    apply_captures(&mut store, &directives, &json!({"session": "s-1", "value": 9})).unwrap();

    // next step
    store.clear_local();

    let resolver = deterministic_resolver(&store);
    assert_eq!(resolver.resolve_str("{{sessionId}}").unwrap(), "s-1");
    assert_eq!(
        resolver.resolve(&json!("{{stepValue|gone}}")).unwrap(),
        json!("gone")
    );
}

#[test]
fn test_captured_objects_keep_their_type() {
    let mut store = VariableStore::new();
    let directives = parse_capture_directives("# @capture user = $.data.user");
    apply_captures(
        &mut store,
        &directives,
        &json!({"data": {"user": {"id": 1, "tags": ["a"]}}}),
    )
    .unwrap();

    let resolver = deterministic_resolver(&store);
    assert_eq!(
        resolver.resolve(&json!({"echo": "{{user}}"})).unwrap(),
        json!({"echo": {"id": 1, "tags": ["a"]}})
    );
    assert_eq!(
        resolver.resolve(&json!("user={{user}}")).unwrap(),
        json!(r#"user={"id":1,"tags":["a"]}"#)
    );
}

#[test]
fn test_missing_capture_path_reported() {
    let mut store = VariableStore::new();
    let directives = parse_capture_directives("# @capture token = $.access_token");

    let result = apply_captures(&mut store, &directives, &json!({"error": "unauthorized"}));
    assert!(matches!(
        result,
        Err(CaptureError::PathNotFound { variable, .. }) if variable == "token"
    ));
    assert!(!store.has("token"));
}

#[test]
fn test_snapshot_restores_run_state() {
    let mut store = VariableStore::new();
    store.set(Scope::Global, "baseUrl", json!("https://api.example.com"));
    store.set(Scope::Local, "token", json!("t-1"));

    let saved = store.export_snapshot().to_json().unwrap();

    store.clear_all();
    assert!(store.is_empty());

    store.import_snapshot(StoreSnapshot::from_json(&saved).unwrap());
    let resolver = deterministic_resolver(&store);
    assert_eq!(
        resolver.resolve_str("{{baseUrl}}?t={{token}}").unwrap(),
        "https://api.example.com?t=t-1"
    );
}

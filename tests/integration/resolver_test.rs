//! End-to-end template resolution tests
//!
//! Resolve whole request templates through the public API with
//! deterministic providers, the process environment, `.env` files and
//! loaded configuration.

use super::{deterministic_resolver, init_test_env, FIXED_TIMESTAMP};
use request_templates::clock::FixedClock;
use request_templates::config::{load_config, ResolverConfig};
use request_templates::environment::{DotenvFile, LayeredEnvironment};
use request_templates::store::VariableStore;
use request_templates::template::{ResolveError, TemplateResolver};
use serde_json::json;
use serial_test::serial;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn request_store() -> VariableStore {
    let mut store = VariableStore::new();
    store.set_global("baseUrl", json!("https://api.example.com"));
    store.set_global("pageSize", json!(25));
    store.set_local("user", json!({"id": 7, "tags": ["admin", "qa"]}));
    store
}

#[test]
fn test_resolve_full_request() {
    let store = request_store();
    let resolver = deterministic_resolver(&store);

    let request = json!({
        "method": "POST",
        "url": "{{baseUrl}}/users/{{user.id}}?limit={{pageSize}}",
        "headers": {
            "Authorization": "Bearer {{$env.API_TOKEN}}",
            "X-Region": "{{$env.REGION}}"
        },
        "body": {
            "id": "{{user.id}}",
            "firstTag": "{{user.tags[0]}}",
            "name": "{{$faker.name.firstName}}",
            "email": "{{$faker.internet.email}}",
            "createdAt": "{{$date.timestamp}}",
            "day": "{{$date.format('YYYY-MM-DD')}}",
            "retries": "{{retries|3}}",
            "active": true
        }
    });

    let resolved = resolver.resolve(&request).unwrap();

    assert_eq!(
        resolved,
        json!({
            "method": "POST",
            "url": "https://api.example.com/users/7?limit=25",
            "headers": {
                "Authorization": "Bearer token-123",
                "X-Region": "eu-west-1"
            },
            "body": {
                "id": 7,
                "firstTag": "admin",
                "name": "Ada",
                "email": "ada@example.com",
                "createdAt": FIXED_TIMESTAMP,
                "day": "2024-01-31",
                "retries": 3,
                "active": true
            }
        })
    );
}

#[test]
fn test_resolution_preserves_key_order() {
    let store = request_store();
    let resolver = deterministic_resolver(&store);

    let resolved = resolver
        .resolve(&json!({"z": 1, "a": "{{pageSize}}", "m": [3, 2, 1]}))
        .unwrap();
    let keys: Vec<&String> = resolved.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_error_aborts_whole_template() {
    let store = request_store();
    let resolver = deterministic_resolver(&store);

    let result = resolver.resolve(&json!({
        "url": "{{baseUrl}}",
        "headers": {"X-Trace": "{{traceId}}"}
    }));
    assert_eq!(
        result,
        Err(ResolveError::UnresolvedVariable("traceId".to_string()))
    );
}

#[test]
fn test_local_cleared_between_steps() {
    let mut store = request_store();
    store.set_local("pageSize", json!(5));

    {
        let resolver = deterministic_resolver(&store);
        assert_eq!(resolver.resolve_str("{{pageSize}}").unwrap(), "5");
    }

    store.clear_local();
    let resolver = deterministic_resolver(&store);
    assert_eq!(resolver.resolve_str("{{pageSize}}").unwrap(), "25");
    assert!(resolver.resolve(&json!("{{user.id}}")).is_err());
}

#[test]
fn test_english_faker_produces_fresh_values() {
    init_test_env();
    let store = VariableStore::new();
    let resolver = TemplateResolver::new(&store);

    let resolved = resolver
        .resolve(&json!({
            "first": "{{$faker.name.firstName}}",
            "email": "{{$faker.internet.email}}",
            "ids": ["{{$faker.datatype.uuid}}", "{{$faker.datatype.uuid}}"]
        }))
        .unwrap();

    assert!(resolved["first"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(resolved["email"].as_str().unwrap().contains('@'));
    assert_ne!(resolved["ids"][0], resolved["ids"][1]);
}

#[test]
#[serial]
fn test_process_environment() {
    init_test_env();
    std::env::set_var("REQUEST_TEMPLATES_IT_HOST", "localhost:8080");

    let store = VariableStore::new();
    let resolver = TemplateResolver::new(&store);
    let result = resolver.resolve_str("http://{{$env.REQUEST_TEMPLATES_IT_HOST}}/health");

    std::env::remove_var("REQUEST_TEMPLATES_IT_HOST");
    assert_eq!(result.unwrap(), "http://localhost:8080/health");

    assert_eq!(
        resolver.resolve(&serde_json::Value::String(
            "{{$env.REQUEST_TEMPLATES_IT_HOST}}".to_string()
        )),
        Err(ResolveError::UndefinedEnvironmentVariable(
            "REQUEST_TEMPLATES_IT_HOST".to_string()
        ))
    );
}

#[test]
fn test_dotenv_layered_over_overrides() {
    init_test_env();
    let temp_dir = TempDir::new().unwrap();
    let dotenv_path = temp_dir.path().join(".env");
    fs::write(
        &dotenv_path,
        "API_HOST=dev.example.com # local api\nREGION=dotenv-region\nexport SECRET=\"s3cret\"\n",
    )
    .unwrap();

    let overrides: HashMap<String, String> =
        [("REGION".to_string(), "override-region".to_string())]
            .into_iter()
            .collect();
    let layered = LayeredEnvironment::new()
        .with(Arc::new(overrides))
        .with(Arc::new(DotenvFile::load(&dotenv_path).unwrap()));

    let store = VariableStore::new();
    let resolver = TemplateResolver::builder(&store).environment(layered).build();

    assert_eq!(
        resolver.resolve_str("https://{{$env.API_HOST}}/v2").unwrap(),
        "https://dev.example.com/v2"
    );
    assert_eq!(resolver.resolve_str("{{$env.REGION}}").unwrap(), "override-region");
    assert_eq!(resolver.resolve_str("{{$env.SECRET}}").unwrap(), "s3cret");
}

#[test]
fn test_loaded_config_applies() {
    init_test_env();
    let config = load_config(Some(json!({
        "template-resolver": {
            "maxDepth": 3,
            "dateFormat": "timestamp",
            "randomStringCharset": "x"
        }
    })))
    .unwrap();

    let store = VariableStore::new();
    let resolver = TemplateResolver::builder(&store)
        .config(config)
        .unwrap()
        .clock(FixedClock::from_timestamp(FIXED_TIMESTAMP).unwrap())
        .build();

    assert_eq!(
        resolver.resolve(&json!("{{$date.now}}")).unwrap(),
        json!(FIXED_TIMESTAMP.to_string())
    );
    assert_eq!(
        resolver.resolve(&json!("{{$random.string(4)}}")).unwrap(),
        json!("xxxx")
    );
    assert_eq!(
        resolver.resolve(&json!([[[["deep"]]]])),
        Err(ResolveError::DepthExceeded(3))
    );
    assert!(resolver.resolve(&json!([[["ok"]]])).is_ok());
}

#[test]
fn test_invalid_config_rejected() {
    assert!(load_config(Some(json!({"template-resolver": {"maxDepth": 0}}))).is_err());

    let store = VariableStore::new();
    let config = ResolverConfig {
        random_string_charset: String::new(),
        ..Default::default()
    };
    assert!(TemplateResolver::builder(&store).config(config).is_err());
}

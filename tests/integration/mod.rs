//! Shared setup for integration tests.

pub mod properties_test;
pub mod request_chaining_test;
pub mod resolver_test;

use request_templates::clock::FixedClock;
use request_templates::faker::FakerCatalog;
use request_templates::store::VariableStore;
use request_templates::template::TemplateResolver;
use std::collections::HashMap;
use std::sync::Once;

static INIT: Once = Once::new();

/// 2024-01-31T12:05:09Z
pub const FIXED_TIMESTAMP: i64 = 1_706_702_709;

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A resolver with deterministic providers: fixed clock, a small faker
/// catalog and an in-memory environment.
pub fn deterministic_resolver(store: &VariableStore) -> TemplateResolver<'_> {
    init_test_env();

    let env: HashMap<String, String> = [
        ("API_TOKEN", "token-123"),
        ("REGION", "eu-west-1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let faker = FakerCatalog::builder()
        .value("name.firstName", serde_json::json!("Ada"))
        .value("internet.email", serde_json::json!("ada@example.com"))
        .build();

    let clock = match FixedClock::from_timestamp(FIXED_TIMESTAMP) {
        Some(clock) => clock,
        None => panic!("fixed timestamp out of range"),
    };

    TemplateResolver::builder(store)
        .environment(env)
        .faker(faker)
        .clock(clock)
        .build()
}

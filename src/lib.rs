//! Request templating for API test runners
//!
//! This crate turns request templates into concrete requests. A template is
//! any JSON-shaped value whose strings may contain `{{...}}` placeholders:
//!
//! ```text
//! {
//!   "url": "{{baseUrl}}/users/{{userId}}",
//!   "headers": {"Authorization": "Bearer {{$env.API_TOKEN}}"},
//!   "body": {"id": "{{$random.uuid}}", "name": "{{$faker.name.firstName}}"}
//! }
//! ```
//!
//! # Architecture
//!
//! - **store**: two-scope variable store (global and local) with snapshots
//! - **template**: placeholder parsing and recursive resolution
//! - **functions**: built-in `$faker`, `$math`, `$date`, `$random` and `$env`
//!   namespaces behind a pluggable registry
//! - **faker**: fake-data catalogs backing `$faker`
//! - **environment**: environment variable sources, including `.env` files
//! - **capture**: `@capture` directives that move response values into the
//!   store
//! - **config**: resolver settings
//! - **clock**: time source used by `$date`
//!
//! # Request chaining
//!
//! A typical run resolves a request, sends it, captures values from the
//! response into the store, then resolves the next request with them:
//!
//! ```
//! use request_templates::capture::{apply_captures, parse_capture_directives};
//! use request_templates::store::VariableStore;
//! use request_templates::template::TemplateResolver;
//! use serde_json::json;
//!
//! let mut store = VariableStore::new();
//! store.set_global("baseUrl", json!("https://api.example.com"));
//!
//! let login_response = json!({"token": "abc123"});
//! let directives = parse_capture_directives("# @capture global token = $.token");
//! apply_captures(&mut store, &directives, &login_response).unwrap();
//!
//! let resolver = TemplateResolver::new(&store);
//! let next = resolver
//!     .resolve(&json!({"auth": "Bearer {{token}}", "url": "{{baseUrl}}/me"}))
//!     .unwrap();
//! assert_eq!(next["auth"], "Bearer abc123");
//! ```

pub mod capture;
pub mod clock;
pub mod config;
pub mod environment;
pub mod faker;
pub mod functions;
pub mod store;
pub mod template;
pub mod value;

pub use capture::{apply_captures, parse_capture_directives, CaptureDirective, CaptureError};
pub use config::{load_config, ResolverConfig};
pub use store::{Scope, StoreSnapshot, VariableStore};
pub use template::{ResolveError, TemplateResolver};
pub use value::TemplateValue;

//! Fake-data providers for the `$faker` namespace
//!
//! A provider is a tree addressed by dotted path. Inner nodes are groups,
//! leaves are either plain values or zero-argument generators:
//!
//! ```text
//! name
//! ├── firstName   (generator)
//! └── lastName    (generator)
//! app
//! └── version     (value "1.0")
//! ```
//!
//! `{{$faker.name.firstName}}` invokes the generator once per placeholder
//! occurrence; `{{$faker.app.version}}` returns the value as-is.
//!
//! # Example
//!
//! ```
//! use request_templates::faker::{FakeDataProvider, FakerCatalog};
//! use serde_json::json;
//!
//! let catalog = FakerCatalog::builder()
//!     .value("app.version", json!("1.0"))
//!     .generator("name.firstName", || json!("Ada"))
//!     .build();
//!
//! assert!(catalog.lookup("name.firstName").is_some());
//! ```

mod english;

use crate::value::TemplateValue;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// English catalog shared by resolvers that are not given a provider.
static SHARED_ENGLISH: Lazy<Arc<FakerCatalog>> = Lazy::new(|| Arc::new(FakerCatalog::english()));

/// Zero-argument generator producing a fresh value on each call.
pub type Generator = Arc<dyn Fn() -> TemplateValue + Send + Sync>;

/// A node in a fake-data tree.
#[derive(Clone)]
pub enum FakerNode {
    /// A plain value returned as-is
    Value(TemplateValue),
    /// A generator invoked on every access
    Generator(Generator),
    /// Named children
    Group(BTreeMap<String, FakerNode>),
}

impl FakerNode {
    /// Creates an empty group.
    pub fn group() -> Self {
        FakerNode::Group(BTreeMap::new())
    }

    /// Returns the child with the given name, if this node is a group.
    pub fn child(&self, name: &str) -> Option<&FakerNode> {
        match self {
            FakerNode::Group(children) => children.get(name),
            _ => None,
        }
    }
}

impl fmt::Debug for FakerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FakerNode::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FakerNode::Generator(_) => f.write_str("Generator(..)"),
            FakerNode::Group(children) => f.debug_map().entries(children.iter()).finish(),
        }
    }
}

/// Read-only source of fake data, addressed by dotted path.
pub trait FakeDataProvider: Send + Sync {
    /// Root of the fake-data tree.
    fn root(&self) -> &FakerNode;

    /// Convenience lookup of a dotted path.
    fn lookup(&self, path: &str) -> Option<&FakerNode> {
        path.split('.')
            .try_fold(self.root(), |node, segment| node.child(segment))
    }
}

/// A fake-data tree built in code.
#[derive(Debug, Clone)]
pub struct FakerCatalog {
    root: FakerNode,
}

impl FakerCatalog {
    /// Starts an empty catalog.
    pub fn builder() -> FakerCatalogBuilder {
        FakerCatalogBuilder {
            root: FakerNode::group(),
        }
    }

    /// English catalog backed by the `fake` crate.
    ///
    /// Covers `name`, `internet`, `phone`, `address`, `company`, `lorem`
    /// and `datatype`.
    pub fn english() -> Self {
        english::catalog()
    }

    /// The English catalog, built once and shared.
    pub fn shared_english() -> Arc<FakerCatalog> {
        Arc::clone(&SHARED_ENGLISH)
    }

    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self::builder().build()
    }
}

impl Default for FakerCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl FakeDataProvider for FakerCatalog {
    fn root(&self) -> &FakerNode {
        &self.root
    }
}

/// Builder for [`FakerCatalog`].
pub struct FakerCatalogBuilder {
    root: FakerNode,
}

impl FakerCatalogBuilder {
    /// Adds a plain value at a dotted path.
    pub fn value(self, path: &str, value: TemplateValue) -> Self {
        self.insert(path, FakerNode::Value(value))
    }

    /// Adds a generator at a dotted path.
    pub fn generator<F>(self, path: &str, generator: F) -> Self
    where
        F: Fn() -> TemplateValue + Send + Sync + 'static,
    {
        self.insert(path, FakerNode::Generator(Arc::new(generator)))
    }

    /// Inserts a node at a dotted path, creating intermediate groups.
    ///
    /// A leaf sitting where a group is needed is replaced by a group.
    pub fn insert(mut self, path: &str, node: FakerNode) -> Self {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        if let Some((last, parents)) = segments.split_last() {
            let mut current = &mut self.root;
            for segment in parents {
                current = group_children(current)
                    .entry(segment.to_string())
                    .or_insert_with(FakerNode::group);
            }
            group_children(current).insert(last.to_string(), node);
        }
        self
    }

    /// Finishes the catalog.
    pub fn build(self) -> FakerCatalog {
        FakerCatalog { root: self.root }
    }
}

fn group_children(node: &mut FakerNode) -> &mut BTreeMap<String, FakerNode> {
    if !matches!(node, FakerNode::Group(_)) {
        *node = FakerNode::group();
    }
    match node {
        FakerNode::Group(children) => children,
        _ => unreachable!("node was just replaced by a group"),
    }
}

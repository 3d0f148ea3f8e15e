//! # Binding Configurator
//!
//! Per-label visual configuration for nodes and relationships, and the
//! machinery that turns it into renderer mappings.
//!
//! A configuration value is a [`Binding`]:
//!
//! | Variant | Resolves to |
//! |---------|-------------|
//! | `Constant(v)` | `v`, verbatim |
//! | `PropertyRef(name)` | the item's `name` property, or `name` itself when the item has none |
//! | `Dynamic(f)` | `f(item)`, verbatim |
//!
//! Strings convert into `PropertyRef`, so `.color("colour")` picks up a
//! `colour` property where one exists and is the literal `"colour"` elsewhere.

pub mod palette;
pub mod mapping;
pub mod group;
pub mod hierarchy;
pub mod configurator;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::model::{ItemRef, Value, LABEL_KEY};

pub use palette::{ColorPalette, SharedPalette, COLOR_PALETTE};
pub use mapping::{configuration_mapper, item_text, DefaultPolicy, LABEL_KEYS};
pub use group::{resolve_group, synthesize_group_nodes, GroupTarget, GROUP_NODE_PREFIX};
pub use hierarchy::{convert_parent_relationships, ParentConfigurations};
pub use configurator::BindingConfigurator;

/// Configuration key addressing every label.
pub const WILDCARD: &str = "*";
/// User-facing alias for the `label` binding.
pub const TEXT_KEY: &str = "text";
/// Node grouping binding.
pub const PARENT_CONFIGURATION_KEY: &str = "parent_configuration";
/// Heat binding, shared by nodes and relationships.
pub const HEAT_KEY: &str = "heat";

// ============================================================================
// Binding
// ============================================================================

/// Function of the item a dynamic binding evaluates.
pub type DynamicFn = Arc<dyn Fn(ItemRef<'_>) -> Value + Send + Sync>;

/// A configured attribute value.
#[derive(Clone)]
pub enum Binding {
    Constant(Value),
    PropertyRef(String),
    Dynamic(DynamicFn),
}

impl Binding {
    pub fn constant(value: impl Into<Value>) -> Self {
        Binding::Constant(value.into())
    }

    pub fn property(name: impl Into<String>) -> Self {
        Binding::PropertyRef(name.into())
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(ItemRef<'_>) -> Value + Send + Sync + 'static,
    {
        Binding::Dynamic(Arc::new(f))
    }

    /// Evaluate for one item.
    pub fn resolve(&self, item: ItemRef<'_>) -> Value {
        match self {
            Binding::Constant(v) => v.clone(),
            Binding::PropertyRef(name) => item.get(name)
                .cloned()
                .unwrap_or_else(|| Value::String(name.clone())),
            Binding::Dynamic(f) => f(item),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Binding::PropertyRef(name) => f.debug_tuple("PropertyRef").field(name).finish(),
            Binding::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Binding { fn from(v: &str) -> Self { Binding::PropertyRef(v.to_owned()) } }
impl From<String> for Binding { fn from(v: String) -> Self { Binding::PropertyRef(v) } }
impl From<Value> for Binding { fn from(v: Value) -> Self { Binding::Constant(v) } }
impl From<bool> for Binding { fn from(v: bool) -> Self { Binding::Constant(v.into()) } }
impl From<i64> for Binding { fn from(v: i64) -> Self { Binding::Constant(v.into()) } }
impl From<f64> for Binding { fn from(v: f64) -> Self { Binding::Constant(v.into()) } }
impl From<serde_json::Value> for Binding {
    fn from(v: serde_json::Value) -> Self { Binding::Constant(v.into()) }
}

// ============================================================================
// Item configuration
// ============================================================================

/// Attribute bindings for one label.
#[derive(Debug, Clone, Default)]
pub struct ItemConfiguration {
    bindings: HashMap<String, Binding>,
}

impl ItemConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`. `text` is stored as `label`.
    pub fn set(&mut self, key: &str, binding: impl Into<Binding>) {
        let key = if key == TEXT_KEY { LABEL_KEY } else { key };
        self.bindings.insert(key.to_owned(), binding.into());
    }

    pub fn with(mut self, key: &str, binding: impl Into<Binding>) -> Self {
        self.set(key, binding);
        self
    }

    pub fn text(self, binding: impl Into<Binding>) -> Self { self.with(TEXT_KEY, binding) }
    pub fn color(self, binding: impl Into<Binding>) -> Self { self.with("color", binding) }
    pub fn size(self, binding: impl Into<Binding>) -> Self { self.with("size", binding) }
    pub fn styles(self, binding: impl Into<Binding>) -> Self { self.with("styles", binding) }
    pub fn thickness_factor(self, binding: impl Into<Binding>) -> Self { self.with("thickness_factor", binding) }
    pub fn heat(self, binding: impl Into<Binding>) -> Self { self.with(HEAT_KEY, binding) }

    pub fn parent_configuration(self, binding: impl Into<Binding>) -> Self {
        self.with(PARENT_CONFIGURATION_KEY, binding)
    }

    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: AsRef<str>, B: Into<Binding>> FromIterator<(K, B)> for ItemConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, B)>>(iter: I) -> Self {
        let mut config = ItemConfiguration::new();
        for (k, b) in iter {
            config.set(k.as_ref(), b);
        }
        config
    }
}

// ============================================================================
// Labels argument
// ============================================================================

/// One label or several, as accepted by the add/del operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labels(SmallVec<[String; 1]>);

impl Labels {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }
}

impl From<&str> for Labels {
    fn from(v: &str) -> Self { Labels(smallvec::smallvec![v.to_owned()]) }
}
impl From<String> for Labels {
    fn from(v: String) -> Self { Labels(smallvec::smallvec![v]) }
}
impl From<&[&str]> for Labels {
    fn from(v: &[&str]) -> Self { Labels(v.iter().map(|s| s.to_string()).collect()) }
}
impl<const N: usize> From<[&str; N]> for Labels {
    fn from(v: [&str; N]) -> Self { Labels(v.iter().map(|s| s.to_string()).collect()) }
}
impl From<Vec<&str>> for Labels {
    fn from(v: Vec<&str>) -> Self { Labels(v.into_iter().map(str::to_owned).collect()) }
}
impl From<Vec<String>> for Labels {
    fn from(v: Vec<String>) -> Self { Labels(v.into_iter().collect()) }
}

// ============================================================================
// Configuration table
// ============================================================================

/// label → attribute bindings, with `*` as per-attribute fallback.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationTable {
    entries: HashMap<String, ItemConfiguration>,
}

impl ConfigurationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration of every label in `labels`.
    pub fn insert(&mut self, labels: impl Into<Labels>, config: ItemConfiguration) {
        for label in labels.into().iter() {
            self.entries.insert(label.to_owned(), config.clone());
        }
    }

    /// Remove the configuration of every label in `labels`; `*` clears the table.
    pub fn remove(&mut self, labels: impl Into<Labels>) {
        for label in labels.into().iter() {
            if label == WILDCARD {
                self.entries.clear();
            }
            self.entries.remove(label);
        }
    }

    pub fn get(&self, label: &str) -> Option<&ItemConfiguration> {
        self.entries.get(label)
    }

    /// Binding for `key` on `label`, falling back to the wildcard entry
    /// when the label's own entry does not define `key`.
    pub fn lookup(&self, label: &str, key: &str) -> Option<&Binding> {
        self.lookup_exact(label, key)
            .or_else(|| self.lookup_exact(WILDCARD, key))
    }

    pub fn lookup_exact(&self, label: &str, key: &str) -> Option<&Binding> {
        self.entries.get(label).and_then(|c| c.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of both tables; `other` wins on shared labels.
    pub fn merged(&self, other: &ConfigurationTable) -> ConfigurationTable {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        ConfigurationTable { entries }
    }
}

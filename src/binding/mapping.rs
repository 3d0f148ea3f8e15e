//! Mapper factory: configuration table + default policy → renderer mapping.

use std::sync::Arc;

use crate::model::{ItemRef, Value};
use crate::render::{mapping, Mapping};
use super::{ConfigurationTable, SharedPalette};

/// Property keys tried, in order, for an item's default text.
pub const LABEL_KEYS: [&str; 6] = ["name", "title", "text", "description", "caption", "label"];

/// What a mapping yields when no configuration entry defines the attribute.
#[derive(Clone)]
pub enum DefaultPolicy {
    /// First `LABEL_KEYS` property, stringified; null when none matches.
    ItemText,
    /// Palette color memoized per label.
    Palette(SharedPalette),
    /// The renderer's own default mapping.
    Renderer(Mapping),
}

impl DefaultPolicy {
    pub fn apply(&self, index: usize, item: ItemRef<'_>) -> Value {
        match self {
            DefaultPolicy::ItemText => item_text(item).map(Value::String).unwrap_or(Value::Null),
            DefaultPolicy::Palette(palette) => Value::from(palette.lock().color_for(item.label())),
            DefaultPolicy::Renderer(mapping) => mapping(index, item),
        }
    }
}

/// Build the mapping for configuration key `key`.
///
/// `label` → exact entry → wildcard entry → `fallback`.
pub fn configuration_mapper(
    key: &'static str,
    configurations: Arc<ConfigurationTable>,
    fallback: DefaultPolicy,
) -> Mapping {
    mapping(move |index, item| match configurations.lookup(item.label(), key) {
        Some(binding) => binding.resolve(item),
        None => fallback.apply(index, item),
    })
}

/// Default text of an item: the first property whose lower-cased key is in
/// `LABEL_KEYS`, in `LABEL_KEYS` order.
pub fn item_text(item: ItemRef<'_>) -> Option<String> {
    let props = item.properties();
    LABEL_KEYS.iter().find_map(|candidate| {
        props.iter()
            .find(|(key, _)| key.to_lowercase() == *candidate)
            .map(|(_, value)| value.to_string())
    })
}

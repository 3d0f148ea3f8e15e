//! PropertyMap: the key-value bag on raw elements and widget items.

use std::collections::HashMap;
use super::Value;

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;

/// Collect (key, value) pairs into a `PropertyMap`.
pub fn property_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Drop every entry whose value is null.
pub fn strip_nulls(props: &mut PropertyMap) {
    props.retain(|_, v| !v.is_null());
}

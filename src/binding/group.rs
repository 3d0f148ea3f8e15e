//! Group-node synthesis from `parent_configuration` bindings.

use std::collections::HashSet;

use crate::model::{GraphNode, ItemRef, Value};
use super::{Binding, ConfigurationTable, ItemConfiguration, PARENT_CONFIGURATION_KEY, TEXT_KEY};

/// Prefix of synthesized group node ids.
pub const GROUP_NODE_PREFIX: &str = "GroupNode";

/// Where a node is grouped.
#[derive(Debug, Clone)]
pub struct GroupTarget {
    /// Group label; the group node id is `GroupNode{label}`.
    pub label: String,
    /// Style entries of a `{text, ...}` descriptor, registered as the group
    /// label's node configuration.
    pub style: Option<ItemConfiguration>,
}

impl GroupTarget {
    pub fn node_id(&self) -> String {
        format!("{GROUP_NODE_PREFIX}{}", self.label)
    }
}

/// Resolve a `parent_configuration` binding for one node.
///
/// The binding first evaluates to a value (dynamic bindings are called,
/// constants taken as they are). A map is a descriptor grouping by its
/// `text`. A string names a property of the node when the node has it, and
/// the group is that property's value; otherwise the string is the group.
/// A constant string is always taken literally. Null means "no group".
pub fn resolve_group(binding: &Binding, node: ItemRef<'_>) -> Option<GroupTarget> {
    let (value, may_name_property) = match binding {
        Binding::Dynamic(f) => (f(node), true),
        Binding::PropertyRef(name) => (Value::String(name.clone()), true),
        Binding::Constant(v) => (v.clone(), false),
    };

    match value {
        Value::Null => None,
        Value::Map(descriptor) => {
            let label = descriptor.get(TEXT_KEY).map(Value::to_string).unwrap_or_default();
            let style = descriptor.into_iter()
                .filter(|(k, _)| k != TEXT_KEY)
                .map(|(k, v)| (k, Binding::Constant(v)))
                .collect();
            Some(GroupTarget { label, style: Some(style) })
        }
        Value::String(s) if may_name_property => match node.get(&s) {
            Some(Value::Null) => None,
            Some(property) => Some(GroupTarget { label: property.to_string(), style: None }),
            None => Some(GroupTarget { label: s, style: None }),
        },
        other => Some(GroupTarget { label: other.to_string(), style: None }),
    }
}

/// One group node per distinct group label among `nodes`, in first-seen order.
///
/// Only nodes whose own label carries a `parent_configuration` entry take
/// part. Descriptor styles are written into `configurations` under the
/// group label.
pub fn synthesize_group_nodes(nodes: &[GraphNode], configurations: &mut ConfigurationTable) -> Vec<GraphNode> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();

    for node in nodes {
        let Some(binding) = configurations.lookup_exact(node.label(), PARENT_CONFIGURATION_KEY) else {
            continue;
        };
        let Some(target) = resolve_group(binding, ItemRef::Node(node)) else {
            continue;
        };
        if let Some(style) = &target.style {
            configurations.insert(target.label.as_str(), style.clone());
        }
        if seen.insert(target.label.clone()) {
            groups.push(GraphNode::new(target.node_id(), target.label));
        }
    }

    tracing::debug!(groups = groups.len(), "synthesized group nodes");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn city(id: i64, country: &str) -> GraphNode {
        GraphNode::new(format!("City_{id}"), "City").with_property("country", country)
    }

    #[test]
    fn test_one_group_node_per_value() {
        let mut configs = ConfigurationTable::new();
        configs.insert("City", ItemConfiguration::new().parent_configuration("country"));
        let nodes = vec![city(1, "NL"), city(2, "NL"), city(3, "NL"), city(4, "BE")];

        let groups = synthesize_group_nodes(&nodes, &mut configs);
        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["GroupNodeNL", "GroupNodeBE"]);
        assert_eq!(groups[0].label(), "NL");
    }

    #[test]
    fn test_literal_group_when_not_a_property() {
        let mut configs = ConfigurationTable::new();
        configs.insert("City", ItemConfiguration::new().parent_configuration("Cities"));
        let groups = synthesize_group_nodes(&[city(1, "NL"), city(2, "BE")], &mut configs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "GroupNodeCities");
    }

    #[test]
    fn test_descriptor_registers_style() {
        let mut configs = ConfigurationTable::new();
        configs.insert(
            "City",
            ItemConfiguration::new().parent_configuration(json!({"text": "Europe", "color": "#0000FF"})),
        );
        let groups = synthesize_group_nodes(&[city(1, "NL")], &mut configs);
        assert_eq!(groups[0].id, "GroupNodeEurope");

        let style = configs.get("Europe").expect("group style registered");
        let group = &groups[0];
        assert_eq!(style.get("color").unwrap().resolve(ItemRef::Node(group)), Value::from("#0000FF"));
        assert!(!style.contains("text"));
    }

    #[test]
    fn test_dynamic_result_may_name_a_property() {
        let binding = Binding::dynamic(|_| Value::from("country"));
        let node = city(1, "NL");
        let target = resolve_group(&binding, ItemRef::Node(&node)).unwrap();
        assert_eq!(target.label, "NL");
    }

    #[test]
    fn test_wildcard_does_not_group() {
        let mut configs = ConfigurationTable::new();
        configs.insert("*", ItemConfiguration::new().parent_configuration("country"));
        assert!(synthesize_group_nodes(&[city(1, "NL")], &mut configs).is_empty());
    }
}

//! The binding configurator: configuration state plus its application to a
//! renderer for one display.

use std::sync::Arc;

use crate::model::Value;
use crate::render::{mapping, EdgeAttribute, Mapping, NodeAttribute, Renderer};
use super::*;

/// Node/relationship configuration tables, parent relationship types and
/// the color memo. Lives as long as the widget host.
#[derive(Debug, Clone)]
pub struct BindingConfigurator {
    node_configurations: ConfigurationTable,
    edge_configurations: ConfigurationTable,
    parent_configurations: ParentConfigurations,
    palette: SharedPalette,
}

impl Default for BindingConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingConfigurator {
    pub fn new() -> Self {
        Self {
            node_configurations: ConfigurationTable::new(),
            edge_configurations: ConfigurationTable::new(),
            parent_configurations: ParentConfigurations::new(),
            palette: ColorPalette::shared(),
        }
    }

    // ========================================================================
    // Configuration state
    // ========================================================================

    pub fn add_node_configuration(&mut self, labels: impl Into<Labels>, config: ItemConfiguration) {
        self.node_configurations.insert(labels, config);
    }

    pub fn add_relationship_configuration(&mut self, types: impl Into<Labels>, config: ItemConfiguration) {
        self.edge_configurations.insert(types, config);
    }

    pub fn add_parent_relationship_configuration(&mut self, types: impl Into<Labels>, reverse: bool) {
        self.parent_configurations.add(types, reverse);
    }

    pub fn del_node_configuration(&mut self, labels: impl Into<Labels>) {
        self.node_configurations.remove(labels);
    }

    pub fn del_relationship_configuration(&mut self, types: impl Into<Labels>) {
        self.edge_configurations.remove(types);
    }

    pub fn del_parent_relationship_configuration(&mut self, types: impl Into<Labels>) {
        self.parent_configurations.remove(types);
    }

    pub fn node_configurations(&self) -> &ConfigurationTable {
        &self.node_configurations
    }

    pub fn edge_configurations(&self) -> &ConfigurationTable {
        &self.edge_configurations
    }

    pub fn parent_configurations(&self) -> &ParentConfigurations {
        &self.parent_configurations
    }

    pub fn palette(&self) -> SharedPalette {
        self.palette.clone()
    }

    /// Palette color handed to `label` so far, if any.
    pub fn assigned_color(&self, label: &str) -> Option<&'static str> {
        self.palette.lock().assigned_color(label)
    }

    // ========================================================================
    // Application
    // ========================================================================

    /// Install everything on `widget`, which already holds the normalized graph.
    ///
    /// Order matters: group nodes exist before the node mappings are built,
    /// and relationship-derived parents override group parents.
    pub fn apply<R: Renderer>(&mut self, widget: &mut R) {
        self.create_group_nodes(widget);
        self.apply_node_mappings(widget);
        self.apply_edge_mappings(widget);
        self.apply_heat_mapping(widget);
        self.apply_parent_mapping(widget);
    }

    fn create_group_nodes<R: Renderer>(&mut self, widget: &mut R) {
        let groups = synthesize_group_nodes(widget.nodes(), &mut self.node_configurations);
        if !groups.is_empty() {
            let mut nodes = widget.nodes().to_vec();
            nodes.extend(groups);
            widget.set_nodes(nodes);
        }
    }

    fn apply_node_mappings<R: Renderer>(&self, widget: &mut R) {
        let configurations = Arc::new(self.node_configurations.clone());
        for attribute in NodeAttribute::ALL {
            let fallback = match attribute {
                NodeAttribute::Label => DefaultPolicy::ItemText,
                NodeAttribute::Color => DefaultPolicy::Palette(self.palette.clone()),
                other => DefaultPolicy::Renderer(widget.default_node_mapping(other)),
            };
            let mapper = configuration_mapper(attribute.key(), configurations.clone(), fallback);
            widget.set_node_mapping(attribute, mapper);
        }
        widget.set_node_parent_mapping(group_parent_mapping(configurations));
    }

    fn apply_edge_mappings<R: Renderer>(&self, widget: &mut R) {
        let configurations = Arc::new(self.edge_configurations.clone());
        for attribute in EdgeAttribute::ALL {
            let fallback = match attribute {
                EdgeAttribute::Label => DefaultPolicy::ItemText,
                EdgeAttribute::Color => DefaultPolicy::Palette(self.palette.clone()),
                other => DefaultPolicy::Renderer(widget.default_edge_mapping(other)),
            };
            let mapper = configuration_mapper(attribute.key(), configurations.clone(), fallback);
            widget.set_edge_mapping(attribute, mapper);
        }
    }

    fn apply_heat_mapping<R: Renderer>(&self, widget: &mut R) {
        let merged = self.node_configurations.merged(&self.edge_configurations);
        let fallback = DefaultPolicy::Renderer(widget.default_heat_mapping());
        widget.set_heat_mapping(configuration_mapper(HEAT_KEY, Arc::new(merged), fallback));
    }

    fn apply_parent_mapping<R: Renderer>(&self, widget: &mut R) {
        let (kept, node_to_parent) =
            convert_parent_relationships(widget.edges().to_vec(), &self.parent_configurations);
        widget.set_edges(kept);

        let current = widget.node_parent_mapping();
        widget.set_node_parent_mapping(mapping(move |index, item| {
            match node_to_parent.get(item.id()) {
                Some(parent) => Value::from(parent.as_str()),
                None => current(index, item),
            }
        }));
    }
}

/// Node → `GroupNode{label}` for nodes whose label configures a group.
fn group_parent_mapping(configurations: Arc<ConfigurationTable>) -> Mapping {
    mapping(move |_, item| {
        configurations.lookup_exact(item.label(), PARENT_CONFIGURATION_KEY)
            .and_then(|binding| resolve_group(binding, item))
            .map(|target| Value::String(target.node_id()))
            .unwrap_or(Value::Null)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetOptions;
    use crate::model::{GraphEdge, GraphNode};
    use crate::render::GraphWidget;

    fn widget() -> GraphWidget {
        let mut w = GraphWidget::new(WidgetOptions::default());
        w.set_nodes(vec![
            GraphNode::new("City_1", "City").with_property("name", "Delft").with_property("country", "NL"),
            GraphNode::new("City_2", "City").with_property("name", "Gent").with_property("country", "BE"),
            GraphNode::new("Region_1", "Region").with_property("name", "Randstad"),
        ]);
        w.set_edges(vec![
            GraphEdge::new("City_Region_0", "City_1", "Region_1", "PART_OF"),
            GraphEdge::new("City_City_0", "City_1", "City_2", "ROAD").with_property("km", 150),
        ]);
        w
    }

    #[test]
    fn test_relationship_parent_overrides_group_parent() {
        let mut configurator = BindingConfigurator::new();
        configurator.add_node_configuration("City", ItemConfiguration::new().parent_configuration("country"));
        configurator.add_parent_relationship_configuration("PART_OF", false);

        let mut w = widget();
        configurator.apply(&mut w);

        assert_eq!(w.nodes().len(), 5);
        assert_eq!(w.edges().len(), 1);
        assert_eq!(w.parent_of("City_1").as_deref(), Some("Region_1"));
        assert_eq!(w.parent_of("City_2").as_deref(), Some("GroupNodeBE"));
        assert_eq!(w.parent_of("Region_1"), None);
    }

    #[test]
    fn test_edge_bindings() {
        let mut configurator = BindingConfigurator::new();
        configurator.add_relationship_configuration(
            "ROAD",
            ItemConfiguration::new().thickness_factor("km").text(Binding::constant("road")),
        );
        let mut w = widget();
        configurator.apply(&mut w);

        assert_eq!(w.edge_value("City_City_0", EdgeAttribute::ThicknessFactor), Some(Value::Int(150)));
        assert_eq!(w.edge_value("City_City_0", EdgeAttribute::Label), Some(Value::from("road")));
        assert_eq!(w.edge_value("City_Region_0", EdgeAttribute::ThicknessFactor), Some(Value::Float(1.0)));
    }

    #[test]
    fn test_colors_shared_across_nodes_and_edges() {
        let mut configurator = BindingConfigurator::new();
        let mut w = widget();
        configurator.apply(&mut w);

        let city = w.node_value("City_1", NodeAttribute::Color).unwrap();
        let region = w.node_value("Region_1", NodeAttribute::Color).unwrap();
        let road = w.edge_value("City_City_0", EdgeAttribute::Color).unwrap();
        assert_eq!(city, Value::from(COLOR_PALETTE[0]));
        assert_eq!(region, Value::from(COLOR_PALETTE[1]));
        assert_eq!(road, Value::from(COLOR_PALETTE[2]));
        assert_eq!(configurator.assigned_color("City"), Some(COLOR_PALETTE[0]));
    }

    #[test]
    fn test_heat_from_either_table() {
        let mut configurator = BindingConfigurator::new();
        configurator.add_node_configuration("City", ItemConfiguration::new().heat(Binding::constant(0.5)));
        configurator.add_relationship_configuration("ROAD", ItemConfiguration::new().heat(Binding::constant(0.25)));
        let mut w = widget();
        configurator.apply(&mut w);

        let heat = w.heat_mapping();
        let city = GraphNode::new("City_9", "City");
        let road = GraphEdge::new("e", "a", "b", "ROAD");
        assert_eq!(heat(0, crate::model::ItemRef::Node(&city)), Value::Float(0.5));
        assert_eq!(heat(0, crate::model::ItemRef::Edge(&road)), Value::Float(0.25));
    }
}

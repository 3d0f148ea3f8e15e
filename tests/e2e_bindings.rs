//! End-to-end tests for the binding configurator against `GraphWidget`.
//!
//! Graphs are built directly as `GraphNode`/`GraphEdge` so each test only
//! exercises the binding layer.

use kuzu_graph_widget::binding::ColorPalette;
use kuzu_graph_widget::{
    Binding, BindingConfigurator, EdgeAttribute, GraphEdge, GraphNode, GraphWidget, ItemConfiguration,
    NodeAttribute, Renderer, Value, WidgetOptions, COLOR_PALETTE,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn widget(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphWidget {
    let mut w = GraphWidget::new(WidgetOptions::default());
    w.set_nodes(nodes);
    w.set_edges(edges);
    w
}

fn person(n: i64) -> GraphNode {
    GraphNode::new(format!("Person_{n}"), "Person")
        .with_property("name", format!("p{n}"))
        .with_property("team", "core")
}

// ============================================================================
// 1. Precedence
// ============================================================================

#[test]
fn test_label_entry_then_wildcard_then_default() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration("*", ItemConfiguration::new().color(Binding::constant("gray")));
    configurator.add_node_configuration("Person", ItemConfiguration::new().color(Binding::constant("blue")));

    let mut w = widget(vec![person(1), GraphNode::new("City_1", "City")], vec![]);
    configurator.apply(&mut w);

    assert_eq!(w.node_value("Person_1", NodeAttribute::Color), Some(Value::from("blue")));
    assert_eq!(w.node_value("City_1", NodeAttribute::Color), Some(Value::from("gray")));
    // no entry defines size anywhere: renderer default
    assert_eq!(w.node_value("City_1", NodeAttribute::Size), Some(Value::from(json!([55, 55]))));
    // nobody asked the palette
    assert_eq!(configurator.assigned_color("City"), None);
}

#[test]
fn test_dynamic_result_is_used_verbatim() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration(
        "Person",
        ItemConfiguration::new()
            .text(Binding::dynamic(|_| Value::from("team")))
            .color("team"),
    );

    let mut w = widget(vec![person(1)], vec![]);
    configurator.apply(&mut w);

    // the dynamic string is not looked up as a property
    assert_eq!(w.node_value("Person_1", NodeAttribute::Label), Some(Value::from("team")));
    // a plain string is
    assert_eq!(w.node_value("Person_1", NodeAttribute::Color), Some(Value::from("core")));
}

#[test]
fn test_deleted_configuration_falls_back() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration(["Person", "City"], ItemConfiguration::new().text(Binding::constant("x")));
    configurator.del_node_configuration("Person");

    let mut w = widget(vec![person(1), GraphNode::new("City_1", "City")], vec![]);
    configurator.apply(&mut w);

    assert_eq!(w.node_value("Person_1", NodeAttribute::Label), Some(Value::from("p1")));
    assert_eq!(w.node_value("City_1", NodeAttribute::Label), Some(Value::from("x")));
}

// ============================================================================
// 2. Palette
// ============================================================================

#[test]
fn test_palette_wraps_after_eight_labels() {
    let labels: Vec<String> = (0..9).map(|i| format!("L{i}")).collect();
    let nodes = labels.iter().map(|l| GraphNode::new(format!("{l}_1"), l.as_str())).collect();

    let mut configurator = BindingConfigurator::new();
    let mut w = widget(nodes, vec![]);
    configurator.apply(&mut w);

    let colors: Vec<_> = labels.iter()
        .map(|l| w.node_value(&format!("{l}_1"), NodeAttribute::Color).unwrap())
        .collect();
    for (i, color) in colors.iter().enumerate() {
        assert_eq!(color, &Value::from(COLOR_PALETTE[i % COLOR_PALETTE.len()]));
    }
    assert_eq!(colors[8], colors[0]);
}

#[test]
fn test_nodes_and_edges_share_the_palette() {
    let mut configurator = BindingConfigurator::new();
    let mut w = widget(
        vec![person(1), person(2)],
        vec![GraphEdge::new("Person_Person_0", "Person_1", "Person_2", "Person")],
    );
    configurator.apply(&mut w);

    assert_eq!(
        w.node_value("Person_1", NodeAttribute::Color),
        w.edge_value("Person_Person_0", EdgeAttribute::Color),
    );
}

proptest! {
    #[test]
    fn prop_palette_is_stable_per_label(labels in prop::collection::vec("[a-c]{1,2}", 1..40)) {
        let mut palette = ColorPalette::new();
        let first: Vec<_> = labels.iter().map(|l| palette.color_for(l)).collect();
        let again: Vec<_> = labels.iter().map(|l| palette.color_for(l)).collect();
        prop_assert_eq!(first, again);
    }
}

// ============================================================================
// 3. Grouping and hierarchy
// ============================================================================

#[test]
fn test_one_group_node_per_value() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration("Person", ItemConfiguration::new().parent_configuration("team"));

    let mut w = widget(vec![person(1), person(2), person(3)], vec![]);
    configurator.apply(&mut w);

    assert_eq!(w.nodes().len(), 4);
    assert_eq!(w.nodes().iter().filter(|n| n.id == "GroupNodecore").count(), 1);
    for n in 1..=3 {
        assert_eq!(w.parent_of(&format!("Person_{n}")).as_deref(), Some("GroupNodecore"));
    }
}

#[test]
fn test_group_descriptor_styles_the_group_node() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration(
        "Person",
        ItemConfiguration::new().parent_configuration(Binding::dynamic(|_| {
            Value::from(json!({"text": "Staff", "color": "#ff0000"}))
        })),
    );

    let mut w = widget(vec![person(1)], vec![]);
    configurator.apply(&mut w);

    assert_eq!(w.node_value("GroupNodeStaff", NodeAttribute::Color), Some(Value::from("#ff0000")));
    assert_eq!(w.parent_of("Person_1").as_deref(), Some("GroupNodeStaff"));
}

#[test]
fn test_reversed_parent_relationship() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_parent_relationship_configuration("CONTAINS", true);

    let mut w = widget(
        vec![GraphNode::new("Box_1", "Box"), GraphNode::new("Item_1", "Item")],
        vec![
            GraphEdge::new("Box_Item_0", "Box_1", "Item_1", "CONTAINS"),
            GraphEdge::new("Item_Box_1", "Item_1", "Box_1", "NEAR"),
        ],
    );
    configurator.apply(&mut w);

    assert_eq!(w.parent_of("Item_1").as_deref(), Some("Box_1"));
    assert_eq!(w.parent_of("Box_1"), None);
    let kept: Vec<_> = w.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(kept, vec!["Item_Box_1"]);
}

#[test]
fn test_removed_parent_type_stays_an_edge() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_parent_relationship_configuration("CONTAINS", true);
    configurator.del_parent_relationship_configuration("CONTAINS");

    let mut w = widget(
        vec![GraphNode::new("Box_1", "Box"), GraphNode::new("Item_1", "Item")],
        vec![GraphEdge::new("Box_Item_0", "Box_1", "Item_1", "CONTAINS")],
    );
    configurator.apply(&mut w);

    assert_eq!(w.edges().len(), 1);
    assert_eq!(w.parent_of("Item_1"), None);
}

// ============================================================================
// 4. Heat
// ============================================================================

#[test]
fn test_heat_for_nodes_and_edges() {
    let mut configurator = BindingConfigurator::new();
    configurator.add_node_configuration("Person", ItemConfiguration::new().heat(Binding::constant(0.5)));
    configurator.add_relationship_configuration("KNOWS", ItemConfiguration::new().heat("weight"));

    let mut w = widget(
        vec![person(1), person(2)],
        vec![GraphEdge::new("Person_Person_0", "Person_1", "Person_2", "KNOWS").with_property("weight", 0.9)],
    );
    configurator.apply(&mut w);

    let snap = w.snapshot();
    assert_eq!(snap["nodes"][0]["heat"], json!(0.5));
    assert_eq!(snap["edges"][0]["heat"], json!(0.9));
}

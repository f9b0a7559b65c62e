//! Conversions between attribute text and typed record fields.
//!
//! These helpers are shared by [`crate::parse`] and [`crate::serialize`] and
//! never fail: missing or malformed geometry reads as `0`.

use archimate_core::{
    Attributes, Bounds, SourceConnection, Style,
    schema::{strip_type_prefix, with_type_prefix},
};
use log::trace;

use crate::markup::Node;

pub(crate) const XSI_TYPE: &str = "xsi:type";
pub(crate) const BOUNDS: &str = "bounds";
pub(crate) const BENDPOINT: &str = "bendpoint";
pub(crate) const DOCUMENTATION: &str = "documentation";
pub(crate) const SOURCE_CONNECTION: &str = "sourceConnection";

const SOURCE_CONNECTION_ATTRIBUTES: [&str; 6] = [
    XSI_TYPE,
    "id",
    "name",
    "source",
    "target",
    "archimateRelationship",
];

/// Parses one coordinate, defaulting to `0` when the text is missing or is
/// not a finite number.
///
/// # Examples
///
/// ```
/// # use archimate_parser::codec::parse_coordinate;
/// assert_eq!(parse_coordinate(Some("12.5")), 12.5);
/// assert_eq!(parse_coordinate(Some("wide")), 0.0);
/// assert_eq!(parse_coordinate(None), 0.0);
/// ```
pub fn parse_coordinate(text: Option<&str>) -> f64 {
    text.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or_default()
}

/// Formats a coordinate the way it is stored; integral values carry no
/// fractional part.
pub fn format_coordinate(value: f64) -> String {
    value.to_string()
}

/// Reads bounds from a `bounds` node; a missing node yields zero bounds.
pub fn bounds_from_node(node: Option<&Node>) -> Bounds {
    let Some(node) = node else {
        return Bounds::default();
    };
    Bounds::new(
        parse_coordinate(node.attribute("x")),
        parse_coordinate(node.attribute("y")),
        parse_coordinate(node.attribute("width")),
        parse_coordinate(node.attribute("height")),
    )
}

/// Writes bounds as a `bounds` node.
pub fn bounds_to_node(bounds: &Bounds) -> Node {
    Node::new(BOUNDS)
        .with_attribute("x", format_coordinate(bounds.x))
        .with_attribute("y", format_coordinate(bounds.y))
        .with_attribute("width", format_coordinate(bounds.width))
        .with_attribute("height", format_coordinate(bounds.height))
}

/// Reads the style attributes of a node.
pub fn style_from_node(node: &Node) -> Style {
    let mut style = Style::default();
    for attribute in Style::ATTRIBUTES {
        if let Some(value) = node.attribute(attribute) {
            style.set(attribute, value);
        }
    }
    style
}

/// Writes the set style attributes onto a node.
pub fn style_to_node(style: &Style, node: &mut Node) {
    for (attribute, value) in style.iter() {
        node.set_attribute(attribute, value);
    }
}

/// Collects the attributes of `node` that are neither in `known` nor style
/// attributes.
pub(crate) fn extra_attributes(node: &Node, known: &[&str]) -> Attributes {
    node.attributes
        .iter()
        .filter(|(name, _)| {
            !known.contains(&name.as_str()) && !Style::ATTRIBUTES.contains(&name.as_str())
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Reads a `sourceConnection` node.
pub fn source_connection_from_node(node: &Node) -> SourceConnection {
    let connection = SourceConnection {
        id: node.attribute("id").unwrap_or_default().to_string(),
        kind: strip_type_prefix(node.attribute(XSI_TYPE).unwrap_or_default()).to_string(),
        name: node.attribute("name").map(str::to_string),
        source: node.attribute("source").unwrap_or_default().to_string(),
        target: node.attribute("target").unwrap_or_default().to_string(),
        archimate_relationship: node.attribute("archimateRelationship").map(str::to_string),
        style: style_from_node(node),
        documentation: node.child_text(DOCUMENTATION).map(str::to_string),
        attributes: extra_attributes(node, &SOURCE_CONNECTION_ATTRIBUTES),
        bendpoints: node
            .children_named(BENDPOINT)
            .map(|bendpoint| bendpoint.attributes.clone())
            .collect(),
    };
    trace!(id = connection.id; "Read source connection");
    connection
}

/// Writes a `sourceConnection` node.
pub fn source_connection_to_node(connection: &SourceConnection) -> Node {
    let mut node = Node::new(SOURCE_CONNECTION)
        .with_attribute(XSI_TYPE, with_type_prefix(&connection.kind))
        .with_attribute("id", &connection.id);
    if let Some(name) = &connection.name {
        node.set_attribute("name", name);
    }
    style_to_node(&connection.style, &mut node);
    node.set_attribute("source", &connection.source);
    node.set_attribute("target", &connection.target);
    if let Some(relationship) = &connection.archimate_relationship {
        node.set_attribute("archimateRelationship", relationship);
    }
    for (name, value) in &connection.attributes {
        node.set_attribute(name, value);
    }

    for bendpoint in &connection.bendpoints {
        let mut bendpoint_node = Node::new(BENDPOINT);
        bendpoint_node.attributes = bendpoint.clone();
        node.push(bendpoint_node);
    }
    if let Some(documentation) = &connection.documentation {
        node.push(Node::new(DOCUMENTATION).with_text(documentation));
    }
    node
}

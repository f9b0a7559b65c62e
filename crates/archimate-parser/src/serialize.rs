//! [`Model`] to node tree.
//!
//! The output always carries all nine folders in their fixed order, under
//! their canonical display names. Optional fields are only written when set.

use archimate_core::{
    Child, Element, Folder, FolderKey, Model, Properties,
    schema::{
        ARCHIMATE_NAMESPACE, MODEL_ID, MODEL_VERSION, ROOT_NODE, XSI_NAMESPACE, with_type_prefix,
    },
};
use log::debug;

use crate::{
    codec::{DOCUMENTATION, XSI_TYPE, bounds_to_node, source_connection_to_node, style_to_node},
    markup::Node,
};

/// Builds the document root node for `model`.
pub fn serialize_model(model: &Model) -> Node {
    let mut root = Node::new(ROOT_NODE)
        .with_attribute("xmlns:xsi", XSI_NAMESPACE)
        .with_attribute("xmlns:archimate", ARCHIMATE_NAMESPACE)
        .with_attribute("name", &model.name)
        .with_attribute("id", MODEL_ID)
        .with_attribute("version", MODEL_VERSION);

    for (key, folder) in model.folders() {
        root.push(folder_to_node(folder, Some(key)));
    }
    if let Some(purpose) = &model.purpose {
        root.push(Node::new("purpose").with_text(purpose));
    }
    if let Some(properties) = &model.properties {
        push_properties(&mut root, properties);
    }

    debug!(name = model.name, elements = model.element_count(); "Model serialized");
    root
}

fn folder_to_node(folder: &Folder, key: Option<FolderKey>) -> Node {
    let name = match key {
        Some(key) => key.display_name(),
        None => folder.name.as_str(),
    };
    let mut node = Node::new("folder")
        .with_attribute("name", name)
        .with_attribute("id", &folder.id);
    if let Some(key) = key {
        node.set_attribute("type", key.as_str());
    }

    for subfolder in &folder.folders {
        node.push(folder_to_node(subfolder, None));
    }
    for element in folder.elements() {
        node.push(element_to_node(element));
    }
    node
}

fn push_properties(node: &mut Node, properties: &Properties) {
    for (key, value) in properties.iter() {
        node.push(
            Node::new("property")
                .with_attribute("key", key)
                .with_attribute("value", value),
        );
    }
}

fn element_to_node(element: &Element) -> Node {
    let mut node = Node::new("element")
        .with_attribute(XSI_TYPE, with_type_prefix(&element.kind))
        .with_attribute("name", &element.name)
        .with_attribute("id", &element.id);
    if let (Some(source), Some(target)) = (&element.source, &element.target) {
        node.set_attribute("source", source);
        node.set_attribute("target", target);
    }
    for (name, value) in &element.attributes {
        node.set_attribute(name, value);
    }

    if let Some(documentation) = &element.documentation {
        node.push(Node::new(DOCUMENTATION).with_text(documentation));
    }
    if let Some(properties) = &element.properties {
        push_properties(&mut node, properties);
    }
    for child in &element.children {
        node.push(child_to_node(child));
    }
    node
}

fn child_to_node(child: &Child) -> Node {
    let mut node = Node::new("child")
        .with_attribute(XSI_TYPE, with_type_prefix(&child.kind))
        .with_attribute("id", &child.id);
    if let Some(name) = &child.name {
        node.set_attribute("name", name);
    }
    style_to_node(&child.style, &mut node);
    if let Some(target_connections) = &child.target_connections {
        node.set_attribute("targetConnections", target_connections);
    }
    if let Some(archimate_element) = &child.archimate_element {
        node.set_attribute("archimateElement", archimate_element);
    }
    for (name, value) in &child.attributes {
        node.set_attribute(name, value);
    }

    node.push(bounds_to_node(&child.bounds));
    if let Some(content) = &child.content {
        node.push(Node::new("content").with_text(content));
    }
    if let Some(documentation) = &child.documentation {
        node.push(Node::new(DOCUMENTATION).with_text(documentation));
    }
    for connection in &child.source_connections {
        node.push(source_connection_to_node(connection));
    }
    for nested in &child.children {
        node.push(child_to_node(nested));
    }
    node
}
